//! Service layer. Built per request from [`AppState`](crate::AppState) parts.

pub mod documents;
pub mod inventory;

pub use documents::{DocumentService, GeneratedFile};
pub use inventory::{InventoryService, MovementInput, ProductInput, SaleReceipt};

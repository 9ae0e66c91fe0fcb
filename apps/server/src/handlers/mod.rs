//! HTTP request handlers

pub mod documents;
pub mod health;
pub mod ledger;
pub mod products;

pub use documents::*;
pub use health::*;
pub use ledger::*;
pub use products::*;

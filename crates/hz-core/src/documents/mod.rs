//! # Documents
//!
//! Builders that turn ledger data into document layouts.
//!
//! ```text
//! Sale + Product ──► invoice::build_invoice ─────► layout::Document ──► PDF
//! Ledger joins  ──► movements::build_movement_report ─► layout::Document ──► PDF
//! Catalog       ──► inventory::build_inventory_sheet ─► sheet::Sheet ──► XLSX
//! ```
//!
//! Each builder is a pure function; writing files is hz-render's job.

pub mod inventory;
pub mod invoice;
pub mod movements;

pub use inventory::{build_inventory_sheet, INVENTORY_FILE_NAME};
pub use invoice::{build_invoice, Invoice};
pub use movements::{build_movement_report, MovementReport, MOVEMENT_REPORT_FILE_NAME};

/// Pads or truncates `text` to exactly `width` characters, left aligned.
pub(crate) fn fit_left(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{truncated:<width$}")
}

//! # hz-render: PDF and Spreadsheet Output
//!
//! Thin backends that draw what hz-core lays out. No layout decision is made
//! here: positions, fonts, merges and widths all come from the input.
//!
//! ## Modules
//!
//! - [`pdf`] - [`hz_core::layout::Document`] → PDF
//! - [`xlsx`] - [`hz_core::sheet::Sheet`] → XLSX
//! - [`error`] - [`RenderError`]
//!
//! ## Atomic Replacement
//! ```text
//! reporte_inv.xlsx requested twice at the same time
//!
//!   request A ──► reporte_inv.xlsx.<uuid-a>.tmp ──rename──┐
//!   request B ──► reporte_inv.xlsx.<uuid-b>.tmp ──rename──┼──► reporte_inv.xlsx
//!                                                         │
//!   readers only ever see a complete file ◄───────────────┘
//! ```

pub mod error;
pub mod pdf;
pub mod xlsx;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

pub use error::{RenderError, RenderResult};
pub use pdf::{save_pdf, write_pdf};
pub use xlsx::{save_xlsx, xlsx_bytes};

/// Writes a file through `write` into a unique sibling temp file, then
/// renames it over `target`.
///
/// On failure the temp file is removed and `target` is left as it was.
pub fn replace_atomically<F>(target: &Path, write: F) -> RenderResult<()>
where
    F: FnOnce(&Path) -> RenderResult<()>,
{
    let tmp = temp_sibling(target);
    debug!(target = %target.display(), tmp = %tmp.display(), "Writing through temp file");

    if let Err(err) = write(&tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    if let Err(err) = fs::rename(&tmp, target) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

fn temp_sibling(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!("{}.{}.tmp", name, Uuid::new_v4().simple()))
}

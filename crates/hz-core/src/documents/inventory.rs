//! # Inventory Spreadsheet
//!
//! ```text
//!      A      B           C       D
//!  1
//!  2  ┌──── INVENTARIO - HZ IMPRESIONES 3D ────┐   merged, bold 14
//!  3
//!  4   ID   Nombre      Stock   Precio (Q)        bold
//!  5   1    Gadget      15      Q 6.00
//!  6   ...
//! ```

use crate::sheet::{Cell, CellStyle, CellValue, Sheet};
use crate::types::Product;

pub const INVENTORY_FILE_NAME: &str = "reporte_inv.xlsx";
pub const INVENTORY_SHEET_NAME: &str = "Inventario";

/// Zero-based index of the column header row.
pub const HEADER_ROW: usize = 3;

/// Zero-based index of the first product row.
pub const FIRST_DATA_ROW: usize = 4;

const HEADERS: [&str; 4] = ["ID", "Nombre", "Stock", "Precio (Q)"];

/// Builds the inventory sheet, one row per product in the given order.
pub fn build_inventory_sheet(products: &[Product], business_name: &str) -> Sheet {
    let mut sheet = Sheet::new(INVENTORY_SHEET_NAME);

    sheet.push_blank_row();
    sheet.push_merged_row(
        0,
        HEADERS.len() - 1,
        Cell::new(
            CellValue::Text(format!("INVENTARIO - {}", business_name.to_uppercase())),
            CellStyle::centered().bold().size(14.0),
        ),
    );
    sheet.push_blank_row();

    let header_style = CellStyle::centered().bold();
    sheet.push_row(
        HEADERS
            .iter()
            .map(|h| Cell::new(CellValue::Text(h.to_string()), header_style))
            .collect(),
    );

    let data = CellStyle::centered();
    for product in products {
        sheet.push_row(vec![
            Cell::new(CellValue::Integer(product.id), data),
            Cell::new(CellValue::Text(product.name.clone()), data),
            Cell::new(CellValue::Integer(product.stock), data),
            Cell::new(CellValue::Money(product.price()), data.currency()),
        ]);
    }

    sheet.autofit_columns(HEADER_ROW, 2.0);
    sheet
}

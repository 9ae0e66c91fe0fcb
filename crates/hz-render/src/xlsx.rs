//! # XLSX Backend
//!
//! Writes a [`Sheet`] as a single-worksheet workbook.

use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use tracing::debug;

use crate::error::RenderResult;
use hz_core::sheet::{Cell, CellStyle, CellValue, Sheet, CURRENCY_FORMAT};

fn format_for(style: &CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if style.centered {
        format = format.set_align(FormatAlign::Center);
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    if style.currency {
        format = format.set_num_format(CURRENCY_FORMAT);
    }
    format
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> RenderResult<()> {
    let format = format_for(&cell.style);
    match &cell.value {
        CellValue::Text(text) => {
            worksheet.write_string_with_format(row, col, text, &format)?;
        }
        CellValue::Integer(n) => {
            worksheet.write_number_with_format(row, col, *n as f64, &format)?;
        }
        CellValue::Money(m) => {
            worksheet.write_number_with_format(row, col, m.to_major_f64(), &format)?;
        }
    }
    Ok(())
}

fn build_workbook(sheet: &Sheet) -> RenderResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name)?;

    for merge in &sheet.merges {
        worksheet.merge_range(
            merge.row as u32,
            merge.first_col as u16,
            merge.row as u32,
            merge.last_col as u16,
            &merge.cell.value.display(),
            &format_for(&merge.cell.style),
        )?;
    }

    for (row, cells) in sheet.rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Some(cell) = cell {
                write_cell(worksheet, row as u32, col as u16, cell)?;
            }
        }
    }

    for (col, width) in sheet.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    Ok(workbook)
}

/// Encodes `sheet` as XLSX bytes.
pub fn xlsx_bytes(sheet: &Sheet) -> RenderResult<Vec<u8>> {
    let mut workbook = build_workbook(sheet)?;
    Ok(workbook.save_to_buffer()?)
}

/// Writes `sheet` to an XLSX file at `path`.
pub fn save_xlsx(sheet: &Sheet, path: &Path) -> RenderResult<()> {
    let mut workbook = build_workbook(sheet)?;
    workbook.save(path)?;
    debug!(path = %path.display(), rows = sheet.row_count(), "Spreadsheet written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hz_core::documents::build_inventory_sheet;
    use hz_core::Product;

    fn catalog() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                name: "Gadget".to_string(),
                stock: 15,
                price_cents: 600,
            },
            Product {
                id: 2,
                name: "Llavero".to_string(),
                stock: 40,
                price_cents: 1500,
            },
        ]
    }

    #[test]
    fn test_xlsx_is_a_zip_container() {
        let sheet = build_inventory_sheet(&catalog(), "HZ Impresiones 3D");
        let bytes = xlsx_bytes(&sheet).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reporte_inv.xlsx");

        let sheet = build_inventory_sheet(&catalog(), "HZ Impresiones 3D");
        save_xlsx(&sheet, &path).unwrap();

        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_empty_catalog() {
        let sheet = build_inventory_sheet(&[], "HZ Impresiones 3D");
        assert!(xlsx_bytes(&sheet).is_ok());
    }
}

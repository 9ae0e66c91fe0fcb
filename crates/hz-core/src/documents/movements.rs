//! # Movement Report
//!
//! Purchases and sales listed one per line, paginated over as many A4 pages
//! as the ledgers need.

use chrono::NaiveDate;

use super::fit_left;
use crate::layout::{Document, Paginator, TextStyle};
use crate::types::{MovementEntry, MovementKind};

pub const MOVEMENT_REPORT_FILE_NAME: &str = "informe_HZ_movimientos.pdf";

const LEFT: f32 = 100.0;
const CENTER_X: f32 = 300.0;
const NAME_WIDTH: usize = 30;
const COLUMN_HEADER: &str = "ID | Producto | Cantidad | Fecha";

/// Input for [`build_movement_report`]. Entries are expected in id order.
#[derive(Debug, Clone)]
pub struct MovementReport {
    pub business_name: String,
    pub generated_on: NaiveDate,
    pub purchases: Vec<MovementEntry>,
    pub sales: Vec<MovementEntry>,
}

/// `"{id} | {name:<30} | {qty} | {timestamp}"`
pub fn format_movement_line(entry: &MovementEntry, kind: MovementKind) -> String {
    format!(
        "{} | {} | {} | {}",
        entry.id,
        fit_left(&entry.display_name(), NAME_WIDTH),
        entry.quantity,
        entry.timestamp_label(kind)
    )
}

pub fn build_movement_report(report: &MovementReport) -> Document {
    let body = TextStyle::regular(10.0);
    let mut pages = Paginator::a4(format!("Informe Compras y Ventas - {}", report.business_name));

    pages.place_centered(
        CENTER_X,
        800.0,
        format!("Informe Compras y Ventas - {}", report.business_name),
        TextStyle::bold(12.0),
    );
    pages.place_centered(
        CENTER_X,
        780.0,
        format!("Fecha: {}", report.generated_on.format("%Y-%m-%d")),
        body,
    );
    pages.move_to(750.0);

    write_section(&mut pages, "Compras realizadas:", &report.purchases, MovementKind::Purchase);
    pages.skip(1);
    write_section(&mut pages, "Ventas realizadas:", &report.sales, MovementKind::Sale);

    pages.finish()
}

fn write_section(
    pages: &mut Paginator,
    heading: &str,
    entries: &[MovementEntry],
    kind: MovementKind,
) {
    let body = TextStyle::regular(10.0);
    pages.write_line(LEFT, heading, body);
    pages.write_header(LEFT, COLUMN_HEADER, body);
    for entry in entries {
        pages.write_line(LEFT, format_movement_line(entry, kind), body);
    }
    pages.clear_repeating_header();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn entry(id: i64, name: Option<&str>, quantity: i64, at: &str) -> MovementEntry {
        MovementEntry {
            id,
            product_id: 100 + id,
            product_name: name.map(str::to_string),
            quantity,
            recorded_at: ts(at),
        }
    }

    fn report(purchases: Vec<MovementEntry>, sales: Vec<MovementEntry>) -> MovementReport {
        MovementReport {
            business_name: "HZ Impresiones 3D".to_string(),
            generated_on: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            purchases,
            sales,
        }
    }

    #[test]
    fn test_line_format() {
        let purchase = entry(3, Some("Gadget"), 5, "2024-03-09 10:15:00");
        assert_eq!(
            format_movement_line(&purchase, MovementKind::Purchase),
            format!("3 | Gadget{} | 5 | 2024-03-09 10:15", " ".repeat(24))
        );

        let sale = entry(7, Some("Gadget"), 15, "2024-03-09 11:00:42");
        assert!(format_movement_line(&sale, MovementKind::Sale).ends_with("| 15 | 2024-03-09 11:00:42"));
    }

    #[test]
    fn test_deleted_product_is_labelled() {
        let orphan = entry(1, None, 2, "2024-03-09 10:15:00");
        let line = format_movement_line(&orphan, MovementKind::Sale);
        assert!(line.starts_with("1 | (eliminado #101)"));
    }

    #[test]
    fn test_layout_of_short_report() {
        let doc = build_movement_report(&report(
            vec![entry(1, Some("Gadget"), 10, "2024-03-09 09:00:00")],
            vec![entry(1, Some("Gadget"), 15, "2024-03-09 12:30:10")],
        ));
        assert_eq!(doc.pages.len(), 1);
        let page = &doc.pages[0];

        assert_eq!(page.find("Informe Compras y Ventas - HZ Impresiones 3D").unwrap().y, 800.0);
        assert_eq!(page.find("Fecha: 2024-03-09").unwrap().y, 780.0);
        assert_eq!(page.find("Compras realizadas:").unwrap().y, 750.0);
        assert_eq!(page.find_prefix("1 | Gadget").unwrap().y, 710.0);
        // one blank line between the sections
        assert_eq!(page.find("Ventas realizadas:").unwrap().y, 670.0);

        let headers: Vec<_> = page.lines.iter().filter(|l| l.text == COLUMN_HEADER).collect();
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_long_ledger_paginates_with_repeated_header() {
        let purchases: Vec<_> = (1..=80)
            .map(|i| entry(i, Some("Filamento PLA"), 1, "2024-03-09 09:00:00"))
            .collect();
        let doc = build_movement_report(&report(purchases, Vec::new()));

        assert!(doc.pages.len() >= 3);
        for page in &doc.pages {
            assert!(page.lines.iter().all(|l| l.y >= 50.0));
        }
        for page in &doc.pages[1..] {
            assert_eq!(page.lines[0].text, COLUMN_HEADER);
        }

        // every purchase appears exactly once, in id order
        let ids: Vec<i64> = doc
            .lines()
            .filter(|l| l.text.contains("Filamento PLA"))
            .map(|l| l.text.split(" | ").next().unwrap().parse().unwrap())
            .collect();
        assert_eq!(ids, (1..=80).collect::<Vec<_>>());
    }
}

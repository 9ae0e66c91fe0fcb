//! # Invoice
//!
//! One sale, one line item, one A4 page.
//!
//! ```text
//!                    HZ Impresiones 3D                      y=800
//!                         FACTURA                           y=780
//!  Fecha: 2024-03-09 14:05:33                               y=750
//!  Detalles de la venta:                                    y=730
//!  ---------------------------------------------            y=710
//!  Producto         Cantidad   Precio Unitario   Total      y=690
//!  ---------------------------------------------            y=670
//!  Gadget           15         Q 6.00            Q 90.00    y=650
//!  ---------------------------------------------            y=610
//!                              Total a pagar:    Q 90.00    y=590
//!  x=50             x=250      x=350             x=450
//! ```

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::ValidationError;
use crate::layout::{Document, Paginator, TextStyle};
use crate::money::Money;

const COL_PRODUCT: f32 = 50.0;
const COL_QUANTITY: f32 = 250.0;
const COL_UNIT_PRICE: f32 = 350.0;
const COL_TOTAL: f32 = 450.0;
const CENTER_X: f32 = 300.0;

/// Everything printed on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub sale_id: i64,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub sold_at: NaiveDateTime,
    total: Money,
}

impl Invoice {
    /// Builds the invoice of one sale.
    ///
    /// Fails when `unit_price × quantity` does not fit in a [`Money`].
    pub fn new(
        sale_id: i64,
        product_name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
        sold_at: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        let total = unit_price
            .multiply_quantity(quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: i64::MAX / unit_price.cents().max(1),
            })?;
        Ok(Invoice {
            sale_id,
            product_name: product_name.into(),
            unit_price,
            quantity,
            sold_at,
            total,
        })
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// `Factura_000042_2024-03-09_14-05-33.pdf`
    ///
    /// The sale id keeps names unique even for sales in the same second.
    pub fn file_name(&self) -> String {
        format!(
            "Factura_{:06}_{}.pdf",
            self.sale_id,
            self.sold_at.format("%Y-%m-%d_%H-%M-%S")
        )
    }
}

/// Lays out the invoice page.
pub fn build_invoice(invoice: &Invoice, business_name: &str) -> Document {
    let body = TextStyle::regular(12.0);
    let rule = "-".repeat(100);
    let total = invoice.total().to_string();

    let mut page = Paginator::a4(format!("Factura {}", invoice.sale_id));

    page.place_centered(CENTER_X, 800.0, business_name, TextStyle::bold(16.0));
    page.place_centered(CENTER_X, 780.0, "FACTURA", TextStyle::bold(14.0));

    page.place(
        COL_PRODUCT,
        750.0,
        format!("Fecha: {}", invoice.sold_at.format("%Y-%m-%d %H:%M:%S")),
        body,
    );
    page.place(COL_PRODUCT, 730.0, "Detalles de la venta:", body);
    page.place(COL_PRODUCT, 710.0, rule.clone(), body);

    page.place(COL_PRODUCT, 690.0, "Producto", body);
    page.place(COL_QUANTITY, 690.0, "Cantidad", body);
    page.place(COL_UNIT_PRICE, 690.0, "Precio Unitario", body);
    page.place(COL_TOTAL, 690.0, "Total", body);
    page.place(COL_PRODUCT, 670.0, rule.clone(), body);

    page.place(COL_PRODUCT, 650.0, invoice.product_name.clone(), body);
    page.place(COL_QUANTITY, 650.0, invoice.quantity.to_string(), body);
    page.place(COL_UNIT_PRICE, 650.0, invoice.unit_price.to_string(), body);
    page.place(COL_TOTAL, 650.0, total.clone(), body);

    page.place(COL_PRODUCT, 610.0, rule, body);
    page.place(COL_UNIT_PRICE, 590.0, "Total a pagar:", TextStyle::bold(12.0));
    page.place(COL_TOTAL, 590.0, total, TextStyle::bold(12.0));

    page.finish()
}

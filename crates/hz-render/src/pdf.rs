//! # PDF Backend
//!
//! Draws a [`Document`] with the two built-in Helvetica faces. Coordinates
//! arrive in points and are converted to printpdf's millimetres.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, Pt};
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use hz_core::layout::{Document, Font};

const LAYER: &str = "Layer 1";

fn pdf_error(err: printpdf::Error) -> RenderError {
    RenderError::Pdf(format!("{err:?}"))
}

/// Encodes `document` as PDF into `out`.
pub fn write_pdf<W: Write>(document: &Document, out: W) -> RenderResult<()> {
    let width = Mm::from(Pt(document.width));
    let height = Mm::from(Pt(document.height));

    let (pdf, first_page, first_layer) =
        PdfDocument::new(document.title.as_str(), width, height, LAYER);
    let regular = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    for (index, page) in document.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            pdf.add_page(width, height, LAYER)
        };
        let layer = pdf.get_page(page_index).get_layer(layer_index);

        for line in &page.lines {
            let font: &IndirectFontRef = match line.style.font {
                Font::Regular => &regular,
                Font::Bold => &bold,
            };
            layer.use_text(
                line.text.as_str(),
                line.style.size,
                Mm::from(Pt(line.x)),
                Mm::from(Pt(line.y)),
                font,
            );
        }
    }

    let mut writer = BufWriter::new(out);
    pdf.save(&mut writer).map_err(pdf_error)?;
    writer.flush()?;

    debug!(title = %document.title, pages = document.pages.len(), "PDF encoded");
    Ok(())
}

/// Writes `document` to a file at `path`, replacing any existing file.
pub fn save_pdf(document: &Document, path: &Path) -> RenderResult<()> {
    let file = File::create(path)?;
    write_pdf(document, file)
}

//! # Page Layout
//!
//! Documents as data: pages of positioned text lines, measured in PDF points
//! with the origin at the bottom-left corner.
//!
//! ## Paginator
//! ```text
//! ┌──────────────────────────────┐  y = 841.89
//! │                              │
//! │  Title                       │  y = 800  (top)
//! │  ID | Producto | ...         │  ◄─ repeating header
//! │  1 | Gadget | 10 | ...       │  cursor moves down 20 pt per line
//! │  2 | Llavero | 3 | ...       │
//! │  ...                         │
//! │                              │  y = 50   (bottom)
//! └──────────────────────────────┘  y = 0
//!          │ cursor < bottom
//!          ▼
//! ┌──────────────────────────────┐
//! │  ID | Producto | ...         │  header repeated on the new page
//! │  37 | Soporte | 1 | ...      │
//! └──────────────────────────────┘
//! ```
//!
//! The PDF backend (hz-render) only draws what is described here.

use serde::Serialize;

/// A4 width in points.
pub const A4_WIDTH_PT: f32 = 595.28;

/// A4 height in points.
pub const A4_HEIGHT_PT: f32 = 841.89;

// =============================================================================
// Text
// =============================================================================

/// The two faces used by every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
}

impl TextStyle {
    pub const fn regular(size: f32) -> Self {
        TextStyle {
            font: Font::Regular,
            size,
        }
    }

    pub const fn bold(size: f32) -> Self {
        TextStyle {
            font: Font::Bold,
            size,
        }
    }
}

/// One run of text with its baseline origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub lines: Vec<TextLine>,
}

#[cfg(test)]
impl Page {
    /// Finds the first line whose text equals `text`.
    pub fn find(&self, text: &str) -> Option<&TextLine> {
        self.lines.iter().find(|line| line.text == text)
    }

    /// Finds the first line whose text starts with `prefix`.
    pub fn find_prefix(&self, prefix: &str) -> Option<&TextLine> {
        self.lines.iter().find(|line| line.text.starts_with(prefix))
    }
}

/// A finished, paginated document ready for a backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub pages: Vec<Page>,
}

#[cfg(test)]
impl Document {
    /// All lines of all pages, in drawing order.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }
}

/// Estimated rendered width of `text` in points.
///
/// Average Helvetica advance is about half an em; bold runs a little wider.
/// Good enough to centre a heading by eye.
pub fn approx_text_width(text: &str, style: TextStyle) -> f32 {
    let factor = match style.font {
        Font::Regular => 0.52,
        Font::Bold => 0.56,
    };
    text.chars().count() as f32 * style.size * factor
}

// =============================================================================
// Paginator
// =============================================================================

#[derive(Debug, Clone)]
struct RepeatingHeader {
    x: f32,
    text: String,
    style: TextStyle,
}

/// Lays out lines top to bottom and starts new pages when space runs out.
#[derive(Debug)]
pub struct Paginator {
    title: String,
    width: f32,
    height: f32,
    top: f32,
    bottom: f32,
    line_height: f32,
    cursor: f32,
    finished: Vec<Page>,
    current: Page,
    header: Option<RepeatingHeader>,
}

impl Paginator {
    /// A4 portrait, 20 pt lines between y = 800 and y = 50.
    pub fn a4(title: impl Into<String>) -> Self {
        Self::new(title, A4_WIDTH_PT, A4_HEIGHT_PT, 800.0, 50.0, 20.0)
    }

    pub fn new(
        title: impl Into<String>,
        width: f32,
        height: f32,
        top: f32,
        bottom: f32,
        line_height: f32,
    ) -> Self {
        Paginator {
            title: title.into(),
            width,
            height,
            top,
            bottom,
            line_height,
            cursor: top,
            finished: Vec::new(),
            current: Page::default(),
            header: None,
        }
    }

    /// Draws text at a fixed position on the current page. The cursor does
    /// not move.
    pub fn place(&mut self, x: f32, y: f32, text: impl Into<String>, style: TextStyle) {
        self.current.lines.push(TextLine {
            x,
            y,
            text: text.into(),
            style,
        });
    }

    /// Draws text horizontally centred on `center_x`.
    pub fn place_centered(
        &mut self,
        center_x: f32,
        y: f32,
        text: impl Into<String>,
        style: TextStyle,
    ) {
        let text = text.into();
        let x = center_x - approx_text_width(&text, style) / 2.0;
        self.place(x.max(0.0), y, text, style);
    }

    pub fn move_to(&mut self, y: f32) {
        self.cursor = y;
    }

    /// Leaves `lines` empty lines.
    pub fn skip(&mut self, lines: usize) {
        self.cursor -= self.line_height * lines as f32;
    }

    /// Writes one line at the cursor and moves down.
    ///
    /// When the cursor has passed the bottom margin a new page is started
    /// first and the repeating header, if any, is written at its top.
    pub fn write_line(&mut self, x: f32, text: impl Into<String>, style: TextStyle) {
        self.break_if_exhausted();
        let y = self.cursor;
        self.place(x, y, text, style);
        self.cursor -= self.line_height;
    }

    /// Writes a column header and repeats it after every page break until
    /// [`clear_repeating_header`](Self::clear_repeating_header) is called.
    pub fn write_header(&mut self, x: f32, text: impl Into<String>, style: TextStyle) {
        let text = text.into();
        self.write_line(x, text.clone(), style);
        self.header = Some(RepeatingHeader { x, text, style });
    }

    pub fn clear_repeating_header(&mut self) {
        self.header = None;
    }

    /// Closes the current page and moves the cursor to the top of a new one.
    pub fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.finished.push(page);
        self.cursor = self.top;
    }

    pub fn finish(mut self) -> Document {
        self.finished.push(self.current);
        Document {
            title: self.title,
            width: self.width,
            height: self.height,
            pages: self.finished,
        }
    }

    fn break_if_exhausted(&mut self) {
        if self.cursor >= self.bottom {
            return;
        }
        self.new_page();
        if let Some(header) = self.header.clone() {
            let y = self.cursor;
            self.place(header.x, y, header.text, header.style);
            self.cursor -= self.line_height;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_does_not_move_cursor() {
        let mut p = Paginator::a4("t");
        p.place(50.0, 700.0, "hola", TextStyle::regular(12.0));
        assert_eq!(p.cursor, 800.0);

        let doc = p.finish();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].lines[0].y, 700.0);
    }

    #[test]
    fn test_centered_text() {
        let mut p = Paginator::a4("t");
        let style = TextStyle::bold(14.0);
        p.place_centered(300.0, 780.0, "FACTURA", style);
        let doc = p.finish();

        let line = &doc.pages[0].lines[0];
        let width = approx_text_width("FACTURA", style);
        assert!((line.x + width / 2.0 - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_lines_flow_down() {
        let mut p = Paginator::a4("t");
        p.write_line(100.0, "a", TextStyle::regular(10.0));
        p.write_line(100.0, "b", TextStyle::regular(10.0));
        p.skip(1);
        p.write_line(100.0, "c", TextStyle::regular(10.0));
        let doc = p.finish();

        let ys: Vec<f32> = doc.lines().map(|l| l.y).collect();
        assert_eq!(ys, vec![800.0, 780.0, 740.0]);
    }

    #[test]
    fn test_page_break_repeats_header() {
        let mut p = Paginator::a4("t");
        let style = TextStyle::regular(10.0);
        p.write_header(100.0, "HEADER", style);
        // 800, 780, ..., 60 fit on the first page: 38 lines
        for i in 0..50 {
            p.write_line(100.0, format!("row {i}"), style);
        }
        let doc = p.finish();

        assert_eq!(doc.pages.len(), 2);
        assert!(doc.pages[0].lines.iter().all(|l| l.y >= 50.0));
        assert_eq!(doc.pages[0].lines.len(), 38);
        assert_eq!(doc.pages[1].lines[0].text, "HEADER");
        assert_eq!(doc.pages[1].lines[0].y, 800.0);
        assert_eq!(doc.pages[1].lines[1].text, "row 37");
        assert_eq!(doc.pages[1].lines[1].y, 780.0);
    }

    #[test]
    fn test_cleared_header_is_not_repeated() {
        let mut p = Paginator::a4("t");
        let style = TextStyle::regular(10.0);
        p.write_header(100.0, "HEADER", style);
        p.clear_repeating_header();
        p.move_to(40.0);
        p.write_line(100.0, "next", style);
        let doc = p.finish();

        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].lines.len(), 1);
        assert_eq!(doc.pages[1].lines[0].text, "next");
    }
}

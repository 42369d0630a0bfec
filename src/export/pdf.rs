//! `printpdf` renderer: landscape A4, grid table, header repeated per page.
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Rect, Rgb,
};

use super::{BODY_FONT_PT, CELL_PADDING_MM, DocumentRenderer, ReportTable, text_width_mm, wrap_cell};
use crate::error::{AppError, Result};

const PAGE_W_MM: f32 = 297.0;
const PAGE_H_MM: f32 = 210.0;
const TITLE_PT: f32 = 16.0;
/// Title baseline and table top on the first page, measured from the top edge.
const TITLE_TOP_MM: f32 = 15.0;
const TABLE_TOP_MM: f32 = 22.0;
/// Table top on continuation pages, measured from the top edge.
const TOP_MARGIN_MM: f32 = 12.0;
const BOTTOM_MARGIN_MM: f32 = 14.0;
const LINE_HEIGHT_MM: f32 = BODY_FONT_PT * 0.3528 * 1.15;
const HEADER_FILL: (u8, u8, u8) = (22, 160, 133);

#[derive(Clone, Debug, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, None))
}

fn render_err(e: printpdf::Error) -> AppError {
    AppError::Render(e.to_string())
}

fn row_height(lines: usize) -> f32 {
    lines as f32 * LINE_HEIGHT_MM + 2.0 * CELL_PADDING_MM
}

/// Text lines that fit between `top` and the bottom margin (at least one).
fn lines_room(top: f32) -> usize {
    (((top - BOTTOM_MARGIN_MM - 2.0 * CELL_PADDING_MM) / LINE_HEIGHT_MM).floor().max(1.0)) as usize
}

/// Split a row of `total` text lines into page-sized pieces.
///
/// Returns `(break_before, lines)` per piece. A row that fits a fresh page is
/// never split; it moves to the next page whole. A taller row fills what is
/// left of the current page and continues on fresh pages.
fn row_pieces(total: usize, room_now: usize, room_fresh: usize) -> Vec<(bool, usize)> {
    let room_fresh = room_fresh.max(1);
    if total <= room_now {
        return vec![(false, total)];
    }
    if total <= room_fresh {
        return vec![(true, total)];
    }
    let mut pieces = Vec::new();
    let mut left = total;
    if room_now > 0 {
        pieces.push((false, room_now));
        left -= room_now;
    }
    while left > 0 {
        let n = left.min(room_fresh);
        pieces.push((true, n));
        left -= n;
    }
    pieces
}

fn wrap_row(table: &ReportTable, cells: &[String]) -> Vec<Vec<String>> {
    table
        .columns
        .iter()
        .zip(cells)
        .map(|(col, text)| wrap_cell(text, col.width_mm, BODY_FONT_PT))
        .collect()
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    /// Top of the next row, in PDF coordinates (origin bottom-left).
    y: f32,
    left: f32,
    header: Vec<Vec<String>>,
}

impl Cursor<'_> {
    fn header_lines(&self) -> usize {
        self.header.iter().map(Vec::len).max().unwrap_or(1)
    }

    /// Body lines available on a continuation page, below the repeated header.
    fn fresh_room(&self) -> usize {
        lines_room(PAGE_H_MM - TOP_MARGIN_MM - row_height(self.header_lines()))
    }

    fn new_page(&mut self, table: &ReportTable, fonts: &Fonts) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W_MM), Mm(PAGE_H_MM), "Table");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_H_MM - TOP_MARGIN_MM;
        self.draw_header(table, fonts);
    }

    fn draw_header(&mut self, table: &ReportTable, fonts: &Fonts) {
        let header = std::mem::take(&mut self.header);
        let lines = header.iter().map(Vec::len).max().unwrap_or(1);
        self.draw_cells(table, &header, 0..lines, true, fonts);
        self.header = header;
    }

    fn body_row(&mut self, table: &ReportTable, cells: &[String], fonts: &Fonts) {
        let wrapped = wrap_row(table, cells);
        let total = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let room_now = if self.y - row_height(1) >= BOTTOM_MARGIN_MM { lines_room(self.y) } else { 0 };
        let mut from = 0;
        for (break_before, n) in row_pieces(total, room_now, self.fresh_room()) {
            if break_before {
                self.new_page(table, fonts);
            }
            self.draw_cells(table, &wrapped, from..from + n, false, fonts);
            from += n;
        }
    }

    /// Draw lines `range` of every cell as one row band.
    fn draw_cells(
        &mut self,
        table: &ReportTable,
        wrapped: &[Vec<String>],
        range: std::ops::Range<usize>,
        header: bool,
        fonts: &Fonts,
    ) {
        let height = row_height(range.len());
        let mut x = self.left;
        for (col, cell_lines) in table.columns.iter().zip(wrapped) {
            let rect = Rect::new(Mm(x), Mm(self.y - height), Mm(x + col.width_mm), Mm(self.y));
            if header {
                let (r, g, b) = HEADER_FILL;
                self.layer.set_fill_color(rgb(r, g, b));
                self.layer.add_rect(rect.clone().with_mode(PaintMode::Fill));
            }
            self.layer.set_outline_color(rgb(200, 200, 200));
            self.layer.set_outline_thickness(0.2);
            self.layer.add_rect(rect.with_mode(PaintMode::Stroke));

            let (font, color) = if header {
                (&fonts.bold, rgb(255, 255, 255))
            } else {
                (&fonts.regular, rgb(0, 0, 0))
            };
            self.layer.set_fill_color(color);
            let shown = cell_lines.iter().skip(range.start).take(range.len());
            for (i, line) in shown.enumerate() {
                let baseline = self.y - CELL_PADDING_MM - (i as f32 + 0.8) * LINE_HEIGHT_MM;
                self.layer.use_text(line.as_str(), BODY_FONT_PT, Mm(x + CELL_PADDING_MM), Mm(baseline), font);
            }
            x += col.width_mm;
        }
        self.y -= height;
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, table: &ReportTable) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(table.title.as_str(), Mm(PAGE_W_MM), Mm(PAGE_H_MM), "Table");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render_err)?,
        };
        let first = doc.get_page(page).get_layer(layer);

        let title_x = (PAGE_W_MM - text_width_mm(&table.title, TITLE_PT)) / 2.0;
        first.set_fill_color(rgb(0, 0, 0));
        first.use_text(table.title.as_str(), TITLE_PT, Mm(title_x), Mm(PAGE_H_MM - TITLE_TOP_MM), &fonts.bold);

        let header: Vec<String> = table.columns.iter().map(|c| c.header.to_string()).collect();
        let mut cursor = Cursor {
            doc: &doc,
            layer: first,
            y: PAGE_H_MM - TABLE_TOP_MM,
            left: (PAGE_W_MM - table.total_width_mm()) / 2.0,
            header: wrap_row(table, &header),
        };
        cursor.draw_header(table, &fonts);
        for row in &table.rows {
            cursor.body_row(table, row, &fonts);
        }

        doc.save_to_bytes().map_err(render_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{User, UserFields};

    #[test]
    fn renders_pdf_bytes() {
        let users: Vec<User> = (0..60)
            .map(|i| User {
                id: format!("id{i}"),
                fields: UserFields {
                    name: format!("User {i}"),
                    address: "House 123, Street 4, Gulberg III, Lahore".into(),
                    ..Default::default()
                },
            })
            .collect();
        let bytes = PdfRenderer::new().render(&ReportTable::from_users(&users)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn short_rows_stay_whole() {
        assert_eq!(row_pieces(3, 10, 40), vec![(false, 3)]);
        assert_eq!(row_pieces(12, 10, 40), vec![(true, 12)]);
    }

    #[test]
    fn row_taller_than_a_page_is_split() {
        assert_eq!(row_pieces(100, 10, 40), vec![(false, 10), (true, 40), (true, 40), (true, 10)]);
        assert_eq!(row_pieces(50, 0, 40), vec![(true, 40), (true, 10)]);
        let pieces = row_pieces(97, 5, 40);
        assert_eq!(pieces.iter().map(|(_, n)| n).sum::<usize>(), 97);
        assert!(pieces.iter().all(|(_, n)| *n <= 40));
    }

    #[test]
    fn continuation_pages_start_below_top_margin() {
        let room = lines_room(PAGE_H_MM - TOP_MARGIN_MM);
        let used = row_height(room) + TOP_MARGIN_MM + BOTTOM_MARGIN_MM;
        assert!(used <= PAGE_H_MM);
    }

    #[test]
    fn oversized_cell_renders() {
        let user = User {
            id: "x".into(),
            fields: UserFields { address: "word ".repeat(3000), ..Default::default() },
        };
        let bytes = PdfRenderer::new().render(&ReportTable::from_users(&[user])).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}

//! User list report.
//!
//! The exporter lays the in-memory list out as a fixed-column table and hands
//! it to an injected [`DocumentRenderer`]. With no renderer configured the
//! export is refused with a notification; nothing is looked up globally.
//!
#[cfg(feature = "pdf")]
pub mod pdf;

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::app::notify::Notifications;
use crate::error::Result;
use crate::model::User;

pub const REPORT_FILE_NAME: &str = "user_data_report.pdf";
pub const REPORT_TITLE: &str = "User Data Report";

/// Body text size in points.
pub const BODY_FONT_PT: f32 = 7.0;
/// Horizontal and vertical padding inside each cell, in millimetres.
pub const CELL_PADDING_MM: f32 = 1.5;

const PT_TO_MM: f32 = 0.3528;
/// Rough Helvetica advance per character as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub width_mm: f32,
}

pub const COLUMNS: [Column; 9] = [
    Column { header: "ID", width_mm: 20.0 },
    Column { header: "Name", width_mm: 30.0 },
    Column { header: "Father's Name", width_mm: 30.0 },
    Column { header: "CNIC", width_mm: 28.0 },
    Column { header: "Phone", width_mm: 22.0 },
    Column { header: "Address", width_mm: 55.0 },
    Column { header: "Degree", width_mm: 32.0 },
    Column { header: "Semester", width_mm: 17.0 },
    Column { header: "University", width_mm: 40.0 },
];

/// Renderer-agnostic table: a title, fixed columns, and one row per user.
#[derive(Clone, Debug)]
pub struct ReportTable {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn from_users(users: &[User]) -> Self {
        let rows = users
            .iter()
            .map(|u| {
                let f = &u.fields;
                vec![
                    u.id.clone(),
                    f.name.clone(),
                    f.father_name.clone(),
                    f.cnic.clone(),
                    f.phone.clone(),
                    f.address.clone(),
                    f.degree.clone(),
                    f.semester.clone(),
                    f.university.clone(),
                ]
            })
            .collect();
        Self { title: REPORT_TITLE.to_string(), columns: COLUMNS.to_vec(), rows }
    }

    pub fn total_width_mm(&self) -> f32 {
        self.columns.iter().map(|c| c.width_mm).sum()
    }
}

/// Approximate printed width of `text` at `font_pt`.
pub fn text_width_mm(text: &str, font_pt: f32) -> f32 {
    text.chars().count() as f32 * font_pt * PT_TO_MM * AVG_GLYPH_EM
}

/// Break `text` into lines that fit a cell of `width_mm`.
///
/// Words are kept whole when they fit; a word longer than a line is split.
pub fn wrap_cell(text: &str, width_mm: f32, font_pt: f32) -> Vec<String> {
    let usable = (width_mm - 2.0 * CELL_PADDING_MM).max(0.0);
    let per_line = ((usable / (font_pt * PT_TO_MM * AVG_GLYPH_EM)) as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > per_line {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(per_line);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current.is_empty() { word.len() } else { current.chars().count() + 1 + word.len() };
        if needed > per_line && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Capability that turns a [`ReportTable`] into document bytes.
pub trait DocumentRenderer {
    fn render(&self, table: &ReportTable) -> Result<Vec<u8>>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to export; no document was produced.
    Empty,
    /// No renderer was configured.
    Unavailable,
    Written(PathBuf),
    Failed,
}

pub struct Exporter {
    renderer: Option<Box<dyn DocumentRenderer>>,
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new(renderer: Option<Box<dyn DocumentRenderer>>, output_dir: impl Into<PathBuf>) -> Self {
        Self { renderer, output_dir: output_dir.into() }
    }

    /// Exporter using the built-in PDF renderer when the `pdf` feature is on.
    pub fn with_default_renderer(output_dir: impl Into<PathBuf>) -> Self {
        #[cfg(feature = "pdf")]
        let renderer: Option<Box<dyn DocumentRenderer>> = Some(Box::new(pdf::PdfRenderer::new()));
        #[cfg(not(feature = "pdf"))]
        let renderer: Option<Box<dyn DocumentRenderer>> = None;
        Self::new(renderer, output_dir)
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn export(&self, users: &[User], notices: &mut Notifications) -> ExportOutcome {
        if users.is_empty() {
            notices.info("No users to download.");
            return ExportOutcome::Empty;
        }
        let Some(renderer) = self.renderer.as_deref() else {
            notices.error("PDF generation library is not available.");
            return ExportOutcome::Unavailable;
        };
        let table = ReportTable::from_users(users);
        let path = self.output_path();
        let written = renderer
            .render(&table)
            .and_then(|bytes| std::fs::write(&path, bytes).map_err(Into::into));
        match written {
            Ok(()) => {
                info!(path = %path.display(), rows = table.rows.len(), "report written");
                notices.success(format!("Report saved to {}", path.display()));
                ExportOutcome::Written(path)
            }
            Err(e) => {
                error!(error = %e, "report export failed");
                notices.error(e.user_message("Failed to generate PDF."));
                ExportOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fit_landscape_a4() {
        let table = ReportTable::from_users(&[]);
        assert_eq!(table.columns.len(), 9);
        assert!(table.total_width_mm() <= 297.0 - 2.0 * 10.0);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_cell("NU", 40.0, BODY_FONT_PT), vec!["NU"]);
        assert_eq!(wrap_cell("", 40.0, BODY_FONT_PT), vec![""]);
    }

    #[test]
    fn long_text_wraps_on_words() {
        let lines = wrap_cell("House 123, Street 4, Gulberg III, Lahore, Punjab", 30.0, BODY_FONT_PT);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), "House 123, Street 4, Gulberg III, Lahore, Punjab");
    }

    #[test]
    fn overlong_word_is_split() {
        let id = "665f1c2ab9e8d7c6b5a49382";
        let lines = wrap_cell(id, 20.0, BODY_FONT_PT);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), id);
    }
}

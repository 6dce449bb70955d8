//! PDF export via `printpdf`.
//!
//! A4 portrait, builtin Helvetica at 12pt, one report line per paragraph with
//! a 10 mm line pitch. Builtin fonts only cover Latin-1, so every line is
//! reduced to Latin-1 first.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use super::report::{latin1_only, report_lines};
use super::ExportError;
use crate::analysis::AnalysisReport;

pub const REPORT_FILE_NAME: &str = "resume_feedback.pdf";

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN_MM: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 12.0;
/// Characters per line for Helvetica 12pt across 190 mm of text width.
const WRAP_CHARS: usize = 85;

/// Renders the report to PDF bytes.
pub fn render_report_pdf(report: &AnalysisReport) -> Result<Vec<u8>, ExportError> {
    let lines: Vec<String> = report_lines(report)
        .iter()
        .map(|line| latin1_only(line))
        .collect();
    render_lines("Resume Feedback", &lines)
}

fn render_lines(title: &str, lines: &[String]) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    let mut cursor = PageCursor {
        layer: doc.get_page(page).get_layer(layer),
        y: top_baseline(),
    };

    for line in lines {
        for wrapped in wrap_text(line, WRAP_CHARS) {
            if cursor.y < MARGIN_MM + LINE_HEIGHT_MM {
                cursor = new_page(&doc);
            }
            cursor
                .layer
                .use_text(wrapped, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(cursor.y), &font);
            cursor.y -= LINE_HEIGHT_MM;
        }
    }

    save(doc)
}

struct PageCursor {
    layer: PdfLayerReference,
    y: f32,
}

fn top_baseline() -> f32 {
    PAGE_HEIGHT.0 - MARGIN_MM - LINE_HEIGHT_MM
}

fn new_page(doc: &PdfDocumentReference) -> PageCursor {
    let (page, layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    PageCursor {
        layer: doc.get_page(page).get_layer(layer),
        y: top_baseline(),
    }
}

fn save(doc: PdfDocumentReference) -> Result<Vec<u8>, ExportError> {
    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

/// Greedy word wrap. Words longer than a line are split hard; an empty input
/// still yields one (empty) line so blank report lines keep their slot.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        if current_len + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

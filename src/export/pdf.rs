//! PDF serialization of the complaint document (printpdf)

use crate::config::Config;
use crate::error::{ComplaintError, Result};
use complaint_form_common::layout::{
    page_bottom_limit_pt, LINE_HEIGHT_PT, MARGIN_TOP_PT, PAGE_HEIGHT_PT, PAGE_WIDTH_PT,
};
use complaint_form_common::ComplaintDocument;
use printpdf::*;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const LAYER_NAME: &str = "Layer 1";

/// Font used for every line of the PDF
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PdfFont {
    /// Helvetica; only Windows-1252 characters are printed
    #[default]
    Builtin,
    /// TTF/OTF file embedded into the document
    External(PathBuf),
}

impl PdfFont {
    pub fn from_config(font_path: Option<&Path>) -> Self {
        match font_path {
            Some(path) => PdfFont::External(path.to_path_buf()),
            None => PdfFont::Builtin,
        }
    }

    /// Font named in the config file at `config_path`.
    ///
    /// An unreadable config falls back to Helvetica so a PDF can still be saved.
    pub fn load(config_path: &Path) -> Self {
        match Config::load_from(config_path) {
            Ok(config) => Self::from_config(config.font_path.as_deref()),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "config not readable, using builtin font");
                PdfFont::Builtin
            }
        }
    }
}

/// A wrapped line with its final page and position (pt from the top)
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub page: usize,
    pub x_pt: f32,
    pub y_pt: f32,
    pub text: String,
}

/// Assigns every line of the document to a page.
///
/// Lines keep the document's cursor positions; a line that would pass the
/// bottom margin opens a new page and the rest of the content moves up with it.
pub fn place_lines(doc: &ComplaintDocument) -> Vec<PlacedLine> {
    let mut placed = vec![PlacedLine {
        page: 0,
        x_pt: doc.title_x_pt,
        y_pt: doc.title_y_pt,
        text: doc.title.clone(),
    }];

    let mut page = 0;
    let mut page_offset = 0.0;

    for block in &doc.blocks {
        for (i, line) in block.lines.iter().enumerate() {
            let mut y = block.y_pt + i as f32 * LINE_HEIGHT_PT - page_offset;
            if y > page_bottom_limit_pt() {
                page += 1;
                page_offset += y - MARGIN_TOP_PT;
                y = MARGIN_TOP_PT;
            }
            placed.push(PlacedLine {
                page,
                x_pt: doc.text_x_pt,
                y_pt: y,
                text: line.clone(),
            });
        }
    }

    placed
}

pub fn page_count(placed: &[PlacedLine]) -> usize {
    placed.iter().map(|l| l.page + 1).max().unwrap_or(1)
}

/// Serializes the document to PDF bytes
pub fn serialize_pdf(doc: &ComplaintDocument, font: &PdfFont) -> Result<Vec<u8>> {
    let page_width = Mm::from(Pt(PAGE_WIDTH_PT));
    let page_height = Mm::from(Pt(PAGE_HEIGHT_PT));

    let (pdf, first_page, first_layer) =
        PdfDocument::new(doc.title.as_str(), page_width, page_height, LAYER_NAME);

    let font_ref = match font {
        PdfFont::Builtin => pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ComplaintError::PdfGeneration(format!("Chyba přidání písma: {:?}", e)))?,
        PdfFont::External(path) => {
            let file = File::open(path)
                .map_err(|_| ComplaintError::FileNotFound(path.display().to_string()))?;
            pdf.add_external_font(BufReader::new(file))
                .map_err(|e| ComplaintError::PdfGeneration(format!("Chyba načtení písma {}: {:?}", path.display(), e)))?
        }
    };

    let placed = place_lines(doc);
    let mut layers = vec![pdf.get_page(first_page).get_layer(first_layer)];
    for _ in 1..page_count(&placed) {
        let (page, layer) = pdf.add_page(page_width, page_height, LAYER_NAME);
        layers.push(pdf.get_page(page).get_layer(layer));
    }

    for line in placed.iter().filter(|l| !l.text.is_empty()) {
        layers[line.page].use_text(
            line.text.as_str(),
            doc.font_size_pt,
            Mm::from(Pt(line.x_pt)),
            Mm::from(Pt(PAGE_HEIGHT_PT - line.y_pt)),
            &font_ref,
        );
    }

    pdf.save_to_bytes()
        .map_err(|e| ComplaintError::PdfGeneration(format!("Chyba uložení PDF: {:?}", e)))
}

/// Manual "save as PDF": serializes once and writes the file
pub fn save_pdf(doc: &ComplaintDocument, font: &PdfFont, output_path: &Path) -> Result<usize> {
    let bytes = serialize_pdf(doc, font)?;
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, &bytes)?;
    tracing::debug!(path = %output_path.display(), bytes = bytes.len(), "PDF written");
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use complaint_form_common::{render_document, FieldUpdate, FormState};

    fn form_with_message(message: String) -> FormState {
        FormState::now().apply(FieldUpdate::Message(message))
    }

    #[test]
    fn test_place_lines_single_page() {
        let doc = render_document(&FormState::now());
        let placed = place_lines(&doc);
        assert_eq!(placed.len(), 1 + doc.line_count());
        assert_eq!(page_count(&placed), 1);
        assert_eq!(placed[0].text, doc.title);
        assert!((placed[1].y_pt - 70.0).abs() < 0.001);
    }

    #[test]
    fn test_place_lines_breaks_pages() {
        let message = vec!["řádek"; 120].join("\n");
        let doc = render_document(&form_with_message(message));
        let placed = place_lines(&doc);

        assert!(page_count(&placed) >= 2);
        for line in &placed {
            assert!(line.y_pt <= page_bottom_limit_pt());
            assert!(line.y_pt >= MARGIN_TOP_PT);
        }
        let first_on_second = placed.iter().find(|l| l.page == 1).unwrap();
        assert!((first_on_second.y_pt - MARGIN_TOP_PT).abs() < 0.001);
    }

    #[test]
    fn test_serialize_builtin_font() {
        let doc = render_document(&FormState::now());
        let bytes = serialize_pdf(&doc, &PdfFont::Builtin).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_serialize_missing_font_file() {
        let doc = render_document(&FormState::now());
        let font = PdfFont::External(PathBuf::from("/nonexistent/font.ttf"));
        let err = serialize_pdf(&doc, &font).unwrap_err();
        assert!(matches!(err, ComplaintError::FileNotFound(_)));
    }
}

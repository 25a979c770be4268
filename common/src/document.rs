//! Text content of the complaint PDF
//!
//! Turns a [`FormState`] into the fixed sequence of labeled lines, wraps
//! each line to the text width and records where the cursor places it.
//! Fonts, encoding and page breaks belong to the PDF serializer.

use crate::form::FormState;
use crate::layout::{
    block_advance_pt, chars_per_line, CONTENT_START_Y_PT, FONT_SIZE_PT, MARGIN_LEFT_PT,
    MARGIN_TOP_PT, TEXT_WIDTH_PT,
};

pub const DOCUMENT_TITLE: &str = "Reklamační dotazník";

/// Blocks of the document, in print order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Name,
    Address,
    Email,
    Phone,
    Damage,
    AgeMonths,
    FillDate,
    FillTime,
    MessageHeader,
    Message,
}

impl BlockKind {
    pub const ORDER: [BlockKind; 10] = [
        BlockKind::Name,
        BlockKind::Address,
        BlockKind::Email,
        BlockKind::Phone,
        BlockKind::Damage,
        BlockKind::AgeMonths,
        BlockKind::FillDate,
        BlockKind::FillTime,
        BlockKind::MessageHeader,
        BlockKind::Message,
    ];

    /// Label printed before the value; the message itself has none
    pub fn label(&self) -> Option<&'static str> {
        match self {
            BlockKind::Name => Some("Jméno"),
            BlockKind::Address => Some("Adresa"),
            BlockKind::Email => Some("E-mail"),
            BlockKind::Phone => Some("Telefon"),
            BlockKind::Damage => Some("Poškození"),
            BlockKind::AgeMonths => Some("Stáří (měsíce)"),
            BlockKind::FillDate => Some("Datum vyplnění"),
            BlockKind::FillTime => Some("Čas vyplnění"),
            BlockKind::MessageHeader => Some("Popis závady"),
            BlockKind::Message => None,
        }
    }

    fn text(&self, form: &FormState) -> String {
        let value = match self {
            BlockKind::Name => format!("{} {}", form.first_name(), form.last_name()),
            BlockKind::Address => form.address().to_string(),
            BlockKind::Email => form.email().to_string(),
            BlockKind::Phone => form.full_phone(),
            BlockKind::Damage => form.damage().as_str().to_string(),
            BlockKind::AgeMonths => form.age_months().map(|a| a.to_string()).unwrap_or_default(),
            BlockKind::FillDate => form.filled_date().to_string(),
            BlockKind::FillTime => form.filled_time().to_string(),
            BlockKind::MessageHeader => return "Popis závady:".to_string(),
            BlockKind::Message => return form.message().to_string(),
        };
        match self.label() {
            Some(label) => format!("{}: {}", label, value),
            None => value,
        }
    }
}

/// One labeled line after wrapping
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBlock {
    pub kind: BlockKind,
    /// Unwrapped text, label included
    pub text: String,
    pub lines: Vec<String>,
    /// Baseline of the first line, from the top of the content
    pub y_pt: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintDocument {
    pub title: String,
    pub title_x_pt: f32,
    pub title_y_pt: f32,
    pub text_x_pt: f32,
    pub font_size_pt: f32,
    pub blocks: Vec<DocumentBlock>,
    /// Cursor position after the last block
    pub end_y_pt: f32,
}

impl ComplaintDocument {
    /// Title followed by every wrapped line, one per row
    pub fn plain_text(&self) -> String {
        let mut out = vec![self.title.clone()];
        for block in &self.blocks {
            out.extend(block.lines.iter().cloned());
        }
        out.join("\n")
    }

    pub fn block(&self, kind: BlockKind) -> Option<&DocumentBlock> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }
}

/// Builds the document for a form
pub fn render_document(form: &FormState) -> ComplaintDocument {
    let max_chars = chars_per_line(TEXT_WIDTH_PT, FONT_SIZE_PT);
    let mut y = CONTENT_START_Y_PT;

    let blocks = BlockKind::ORDER
        .iter()
        .map(|kind| {
            let text = kind.text(form);
            let lines = wrap_text(&text, max_chars);
            let block = DocumentBlock {
                kind: *kind,
                text,
                y_pt: y,
                lines,
            };
            y += block_advance_pt(block.lines.len());
            block
        })
        .collect();

    ComplaintDocument {
        title: DOCUMENT_TITLE.to_string(),
        title_x_pt: MARGIN_LEFT_PT,
        title_y_pt: MARGIN_TOP_PT,
        text_x_pt: MARGIN_LEFT_PT,
        font_size_pt: FONT_SIZE_PT,
        blocks,
        end_y_pt: y,
    }
}

/// Greedy word wrap at `max_chars` characters per line.
///
/// Newlines start a new paragraph, words longer than a line are broken and
/// an empty paragraph still yields one empty line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > max_chars && current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        if current_len > 0 || lines.is_empty() || paragraph.trim().is_empty() {
            lines.push(current);
        }
    }

    lines
}

pub mod encoding;
pub mod pdf;

use crate::error::Result;
use complaint_form_common::{render_document, FormState};
use pdf::PdfFont;
use std::path::{Path, PathBuf};

/// Default file name of a manually saved PDF
pub fn default_pdf_path(form: &FormState) -> PathBuf {
    let stamp = format!("{}_{}", form.filled_date(), form.filled_time().replace(':', ""));
    PathBuf::from(format!("reklamace_{}.pdf", stamp))
}

/// Manual "save as PDF": renders once and writes the result.
///
/// Shares the renderer with the submission but none of its encoding,
/// configuration or send stages.
pub fn export_pdf(form: &FormState, font: &PdfFont, output: &Path) -> Result<PathBuf> {
    // No extension means a folder, even one that does not exist yet
    let output_path = if output.is_dir() || output.extension().is_none() {
        output.join(default_pdf_path(form))
    } else {
        output.to_path_buf()
    };

    let document = render_document(form);
    println!("- PDF se generuje...");
    let size = pdf::save_pdf(&document, font, &output_path)?;
    println!("✔ PDF uloženo: {} ({} B)", output_path.display(), size);

    Ok(output_path)
}

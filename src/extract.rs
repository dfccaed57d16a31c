//! PDF text extraction for the selected tender documents.
//!
//! Files are processed strictly in selection order, one at a time. Each
//! file's text is assembled page by page and wrapped in begin/end markers
//! embedding the filename, so citations in the analysis can be traced back
//! to their source document. The first unreadable file aborts the whole
//! batch; there is no partial result.

use crate::error::AuditError;
use crate::selection::SelectedFile;
use crate::utils::safe_truncate;

pub const FILE_BEGIN_MARKER: &str = "<<< BEGIN FILE:";
pub const FILE_END_MARKER: &str = "<<< END FILE:";

/// Extract and concatenate the text of every selected file, in order.
pub fn extract_text_from_files(files: &[SelectedFile]) -> Result<String, AuditError> {
    let mut combined = String::new();

    for file in files {
        let text = extract_single_file(file)?;
        combined.push_str(&format!("\n\n{} {} >>>\n\n", FILE_BEGIN_MARKER, file.name));
        combined.push_str(&text);
        combined.push_str(&format!("\n\n{} {} >>>\n\n", FILE_END_MARKER, file.name));
    }

    Ok(combined)
}

/// Extract one file's text, pages joined with newlines.
fn extract_single_file(file: &SelectedFile) -> Result<String, AuditError> {
    let bytes = std::fs::read(&file.path).map_err(|source| AuditError::FileRead {
        name: file.name.clone(),
        source,
    })?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
        eprintln!("[Extract] {} failed to parse: {}", file.name, e);
        AuditError::InvalidPdf {
            name: file.name.clone(),
            detail: e.to_string(),
        }
    })?;

    let text = pages.join("\n");
    println!(
        "[Extract] {}: {} page(s), {} chars | {:?}",
        file.name,
        pages.len(),
        text.len(),
        safe_truncate(text.trim(), 60)
    );
    Ok(text)
}

/// Build a minimal single-page PDF containing `text`, for tests.
///
/// Object offsets and the xref table are computed as the body is written, so
/// the output is a well-formed PDF-1.4 document with a Helvetica text run.
#[cfg(test)]
pub(crate) fn minimal_pdf(text: &str) -> Vec<u8> {
    let escaped = text.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)");
    let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", escaped);

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
    ];

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_start = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_start
    ));

    out.into_bytes()
}

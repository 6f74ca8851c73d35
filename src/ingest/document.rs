//! Document readers
//!
//! Plain text and markdown are read verbatim, PDFs page by page, Word files
//! paragraph by paragraph. Anything else is read as text.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::types::{Result, ResultExt};

/// Archive member holding the body of a `.docx` file
const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Text,
    Pdf,
    Docx,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => DocumentFormat::Pdf,
            Some("docx") => DocumentFormat::Docx,
            _ => DocumentFormat::Text,
        }
    }
}

/// Extract the plain text of the document at `path`
pub fn read_document(path: &Path) -> Result<String> {
    let source_id = path.display().to_string();
    match DocumentFormat::from_path(path) {
        DocumentFormat::Text => read_text(path).for_source(&source_id),
        DocumentFormat::Pdf => pdf_extract::extract_text_by_pages(path)
            .map(|pages| pages.join("\n"))
            .for_source(&source_id),
        DocumentFormat::Docx => read_docx(path, &source_id),
    }
}

/// Read as UTF-8, dropping undecodable bytes
fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect())
}

fn read_docx(path: &Path, source_id: &str) -> Result<String> {
    let file = File::open(path).for_source(source_id)?;
    let mut archive = zip::ZipArchive::new(file).for_source(source_id)?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .for_source(source_id)?
        .read_to_string(&mut xml)
        .for_source(source_id)?;
    docx_paragraphs(&xml).for_source(source_id)
}

/// Non-empty paragraph texts of a WordprocessingML body, one per line
fn docx_paragraphs(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text => current.push_str(&e.unescape()?),
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" if !current.is_empty() => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Acme sells</w:t></w:r><w:r><w:t xml:space="preserve"> groceries &amp; more</w:t></w:r></w:p>
    <w:p></w:p>
    <w:p><w:r><w:t>Second</w:t><w:tab/><w:t>line</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn write_docx(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file(DOCX_BODY, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
        zip.finish().unwrap();
        path
    }

    /// Minimal PDF with one line of Helvetica text per page
    fn write_pdf(dir: &TempDir, name: &str, pages: &[&str]) -> std::path::PathBuf {
        let font_id = 3 + 2 * pages.len();
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 3 + 2 * i)).collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        ];
        for (i, text) in pages.iter().enumerate() {
            let content = format!("BT /F1 24 Tf 72 700 Td ({}) Tj ET", text);
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
                font_id,
                4 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ));
        }
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        let mut pdf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::new();
        for (i, object) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, object));
        }
        let xref = pdf.len();
        pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            pdf.push_str(&format!("{:010} 00000 n \n", offset));
        }
        pdf.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        ));

        let path = dir.path().join(name);
        std::fs::write(&path, pdf).unwrap();
        path
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.PDF")), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_path(Path::new("a.docx")), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_path(Path::new("a.md")), DocumentFormat::Text);
        assert_eq!(DocumentFormat::from_path(Path::new("notes")), DocumentFormat::Text);
    }

    #[test]
    fn test_text_read_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("brief.md");
        std::fs::write(&path, "# Acme\n\n  keep   spacing\n").unwrap();
        assert_eq!(read_document(&path).unwrap(), "# Acme\n\n  keep   spacing\n");
    }

    #[test]
    fn test_unknown_extension_drops_invalid_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dump.bin");
        std::fs::write(&path, b"ok\xff\xfe text").unwrap();
        assert_eq!(read_document(&path).unwrap(), "ok text");
    }

    #[test]
    fn test_docx_paragraphs_joined() {
        let dir = TempDir::new().unwrap();
        let path = write_docx(&dir, "brief.docx", BODY);
        assert_eq!(
            read_document(&path).unwrap(),
            "Acme sells groceries & more\nSecond\tline"
        );
    }

    #[test]
    fn test_pdf_pages_joined_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write_pdf(&dir, "deck.pdf", &["Alpha", "Bravo"]);
        let text = read_document(&path).unwrap();

        let first = text.find("Alpha").unwrap();
        let second = text.find("Bravo").unwrap();
        assert!(first < second);
        assert!(text[first..second].contains('\n'));
    }

    #[test]
    fn test_corrupt_pdf_is_ingest_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, "%PDF-1.4\nnot really a pdf").unwrap();

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, crate::types::SectorError::Ingest { .. }));
        assert!(err.to_string().contains("broken.pdf"));
    }

    #[test]
    fn test_missing_file_names_source() {
        let err = read_document(Path::new("/nonexistent/brief.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/brief.txt"));
    }

    #[test]
    fn test_docx_without_body_is_ingest_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.docx");
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("other.xml", SimpleFileOptions::default()).unwrap();
        zip.finish().unwrap();

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, crate::types::SectorError::Ingest { .. }));
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),
}

/// Abstraction over a PDF text layer reader.
/// Implementations accept the raw bytes of a PDF and return the text of all
/// pages, joined by newlines.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, TextError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string regardless of the input bytes.
pub struct MockExtractor {
    pub text: String,
}

impl MockExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextExtractor for MockExtractor {
    fn extract_text(&self, _pdf_bytes: &[u8]) -> Result<String, TextError> {
        Ok(self.text.clone())
    }
}

/// Reads the file bytes as UTF-8 text. Lets plain-text fixtures stand in for
/// PDFs whose text has already been extracted.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, TextError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

// ── pdf-extract backend (gated behind the `pdf` feature) ──────────────────────

#[cfg(feature = "pdf")]
pub mod pdf_backend {
    use super::{TextError, TextExtractor};

    #[derive(Debug, Default)]
    pub struct PdfTextExtractor;

    impl PdfTextExtractor {
        pub fn new() -> Self {
            Self
        }
    }

    impl TextExtractor for PdfTextExtractor {
        fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, TextError> {
            let text = pdf_extract::extract_text_from_mem(pdf_bytes)
                .map_err(|e| TextError::Pdf(e.to_string()))?;
            // pdf-extract separates pages with form feeds.
            Ok(text.replace('\u{c}', "\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockExtractor::new("ACME\nTotal: £5.50");
        assert_eq!(r.extract_text(b"%PDF-1.4 fake").unwrap(), "ACME\nTotal: £5.50");
    }

    #[test]
    fn mock_ignores_content() {
        let r = MockExtractor::new("hello");
        assert_eq!(r.extract_text(b"anything").unwrap(), "hello");
        assert_eq!(r.extract_text(b"").unwrap(), "hello");
    }

    #[test]
    fn plain_text_decodes_lossily() {
        let t = PlainTextExtractor.extract_text(b"Total: \xc2\xa3 10.00\xff").unwrap();
        assert!(t.starts_with("Total: £ 10.00"));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn pdf_backend_rejects_garbage() {
        let r = pdf_backend::PdfTextExtractor::new();
        assert!(matches!(r.extract_text(b"not a pdf"), Err(TextError::Pdf(_))));
    }
}

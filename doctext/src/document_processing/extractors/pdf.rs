// PDF extraction module

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use pdf_extract::extract_text_by_pages;

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract the text of a PDF file, one page after another, separated by
    /// newlines.
    pub fn extract(pdf_path: impl AsRef<Path>) -> Result<String> {
        let pages = Self::extract_pages(pdf_path)?;
        Ok(Self::join_pages(&pages))
    }

    /// Extract the text of every page, in page order.
    pub fn extract_pages(pdf_path: impl AsRef<Path>) -> Result<Vec<String>> {
        let pdf_path = pdf_path.as_ref();

        // pdf-extract can panic on malformed PDFs
        let pages = panic::catch_unwind(AssertUnwindSafe(|| extract_text_by_pages(pdf_path)))
            .map_err(|payload| {
                anyhow!(
                    "PDF parser panicked on {}: {}",
                    pdf_path.display(),
                    panic_message(payload.as_ref())
                )
            })?
            .with_context(|| format!("Failed to extract text from PDF: {}", pdf_path.display()))?;

        tracing::debug!(path = %pdf_path.display(), pages = pages.len(), "extracted PDF pages");

        Ok(pages)
    }

    fn join_pages(pages: &[String]) -> String {
        pages.join("\n")
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_join_pages_in_order() {
        let pages = vec!["first page".to_string(), "second page".to_string(), String::new()];
        assert_eq!(PdfExtractor::join_pages(&pages), "first page\nsecond page\n");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = PdfExtractor::extract("/definitely/not/here.pdf").unwrap_err();
        assert!(err.to_string().contains("here.pdf"));
    }

    #[test]
    fn test_garbage_bytes_are_an_error() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"this is not a pdf at all")?;
        temp_file.flush()?;

        assert!(PdfExtractor::extract(temp_file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_panic_message_handles_common_payloads() {
        let text: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(text.as_ref()), "boom");

        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(owned.as_ref()), "bang");

        let other: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}

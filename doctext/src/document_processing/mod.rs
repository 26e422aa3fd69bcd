// Document Processing Module
//
// This module converts PDF, DOCX, legacy DOC and plain-text documents into
// plain-text files, one `<input file name>.txt` per input.
//
// Main components:
// - format: DocumentFormat, the extension-based dispatch enum
// - extractors: one text extractor per format
// - processors: writing extracted text to the output directory
// - schemas: per-file records and the batch report
// - utils: directory expansion and file helpers
//
// Usage:
//   1. Build a Converter (or use the free functions with defaults)
//   2. process_file for a single document, process_files for a batch
//   3. Inspect the BatchReport for per-file outcomes

pub mod extractors;
pub mod format;
pub mod processors;
pub mod schemas;
pub mod utils;

// Re-export commonly used types
pub use extractors::{DocExtractor, DocxExtractor, OfficeSession, PdfExtractor, TxtExtractor};
pub use format::DocumentFormat;
pub use processors::TextWriter;
pub use schemas::{BatchReport, ConversionOutcome, ConversionRecord};
pub use utils::{ensure_dir_exists, expand_inputs, find_supported_files};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{Config, OfficeConfig};
use crate::{Error, Result};

/// Dispatches documents to their extractor and writes the result
#[derive(Default)]
pub struct Converter {
    doc: DocExtractor,
}

impl Converter {
    pub fn new(office: &OfficeConfig) -> Self {
        Self {
            doc: DocExtractor::from_config(office),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.office)
    }

    /// Run the extractor matching `format` on `path`
    pub fn extract(&self, format: DocumentFormat, path: &Path) -> anyhow::Result<String> {
        match format {
            DocumentFormat::Pdf => PdfExtractor::extract(path),
            DocumentFormat::Docx => DocxExtractor::extract(path),
            DocumentFormat::Doc => self.doc.extract(path),
            DocumentFormat::Txt => TxtExtractor::extract(path),
        }
    }

    /// Convert one document and return the path of the written text file
    pub fn process_file(&self, file_path: impl AsRef<Path>, save_dir: impl AsRef<Path>) -> Result<PathBuf> {
        self.convert(file_path.as_ref(), save_dir.as_ref())
            .map(|record| record.output_path)
    }

    /// Convert every input in order. A failing file is logged and recorded,
    /// never fatal; only failing to create `save_dir` aborts the batch.
    ///
    /// Each output path is written at most once per run: a later input with
    /// the same file name fails with [`Error::DuplicateOutput`].
    pub fn process_files<P: AsRef<Path>>(&self, file_paths: &[P], save_dir: impl AsRef<Path>) -> Result<BatchReport> {
        let save_dir = save_dir.as_ref();

        ensure_dir_exists(save_dir).map_err(|source| Error::OutputDir {
            path: save_dir.to_path_buf(),
            source,
        })?;

        let mut report = BatchReport::new(save_dir);
        // Output path -> input that produced it
        let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();

        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let result = check_unclaimed(file_path, save_dir, &written)
                .and_then(|()| self.convert(file_path, save_dir));
            match result {
                Ok(converted) => {
                    written.insert(converted.output_path.clone(), file_path.to_path_buf());
                    tracing::info!(
                        source = %file_path.display(),
                        output = %converted.output_path.display(),
                        "converted"
                    );
                    report.push(ConversionRecord::converted(
                        file_path,
                        converted.format,
                        converted.output_path,
                        &converted.content,
                    ));
                }
                Err(e) => {
                    tracing::error!(source = %file_path.display(), "failed to convert: {}", e);
                    let format = DocumentFormat::from_path(file_path).ok();
                    report.push(ConversionRecord::failed(file_path, format, &e));
                }
            }
        }

        report.finish();
        Ok(report)
    }

    fn convert(&self, file_path: &Path, save_dir: &Path) -> Result<Converted> {
        let format = DocumentFormat::from_path(file_path)?;
        let output_path = TextWriter::output_path_for(file_path, save_dir).ok_or_else(|| {
            Error::UnsupportedFileType {
                extension: String::new(),
            }
        })?;

        tracing::debug!(source = %file_path.display(), %format, "dispatching");

        let content = self.extract(format, file_path).map_err(|source| Error::Extraction {
            format,
            path: file_path.to_path_buf(),
            source,
        })?;

        TextWriter::save(&content, &output_path)?;

        Ok(Converted {
            format,
            output_path,
            content,
        })
    }
}

fn check_unclaimed(file_path: &Path, save_dir: &Path, written: &HashMap<PathBuf, PathBuf>) -> Result<()> {
    DocumentFormat::from_path(file_path)?;

    let claimed = TextWriter::output_path_for(file_path, save_dir)
        .and_then(|output_path| written.get_key_value(&output_path));
    match claimed {
        Some((path, first_source)) => Err(Error::DuplicateOutput {
            path: path.clone(),
            first_source: first_source.clone(),
        }),
        None => Ok(()),
    }
}

struct Converted {
    format: DocumentFormat,
    output_path: PathBuf,
    content: String,
}

/// Convert one document with default settings
pub fn process_file(file_path: impl AsRef<Path>, save_dir: impl AsRef<Path>) -> Result<PathBuf> {
    Converter::default().process_file(file_path, save_dir)
}

/// Convert a batch of documents with default settings
pub fn process_files<P: AsRef<Path>>(file_paths: &[P], save_dir: impl AsRef<Path>) -> Result<BatchReport> {
    Converter::default().process_files(file_paths, save_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_txt_is_written_with_extension_kept() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let input = temp_dir.path().join("notes.txt");
        fs::write(&input, "line one\nline two\n")?;
        let out = temp_dir.path().join("out");
        fs::create_dir(&out)?;

        let written = process_file(&input, &out)?;

        assert_eq!(written, out.join("notes.txt.txt"));
        assert_eq!(fs::read_to_string(&written)?, "line one\nline two\n");
        Ok(())
    }

    #[test]
    fn test_unsupported_extension_fails_before_io() {
        let temp_dir = TempDir::new().unwrap();
        // Does not exist: dispatch must reject it without reading
        let input = temp_dir.path().join("memo.rtf");

        match process_file(&input, temp_dir.path()) {
            Err(Error::UnsupportedFileType { extension }) => assert_eq!(extension, ".rtf"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!temp_dir.path().join("memo.rtf.txt").exists());
    }

    #[test]
    fn test_extraction_error_names_format_and_path() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("missing.pdf");

        let err = process_file(&input, temp_dir.path()).unwrap_err();
        match &err {
            Error::Extraction { format, path, .. } => {
                assert_eq!(*format, DocumentFormat::Pdf);
                assert_eq!(path, &input);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("missing.pdf"));
    }

    #[test]
    fn test_batch_creates_output_dir_and_records_each_input() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let good = temp_dir.path().join("good.txt");
        fs::write(&good, "ok")?;
        let bad = temp_dir.path().join("bad.rtf");
        fs::write(&bad, "{\\rtf1}")?;
        let out = temp_dir.path().join("nested").join("out");

        let report = process_files(&[&good, &bad], &out)?;

        assert!(out.is_dir());
        assert_eq!(report.records.len(), 2);
        assert!(report.records[0].is_success());
        assert_eq!(report.records[1].format, None);
        assert_eq!(report.records[1].error(), Some("unsupported file type: .rtf"));
        assert!(!out.join("bad.rtf.txt").exists());
        Ok(())
    }

    #[test]
    fn test_same_file_name_is_written_once_per_batch() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let first = temp_dir.path().join("a").join("x.txt");
        let second = temp_dir.path().join("b").join("x.txt");
        fs::create_dir_all(first.parent().unwrap())?;
        fs::create_dir_all(second.parent().unwrap())?;
        fs::write(&first, "from a")?;
        fs::write(&second, "from b")?;
        let out = temp_dir.path().join("out");

        let report = process_files(&[&first, &second], &out)?;

        assert_eq!(report.succeeded().count(), 1);
        assert_eq!(report.records[1].format, Some(DocumentFormat::Txt));
        let error = report.records[1].error().unwrap();
        assert!(error.contains("already written"), "unexpected error: {}", error);
        assert!(error.contains(&first.display().to_string()));
        assert_eq!(fs::read_to_string(out.join("x.txt.txt"))?, "from a");
        Ok(())
    }

    #[test]
    fn test_failed_input_does_not_claim_its_output_name() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        // Missing first input, so the second one may still use the name
        let missing = temp_dir.path().join("a").join("x.txt");
        let present = temp_dir.path().join("x.txt");
        fs::write(&present, "present")?;
        let out = temp_dir.path().join("out");

        let report = process_files(&[&missing, &present], &out)?;

        assert!(!report.records[0].is_success());
        assert!(report.records[1].is_success());
        assert_eq!(fs::read_to_string(out.join("x.txt.txt"))?, "present");
        Ok(())
    }

    #[test]
    fn test_batch_fails_when_output_dir_cannot_be_created() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let inputs: [&Path; 0] = [];
        match process_files(&inputs, blocker.join("out")) {
            Err(Error::OutputDir { .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

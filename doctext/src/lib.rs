// In doctext/src/lib.rs

use std::path::PathBuf;

use document_processing::DocumentFormat;

// The library error type; anything the batch driver catches per file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported file type: {extension}")]
    UnsupportedFileType { extension: String },
    #[error("failed to extract {format} text from {}: {source:#}", path.display())]
    Extraction {
        format: DocumentFormat,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "output {} was already written for {} in this run",
        path.display(),
        first_source.display()
    )]
    DuplicateOutput { path: PathBuf, first_source: PathBuf },
    #[error("failed to create output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub mod config;
pub mod document_processing;

pub use config::{Config, OfficeConfig};
pub use document_processing::{process_file, process_files, Converter};

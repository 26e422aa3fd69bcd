// Supported input formats, selected by file extension

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    Txt,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Doc,
        DocumentFormat::Txt,
    ];

    /// Select the format for a path from its extension, ignoring case.
    ///
    /// Fails with [`Error::UnsupportedFileType`] before touching the
    /// filesystem. The error carries the extension with its leading dot, or
    /// an empty string when the path has none.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path.extension().map(|ext| ext.to_string_lossy());

        extension
            .as_deref()
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedFileType {
                extension: extension
                    .map(|ext| format!(".{ext}"))
                    .unwrap_or_default(),
            })
    }

    /// Match a bare extension (no dot), ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "doc" => Some(DocumentFormat::Doc),
            "txt" => Some(DocumentFormat::Txt),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Txt => "txt",
        }
    }

    pub fn is_supported(path: impl AsRef<Path>) -> bool {
        Self::from_path(path).is_ok()
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Doc => "DOC",
            DocumentFormat::Txt => "TXT",
        })
    }
}

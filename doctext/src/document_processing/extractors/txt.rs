// Plain text extractor
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub struct TxtExtractor;

impl TxtExtractor {
    /// Read a UTF-8 text file as-is. Invalid UTF-8 is an error.
    pub fn extract(txt_path: impl AsRef<Path>) -> Result<String> {
        let txt_path = txt_path.as_ref();

        fs::read_to_string(txt_path)
            .with_context(|| format!("Failed to read text file: {}", txt_path.display()))
    }
}

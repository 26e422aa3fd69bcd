// Text writer - saves extracted text as one .txt file per input

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub struct TextWriter;

impl TextWriter {
    /// Write `content` as UTF-8 to `save_path`, replacing any existing file.
    /// Returns the number of bytes written.
    pub fn save(content: &str, save_path: impl AsRef<Path>) -> Result<u64> {
        let save_path = save_path.as_ref();

        fs::write(save_path, content).map_err(|source| Error::Write {
            path: save_path.to_path_buf(),
            source,
        })?;

        Ok(content.len() as u64)
    }

    /// `{save_dir}/{file name of input}.txt`; the original extension is kept.
    ///
    /// Returns `None` for paths without a final component (`/`, `..`).
    pub fn output_path_for(input: impl AsRef<Path>, save_dir: impl AsRef<Path>) -> Option<PathBuf> {
        let mut file_name = input.as_ref().file_name()?.to_os_string();
        file_name.push(".txt");
        Some(save_dir.as_ref().join(file_name))
    }
}

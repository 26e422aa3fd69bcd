// Interactive fallback when no inputs are given on the command line

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Ask for one file path on stdin
pub fn read_file_path() -> Result<PathBuf> {
    let stdin = io::stdin();
    let mut stderr = io::stderr();
    read_file_path_from(&mut stdin.lock(), &mut stderr)
}

fn read_file_path_from(input: &mut impl BufRead, output: &mut impl Write) -> Result<PathBuf> {
    write!(output, "Enter file path: ").context("failed to write prompt")?;
    output.flush().context("failed to write prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read file path")?;

    let path = unquote(line.trim());
    if path.is_empty() {
        bail!("no file path given");
    }

    Ok(PathBuf::from(path))
}

/// Drop one pair of surrounding quotes, as left by drag-and-drop into a terminal
fn unquote(path: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = path.strip_prefix(quote).and_then(|p| p.strip_suffix(quote)) {
            return inner;
        }
    }
    path
}

//! Legacy Word 97-2003 (.doc) extraction
//!
//! The binary .doc format is not parsed here. Instead an installed office
//! suite (LibreOffice or OpenOffice, `soffice`) is started headless and asked
//! to convert the document to UTF-8 text in a scratch directory:
//!
//! ```text
//! soffice --headless --norestore -env:UserInstallation=<tmp profile> \
//!     --convert-to "txt:Text (encoded):UTF8" --outdir <tmp> input.doc
//! ```
//!
//! The office process is owned by an [`OfficeSession`]. Dropping the session
//! kills and reaps the process if it is still running, so no exit path leaves
//! a stray office instance behind. The scratch directory is a [`tempfile::TempDir`] and is removed the
//! same way.

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::OfficeConfig;

/// CFB (Compound File Binary) / OLE2 magic signature shared by DOC, XLS and PPT
const CFB_MAGIC_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const CONVERT_FILTER: &str = "txt:Text (encoded):UTF8";

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct DocExtractor {
    program: PathBuf,
    timeout: Duration,
}

impl DocExtractor {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &OfficeConfig) -> Self {
        Self::new(&config.program, config.timeout())
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Extract the full text of a .doc file through the office suite
    pub fn extract(&self, doc_path: impl AsRef<Path>) -> Result<String> {
        let doc_path = doc_path.as_ref();

        verify_cfb_signature(doc_path)?;

        let scratch = tempfile::tempdir().context("Failed to create scratch directory for DOC conversion")?;
        let out_dir = scratch.path().join("out");
        let profile_dir = scratch.path().join("profile");
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;

        let stderr_path = scratch.path().join("office-stderr.log");
        let stderr_log = File::create(&stderr_path)
            .with_context(|| format!("Failed to create {}", stderr_path.display()))?;

        let mut command = Command::new(&self.program);
        command
            .arg("--headless")
            .arg("--norestore")
            .arg(format!("-env:UserInstallation={}", file_url(&profile_dir)))
            .arg("--convert-to")
            .arg(CONVERT_FILTER)
            .arg("--outdir")
            .arg(&out_dir)
            .arg(doc_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr_log));

        tracing::debug!(program = %self.program.display(), path = %doc_path.display(), "starting office conversion");

        let mut session = OfficeSession::start(command)?;
        let status = session.wait_timeout(self.timeout)?;
        drop(session);

        if !status.success() {
            let stderr = fs::read_to_string(&stderr_path).unwrap_or_default();
            bail!(
                "{} exited with {} while converting {}: {}",
                self.program.display(),
                status,
                doc_path.display(),
                stderr.trim()
            );
        }

        let converted = out_dir.join(converted_file_name(doc_path)?);
        let text = fs::read_to_string(&converted).with_context(|| {
            format!(
                "Office conversion of {} produced no readable text at {}",
                doc_path.display(),
                converted.display()
            )
        })?;

        Ok(strip_bom(text))
    }
}

impl Default for DocExtractor {
    fn default() -> Self {
        Self::from_config(&OfficeConfig::default())
    }
}

/// A running office process that is terminated when the session is dropped
pub struct OfficeSession {
    child: Child,
}

impl OfficeSession {
    pub fn start(mut command: Command) -> Result<Self> {
        let child = command.spawn().with_context(|| {
            format!(
                "Failed to start office program {}; is LibreOffice installed?",
                Path::new(command.get_program()).display()
            )
        })?;

        Ok(Self { child })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Wait for the process to exit, killing it once `timeout` has elapsed
    pub fn wait_timeout(&mut self, timeout: Duration) -> Result<ExitStatus> {
        let started = Instant::now();
        loop {
            if let Some(status) = self.child.try_wait().context("Failed to poll office process")? {
                return Ok(status);
            }
            if started.elapsed() >= timeout {
                self.terminate();
                bail!("office conversion timed out after {}s", timeout.as_secs_f32());
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn terminate(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            if let Err(e) = self.child.kill() {
                tracing::warn!(pid = self.child.id(), "failed to kill office process: {}", e);
            }
        }
        let _ = self.child.wait();
    }
}

impl Drop for OfficeSession {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Verify that the file starts with the CFB signature `D0 CF 11 E0 A1 B1 1A E1`
fn verify_cfb_signature(path: &Path) -> Result<()> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open DOC file: {}", path.display()))?;

    let mut header = Vec::with_capacity(CFB_MAGIC_SIGNATURE.len());
    file.by_ref()
        .take(CFB_MAGIC_SIGNATURE.len() as u64)
        .read_to_end(&mut header)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if header.len() < CFB_MAGIC_SIGNATURE.len() {
        bail!("File too small to be a valid .doc file (< 8 bytes): {}", path.display());
    }

    if header != CFB_MAGIC_SIGNATURE {
        bail!(
            "Invalid .doc file signature in {}. Expected CFB signature {:02X?}, got {:02X?}",
            path.display(),
            CFB_MAGIC_SIGNATURE,
            header
        );
    }

    Ok(())
}

/// `report.v2.doc` converts to `report.v2.txt`
fn converted_file_name(doc_path: &Path) -> Result<OsString> {
    let mut name = doc_path
        .file_stem()
        .with_context(|| format!("No file name in {}", doc_path.display()))?
        .to_os_string();
    name.push(".txt");
    Ok(name)
}

fn file_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/").replace(' ', "%20");
    if path.starts_with('/') {
        format!("file://{path}")
    } else {
        format!("file:///{path}")
    }
}

fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

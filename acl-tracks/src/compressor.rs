//! External compressor invocation
//!
//! The binary track format is produced by a standalone compressor tool that
//! reads the SJSON intermediate and writes the compressed artifact. This
//! module only launches it and checks the outcome; it never inspects the
//! binary format itself.

use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::{AclError, Result};

/// Poll interval while waiting on a time-limited child process
const WAIT_POLL: Duration = Duration::from_millis(20);

/// Handle to the external compressor tool
#[derive(Debug, Clone)]
pub struct Compressor {
    tool: PathBuf,
    timeout: Option<Duration>,
}

impl Compressor {
    /// Create an invoker for the tool at `tool`
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            timeout: None,
        }
    }

    /// Limit how long a single compression run may take
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Compress the SJSON document at `sjson` into a binary at `output`
    ///
    /// Blocks until the tool exits. On success the binary artifact exists at
    /// `output`; any failure, including a timeout, leaves no usable artifact
    /// there as far as the caller is concerned.
    pub fn compress(&self, sjson: &Path, output: &Path) -> Result<()> {
        debug!(
            "invoking {} -acl={} -out={}",
            self.tool.display(),
            sjson.display(),
            output.display()
        );
        let mut child = Command::new(&self.tool)
            .arg(format!("-acl={}", sjson.display()))
            .arg(format!("-out={}", output.display()))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                AclError::Encode(format!("cannot start compressor {}: {e}", self.tool.display()))
            })?;

        // Drain stderr on a separate thread so a chatty tool cannot fill the
        // pipe and wedge against our wait.
        let stderr_drain = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut diagnostics = String::new();
                let _ = pipe.read_to_string(&mut diagnostics);
                diagnostics
            })
        });

        let status = match self.timeout {
            Some(timeout) => wait_with_timeout(&mut child, timeout)?,
            None => child.wait()?,
        };
        let diagnostics = stderr_drain
            .and_then(|drain| drain.join().ok())
            .unwrap_or_default();

        if !status.success() {
            let detail = diagnostics.trim();
            let mut message = format!("compressor exited with {status} for {}", sjson.display());
            if !detail.is_empty() {
                message.push_str(": ");
                message.push_str(detail);
            }
            return Err(AclError::Encode(message));
        }
        if !output.exists() {
            return Err(AclError::Encode(format!(
                "compressor reported success but produced no output at {}",
                output.display()
            )));
        }
        info!("compressed {} -> {}", sjson.display(), output.display());
        Ok(())
    }
}

/// Wait for the child, killing it when the deadline passes
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<std::process::ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            child.kill()?;
            // Reap the killed child so no zombie outlives the conversion.
            child.wait()?;
            return Err(AclError::Timeout {
                seconds: timeout.as_secs(),
            });
        }
        std::thread::sleep(WAIT_POLL);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// Write an executable shell script standing in for the compressor
    fn fake_tool(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake_compressor.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn successful_run_produces_artifact() {
        let dir = TempDir::new().unwrap();
        let sjson = dir.path().join("clip.acl.sjson");
        let out = dir.path().join("clip.acl");
        fs::write(&sjson, "version = 1\n").unwrap();

        // Copies the -acl= argument to the -out= argument.
        let tool = fake_tool(
            dir.path(),
            "in=${1#-acl=}; out=${2#-out=}; cp \"$in\" \"$out\"",
        );
        Compressor::new(&tool).compress(&sjson, &out).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn nonzero_exit_is_an_encode_error() {
        let dir = TempDir::new().unwrap();
        let sjson = dir.path().join("clip.acl.sjson");
        fs::write(&sjson, "version = 1\n").unwrap();

        let tool = fake_tool(dir.path(), "exit 3");
        let err = Compressor::new(&tool)
            .compress(&sjson, &dir.path().join("clip.acl"))
            .unwrap_err();
        assert!(matches!(err, AclError::Encode(_)));
    }

    #[test]
    fn encode_error_carries_tool_diagnostics() {
        let dir = TempDir::new().unwrap();
        let sjson = dir.path().join("clip.acl.sjson");
        fs::write(&sjson, "version = 1\n").unwrap();

        let tool = fake_tool(dir.path(), "echo 'unquantizable clip' >&2; exit 2");
        let err = Compressor::new(&tool)
            .compress(&sjson, &dir.path().join("clip.acl"))
            .unwrap_err();
        assert!(err.to_string().contains("unquantizable clip"));
    }

    #[test]
    fn missing_tool_is_an_encode_error() {
        let dir = TempDir::new().unwrap();
        let err = Compressor::new(dir.path().join("no_such_tool"))
            .compress(&dir.path().join("a"), &dir.path().join("b"))
            .unwrap_err();
        assert!(matches!(err, AclError::Encode(_)));
    }

    #[test]
    fn silent_success_without_output_is_an_encode_error() {
        let dir = TempDir::new().unwrap();
        let sjson = dir.path().join("clip.acl.sjson");
        fs::write(&sjson, "version = 1\n").unwrap();

        let tool = fake_tool(dir.path(), "exit 0");
        let err = Compressor::new(&tool)
            .compress(&sjson, &dir.path().join("clip.acl"))
            .unwrap_err();
        assert!(matches!(err, AclError::Encode(_)));
    }

    #[test]
    fn hung_tool_times_out() {
        let dir = TempDir::new().unwrap();
        let sjson = dir.path().join("clip.acl.sjson");
        fs::write(&sjson, "version = 1\n").unwrap();

        let tool = fake_tool(dir.path(), "sleep 30");
        let err = Compressor::new(&tool)
            .with_timeout(Duration::from_millis(100))
            .compress(&sjson, &dir.path().join("clip.acl"))
            .unwrap_err();
        assert!(matches!(err, AclError::Timeout { .. }));
    }
}

//! Secret encoding via the server's `securityUtility` tool.
//!
//! The encoder is behind a trait so the generator core never hard-binds to
//! the executable; tests inject a deterministic fake. The real implementation
//! is a blocking subprocess call with no timeout: a hung encoder hangs the
//! generation session.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{GeneratorError, Result};

/// Markers identifying a value that is already encoded
pub const ENCODED_MARKERS: &[&str] = &["{aes}", "{hash}", "{xor}"];

/// True if `value` already carries an encoded-value marker.
///
/// Encoded values must pass through redaction unchanged so repeated
/// generation runs stay idempotent.
pub fn is_encoded(value: &str) -> bool {
    ENCODED_MARKERS.iter().any(|marker| value.contains(marker))
}

/// Strategy for turning a plaintext secret into an encoded token
pub trait Encoder {
    /// Encode `value` with `scheme`, optionally keyed with `key`.
    fn encode(&self, value: &str, scheme: &str, key: Option<&str>) -> Result<String>;
}

/// Encoder backed by `<install>/bin/securityUtility`
pub struct SecurityUtility {
    install_path: PathBuf,
}

impl SecurityUtility {
    pub fn new(install_path: impl Into<PathBuf>) -> Self {
        Self {
            install_path: install_path.into(),
        }
    }

    fn executable(&self) -> PathBuf {
        if cfg!(windows) {
            self.install_path.join("bin/securityUtility.bat")
        } else {
            self.install_path.join("bin/securityUtility")
        }
    }

    /// Arguments passed to the encode invocation. An empty key counts as no
    /// key at all.
    fn encode_args(value: &str, scheme: &str, key: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "encode".to_string(),
            value.to_string(),
            format!("--encoding={scheme}"),
        ];
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            args.push(format!("--key={key}"));
        }
        args
    }
}

impl Encoder for SecurityUtility {
    fn encode(&self, value: &str, scheme: &str, key: Option<&str>) -> Result<String> {
        let executable = self.executable();
        debug!(executable = %executable.display(), scheme, "invoking securityUtility encode");

        let mut command = Command::new(executable);
        command.args(Self::encode_args(value, scheme, key));

        // Blocks until both streams are drained and the process exits
        let output = command.stdout(Stdio::piped()).stderr(Stdio::piped()).output()?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            return Err(GeneratorError::Encryption(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

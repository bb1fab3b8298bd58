//! Phone dialing through a connected Android device.

use std::process::{Command, Stdio};

use thiserror::Error;

use crate::config::DialerConfig;

#[derive(Error, Debug)]
pub enum DialError {
    #[error("No phone number to dial")]
    EmptyNumber,

    #[error("Dialer is disabled")]
    Disabled,

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },
}

/// Something that can place a call.
pub trait Dialer: Send + Sync {
    fn dial(&self, phone_num: &str) -> Result<(), DialError>;
}

/// Convert a local number to international form.
///
/// `07700000001` with `+964` becomes `+9647700000001`. Numbers already starting
/// with `+` pass through unchanged.
pub fn international_number(phone_num: &str, country_code: &str) -> Option<String> {
    let digits: String = phone_num.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return None;
    }
    if digits.starts_with('+') {
        return Some(digits);
    }
    let local = digits.strip_prefix('0').unwrap_or(&digits);
    Some(format!("{}{}", country_code, local))
}

/// Places calls via `adb shell am start -a android.intent.action.CALL`.
#[derive(Debug, Clone)]
pub struct AdbDialer {
    config: DialerConfig,
}

impl AdbDialer {
    pub fn new(config: DialerConfig) -> Self {
        Self { config }
    }

    /// Arguments passed to adb for a number.
    pub fn args(&self, number: &str) -> Vec<String> {
        vec![
            "shell".into(),
            "am".into(),
            "start".into(),
            "-a".into(),
            "android.intent.action.CALL".into(),
            "-d".into(),
            format!("tel:{}", number),
        ]
    }
}

impl Dialer for AdbDialer {
    fn dial(&self, phone_num: &str) -> Result<(), DialError> {
        if !self.config.enabled {
            return Err(DialError::Disabled);
        }
        let number = international_number(phone_num, &self.config.country_code)
            .ok_or(DialError::EmptyNumber)?;

        tracing::info!(number = %number, "Dialing");
        let status = Command::new(&self.config.adb_path)
            .args(self.args(&number))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| DialError::Launch {
                program: self.config.adb_path.clone(),
                source,
            })?;

        if !status.success() {
            tracing::warn!(%status, "Dial command failed");
            return Err(DialError::Failed {
                program: self.config.adb_path.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

//! Application configuration — TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::device::DEFAULT_DEVICE_PATH;
use crate::led::Target;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Driver control file. Default: "/proc/acpi/nuc_led".
    #[serde(default = "default_device_path")]
    pub device_path: String,

    /// LED used when neither `--ring` nor `--power` is given. Values: "ring", "power".
    #[serde(default = "default_target")]
    pub default_target: String,

    /// How often (ms) a running notify checks for Ctrl+C.
    #[serde(default = "default_notify_tick_ms")]
    pub notify_tick_ms: u64,
}

fn default_device_path() -> String {
    DEFAULT_DEVICE_PATH.into()
}
fn default_target() -> String {
    "ring".into()
}
fn default_notify_tick_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Config {
            device_path: default_device_path(),
            default_target: default_target(),
            notify_tick_ms: default_notify_tick_ms(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `device_path` is empty or whitespace-only.
    EmptyDevicePath,
    /// `default_target` is neither "ring" nor "power".
    InvalidTarget(String),
    /// `notify_tick_ms` is zero.
    ZeroTick,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyDevicePath => write!(f, "Device path cannot be empty"),
            ValidationError::InvalidTarget(t) => {
                write!(f, "Invalid default target: {t} (expected ring or power)")
            }
            ValidationError::ZeroTick => write!(f, "notify_tick_ms must be at least 1"),
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nucled"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// The configured default LED, falling back to the ring LED if invalid.
    pub fn target(&self) -> Target {
        self.default_target.parse().unwrap_or_else(|e| {
            log::warn!("{e}, using ring");
            Target::Ring
        })
    }

    /// Polling interval for notify holds.
    pub fn notify_tick(&self) -> Duration {
        Duration::from_millis(self.notify_tick_ms.max(1))
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.device_path.trim().is_empty() {
            errors.push(ValidationError::EmptyDevicePath);
        }
        if self.default_target.parse::<Target>().is_err() {
            errors.push(ValidationError::InvalidTarget(self.default_target.clone()));
        }
        if self.notify_tick_ms == 0 {
            errors.push(ValidationError::ZeroTick);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

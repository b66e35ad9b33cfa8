//! CLI subcommands — status, get/set of brightness, color and effect, notify, raw writes.

mod brightness;
mod color;
mod config_cmd;
mod effect;
mod notify;
mod raw;
mod status;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use nucled_lib::config::Config;
pub(super) use nucled_lib::device::{DeviceIo, FileDevice};
pub(super) use nucled_lib::error::Result;
pub(super) use nucled_lib::led::{Color, Effect, LedState, Target};

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{key:<width$}{value}", width = w);
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Pretty-print `value` as JSON on stdout.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| nucled_lib::NucledError::Output(format!("JSON serialization failed: {e}")))?;
    println!("{json_str}");
    Ok(())
}

/// Options shared by all subcommands.
pub struct GlobalOpts {
    pub ring: bool,
    pub power: bool,
    pub device: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

impl GlobalOpts {
    /// `--power` / `--ring`, else the configured default.
    pub(super) fn target(&self, config: &Config) -> Target {
        if self.power {
            Target::Power
        } else if self.ring {
            Target::Ring
        } else {
            config.target()
        }
    }

    /// `--device`, else the configured control file.
    pub(super) fn device_path(&self, config: &Config) -> PathBuf {
        self.device
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.device_path))
    }
}

/// Load config from `path` if given, else from the default location.
pub(super) fn load_config(path: Option<&Path>) -> Config {
    let (config, warnings) = match path {
        Some(p) => Config::load_from(p),
        None => Config::load_with_warnings(),
    };
    for w in &warnings {
        log::warn!("{w}");
    }
    if let Err(errors) = config.validate() {
        for e in &errors {
            log::warn!("[config] {e}");
        }
    }
    config
}

#[derive(Subcommand)]
pub enum Command {
    /// Print current values for the LED
    Status,

    /// Get or set brightness [0,100]
    Brightness {
        /// New brightness
        #[arg(allow_negative_numbers = true)]
        value: Option<i64>,
    },

    /// Get or set color
    Color {
        /// New color name
        name: Option<String>,
    },

    /// Get or set blink/fade effect
    Effect {
        /// New effect name
        name: Option<String>,
    },

    /// Change the LED settings for a duration, then restore them
    Notify {
        /// Color to show
        #[arg(long)]
        color: Option<String>,
        /// Brightness to show
        #[arg(long, allow_negative_numbers = true)]
        brightness: Option<i64>,
        /// Effect to show
        #[arg(long)]
        effect: Option<String>,
        /// Seconds to hold the override
        #[arg(long)]
        duration: u64,
    },

    /// Write a raw command string, useful for testing
    Raw {
        /// Command, e.g. "ring,100,none,green"
        raw: String,
    },

    /// Show current configuration and file paths
    Config,
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, opts: &GlobalOpts) -> Result<()> {
    let config = load_config(opts.config.as_deref());
    let json = opts.json;

    let open_led = || {
        let target = opts.target(&config);
        let device = FileDevice::new(opts.device_path(&config));
        log::debug!("{} LED via {}", target, device.path().display());
        LedState::new(target, device)
    };

    match cmd {
        Command::Config => config_cmd::cmd_config(&config, opts),
        Command::Status => status::cmd_status(&mut open_led(), json),
        Command::Brightness { value } => brightness::cmd_brightness(&mut open_led(), value, json),
        Command::Color { name } => color::cmd_color(&mut open_led(), name.as_deref(), json),
        Command::Effect { name } => effect::cmd_effect(&mut open_led(), name.as_deref(), json),
        Command::Notify {
            color,
            brightness,
            effect,
            duration,
        } => {
            if json {
                warn_json_unsupported("notify");
            }
            let request = notify::NotifyArgs {
                color,
                brightness,
                effect,
                duration,
            };
            notify::cmd_notify(&mut open_led(), &request, config.notify_tick())
        }
        Command::Raw { raw } => {
            if json {
                warn_json_unsupported("raw");
            }
            raw::cmd_raw(&mut open_led(), &raw)
        }
    }
}

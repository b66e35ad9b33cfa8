//! `config` subcommand — show current configuration and file paths.

use serde::Serialize;

use super::{Config, GlobalOpts, Result, Target, kv, kv_indent, kv_width, print_json};

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub effective: EffectiveJson,
}

/// Values after applying command-line overrides.
#[derive(Serialize)]
pub(super) struct EffectiveJson {
    pub target: Target,
    pub device_path: String,
}

fn collect_config(config: &Config, opts: &GlobalOpts) -> ConfigOutput {
    let config_path = opts.config.clone().or_else(Config::path);
    ConfigOutput {
        config_file_exists: config_path.as_ref().is_some_and(|p| p.exists()),
        config_file: config_path.map(|p| p.display().to_string()),
        settings: config.clone(),
        effective: EffectiveJson {
            target: opts.target(config),
            device_path: opts.device_path(config).display().to_string(),
        },
    }
}

pub(super) fn cmd_config(config: &Config, opts: &GlobalOpts) -> Result<()> {
    let output = collect_config(config, opts);
    if opts.json {
        return print_json(&output);
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &[
            "device_path:",
            "default_target:",
            "notify_tick_ms:",
            "LED:",
            "Device:",
        ],
    );

    match &output.config_file {
        Some(p) if output.config_file_exists => kv("Config file:", format_args!("{p} (loaded)"), w),
        Some(p) => kv(
            "Config file:",
            format_args!("{p} (not found, using defaults)"),
            w,
        ),
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("device_path:", &config.device_path, w);
    kv_indent("default_target:", &config.default_target, w);
    kv_indent("notify_tick_ms:", config.notify_tick_ms, w);
    println!();

    println!("Effective:");
    kv_indent("LED:", output.effective.target, w);
    kv_indent("Device:", &output.effective.device_path, w);
    Ok(())
}

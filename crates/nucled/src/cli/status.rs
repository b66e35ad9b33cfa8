//! `status` subcommand — print brightness, color and effect of one LED.

use serde::Serialize;

use super::{Color, DeviceIo, Effect, LedState, Result, Target, format_kv, kv_width, print_json};

#[derive(Serialize)]
pub(super) struct StatusOutput {
    pub target: Target,
    pub brightness: u8,
    pub color: Color,
    pub effect: Effect,
    /// Command string that reproduces this state.
    pub state: String,
}

/// Read everything `status` shows from the device.
fn collect_status(led: &mut LedState<impl DeviceIo>) -> Result<StatusOutput> {
    Ok(StatusOutput {
        target: led.target(),
        brightness: led.brightness()?,
        color: led.color()?,
        effect: led.effect()?,
        state: led.serialized_state()?,
    })
}

fn format_status(status: &StatusOutput) -> Vec<String> {
    let w = kv_width(&["Brightness:", "Color:", "Effect:"], &[]);
    vec![
        format!("== {} LED ==", status.target.label()),
        format_kv("Brightness:", status.brightness, w),
        format_kv("Color:", status.color, w),
        format_kv("Effect:", status.effect, w),
    ]
}

pub(super) fn cmd_status(led: &mut LedState<impl DeviceIo>, json: bool) -> Result<()> {
    let status = collect_status(led)?;
    if json {
        return print_json(&status);
    }
    for line in format_status(&status) {
        println!("{line}");
    }
    Ok(())
}

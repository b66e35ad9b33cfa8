//! `brightness` subcommand — get or set brightness [0,100].

use serde::Serialize;

use super::{DeviceIo, LedState, Result, kv, kv_width, print_json};

#[derive(Serialize)]
struct BrightnessOutput {
    brightness: u8,
}

/// Set (and commit) if `value` is given, then print the brightness.
pub(super) fn cmd_brightness(
    led: &mut LedState<impl DeviceIo>,
    value: Option<i64>,
    json: bool,
) -> Result<()> {
    if let Some(value) = value {
        led.edit(|led| led.set_brightness(value))?;
    }
    let brightness = led.brightness()?;

    if json {
        return print_json(&BrightnessOutput { brightness });
    }
    kv("Brightness:", brightness, kv_width(&["Brightness:"], &[]));
    Ok(())
}

//! `color` subcommand — get or set color.

use serde::Serialize;

use super::{Color, DeviceIo, LedState, Result, kv, kv_width, print_json};

#[derive(Serialize)]
struct ColorOutput {
    color: Color,
    available: Vec<Color>,
}

/// Set (and commit) if `name` is given; otherwise print the color and the
/// colors this LED supports.
pub(super) fn cmd_color(
    led: &mut LedState<impl DeviceIo>,
    name: Option<&str>,
    json: bool,
) -> Result<()> {
    if let Some(name) = name {
        let color: Color = name.parse()?;
        return led.edit(|led| led.set_color(color));
    }

    let color = led.color()?;
    let available = led.target().supported_colors();
    if json {
        return print_json(&ColorOutput { color, available });
    }
    kv("Color:", color, kv_width(&["Color:"], &[]));
    println!("Available colors:");
    for c in available {
        println!("- {c}");
    }
    Ok(())
}

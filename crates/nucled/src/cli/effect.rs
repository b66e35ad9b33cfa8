//! `effect` subcommand — get or set the blink/fade effect.

use serde::Serialize;

use super::{DeviceIo, Effect, LedState, Result, kv, kv_width, print_json};

#[derive(Serialize)]
struct EffectOutput {
    effect: Effect,
    available: [Effect; 7],
}

/// Set (and commit) if `name` is given; otherwise print the effect and all options.
pub(super) fn cmd_effect(
    led: &mut LedState<impl DeviceIo>,
    name: Option<&str>,
    json: bool,
) -> Result<()> {
    if let Some(name) = name {
        let effect: Effect = name.parse()?;
        return led.edit(|led| led.set_effect(effect));
    }

    let effect = led.effect()?;
    if json {
        return print_json(&EffectOutput {
            effect,
            available: Effect::ALL,
        });
    }
    kv("Current effect:", effect, kv_width(&["Current effect:"], &[]));
    println!("Available options:");
    for e in Effect::ALL {
        println!("- {e}");
    }
    Ok(())
}

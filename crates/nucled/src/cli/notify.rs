//! `notify` subcommand — show an override for a while, then restore.

use std::time::Duration;

use nucled_lib::notify::{NotifyController, Overrides, WaitOutcome};

use super::{Color, DeviceIo, Effect, LedState, RUNNING, Result};

/// Raw `notify` arguments as given on the command line.
pub(super) struct NotifyArgs {
    pub color: Option<String>,
    pub brightness: Option<i64>,
    pub effect: Option<String>,
    /// Seconds.
    pub duration: u64,
}

impl NotifyArgs {
    /// Resolve color/effect names. Fails before touching the device.
    fn overrides(&self) -> Result<Overrides> {
        Ok(Overrides {
            color: self
                .color
                .as_deref()
                .map(str::parse::<Color>)
                .transpose()?,
            brightness: self.brightness,
            effect: self
                .effect
                .as_deref()
                .map(str::parse::<Effect>)
                .transpose()?,
        })
    }
}

pub(super) fn cmd_notify(
    led: &mut LedState<impl DeviceIo>,
    args: &NotifyArgs,
    tick: Duration,
) -> Result<()> {
    let overrides = args.overrides()?;
    if overrides.is_empty() {
        log::warn!("notify without --color, --brightness or --effect changes nothing");
    }

    let outcome = NotifyController::new(led, &RUNNING)
        .with_tick(tick)
        .notify(overrides, Duration::from_secs(args.duration))?;
    if outcome == WaitOutcome::Interrupted {
        println!("Interrupted, previous state restored");
    }
    Ok(())
}

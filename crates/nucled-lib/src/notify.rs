//! Temporary LED override ("notify"): apply, hold, restore.
//!
//! [`NotifyController`] captures the current snapshot, applies the requested
//! overrides, commits, waits, and writes the snapshot back. The wait polls a
//! shared running flag so a Ctrl+C handler can cut it short; the restore runs
//! on every exit path once the override has been committed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::device::DeviceIo;
use crate::error::Result;
use crate::led::{Color, Effect, LedState};

/// Default polling interval for the running flag while holding an override.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Values to override for the notification. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub color: Option<Color>,
    pub brightness: Option<i64>,
    pub effect: Option<Effect>,
}

impl Overrides {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.brightness.is_none() && self.effect.is_none()
    }

    /// Apply through the validated setters.
    fn apply<D: DeviceIo>(&self, state: &mut LedState<D>) -> Result<()> {
        if let Some(color) = self.color {
            state.set_color(color)?;
        }
        if let Some(brightness) = self.brightness {
            state.set_brightness(brightness)?;
        }
        if let Some(effect) = self.effect {
            state.set_effect(effect)?;
        }
        Ok(())
    }
}

/// How a hold ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full duration passed.
    Elapsed,
    /// The running flag was cleared first.
    Interrupted,
}

/// Sleep for `duration` in steps of `tick`, returning early once `running` is false.
///
/// A duration too large to add to the current instant has no deadline; the
/// wait then lasts until `running` is cleared.
pub fn wait_while_running(duration: Duration, running: &AtomicBool, tick: Duration) -> WaitOutcome {
    let tick = tick.max(Duration::from_millis(1));
    let deadline = Instant::now().checked_add(duration);
    loop {
        let now = Instant::now();
        if deadline.is_some_and(|d| now >= d) {
            return WaitOutcome::Elapsed;
        }
        if !running.load(Ordering::SeqCst) {
            return WaitOutcome::Interrupted;
        }
        let step = match deadline {
            Some(d) => tick.min(d - now),
            None => tick,
        };
        std::thread::sleep(step);
    }
}

/// Writes `original` back to the device when finished or dropped.
struct RestoreGuard<'s, D: DeviceIo> {
    state: &'s mut LedState<D>,
    original: Option<String>,
}

impl<'s, D: DeviceIo> RestoreGuard<'s, D> {
    fn new(state: &'s mut LedState<D>, original: String) -> Self {
        RestoreGuard {
            state,
            original: Some(original),
        }
    }

    fn finish(mut self) -> Result<()> {
        match self.original.take() {
            Some(original) => {
                log::debug!("restoring state: {original}");
                self.state.set_raw(&original)
            }
            None => Ok(()),
        }
    }
}

impl<D: DeviceIo> Drop for RestoreGuard<'_, D> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            log::warn!("notify aborted, restoring {original}");
            if let Err(e) = self.state.set_raw(&original) {
                log::warn!("failed to restore LED state: {e}");
            }
        }
    }
}

/// Runs notifications against one LED.
pub struct NotifyController<'a, D: DeviceIo> {
    state: &'a mut LedState<D>,
    running: &'a AtomicBool,
    tick: Duration,
}

impl<'a, D: DeviceIo> NotifyController<'a, D> {
    /// `running` is polled during the hold; clearing it ends the hold early.
    pub fn new(state: &'a mut LedState<D>, running: &'a AtomicBool) -> Self {
        NotifyController {
            state,
            running,
            tick: DEFAULT_TICK,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Show `overrides` for `duration`, then restore the previous state.
    ///
    /// Invalid overrides fail before anything is written and leave the
    /// in-memory state unchanged. Once the override is committed the previous
    /// snapshot is always written back, also when the hold is interrupted
    /// or the commit itself fails.
    pub fn notify(&mut self, overrides: Overrides, duration: Duration) -> Result<WaitOutcome> {
        let original = self.state.serialized_state()?;
        log::debug!("starting notify, original state: {original}");

        let before = self.state.fields();
        if let Err(e) = overrides.apply(self.state) {
            self.state.restore_fields(before);
            return Err(e);
        }

        if let Err(e) = self.state.commit() {
            if let Err(restore_err) = self.state.set_raw(&original) {
                log::warn!("failed to restore LED state: {restore_err}");
            }
            return Err(e);
        }

        let guard = RestoreGuard::new(&mut *self.state, original);
        let outcome = wait_while_running(duration, self.running, self.tick);
        if outcome == WaitOutcome::Interrupted {
            log::warn!("notify interrupted, restoring early");
        }
        guard.finish()?;
        Ok(outcome)
    }
}

//! `raw` subcommand — write a command string verbatim.

use super::{DeviceIo, LedState, Result};

pub(super) fn cmd_raw(led: &mut LedState<impl DeviceIo>, raw: &str) -> Result<()> {
    led.set_raw(raw)
}

//! Unified error type for the nucled-lib crate.
//!
//! [`NucledError`] covers status parsing, validation of requested changes,
//! device I/O (wrapped [`DeviceError`]) and output failures.
//! `From` impls allow `?` to propagate across module boundaries.

use std::fmt;

use crate::device::DeviceError;
use crate::led::{Color, Target};

/// Unified error type for nucled-lib operations.
#[derive(Debug)]
pub enum NucledError {
    /// A status line has no `:` separator, or its value could not be parsed.
    MalformedStateLine(String),
    /// Blink/fade code not present in the effect table.
    UnknownEffectCode(u32),
    /// Color code not present in the target's color table.
    UnknownColorCode { target: Target, code: u32 },
    /// Effect name does not match any effect.
    UnknownEffectName(String),
    /// Color name does not match any color.
    UnknownColorName(String),
    /// Target name is neither `ring` nor `power`.
    UnknownTarget(String),
    /// Color exists but the target's hardware cannot display it.
    UnsupportedColor { target: Target, color: Color },
    /// Brightness outside `[0, 100]`.
    BrightnessOutOfRange(i64),
    /// Field still unknown: neither reported by the device nor set.
    IncompleteState(&'static str),
    /// Device read/write error.
    Device(DeviceError),
    /// Command output could not be produced (e.g. JSON serialization).
    Output(String),
}

impl fmt::Display for NucledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NucledError::MalformedStateLine(line) => write!(f, "Malformed state line: {line:?}"),
            NucledError::UnknownEffectCode(code) => write!(f, "Unknown effect code: {code:#04x}"),
            NucledError::UnknownColorCode { target, code } => {
                write!(f, "Unknown {target} color code: {code:#04x}")
            }
            NucledError::UnknownEffectName(name) => write!(f, "Unknown effect: {name}"),
            NucledError::UnknownColorName(name) => write!(f, "Unknown color: {name}"),
            NucledError::UnknownTarget(name) => {
                write!(f, "Unknown LED: {name} (expected ring or power)")
            }
            NucledError::UnsupportedColor { target, color } => {
                write!(f, "Tried to set unsupported color for {target} LED: {color}")
            }
            NucledError::BrightnessOutOfRange(value) => {
                write!(f, "Brightness must be [0-100], was: {value}")
            }
            NucledError::IncompleteState(field) => {
                write!(f, "LED {field} is unknown (not reported by device, not set)")
            }
            NucledError::Device(e) => write!(f, "{e}"),
            NucledError::Output(e) => write!(f, "Failed to produce output: {e}"),
        }
    }
}

impl std::error::Error for NucledError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NucledError::Device(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DeviceError> for NucledError {
    fn from(e: DeviceError) -> Self {
        NucledError::Device(e)
    }
}

/// Crate-level Result alias using [`NucledError`].
pub type Result<T> = std::result::Result<T, NucledError>;

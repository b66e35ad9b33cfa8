//! nucled — status parsing and state control for Intel NUC ring and power LEDs.

pub mod config;
pub mod device;
pub mod error;
pub mod led;
pub mod notify;

pub use error::NucledError;

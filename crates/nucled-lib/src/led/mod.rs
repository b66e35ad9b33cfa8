//! LED model — targets, colors, effects, and the per-LED state mirror.

mod state;
mod types;

pub use state::{LedState, StateFields, format_snapshot, parse_status};
pub use types::{Color, Effect, MAX_BRIGHTNESS, Target};

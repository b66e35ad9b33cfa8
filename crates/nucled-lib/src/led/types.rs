//! LED targets, colors and effects, with the driver's code tables.
//!
//! Status text reports colors and effects as hex codes; commands use the
//! symbolic names. Colors decode per target, effects through one shared table.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{NucledError, Result};

/// Highest brightness the driver accepts (percent).
pub const MAX_BRIGHTNESS: u8 = 100;

/// Which LED a state object addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Ring,
    Power,
}

/// Ring LED: code → color.
const RING_COLORS: &[(u32, Color)] = &[
    (0x00, Color::Off),
    (0x01, Color::Cyan),
    (0x02, Color::Pink),
    (0x03, Color::Yellow),
    (0x04, Color::Blue),
    (0x05, Color::Red),
    (0x06, Color::Green),
    (0x07, Color::White),
];

/// Power LED: code → color.
const POWER_COLORS: &[(u32, Color)] = &[
    (0x00, Color::Off),
    (0x01, Color::Blue),
    (0x02, Color::Amber),
];

impl Target {
    /// Lowercase name, used as the status-line prefix and in commands.
    pub fn name(self) -> &'static str {
        match self {
            Target::Ring => "ring",
            Target::Power => "power",
        }
    }

    /// Capitalized name for headings.
    pub fn label(self) -> &'static str {
        match self {
            Target::Ring => "Ring",
            Target::Power => "Power",
        }
    }

    fn color_table(self) -> &'static [(u32, Color)] {
        match self {
            Target::Ring => RING_COLORS,
            Target::Power => POWER_COLORS,
        }
    }

    /// Decode a status color code for this LED.
    pub fn color_for_code(self, code: u32) -> Option<Color> {
        self.color_table()
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, color)| *color)
    }

    /// Driver code of `color` on this LED, if the hardware supports it.
    pub fn code_for_color(self, color: Color) -> Option<u32> {
        self.color_table()
            .iter()
            .find(|(_, c)| *c == color)
            .map(|(code, _)| *code)
    }

    /// Colors this LED can display, in code order.
    pub fn supported_colors(self) -> Vec<Color> {
        self.color_table().iter().map(|(_, c)| *c).collect()
    }

    pub fn supports(self, color: Color) -> bool {
        self.code_for_color(color).is_some()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = NucledError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ring" => Ok(Target::Ring),
            "power" => Ok(Target::Power),
            _ => Err(NucledError::UnknownTarget(s.trim().to_string())),
        }
    }
}

/// Every color the driver knows; each LED supports a subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Off,
    Amber,
    Cyan,
    Pink,
    Yellow,
    Blue,
    Red,
    Green,
    White,
}

impl Color {
    pub const ALL: [Color; 9] = [
        Color::Off,
        Color::Amber,
        Color::Cyan,
        Color::Pink,
        Color::Yellow,
        Color::Blue,
        Color::Red,
        Color::Green,
        Color::White,
    ];

    /// Symbol used in commands.
    pub fn symbol(self) -> &'static str {
        match self {
            Color::Off => "off",
            Color::Amber => "amber",
            Color::Cyan => "cyan",
            Color::Pink => "pink",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Green => "green",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Color {
    type Err = NucledError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Color::ALL
            .into_iter()
            .find(|c| c.symbol() == name)
            .ok_or_else(|| NucledError::UnknownColorName(s.trim().to_string()))
    }
}

/// Blink/fade pattern, or solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    BlinkFast,
    BlinkMedium,
    BlinkSlow,
    FadeFast,
    FadeMedium,
    FadeSlow,
    #[serde(rename = "none")]
    Solid,
}

/// Status code → effect. Shared by both LEDs; 0x00 and 0x04 both mean solid.
const EFFECT_CODES: &[(u32, Effect)] = &[
    (0x00, Effect::Solid),
    (0x01, Effect::BlinkFast),
    (0x02, Effect::BlinkSlow),
    (0x03, Effect::FadeFast),
    (0x04, Effect::Solid),
    (0x05, Effect::BlinkMedium),
    (0x06, Effect::FadeSlow),
    (0x07, Effect::FadeMedium),
];

impl Effect {
    pub const ALL: [Effect; 7] = [
        Effect::BlinkFast,
        Effect::BlinkMedium,
        Effect::BlinkSlow,
        Effect::FadeFast,
        Effect::FadeMedium,
        Effect::FadeSlow,
        Effect::Solid,
    ];

    /// Decode a status effect code. There is no inverse: commands use [`Effect::symbol`].
    pub fn from_code(code: u32) -> Option<Effect> {
        EFFECT_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, e)| *e)
    }

    /// Symbol used in commands.
    pub fn symbol(self) -> &'static str {
        match self {
            Effect::BlinkFast => "blink_fast",
            Effect::BlinkMedium => "blink_medium",
            Effect::BlinkSlow => "blink_slow",
            Effect::FadeFast => "fade_fast",
            Effect::FadeMedium => "fade_medium",
            Effect::FadeSlow => "fade_slow",
            Effect::Solid => "none",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Effect {
    type Err = NucledError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Effect::ALL
            .into_iter()
            .find(|e| e.symbol() == name)
            .ok_or_else(|| NucledError::UnknownEffectName(s.trim().to_string()))
    }
}

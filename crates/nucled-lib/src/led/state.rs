//! In-memory mirror of one LED's state, with status parsing and command
//! serialization.
//!
//! Status text from the driver looks like:
//!
//! ```text
//! Ring LED Brightness: 50%
//! Ring LED Blink/Fade: Solid (0x04)
//! Ring LED Color: Blue (0x04)
//! ```
//!
//! Commands (snapshots) look like `ring,50,none,blue`.

use std::fmt;

use crate::device::DeviceIo;
use crate::error::{NucledError, Result};

use super::types::{Color, Effect, MAX_BRIGHTNESS, Target};

/// Field values read from status text or set by the caller. `None` = unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateFields {
    pub brightness: Option<u8>,
    pub color: Option<Color>,
    pub effect: Option<Effect>,
}

impl StateFields {
    /// Overlay the fields present in `other`.
    fn merge(&mut self, other: StateFields) {
        self.brightness = other.brightness.or(self.brightness);
        self.color = other.color.or(self.color);
        self.effect = other.effect.or(self.effect);
    }
}

/// Parse `"50%"` (surrounding whitespace allowed).
fn parse_brightness(value: &str) -> Option<u8> {
    value.trim().trim_end_matches('%').trim().parse().ok()
}

/// Extract the hex code from the first parenthesized group, e.g. `"Blue (0x04)"` → 4.
fn parse_code(value: &str) -> Option<u32> {
    let open = value.find('(')?;
    let rest = &value[open + 1..];
    let inner = rest[..rest.find(')')?].trim();
    let digits = inner
        .strip_prefix("0x")
        .or_else(|| inner.strip_prefix("0X"))
        .unwrap_or(inner);
    u32::from_str_radix(digits, 16).ok()
}

/// Parse the lines of `text` that belong to `target`.
///
/// Fails on the first line without a `:`, on an unparsable value, or on an
/// unknown color/effect code. Lines of other targets and unknown fields are
/// skipped. Fields the text does not mention stay `None`.
pub fn parse_status(target: Target, text: &str) -> Result<StateFields> {
    let mut fields = StateFields::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line == "\0" {
            continue;
        }
        let (desc, value) = line
            .split_once(':')
            .ok_or_else(|| NucledError::MalformedStateLine(line.to_string()))?;
        if !desc.to_lowercase().starts_with(target.name()) {
            continue;
        }
        let malformed = || NucledError::MalformedStateLine(line.to_string());

        if desc.contains("Brightness") {
            fields.brightness = Some(parse_brightness(value).ok_or_else(malformed)?);
        } else if desc.contains("Blink") {
            let code = parse_code(value).ok_or_else(malformed)?;
            fields.effect =
                Some(Effect::from_code(code).ok_or(NucledError::UnknownEffectCode(code))?);
        } else if desc.contains("Color") {
            let code = parse_code(value).ok_or_else(malformed)?;
            fields.color = Some(
                target
                    .color_for_code(code)
                    .ok_or(NucledError::UnknownColorCode { target, code })?,
            );
        }
    }

    Ok(fields)
}

/// Format a snapshot: `<target>,<brightness>,<effect>,<color>`.
pub fn format_snapshot(target: Target, brightness: u8, effect: Effect, color: Color) -> String {
    format!("{target},{brightness},{effect},{color}")
}

/// State of one LED, bound to the device it was read from.
///
/// Getters fetch from the device the first time they find their field unset.
/// Setters validate and change only the in-memory value; nothing reaches the
/// device until [`commit`](Self::commit).
pub struct LedState<D: DeviceIo> {
    target: Target,
    device: D,
    fields: StateFields,
}

impl<D: DeviceIo> LedState<D> {
    pub fn new(target: Target, device: D) -> Self {
        LedState {
            target,
            device,
            fields: StateFields::default(),
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// True once brightness, color and effect are all known.
    pub fn is_fetched(&self) -> bool {
        let f = &self.fields;
        f.brightness.is_some() && f.color.is_some() && f.effect.is_some()
    }

    /// Read and parse the device status.
    ///
    /// All-or-nothing: on error the in-memory fields are left as they were.
    pub fn fetch(&mut self) -> Result<()> {
        log::debug!("fetching {} LED state", self.target);
        let text = self.device.read_status()?;
        let parsed = parse_status(self.target, &text)?;
        self.fields.merge(parsed);
        Ok(())
    }

    /// Current state as a command string. Fetches first if brightness is unknown.
    pub fn serialized_state(&mut self) -> Result<String> {
        if self.fields.brightness.is_none() {
            self.fetch()?;
        }
        let StateFields {
            brightness,
            color,
            effect,
        } = self.fields;
        let state = format_snapshot(
            self.target,
            brightness.ok_or(NucledError::IncompleteState("brightness"))?,
            effect.ok_or(NucledError::IncompleteState("effect"))?,
            color.ok_or(NucledError::IncompleteState("color"))?,
        );
        log::debug!("serialized state: {state}");
        Ok(state)
    }

    /// Write the current state to the device.
    pub fn commit(&mut self) -> Result<()> {
        let state = self.serialized_state()?;
        log::debug!("setting state: {state}");
        self.device.write_command(&state)?;
        Ok(())
    }

    /// Write `raw` to the device unvalidated, then re-fetch.
    pub fn set_raw(&mut self, raw: &str) -> Result<()> {
        log::debug!("setting raw state: {raw}");
        self.device.write_command(raw)?;
        self.fetch()
    }

    pub fn color(&mut self) -> Result<Color> {
        if self.fields.color.is_none() {
            self.fetch()?;
        }
        self.fields.color.ok_or(NucledError::IncompleteState("color"))
    }

    /// Fails with `UnsupportedColor` if this LED cannot display `color`.
    pub fn set_color(&mut self, color: Color) -> Result<()> {
        if !self.target.supports(color) {
            return Err(NucledError::UnsupportedColor {
                target: self.target,
                color,
            });
        }
        self.fields.color = Some(color);
        Ok(())
    }

    pub fn brightness(&mut self) -> Result<u8> {
        if self.fields.brightness.is_none() {
            self.fetch()?;
        }
        self.fields
            .brightness
            .ok_or(NucledError::IncompleteState("brightness"))
    }

    /// Fails with `BrightnessOutOfRange` outside `[0, 100]`; never clamps.
    pub fn set_brightness(&mut self, brightness: i64) -> Result<()> {
        let value = u8::try_from(brightness)
            .ok()
            .filter(|b| *b <= MAX_BRIGHTNESS)
            .ok_or(NucledError::BrightnessOutOfRange(brightness))?;
        self.fields.brightness = Some(value);
        Ok(())
    }

    pub fn effect(&mut self) -> Result<Effect> {
        if self.fields.effect.is_none() {
            self.fetch()?;
        }
        self.fields
            .effect
            .ok_or(NucledError::IncompleteState("effect"))
    }

    /// Effects are not validated per LED; both share one table.
    pub fn set_effect(&mut self, effect: Effect) -> Result<()> {
        self.fields.effect = Some(effect);
        Ok(())
    }

    /// Fetch, let `f` change the state, then commit.
    ///
    /// If `f` fails, the in-memory fields go back to what was fetched and
    /// nothing is written.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        self.fetch()?;
        let before = self.fields;
        match f(self) {
            Ok(r) => {
                self.commit()?;
                Ok(r)
            }
            Err(e) => {
                self.fields = before;
                Err(e)
            }
        }
    }

    pub(crate) fn fields(&self) -> StateFields {
        self.fields
    }

    pub(crate) fn restore_fields(&mut self, fields: StateFields) {
        self.fields = fields;
    }
}

impl<D: DeviceIo> fmt::Display for LedState<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_dash(v: Option<impl fmt::Display>) -> String {
            v.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
        }
        write!(
            f,
            "{}: brightness {}, color {}, effect {}",
            self.target,
            or_dash(self.fields.brightness),
            or_dash(self.fields.color),
            or_dash(self.fields.effect)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::MockDevice;

    const STATUS: &str = "\
Power LED Brightness: 36%
Power LED Blink/Fade: Solid (0x04)
Power LED Color: Amber (0x02)

Ring LED Brightness: 50%
Ring LED Blink/Fade: Fade Slow (0x06)
Ring LED Color: Blue (0x04)
\0
";

    // ── parse helpers ──

    #[test]
    fn brightness_strips_percent_and_space() {
        assert_eq!(parse_brightness(" 36%"), Some(36));
        assert_eq!(parse_brightness("100 % "), Some(100));
        assert_eq!(parse_brightness("0"), Some(0));
        assert_eq!(parse_brightness("high"), None);
    }

    #[test]
    fn code_from_first_parenthesis() {
        assert_eq!(parse_code(" Blue (0x04)"), Some(4));
        assert_eq!(parse_code("White (07)"), Some(7));
        assert_eq!(parse_code("X (0X0a) (0x01)"), Some(10));
        assert_eq!(parse_code("Blue"), None);
        assert_eq!(parse_code("Blue (zz)"), None);
    }

    // ── parse_status ──

    #[test]
    fn parse_ring_lines_only() {
        let fields = parse_status(Target::Ring, STATUS).unwrap();
        assert_eq!(fields.brightness, Some(50));
        assert_eq!(fields.effect, Some(Effect::FadeSlow));
        assert_eq!(fields.color, Some(Color::Blue));
    }

    #[test]
    fn parse_power_lines_only() {
        let fields = parse_status(Target::Power, STATUS).unwrap();
        assert_eq!(fields.brightness, Some(36));
        assert_eq!(fields.effect, Some(Effect::Solid));
        assert_eq!(fields.color, Some(Color::Amber));
    }

    #[test]
    fn parse_prefix_is_case_insensitive() {
        let fields = parse_status(Target::Ring, "RING LED Brightness: 5%").unwrap();
        assert_eq!(fields.brightness, Some(5));
    }

    #[test]
    fn parse_unknown_fields_ignored() {
        let text = "Ring LED Temperature: hot\nRing LED Brightness: 5%";
        let fields = parse_status(Target::Ring, text).unwrap();
        assert_eq!(fields.brightness, Some(5));
        assert_eq!(fields.color, None);
    }

    #[test]
    fn parse_line_without_colon_fails() {
        let err = parse_status(Target::Ring, "Ring LED Brightness 50%").unwrap_err();
        assert!(matches!(err, NucledError::MalformedStateLine(ref l) if l.contains("50%")));
    }

    #[test]
    fn parse_line_without_colon_fails_even_for_other_target() {
        let err = parse_status(Target::Ring, "garbage\nRing LED Brightness: 5%").unwrap_err();
        assert!(matches!(err, NucledError::MalformedStateLine(_)));
    }

    #[test]
    fn parse_bad_brightness_is_malformed() {
        let err = parse_status(Target::Ring, "Ring LED Brightness: lots").unwrap_err();
        assert!(matches!(err, NucledError::MalformedStateLine(_)));
    }

    #[test]
    fn parse_unknown_effect_code() {
        let err = parse_status(Target::Ring, "Ring LED Blink/Fade: ? (0x09)").unwrap_err();
        assert!(matches!(err, NucledError::UnknownEffectCode(9)));
    }

    #[test]
    fn parse_unknown_color_code_is_per_target() {
        // 0x04 is Blue on the ring but does not exist on the power LED.
        let err = parse_status(Target::Power, "Power LED Color: ? (0x04)").unwrap_err();
        assert!(matches!(
            err,
            NucledError::UnknownColorCode {
                target: Target::Power,
                code: 4
            }
        ));
    }

    #[test]
    fn parse_other_target_codes_not_decoded() {
        // Power's color line has a code the ring table lacks; ring parsing must skip it.
        let text = "Power LED Color: ? (0x0f)\nRing LED Color: Red (0x05)";
        let fields = parse_status(Target::Ring, text).unwrap();
        assert_eq!(fields.color, Some(Color::Red));
    }

    // ── LedState ──

    #[test]
    fn getters_fetch_lazily_once() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        assert_eq!(dev.reads.get(), 0);
        assert!(!led.is_fetched());

        assert_eq!(led.brightness().unwrap(), 50);
        assert_eq!(led.color().unwrap(), Color::Blue);
        assert_eq!(led.effect().unwrap(), Effect::FadeSlow);
        assert_eq!(dev.reads.get(), 1);
        assert!(led.is_fetched());
    }

    #[test]
    fn serialized_state_uses_symbols() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        assert_eq!(led.serialized_state().unwrap(), "ring,50,fade_slow,blue");

        let mut power = LedState::new(Target::Power, &dev);
        assert_eq!(power.serialized_state().unwrap(), "power,36,none,amber");
    }

    #[test]
    fn setters_do_not_touch_device() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        led.set_brightness(10).unwrap();
        led.set_color(Color::Green).unwrap();
        led.set_effect(Effect::BlinkFast).unwrap();
        assert!(dev.written().is_empty());
        assert_eq!(dev.reads.get(), 0);
        assert_eq!(led.serialized_state().unwrap(), "ring,10,blink_fast,green");
    }

    #[test]
    fn brightness_bounds() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        for ok in [0, 1, 50, 99, 100] {
            led.set_brightness(ok).unwrap();
            assert_eq!(led.brightness().unwrap(), ok as u8);
        }
        for bad in [-1, 101, 256, i64::MIN] {
            let err = led.set_brightness(bad).unwrap_err();
            assert!(matches!(err, NucledError::BrightnessOutOfRange(v) if v == bad));
        }
        assert_eq!(led.brightness().unwrap(), 100);
    }

    #[test]
    fn power_rejects_ring_colors() {
        let dev = MockDevice::new(STATUS);
        let mut power = LedState::new(Target::Power, &dev);
        let err = power.set_color(Color::Green).unwrap_err();
        assert!(matches!(
            err,
            NucledError::UnsupportedColor {
                target: Target::Power,
                color: Color::Green
            }
        ));

        let mut ring = LedState::new(Target::Ring, &dev);
        ring.set_color(Color::Green).unwrap();
    }

    #[test]
    fn effect_not_validated_per_target() {
        let dev = MockDevice::new(STATUS);
        let mut power = LedState::new(Target::Power, &dev);
        power.set_effect(Effect::FadeMedium).unwrap();
        assert_eq!(power.effect().unwrap(), Effect::FadeMedium);
    }

    #[test]
    fn commit_writes_serialized_state() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        led.set_color(Color::Red).unwrap();
        led.commit().unwrap();
        assert_eq!(dev.written(), vec!["ring,50,fade_slow,red"]);
    }

    #[test]
    fn set_raw_writes_verbatim_and_refetches() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        led.set_brightness(3).unwrap();
        led.set_raw("anything at all").unwrap();
        assert_eq!(dev.written(), vec!["anything at all"]);
        assert_eq!(dev.reads.get(), 1);
        assert_eq!(led.brightness().unwrap(), 50);
    }

    #[test]
    fn failed_fetch_keeps_previous_fields() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        led.fetch().unwrap();
        let before = led.fields();

        dev.set_status("Ring LED Brightness: 1%\nRing LED Color Blue");
        assert!(matches!(
            led.fetch(),
            Err(NucledError::MalformedStateLine(_))
        ));
        assert_eq!(led.fields(), before);
    }

    #[test]
    fn missing_category_reported_on_read() {
        let dev = MockDevice::new("Ring LED Brightness: 20%");
        let mut led = LedState::new(Target::Ring, &dev);
        assert_eq!(led.brightness().unwrap(), 20);
        assert!(matches!(
            led.color(),
            Err(NucledError::IncompleteState("color"))
        ));
        assert!(matches!(
            led.serialized_state(),
            Err(NucledError::IncompleteState(_))
        ));
    }

    #[test]
    fn commit_unfetched_with_only_brightness_set_fails_without_io() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        led.set_brightness(10).unwrap();
        let err = led.commit().unwrap_err();
        assert!(matches!(err, NucledError::IncompleteState("effect")));
        assert!(err.to_string().contains("not set"));
        assert_eq!(dev.reads.get(), 0);
        assert!(dev.written().is_empty());
    }

    #[test]
    fn device_error_propagates() {
        let dev = MockDevice::new(STATUS);
        dev.fail_read.set(true);
        let mut led = LedState::new(Target::Ring, &dev);
        assert!(matches!(led.brightness(), Err(NucledError::Device(_))));
    }

    #[test]
    fn edit_commits_on_success() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        led.edit(|led| {
            led.set_brightness(100)?;
            led.set_color(Color::Green)
        })
        .unwrap();
        assert_eq!(dev.written(), vec!["ring,100,fade_slow,green"]);
    }

    #[test]
    fn edit_discards_on_error() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        let err = led
            .edit(|led| {
                led.set_brightness(1)?;
                led.set_color(Color::Amber)
            })
            .unwrap_err();
        assert!(matches!(err, NucledError::UnsupportedColor { .. }));
        assert!(dev.written().is_empty());
        assert_eq!(led.brightness().unwrap(), 50);
    }

    #[test]
    fn display_shows_unknown_as_dash() {
        let dev = MockDevice::new(STATUS);
        let mut led = LedState::new(Target::Ring, &dev);
        assert_eq!(
            led.to_string(),
            "ring: brightness -, color -, effect -"
        );
        led.fetch().unwrap();
        assert_eq!(
            led.to_string(),
            "ring: brightness 50, color blue, effect fade_slow"
        );
    }
}

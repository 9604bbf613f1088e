use crate::util::EnumExt;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// A named difficulty preset bundling a tick rate and a growth rate
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Mode {
    Easy,
    #[default]
    Normal,
    Hard,
    Impossible,
    /// Never advances on its own clock
    Still,
    Slow,
}

impl Mode {
    /// The width of the longest mode name
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn name(self) -> &'static str {
        match self {
            Mode::Easy => "easy",
            Mode::Normal => "normal",
            Mode::Hard => "hard",
            Mode::Impossible => "impossible",
            Mode::Still => "still",
            Mode::Slow => "slow",
        }
    }

    /// Number of snake movements per second.  Zero means the snake never
    /// moves on its own.
    pub(crate) fn tick_rate(self) -> u32 {
        match self {
            Mode::Easy => 8,
            Mode::Normal => 14,
            Mode::Hard => 24,
            Mode::Impossible => 50,
            Mode::Still => 0,
            Mode::Slow => 1,
        }
    }

    /// Number of extra segments the snake gains per food eaten, on top of the
    /// one segment gained by not dropping the tail
    pub(crate) fn growth(self) -> usize {
        match self {
            Mode::Easy => 4,
            Mode::Normal => 3,
            Mode::Hard => 1,
            Mode::Impossible | Mode::Still | Mode::Slow => 0,
        }
    }

    /// Minimum time between two movements, or `None` if the mode never
    /// advances automatically
    pub(crate) fn tick_period(self) -> Option<Duration> {
        match self.tick_rate() {
            0 => None,
            rate => Some(Duration::from_secs(1) / rate),
        }
    }

    /// Return the mode at (zero-based) position `index` in the preset list
    pub(crate) fn nth(index: usize) -> Option<Mode> {
        Mode::iter().nth(index)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Mode, ParseModeError> {
        Mode::iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseModeError(s.to_owned()))
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown game mode {0:?}; expected one of: easy, normal, hard, impossible, still, slow")]
pub(crate) struct ParseModeError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Mode::Easy, 8, 4)]
    #[case(Mode::Normal, 14, 3)]
    #[case(Mode::Hard, 24, 1)]
    #[case(Mode::Impossible, 50, 0)]
    #[case(Mode::Still, 0, 0)]
    #[case(Mode::Slow, 1, 0)]
    fn presets(#[case] mode: Mode, #[case] rate: u32, #[case] growth: usize) {
        assert_eq!(mode.tick_rate(), rate);
        assert_eq!(mode.growth(), growth);
    }

    #[test]
    fn tick_period() {
        assert_eq!(Mode::Easy.tick_period(), Some(Duration::from_millis(125)));
        assert_eq!(Mode::Slow.tick_period(), Some(Duration::from_secs(1)));
        assert_eq!(Mode::Still.tick_period(), None);
    }

    #[rstest]
    #[case("easy", Mode::Easy)]
    #[case("Impossible", Mode::Impossible)]
    #[case("STILL", Mode::Still)]
    fn parse(#[case] s: &str, #[case] mode: Mode) {
        assert_eq!(s.parse::<Mode>(), Ok(mode));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "nightmare".parse::<Mode>(),
            Err(ParseModeError(String::from("nightmare")))
        );
    }

    #[test]
    fn display_width() {
        let actual_width = Mode::iter().map(|m| m.name().len()).max().unwrap();
        assert_eq!(actual_width, usize::from(Mode::DISPLAY_WIDTH));
    }

    #[test]
    fn nth_follows_declaration_order() {
        assert_eq!(Mode::nth(0), Some(Mode::Easy));
        assert_eq!(Mode::nth(5), Some(Mode::Slow));
        assert_eq!(Mode::nth(6), None);
    }

    #[test]
    fn deserialize_from_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: Mode,
        }
        let w: Wrapper = toml::from_str("mode = \"hard\"").unwrap();
        assert_eq!(w.mode, Mode::Hard);
    }
}

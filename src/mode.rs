//! Game mode and bot difficulty selection.

use serde::{Deserialize, Serialize};

/// Game mode - who is the opponent?
///
/// On the wire: `"human"` or `"ai"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Two people sharing the board; marks alternate.
    #[default]
    #[serde(rename = "human")]
    HumanVsHuman,
    /// The human plays X against the automated opponent's O.
    #[serde(rename = "ai")]
    HumanVsAutomated,
}

impl GameMode {
    /// Returns display name.
    pub fn name(self) -> &'static str {
        match self {
            GameMode::HumanVsHuman => "Vs Friend",
            GameMode::HumanVsAutomated => "Vs Bot",
        }
    }

    /// Whether the opponent is automated.
    pub fn is_automated(self) -> bool {
        matches!(self, GameMode::HumanVsAutomated)
    }

    /// Switches to the other mode.
    pub fn toggle(self) -> Self {
        match self {
            GameMode::HumanVsHuman => GameMode::HumanVsAutomated,
            GameMode::HumanVsAutomated => GameMode::HumanVsHuman,
        }
    }
}

/// Strength hint for the automated opponent. Only meaningful in
/// [`GameMode::HumanVsAutomated`].
///
/// The level is forwarded to the remote service as `level`; how it plays is
/// up to that service. The local referee ignores it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Weakest level requested from the service.
    Easy,
    /// Middle level requested from the service.
    Medium,
    /// Strongest level requested from the service.
    #[default]
    Hard,
}

impl Difficulty {
    /// Next difficulty, wrapping from hard to easy.
    pub fn cycle(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(
            serde_json::to_string(&GameMode::HumanVsAutomated).unwrap(),
            r#""ai""#
        );
        let mode: GameMode = serde_json::from_str(r#""human""#).unwrap();
        assert_eq!(mode, GameMode::HumanVsHuman);
    }

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!(Difficulty::from_str("Medium").unwrap(), Difficulty::Medium);
        assert!(Difficulty::from_str("impossible").is_err());
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn test_difficulty_cycle_wraps() {
        assert_eq!(Difficulty::Hard.cycle(), Difficulty::Easy);
    }
}

//! Tier entities

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Bandwidth speed label.
///
/// The set of registrable speeds is closed: add/remove only accept the
/// labels below. `Unknown` exists solely as the resolve fallback and is
/// rejected by [`Speed::from_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Speed {
    Fast,
    Medium,
    Slow,
    Unknown,
}

impl Speed {
    /// Parses a registrable speed label, rejecting anything outside the
    /// closed set (including `UNKNOWN`).
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        match label {
            "FAST" => Ok(Self::Fast),
            "MEDIUM" => Ok(Self::Medium),
            "SLOW" => Ok(Self::Slow),
            _ => Err(DomainError::validation(format!(
                "invalid tier speed '{}'",
                label
            ))),
        }
    }

    /// The wire/store label for this speed.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Fast => "FAST",
            Self::Medium => "MEDIUM",
            Self::Slow => "SLOW",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

impl FromStr for Speed {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

/// A bandwidth tier: a speed label paired with the usage threshold above
/// which it applies (strict inequality, see [`Tier::applies_to`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub speed: Speed,
    pub threshold: i64,
}

impl Tier {
    pub fn new(speed: Speed, threshold: i64) -> Self {
        Self { speed, threshold }
    }

    /// The fallback tier returned when no stored tier matches a usage amount.
    pub fn unknown() -> Self {
        Self {
            speed: Speed::Unknown,
            threshold: 0,
        }
    }

    /// Whether this tier is eligible for the given usage amount.
    ///
    /// The comparison is strictly greater-than: a tier meant to cover usage
    /// from zero upward must be registered with a negative threshold
    /// (conventionally -1), since usage of exactly 0 does not match a
    /// threshold of 0.
    pub fn applies_to(&self, usage: i64) -> bool {
        usage > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_from_label() {
        assert_eq!(Speed::from_label("FAST").unwrap(), Speed::Fast);
        assert_eq!(Speed::from_label("MEDIUM").unwrap(), Speed::Medium);
        assert_eq!(Speed::from_label("SLOW").unwrap(), Speed::Slow);
    }

    #[test]
    fn test_speed_rejects_unrecognized_labels() {
        assert!(Speed::from_label("BLAZING").is_err());
        assert!(Speed::from_label("SNAILS_PACE").is_err());
        assert!(Speed::from_label("fast").is_err());
        assert!(Speed::from_label("").is_err());
    }

    #[test]
    fn test_unknown_is_not_registrable() {
        assert!(Speed::from_label("UNKNOWN").is_err());
    }

    #[test]
    fn test_speed_serialization() {
        assert_eq!(serde_json::to_string(&Speed::Fast).unwrap(), "\"FAST\"");
        assert_eq!(
            serde_json::to_string(&Speed::Unknown).unwrap(),
            "\"UNKNOWN\""
        );

        let speed: Speed = serde_json::from_str("\"SLOW\"").unwrap();
        assert_eq!(speed, Speed::Slow);
    }

    #[test]
    fn test_strict_threshold_boundary() {
        let from_zero = Tier::new(Speed::Fast, -1);
        assert!(from_zero.applies_to(0));
        assert!(from_zero.applies_to(1));

        // A threshold of 0 does NOT cover usage of exactly 0.
        let at_zero = Tier::new(Speed::Fast, 0);
        assert!(!at_zero.applies_to(0));
        assert!(at_zero.applies_to(1));
    }

    #[test]
    fn test_unknown_fallback_tier() {
        let tier = Tier::unknown();
        assert_eq!(tier.speed, Speed::Unknown);
        assert_eq!(tier.threshold, 0);
    }
}

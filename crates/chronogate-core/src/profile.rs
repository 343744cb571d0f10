//! Chronotype profile types.
//!
//! A profile is produced elsewhere (quiz scoring) and consumed here as an
//! opaque, immutable input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Circadian timing tendency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chronotype {
    AmShifted,
    AmLeaning,
    Balanced,
    PmLeaning,
    PmShifted,
}

impl Chronotype {
    pub const ALL: [Chronotype; 5] = [
        Chronotype::AmShifted,
        Chronotype::AmLeaning,
        Chronotype::Balanced,
        Chronotype::PmLeaning,
        Chronotype::PmShifted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Chronotype::AmShifted => "am_shifted",
            Chronotype::AmLeaning => "am_leaning",
            Chronotype::Balanced => "balanced",
            Chronotype::PmLeaning => "pm_leaning",
            Chronotype::PmShifted => "pm_shifted",
        }
    }
}

impl fmt::Display for Chronotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Chronotype {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Chronotype::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownValue {
                kind: "chronotype",
                value: s.to_string(),
                expected: "am_shifted, am_leaning, balanced, pm_leaning, pm_shifted",
            })
    }
}

/// Reliability of the chronotype determination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    High,
    Med,
    Low,
}

impl ConfidenceLevel {
    /// Low confidence forces blanket silence.
    pub fn permits_windows(self) -> bool {
        !matches!(self, ConfidenceLevel::Low)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "HIGH",
            ConfidenceLevel::Med => "MED",
            ConfidenceLevel::Low => "LOW",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ConfidenceLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(ConfidenceLevel::High),
            "med" | "medium" => Ok(ConfidenceLevel::Med),
            "low" => Ok(ConfidenceLevel::Low),
            _ => Err(ValidationError::UnknownValue {
                kind: "confidence level",
                value: s.to_string(),
                expected: "high, med, low",
            }),
        }
    }
}

/// Externally computed chronotype determination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronotypeProfile {
    pub chronotype: Chronotype,
    pub confidence: ConfidenceLevel,
    pub computed_at: DateTime<Utc>,
}

impl ChronotypeProfile {
    pub fn new(chronotype: Chronotype, confidence: ConfidenceLevel) -> Self {
        Self {
            chronotype,
            confidence,
            computed_at: Utc::now(),
        }
    }

    /// Whether this profile is confident enough to yield any window.
    pub fn is_reliable(&self) -> bool {
        self.confidence.permits_windows()
    }
}

/// Returns the profile only if it may produce windows.
pub(crate) fn reliable(profile: Option<&ChronotypeProfile>) -> Option<&ChronotypeProfile> {
    profile.filter(|p| p.is_reliable())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chronotype_parse_accepts_dashes_and_case() {
        assert_eq!("PM-Shifted".parse::<Chronotype>().unwrap(), Chronotype::PmShifted);
        assert_eq!("balanced".parse::<Chronotype>().unwrap(), Chronotype::Balanced);
        assert!("night_owl".parse::<Chronotype>().is_err());
    }

    #[test]
    fn confidence_parse() {
        assert_eq!("HIGH".parse::<ConfidenceLevel>().unwrap(), ConfidenceLevel::High);
        assert_eq!("medium".parse::<ConfidenceLevel>().unwrap(), ConfidenceLevel::Med);
        assert_eq!("low".parse::<ConfidenceLevel>().unwrap(), ConfidenceLevel::Low);
        assert!("sure".parse::<ConfidenceLevel>().is_err());
    }

    #[test]
    fn low_confidence_is_not_reliable() {
        let profile = ChronotypeProfile::new(Chronotype::Balanced, ConfidenceLevel::Low);
        assert!(!profile.is_reliable());
        assert!(reliable(Some(&profile)).is_none());
        assert!(reliable(None).is_none());

        let profile = ChronotypeProfile::new(Chronotype::Balanced, ConfidenceLevel::Med);
        assert!(reliable(Some(&profile)).is_some());
    }

    #[test]
    fn profile_serializes_camel_case() {
        let profile = ChronotypeProfile::new(Chronotype::PmLeaning, ConfidenceLevel::High);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["chronotype"], "pm_leaning");
        assert_eq!(json["confidence"], "HIGH");
        assert!(json.get("computedAt").is_some());
    }
}

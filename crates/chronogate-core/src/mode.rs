//! The five cognitive modes the engine reasons about.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Cognitive activity category.
///
/// Declaration order is the canonical evaluation order: every per-day
/// result lists modes in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Framing,
    Evaluation,
    Synthesis,
    Execution,
    Reflection,
}

impl Mode {
    /// All modes in canonical order.
    pub const ALL: [Mode; 5] = [
        Mode::Framing,
        Mode::Evaluation,
        Mode::Synthesis,
        Mode::Execution,
        Mode::Reflection,
    ];

    /// Position of this mode within [`Mode::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Mode::Framing => 0,
            Mode::Evaluation => 1,
            Mode::Synthesis => 2,
            Mode::Execution => 3,
            Mode::Reflection => 4,
        }
    }

    /// Shortest contiguous segment (minutes) that still counts as usable.
    pub const fn min_duration_minutes(self) -> i64 {
        match self {
            Mode::Framing => 30,
            Mode::Evaluation => 30,
            Mode::Synthesis => 30,
            Mode::Execution => 45,
            Mode::Reflection => 20,
        }
    }

    /// Modes that take an extra narrowing step under high fragility.
    pub const fn is_high_stakes(self) -> bool {
        matches!(self, Mode::Evaluation | Mode::Framing | Mode::Synthesis)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Framing => "framing",
            Mode::Evaluation => "evaluation",
            Mode::Synthesis => "synthesis",
            Mode::Execution => "execution",
            Mode::Reflection => "reflection",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Framing => "Framing",
            Mode::Evaluation => "Evaluation",
            Mode::Synthesis => "Synthesis",
            Mode::Execution => "Execution",
            Mode::Reflection => "Reflection",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownValue {
                kind: "mode",
                value: s.to_string(),
                expected: "framing, evaluation, synthesis, execution, reflection",
            })
    }
}

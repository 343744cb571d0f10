//! Fragility-based edge adjustment.
//!
//! Widens or narrows window edges by fixed offsets. Not part of the default
//! evaluation path: baseline geometry stays untouched unless a caller applies
//! this explicitly.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::baseline::BaselineWindow;
use crate::error::ValidationError;
use crate::interval::TimeSegment;
use crate::mode::Mode;

const EDGE_SHIFT_SECS: i64 = 15 * 60;
/// Extra narrowing per edge for high-stakes modes (7.5 minutes).
const HIGH_STAKES_EXTRA_SECS: i64 = 7 * 60 + 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragilityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl FragilityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FragilityLevel::Low => "low",
            FragilityLevel::Medium => "medium",
            FragilityLevel::High => "high",
        }
    }

    /// Signed per-edge inset. Negative widens.
    fn edge_inset(self, mode: Mode) -> Duration {
        match self {
            FragilityLevel::Low => Duration::seconds(-EDGE_SHIFT_SECS),
            FragilityLevel::Medium => Duration::zero(),
            FragilityLevel::High if mode.is_high_stakes() => {
                Duration::seconds(EDGE_SHIFT_SECS + HIGH_STAKES_EXTRA_SECS)
            }
            FragilityLevel::High => Duration::seconds(EDGE_SHIFT_SECS),
        }
    }
}

impl fmt::Display for FragilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FragilityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(FragilityLevel::Low),
            "medium" | "med" => Ok(FragilityLevel::Medium),
            "high" => Ok(FragilityLevel::High),
            _ => Err(ValidationError::UnknownValue {
                kind: "fragility level",
                value: s.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

/// Adjust `span` for `mode` at `level`.
///
/// A span too short to survive narrowing, or one whose shifted edges would
/// leave the representable calendar, comes back unchanged.
pub fn modulate_span(span: TimeSegment, mode: Mode, level: FragilityLevel) -> TimeSegment {
    let inset = level.edge_inset(mode);
    let (Some(start), Some(end)) = (
        span.start.checked_add_signed(inset),
        span.end.checked_sub_signed(inset),
    ) else {
        tracing::debug!(%mode, level = %level, "edge shift leaves the calendar range, leaving unchanged");
        return span;
    };
    let adjusted = TimeSegment::new(start, end);
    if adjusted.is_empty() {
        tracing::debug!(%mode, level = %level, "window too short to narrow, leaving unchanged");
        return span;
    }
    adjusted
}

/// Adjust a baseline window. Mode, reliability and source are preserved.
pub fn modulate(window: &BaselineWindow, level: FragilityLevel) -> BaselineWindow {
    let span = modulate_span(window.span(), window.mode, level);
    BaselineWindow {
        start: span.start,
        end: span.end,
        ..*window
    }
}

/// [`modulate`] over a whole day's windows.
pub fn modulate_all(windows: &[BaselineWindow], level: FragilityLevel) -> Vec<BaselineWindow> {
    windows.iter().map(|w| modulate(w, level)).collect()
}

//! Structural causes behind each verdict.
//!
//! Composes a neutral, per-case sentence from the same intermediate results
//! the governor uses. The governor's fixed reason strings are unaffected.

use serde::{Deserialize, Serialize};

use crate::baseline::BaselineWindow;
use crate::governor::{day_gate, trace_mode, DayGate, ModeTrace};
use crate::interval::{valid_spans, BusyBlock};
use crate::mode::Mode;
use crate::profile::ChronotypeProfile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralCause {
    NoProfile,
    LowConfidence,
    NoBaselineWindows,
    NoReliableWindow,
    FullyUnavailable,
    SegmentsTooShort {
        longest_minutes: i64,
        required_minutes: i64,
    },
    SplitByUnavailable {
        segment_count: usize,
        busy_count: usize,
    },
    Clear {
        minutes: i64,
    },
}

impl StructuralCause {
    pub fn describe(&self, mode: Mode) -> String {
        match self {
            StructuralCause::NoProfile => "No chronotype profile is available.".to_string(),
            StructuralCause::LowConfidence => {
                "The chronotype determination has low confidence.".to_string()
            }
            StructuralCause::NoBaselineWindows => {
                "No baseline windows exist for this day.".to_string()
            }
            StructuralCause::NoReliableWindow => {
                format!("{mode} has no reliable baseline window on this day.")
            }
            StructuralCause::FullyUnavailable => {
                format!("Unavailable time covers the whole {mode} window.")
            }
            StructuralCause::SegmentsTooShort {
                longest_minutes,
                required_minutes,
            } => format!(
                "The longest free {mode} segment is {longest_minutes} min; {required_minutes} min are required."
            ),
            StructuralCause::SplitByUnavailable {
                segment_count,
                busy_count,
            } => format!(
                "{busy_count} unavailable block(s) divide the {mode} window into {segment_count} usable segments."
            ),
            StructuralCause::Clear { minutes } => {
                format!("The {mode} window offers {minutes} contiguous minutes.")
            }
        }
    }
}

/// Cause and description for one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeExplanation {
    pub mode: Mode,
    pub cause: StructuralCause,
    pub text: String,
}

impl ModeExplanation {
    fn new(mode: Mode, cause: StructuralCause) -> Self {
        let text = cause.describe(mode);
        Self { mode, cause, text }
    }
}

fn cause_from_trace(trace: &ModeTrace, busy: &[BusyBlock]) -> StructuralCause {
    let Some(candidate) = trace.candidate else {
        return StructuralCause::NoReliableWindow;
    };

    match trace.valid.len() {
        0 if trace.free.is_empty() => StructuralCause::FullyUnavailable,
        0 => StructuralCause::SegmentsTooShort {
            longest_minutes: trace.free.iter().map(|s| s.duration_minutes()).max().unwrap_or(0),
            required_minutes: trace.mode.min_duration_minutes(),
        },
        1 => StructuralCause::Clear {
            minutes: trace.valid[0].duration_minutes(),
        },
        n => {
            let span = candidate.span();
            StructuralCause::SplitByUnavailable {
                segment_count: n,
                busy_count: valid_spans(busy).filter(|b| b.overlaps(&span)).count(),
            }
        }
    }
}

/// One explanation per mode, in canonical mode order.
pub fn explain_day(
    profile: Option<&ChronotypeProfile>,
    windows: &[BaselineWindow],
    busy: &[BusyBlock],
) -> [ModeExplanation; 5] {
    let closed = match day_gate(profile, windows) {
        DayGate::NoProfile => Some(StructuralCause::NoProfile),
        DayGate::LowConfidence => Some(StructuralCause::LowConfidence),
        DayGate::NoWindows => Some(StructuralCause::NoBaselineWindows),
        DayGate::Open => None,
    };

    Mode::ALL.map(|mode| {
        let cause = match &closed {
            Some(cause) => cause.clone(),
            None => cause_from_trace(&trace_mode(mode, windows, busy), busy),
        };
        ModeExplanation::new(mode, cause)
    })
}

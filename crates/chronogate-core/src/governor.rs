//! Per-mode governance.
//!
//! For each mode: pick the earliest reliable baseline window, subtract busy
//! time, drop segments shorter than the mode's minimum, and classify what is
//! left. The result always holds exactly one decision per mode, in canonical
//! mode order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::baseline::BaselineWindow;
use crate::interval::{subtract, BusyBlock, TimeSegment};
use crate::mode::Mode;
use crate::profile::ChronotypeProfile;

pub const REASON_NOT_RELIABLE: &str = "Conditions are not structurally reliable right now.";
pub const REASON_SPLIT: &str = "Window is split by an unavailable time.";
pub const REASON_SUPPORTED: &str = "Conditions support this mode of thinking.";

/// Final classification for one mode on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Exactly one usable segment.
    Permit,
    /// Two or more usable segments.
    Fragmented,
    /// Nothing usable.
    Silence,
}

impl Verdict {
    /// Fixed reason string for this verdict.
    pub fn reason(self) -> &'static str {
        match self {
            Verdict::Permit => REASON_SUPPORTED,
            Verdict::Fragmented => REASON_SPLIT,
            Verdict::Silence => REASON_NOT_RELIABLE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Permit => "PERMIT",
            Verdict::Fragmented => "FRAGMENTED",
            Verdict::Silence => "SILENCE",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Decision record for one mode.
///
/// `window` is set only for `Permit`, `segments` only for `Fragmented`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeGovernanceDecision {
    pub mode: Mode,
    pub decision: Verdict,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<TimeSegment>>,
    pub computed_at: DateTime<Utc>,
}

impl ModeGovernanceDecision {
    pub fn silence(mode: Mode, computed_at: DateTime<Utc>) -> Self {
        Self {
            mode,
            decision: Verdict::Silence,
            reason: REASON_NOT_RELIABLE.to_string(),
            window: None,
            segments: None,
            computed_at,
        }
    }

    fn from_valid_segments(mode: Mode, mut valid: Vec<TimeSegment>, computed_at: DateTime<Utc>) -> Self {
        match valid.len() {
            0 => Self::silence(mode, computed_at),
            1 => Self {
                mode,
                decision: Verdict::Permit,
                reason: REASON_SUPPORTED.to_string(),
                window: valid.pop(),
                segments: None,
                computed_at,
            },
            _ => Self {
                mode,
                decision: Verdict::Fragmented,
                reason: REASON_SPLIT.to_string(),
                window: None,
                segments: Some(valid),
                computed_at,
            },
        }
    }

    pub fn is_permit(&self) -> bool {
        self.decision == Verdict::Permit
    }

    pub fn is_fragmented(&self) -> bool {
        self.decision == Verdict::Fragmented
    }

    pub fn is_silence(&self) -> bool {
        self.decision == Verdict::Silence
    }

    /// Usable segments regardless of verdict.
    pub fn usable_segments(&self) -> Vec<TimeSegment> {
        match (&self.window, &self.segments) {
            (Some(w), _) => vec![*w],
            (None, Some(s)) => s.clone(),
            (None, None) => Vec::new(),
        }
    }
}

/// Why a whole day is closed before any mode is looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DayGate {
    NoProfile,
    LowConfidence,
    NoWindows,
    Open,
}

pub(crate) fn day_gate(profile: Option<&ChronotypeProfile>, windows: &[BaselineWindow]) -> DayGate {
    match profile {
        None => DayGate::NoProfile,
        Some(p) if !p.is_reliable() => DayGate::LowConfidence,
        Some(_) if windows.is_empty() => DayGate::NoWindows,
        Some(_) => DayGate::Open,
    }
}

/// Intermediate results for one mode.
#[derive(Debug, Clone)]
pub(crate) struct ModeTrace {
    pub mode: Mode,
    pub candidate: Option<BaselineWindow>,
    pub free: Vec<TimeSegment>,
    pub valid: Vec<TimeSegment>,
}

/// Earliest-starting reliable window for `mode`. Equal starts resolve to
/// the first window in input order.
pub fn select_candidate(windows: &[BaselineWindow], mode: Mode) -> Option<&BaselineWindow> {
    windows
        .iter()
        .filter(|w| w.mode == mode && w.is_reliable())
        .min_by_key(|w| w.start)
}

pub(crate) fn trace_mode(mode: Mode, windows: &[BaselineWindow], busy: &[BusyBlock]) -> ModeTrace {
    let Some(candidate) = select_candidate(windows, mode).copied() else {
        return ModeTrace {
            mode,
            candidate: None,
            free: Vec::new(),
            valid: Vec::new(),
        };
    };

    let free = subtract(candidate.span(), busy);
    let min_minutes = mode.min_duration_minutes();
    let valid = free
        .iter()
        .copied()
        .filter(|s| s.duration_minutes() >= min_minutes)
        .collect();

    ModeTrace {
        mode,
        candidate: Some(candidate),
        free,
        valid,
    }
}

/// Evaluate every mode for a day, stamping `computed_at` with the current time.
pub fn evaluate_day(
    profile: Option<&ChronotypeProfile>,
    windows: &[BaselineWindow],
    busy: &[BusyBlock],
) -> [ModeGovernanceDecision; 5] {
    evaluate_day_at(profile, windows, busy, Utc::now())
}

/// [`evaluate_day`] with an explicit evaluation timestamp.
pub fn evaluate_day_at(
    profile: Option<&ChronotypeProfile>,
    windows: &[BaselineWindow],
    busy: &[BusyBlock],
    computed_at: DateTime<Utc>,
) -> [ModeGovernanceDecision; 5] {
    let gate = day_gate(profile, windows);
    if gate != DayGate::Open {
        tracing::debug!(?gate, "day closed, every mode silent");
        return Mode::ALL.map(|mode| ModeGovernanceDecision::silence(mode, computed_at));
    }

    Mode::ALL.map(|mode| {
        let trace = trace_mode(mode, windows, busy);
        let decision = ModeGovernanceDecision::from_valid_segments(mode, trace.valid, computed_at);
        tracing::debug!(
            %mode,
            verdict = %decision.decision,
            free = trace.free.len(),
            "classified mode"
        );
        decision
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{Reliability, WindowSource};
    use crate::profile::{Chronotype, ConfidenceLevel};
    use chrono::{NaiveDateTime, TimeZone};

    fn t(hm: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2024-01-15T{hm}"), "%Y-%m-%dT%H:%M").unwrap()
    }

    fn window(mode: Mode, a: &str, b: &str) -> BaselineWindow {
        BaselineWindow {
            start: t(a),
            end: t(b),
            mode,
            reliability: Reliability::Reliable,
            source: WindowSource::Baseline,
        }
    }

    fn busy(a: &str, b: &str) -> BusyBlock {
        BusyBlock::new(t(a), t(b))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap()
    }

    fn profile() -> ChronotypeProfile {
        ChronotypeProfile::new(Chronotype::Balanced, ConfidenceLevel::High)
    }

    fn decision_for(decisions: &[ModeGovernanceDecision; 5], mode: Mode) -> &ModeGovernanceDecision {
        &decisions[mode.index()]
    }

    #[test]
    fn reason_vocabulary_is_fixed() {
        assert_eq!(Verdict::Silence.reason(), "Conditions are not structurally reliable right now.");
        assert_eq!(Verdict::Fragmented.reason(), "Window is split by an unavailable time.");
        assert_eq!(Verdict::Permit.reason(), "Conditions support this mode of thinking.");
    }

    #[test]
    fn no_profile_silences_everything() {
        let windows = vec![window(Mode::Framing, "08:00", "12:00")];
        let decisions = evaluate_day_at(None, &windows, &[], now());
        for (d, mode) in decisions.iter().zip(Mode::ALL) {
            assert_eq!(d.mode, mode);
            assert!(d.is_silence());
            assert_eq!(d.reason, REASON_NOT_RELIABLE);
            assert!(d.window.is_none() && d.segments.is_none());
        }
    }

    #[test]
    fn low_confidence_silences_everything_even_with_windows() {
        let p = ChronotypeProfile::new(Chronotype::Balanced, ConfidenceLevel::Low);
        let windows = vec![window(Mode::Framing, "08:00", "12:00")];
        let decisions = evaluate_day_at(Some(&p), &windows, &[], now());
        assert!(decisions.iter().all(ModeGovernanceDecision::is_silence));
    }

    #[test]
    fn clean_window_permits() {
        let p = profile();
        let windows = vec![window(Mode::Framing, "08:00", "12:00")];
        let decisions = evaluate_day_at(Some(&p), &windows, &[busy("13:00", "14:00")], now());
        let framing = decision_for(&decisions, Mode::Framing);
        assert!(framing.is_permit());
        assert_eq!(framing.reason, REASON_SUPPORTED);
        assert_eq!(framing.window, Some(TimeSegment::new(t("08:00"), t("12:00"))));
        assert!(framing.segments.is_none());
        assert_eq!(framing.computed_at, now());
    }

    #[test]
    fn mode_without_window_is_silent() {
        let p = profile();
        let windows = vec![window(Mode::Framing, "08:00", "12:00")];
        let decisions = evaluate_day_at(Some(&p), &windows, &[], now());
        assert!(decision_for(&decisions, Mode::Reflection).is_silence());
    }

    #[test]
    fn split_window_is_fragmented() {
        let p = profile();
        let windows = vec![window(Mode::Evaluation, "08:00", "12:00")];
        let decisions = evaluate_day_at(Some(&p), &windows, &[busy("09:30", "10:30")], now());
        let d = decision_for(&decisions, Mode::Evaluation);
        assert!(d.is_fragmented());
        assert_eq!(d.reason, REASON_SPLIT);
        assert_eq!(
            d.segments.as_deref(),
            Some(&[
                TimeSegment::new(t("08:00"), t("09:30")),
                TimeSegment::new(t("10:30"), t("12:00")),
            ][..])
        );
        assert!(d.window.is_none());
    }

    #[test]
    fn one_short_side_permits_the_other() {
        let p = profile();
        let windows = vec![window(Mode::Execution, "08:00", "12:00")];
        // 20 minutes before the block is below the 45 minute minimum
        let decisions = evaluate_day_at(Some(&p), &windows, &[busy("08:20", "10:00")], now());
        let d = decision_for(&decisions, Mode::Execution);
        assert!(d.is_permit());
        assert_eq!(d.window, Some(TimeSegment::new(t("10:00"), t("12:00"))));
    }

    #[test]
    fn threshold_is_inclusive() {
        let p = profile();
        let windows = vec![window(Mode::Reflection, "20:00", "21:00")];
        let decisions = evaluate_day_at(Some(&p), &windows, &[busy("20:20", "20:40")], now());
        assert!(decision_for(&decisions, Mode::Reflection).is_fragmented());
    }

    #[test]
    fn earliest_window_is_the_candidate() {
        let windows = vec![
            window(Mode::Synthesis, "16:00", "18:00"),
            window(Mode::Synthesis, "09:00", "10:00"),
        ];
        assert_eq!(select_candidate(&windows, Mode::Synthesis).unwrap().start, t("09:00"));

        // the earlier window is blocked; the later one is never considered
        let p = profile();
        let decisions = evaluate_day_at(Some(&p), &windows, &[busy("08:00", "11:00")], now());
        assert!(decision_for(&decisions, Mode::Synthesis).is_silence());
    }

    #[test]
    fn equal_starts_resolve_to_input_order() {
        let windows = vec![
            window(Mode::Synthesis, "09:00", "10:00"),
            window(Mode::Synthesis, "09:00", "11:00"),
        ];
        assert_eq!(select_candidate(&windows, Mode::Synthesis).unwrap().end, t("10:00"));
    }

    #[test]
    fn provisional_windows_are_not_candidates() {
        let mut w = window(Mode::Framing, "08:00", "12:00");
        w.reliability = Reliability::Provisional;
        assert!(select_candidate(&[w], Mode::Framing).is_none());
    }

    #[test]
    fn decision_json_shape() {
        let p = profile();
        let windows = vec![window(Mode::Framing, "08:00", "12:00")];
        let decisions = evaluate_day_at(Some(&p), &windows, &[], now());
        let json = serde_json::to_value(&decisions[0]).unwrap();
        assert_eq!(json["decision"], "PERMIT");
        assert_eq!(json["mode"], "framing");
        assert!(json.get("computedAt").is_some());
        assert!(json.get("segments").is_none());

        let silent = serde_json::to_value(&decisions[4]).unwrap();
        assert!(silent.get("window").is_none());
        assert!(silent.get("segments").is_none());
    }

    #[test]
    fn usable_segments_follow_verdict() {
        let p = profile();
        let windows = vec![window(Mode::Evaluation, "08:00", "12:00")];
        let decisions = evaluate_day_at(Some(&p), &windows, &[busy("09:30", "10:30")], now());
        assert_eq!(decisions[Mode::Evaluation.index()].usable_segments().len(), 2);
        assert!(decisions[Mode::Framing.index()].usable_segments().is_empty());
    }
}

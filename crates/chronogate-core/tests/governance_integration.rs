//! Integration tests for day governance through the public API.

use chrono::{NaiveDateTime, TimeZone, Utc};
use chronogate_core::{
    evaluate_day, evaluate_day_at, generate_baseline_windows, has_split_windows, parse_date,
    BaselineWindow, BusyBlock, Chronotype, ChronotypeProfile, ConfidenceLevel, Mode,
    ModeGovernanceDecision, Reliability, TimeSegment, Verdict, WindowSource,
};

const NOT_RELIABLE: &str = "Conditions are not structurally reliable right now.";
const SPLIT: &str = "Window is split by an unavailable time.";
const SUPPORTED: &str = "Conditions support this mode of thinking.";

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
}

fn busy(a: &str, b: &str) -> BusyBlock {
    BusyBlock::new(at(a), at(b))
}

fn am_shifted() -> ChronotypeProfile {
    ChronotypeProfile::new(Chronotype::AmShifted, ConfidenceLevel::High)
}

fn execution(decisions: &[ModeGovernanceDecision; 5]) -> &ModeGovernanceDecision {
    &decisions[Mode::Execution.index()]
}

#[test]
fn test_no_profile_is_silent_everywhere() {
    let date = parse_date("2024-01-15").unwrap();
    let windows = generate_baseline_windows(None, date);
    assert!(windows.is_empty());

    let decisions = evaluate_day(None, &windows, &[]);
    assert_eq!(decisions.len(), 5);
    for (decision, mode) in decisions.iter().zip(Mode::ALL) {
        assert_eq!(decision.mode, mode);
        assert_eq!(decision.decision, Verdict::Silence);
        assert_eq!(decision.reason, NOT_RELIABLE);
    }
}

#[test]
fn test_low_confidence_is_silent_everywhere() {
    let date = parse_date("2024-01-15").unwrap();
    let profile = ChronotypeProfile::new(Chronotype::PmLeaning, ConfidenceLevel::Low);
    let windows = generate_baseline_windows(Some(&profile), date);
    assert!(windows.is_empty());

    let decisions = evaluate_day(Some(&profile), &windows, &[]);
    assert!(decisions.iter().all(|d| d.decision == Verdict::Silence && d.reason == NOT_RELIABLE));
}

#[test]
fn test_wraparound_window_resolves_to_next_day() {
    let date = parse_date("2024-01-15").unwrap();
    let profile = ChronotypeProfile::new(Chronotype::PmShifted, ConfidenceLevel::High);
    let windows = generate_baseline_windows(Some(&profile), date);

    let late = windows
        .iter()
        .find(|w| w.mode == Mode::Synthesis && w.start.date() != date)
        .unwrap();
    assert_eq!(late.start, at("2024-01-16T01:00"));
    assert_eq!(late.end, at("2024-01-16T03:00"));
}

#[test]
fn test_split_templates_produce_separate_windows() {
    let date = parse_date("2024-01-15").unwrap();
    for chronotype in Chronotype::ALL {
        let profile = ChronotypeProfile::new(chronotype, ConfidenceLevel::Med);
        let windows = generate_baseline_windows(Some(&profile), date);
        for mode in Mode::ALL {
            let count = windows.iter().filter(|w| w.mode == mode).count();
            assert_eq!(count > 1, has_split_windows(chronotype, mode), "{chronotype} {mode}");
        }
    }
}

#[test]
fn test_busy_block_inside_window_fragments() {
    // AmShifted execution is 08:00-12:00
    let date = parse_date("2024-01-15").unwrap();
    let profile = am_shifted();
    let windows = generate_baseline_windows(Some(&profile), date);

    let decisions = evaluate_day(Some(&profile), &windows, &[busy("2024-01-15T09:30", "2024-01-15T10:30")]);
    let d = execution(&decisions);
    assert_eq!(d.decision, Verdict::Fragmented);
    assert_eq!(d.reason, SPLIT);
    assert_eq!(
        d.segments.clone().unwrap(),
        vec![
            TimeSegment::new(at("2024-01-15T08:00"), at("2024-01-15T09:30")),
            TimeSegment::new(at("2024-01-15T10:30"), at("2024-01-15T12:00")),
        ]
    );
}

#[test]
fn test_covering_block_silences() {
    let date = parse_date("2024-01-15").unwrap();
    let profile = am_shifted();
    let windows = generate_baseline_windows(Some(&profile), date);

    let decisions = evaluate_day(Some(&profile), &windows, &[busy("2024-01-15T07:00", "2024-01-15T13:00")]);
    let d = execution(&decisions);
    assert_eq!(d.decision, Verdict::Silence);
    assert_eq!(d.reason, NOT_RELIABLE);
    assert!(d.window.is_none() && d.segments.is_none());
}

#[test]
fn test_clean_window_permits() {
    let date = parse_date("2024-01-15").unwrap();
    let profile = am_shifted();
    let windows = generate_baseline_windows(Some(&profile), date);

    let decisions = evaluate_day(Some(&profile), &windows, &[busy("2024-01-15T13:00", "2024-01-15T14:00")]);
    let d = execution(&decisions);
    assert_eq!(d.decision, Verdict::Permit);
    assert_eq!(d.reason, SUPPORTED);
    assert_eq!(
        d.window,
        Some(TimeSegment::new(at("2024-01-15T08:00"), at("2024-01-15T12:00")))
    );
}

#[test]
fn test_slivers_below_threshold_silence_instead_of_fragmenting() {
    let profile = am_shifted();
    let windows = vec![BaselineWindow {
        start: at("2024-01-15T08:00"),
        end: at("2024-01-15T09:00"),
        mode: Mode::Execution,
        reliability: Reliability::Reliable,
        source: WindowSource::Baseline,
    }];

    let decisions = evaluate_day(Some(&profile), &windows, &[busy("2024-01-15T08:10", "2024-01-15T08:50")]);
    assert_eq!(execution(&decisions).decision, Verdict::Silence);
}

#[test]
fn test_touching_block_does_not_reduce_window() {
    let date = parse_date("2024-01-15").unwrap();
    let profile = am_shifted();
    let windows = generate_baseline_windows(Some(&profile), date);

    let decisions = evaluate_day(Some(&profile), &windows, &[busy("2024-01-15T07:00", "2024-01-15T08:00")]);
    let d = execution(&decisions);
    assert_eq!(d.decision, Verdict::Permit);
    assert_eq!(d.window.unwrap().start, at("2024-01-15T08:00"));
}

#[test]
fn test_midnight_crossing_window_is_subtracted_across_days() {
    let date = parse_date("2024-01-15").unwrap();
    let profile = ChronotypeProfile::new(Chronotype::PmShifted, ConfidenceLevel::High);
    let windows = generate_baseline_windows(Some(&profile), date);

    // reflection 23:00-00:30, a late call from 23:30 to 00:10
    let decisions = evaluate_day(Some(&profile), &windows, &[busy("2024-01-15T23:30", "2024-01-16T00:10")]);
    let d = &decisions[Mode::Reflection.index()];
    assert_eq!(d.decision, Verdict::Fragmented);
    assert_eq!(
        d.segments.clone().unwrap(),
        vec![
            TimeSegment::new(at("2024-01-15T23:00"), at("2024-01-15T23:30")),
            TimeSegment::new(at("2024-01-16T00:10"), at("2024-01-16T00:30")),
        ]
    );
}

#[test]
fn test_evaluation_is_repeatable() {
    let date = parse_date("2024-03-31").unwrap();
    let profile = ChronotypeProfile::new(Chronotype::Balanced, ConfidenceLevel::High);
    let stamp = Utc.with_ymd_and_hms(2024, 3, 31, 7, 0, 0).unwrap();
    let blocks = [busy("2024-03-31T09:30", "2024-03-31T10:00")];

    let first = evaluate_day_at(Some(&profile), &generate_baseline_windows(Some(&profile), date), &blocks, stamp);
    let second = evaluate_day_at(Some(&profile), &generate_baseline_windows(Some(&profile), date), &blocks, stamp);
    assert_eq!(first, second);
}

//! Busy-time subtraction.
//!
//! Removes busy blocks from a single window with a left-to-right sweep over
//! the merged blocks, yielding the free segments that remain.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A contiguous span of local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSegment {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSegment {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Strict overlap: spans that only touch at an edge do not overlap.
    pub fn overlaps(&self, other: &TimeSegment) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Where a busy block was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusySource {
    #[default]
    Manual,
    ExternalCalendar,
}

/// An interval during which the person is unavailable.
///
/// Only `start` and `end` matter to the engine; the other fields are carried
/// for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyBlock {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub source: BusySource,
}

impl BusyBlock {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            all_day: false,
            source: BusySource::Manual,
        }
    }

    pub fn with_source(mut self, source: BusySource) -> Self {
        self.source = source;
        self
    }

    pub fn span(&self) -> TimeSegment {
        TimeSegment::new(self.start, self.end)
    }
}

/// Non-empty spans of `blocks`, dropping inverted or zero-length ones.
pub(crate) fn valid_spans(blocks: &[BusyBlock]) -> impl Iterator<Item = TimeSegment> + '_ {
    blocks.iter().filter_map(|block| {
        let span = block.span();
        if span.is_empty() {
            tracing::warn!(start = %block.start, end = %block.end, "ignoring empty busy block");
            None
        } else {
            Some(span)
        }
    })
}

/// Sort by start and coalesce spans that overlap or touch.
fn merge_spans(mut spans: Vec<TimeSegment>) -> Vec<TimeSegment> {
    spans.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<TimeSegment> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => {
                if span.end > last.end {
                    last.end = span.end;
                }
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Merged, chronologically ordered busy time.
pub fn merge_busy(blocks: &[BusyBlock]) -> Vec<TimeSegment> {
    merge_spans(valid_spans(blocks).collect())
}

/// Free segments of `window` after removing `busy`.
///
/// Segments come back in chronological order. Zero segments means the
/// window is fully covered.
pub fn subtract(window: TimeSegment, busy: &[BusyBlock]) -> Vec<TimeSegment> {
    let overlapping: Vec<TimeSegment> = valid_spans(busy)
        .filter(|span| span.overlaps(&window))
        .collect();

    if overlapping.is_empty() {
        return vec![window];
    }

    let mut segments = Vec::new();
    let mut cursor = window.start;

    for block in merge_spans(overlapping) {
        if block.start > cursor {
            segments.push(TimeSegment::new(cursor, block.start));
        }
        if block.end > cursor {
            cursor = block.end;
        }
        if cursor >= window.end {
            break;
        }
    }

    if cursor < window.end {
        segments.push(TimeSegment::new(cursor, window.end));
    }

    segments
}

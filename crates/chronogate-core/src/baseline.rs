//! Baseline window generation.
//!
//! Expands a chronotype's canon templates into absolute local windows for
//! one calendar day. Split templates produce one window per stored interval;
//! clock times past 24:00 land on the following day.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::canon::templates_for;
use crate::clock::{parse_date, CanonTimeWindow};
use crate::error::ValidationError;
use crate::interval::TimeSegment;
use crate::mode::Mode;
use crate::profile::{reliable, ChronotypeProfile};

/// How much a window can be relied on.
///
/// Every generated window is currently `Reliable`; `Provisional` is reserved
/// and does not alter geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reliability {
    Reliable,
    Provisional,
}

/// Where a window came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSource {
    Baseline,
}

/// A concrete window for one mode on one day, before schedule conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub mode: Mode,
    pub reliability: Reliability,
    pub source: WindowSource,
}

impl BaselineWindow {
    /// Resolve a canon window on `date` as a reliable baseline window.
    ///
    /// `None` if the window reaches past the last representable date.
    pub fn from_canon(mode: Mode, window: &CanonTimeWindow, date: NaiveDate) -> Option<Self> {
        let (start, end) = window.resolve_on(date)?;
        Some(Self {
            start,
            end,
            mode,
            reliability: Reliability::Reliable,
            source: WindowSource::Baseline,
        })
    }

    pub fn span(&self) -> TimeSegment {
        TimeSegment::new(self.start, self.end)
    }

    pub fn is_reliable(&self) -> bool {
        self.reliability == Reliability::Reliable
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Baseline windows for `date`.
///
/// Returns nothing without a profile or with a low-confidence one. Windows
/// that cannot be placed on the calendar are skipped with a warning. Output is
/// a pure function of the inputs: modes in canonical order, windows in
/// template declaration order within a mode.
pub fn generate_baseline_windows(
    profile: Option<&ChronotypeProfile>,
    date: NaiveDate,
) -> Vec<BaselineWindow> {
    let Some(profile) = reliable(profile) else {
        tracing::debug!(%date, "no reliable profile, generating no baseline windows");
        return Vec::new();
    };

    let template = templates_for(profile.chronotype);
    let windows: Vec<BaselineWindow> = template
        .modes()
        .flat_map(|mode_template| {
            mode_template.windows.iter().filter_map(move |w| {
                let resolved = BaselineWindow::from_canon(mode_template.mode, w, date);
                if resolved.is_none() {
                    tracing::warn!(
                        %date,
                        mode = %mode_template.mode,
                        window = %w,
                        "window runs past the last representable date, skipping"
                    );
                }
                resolved
            })
        })
        .collect();

    tracing::debug!(
        %date,
        chronotype = %profile.chronotype,
        count = windows.len(),
        "generated baseline windows"
    );
    windows
}

/// [`generate_baseline_windows`] for a `YYYY-MM-DD` date string.
pub fn generate_for_date_str(
    profile: Option<&ChronotypeProfile>,
    date: &str,
) -> Result<Vec<BaselineWindow>, ValidationError> {
    Ok(generate_baseline_windows(profile, parse_date(date)?))
}

/// Baseline windows tagged with `mode`, in generation order.
pub fn windows_for_mode(windows: &[BaselineWindow], mode: Mode) -> impl Iterator<Item = &BaselineWindow> {
    windows.iter().filter(move |w| w.mode == mode)
}

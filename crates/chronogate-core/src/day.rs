//! One-call evaluation of a day: baseline generation followed by governance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::baseline::{generate_baseline_windows, BaselineWindow};
use crate::explain::{explain_day, ModeExplanation};
use crate::governor::{evaluate_day_at, ModeGovernanceDecision};
use crate::interval::BusyBlock;
use crate::profile::{Chronotype, ChronotypeProfile, ConfidenceLevel};

/// Everything computed for one (profile, date, busy) input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEvaluation {
    pub date: NaiveDate,
    pub chronotype: Option<Chronotype>,
    pub confidence: Option<ConfidenceLevel>,
    pub windows: Vec<BaselineWindow>,
    pub decisions: [ModeGovernanceDecision; 5],
    pub computed_at: DateTime<Utc>,
    #[serde(skip)]
    profile: Option<ChronotypeProfile>,
    #[serde(skip)]
    busy: Vec<BusyBlock>,
}

impl DayEvaluation {
    /// Structural causes for each decision.
    pub fn explanations(&self) -> [ModeExplanation; 5] {
        explain_day(self.profile.as_ref(), &self.windows, &self.busy)
    }
}

/// Evaluate `date` now.
pub fn evaluate(
    profile: Option<&ChronotypeProfile>,
    date: NaiveDate,
    busy: &[BusyBlock],
) -> DayEvaluation {
    evaluate_at(profile, date, busy, Utc::now())
}

/// Evaluate `date` with an explicit evaluation timestamp.
pub fn evaluate_at(
    profile: Option<&ChronotypeProfile>,
    date: NaiveDate,
    busy: &[BusyBlock],
    computed_at: DateTime<Utc>,
) -> DayEvaluation {
    let windows = generate_baseline_windows(profile, date);
    let decisions = evaluate_day_at(profile, &windows, busy, computed_at);
    DayEvaluation {
        date,
        chronotype: profile.map(|p| p.chronotype),
        confidence: profile.map(|p| p.confidence),
        windows,
        decisions,
        computed_at,
        profile: profile.cloned(),
        busy: busy.to_vec(),
    }
}

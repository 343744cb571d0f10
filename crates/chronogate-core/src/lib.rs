//! # Chronogate Core Library
//!
//! Decides, for one calendar day, which of five cognitive modes (Framing,
//! Evaluation, Synthesis, Execution, Reflection) a person can reliably
//! perform, given a chronotype profile and the day's unavailable time.
//! Each mode gets a verdict (permit, fragmented, silence) with a fixed
//! structural reason string.
//!
//! ## Architecture
//!
//! - **Canon**: static per-chronotype, per-mode clock-time templates
//! - **Baseline**: expands templates into absolute windows for a date,
//!   including split and past-midnight windows
//! - **Fragility**: optional edge widening/narrowing, off the default path
//! - **Interval**: subtracts merged busy blocks from a window
//! - **Governor**: selects a candidate window per mode, filters by minimum
//!   duration and classifies
//!
//! The engine is a pure function of its inputs. The only wall-clock time
//! that enters is the informational `computed_at` stamp.
//!
//! ## Key Components
//!
//! - [`generate_baseline_windows`]: profile + date to baseline windows
//! - [`evaluate_day`]: baseline windows + busy blocks to five decisions
//! - [`day::evaluate`]: both steps in one call
//! - [`Config`]: application configuration management

pub mod baseline;
pub mod canon;
pub mod clock;
pub mod day;
pub mod error;
pub mod explain;
pub mod fragility;
pub mod governor;
pub mod interval;
pub mod mode;
pub mod profile;
pub mod storage;

pub use baseline::{generate_baseline_windows, BaselineWindow, Reliability, WindowSource};
pub use canon::{
    has_split_windows, primary_window, templates_for, ChronotypeTemplate, ModeTemplate,
    CANON_VERSION,
};
pub use clock::{parse_date, CanonTimeWindow, ClockTime};
pub use day::DayEvaluation;
pub use error::{ConfigError, CoreError, ValidationError};
pub use explain::{explain_day, ModeExplanation, StructuralCause};
pub use fragility::{modulate, FragilityLevel};
pub use governor::{evaluate_day, evaluate_day_at, ModeGovernanceDecision, Verdict};
pub use interval::{merge_busy, subtract, BusyBlock, BusySource, TimeSegment};
pub use mode::Mode;
pub use profile::{Chronotype, ChronotypeProfile, ConfidenceLevel};
pub use storage::Config;

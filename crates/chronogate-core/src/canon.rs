//! Canonical chronotype window templates.
//!
//! A fixed, versioned table: for each chronotype, one or more clock-time
//! windows per mode, plus ancillary markers that do not affect geometry.
//! Values are domain constants and must not be tuned.

use serde::Serialize;

use crate::clock::{CanonTimeWindow, ClockTime};
use crate::mode::Mode;
use crate::profile::Chronotype;

/// Version tag of the table below.
pub const CANON_VERSION: &str = "canon-v1";

/// Window(s) for one mode. More than one window means a split template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeTemplate {
    pub mode: Mode,
    pub windows: &'static [CanonTimeWindow],
}

impl ModeTemplate {
    /// First declared window.
    pub fn primary(&self) -> CanonTimeWindow {
        self.windows[0]
    }

    pub fn is_split(&self) -> bool {
        self.windows.len() > 1
    }
}

/// Every mode's template for one chronotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronotypeTemplate {
    pub chronotype: Chronotype,
    modes: [ModeTemplate; 5],
    post_lunch_dip: CanonTimeWindow,
}

impl ChronotypeTemplate {
    pub fn mode(&self, mode: Mode) -> &ModeTemplate {
        &self.modes[mode.index()]
    }

    /// Mode templates in canonical mode order.
    pub fn modes(&self) -> impl Iterator<Item = &ModeTemplate> {
        self.modes.iter()
    }

    /// Low-reliability period after midday. Informational only.
    pub fn post_lunch_dip(&self) -> CanonTimeWindow {
        self.post_lunch_dip
    }
}

/// Template table for `chronotype`.
pub fn templates_for(chronotype: Chronotype) -> &'static ChronotypeTemplate {
    match chronotype {
        Chronotype::AmShifted => &AM_SHIFTED,
        Chronotype::AmLeaning => &AM_LEANING,
        Chronotype::Balanced => &BALANCED,
        Chronotype::PmLeaning => &PM_LEANING,
        Chronotype::PmShifted => &PM_SHIFTED,
    }
}

/// First window of a (possibly split) mode template.
pub fn primary_window(chronotype: Chronotype, mode: Mode) -> CanonTimeWindow {
    templates_for(chronotype).mode(mode).primary()
}

pub fn has_split_windows(chronotype: Chronotype, mode: Mode) -> bool {
    templates_for(chronotype).mode(mode).is_split()
}

/// All templates, in chronotype declaration order.
pub fn all_templates() -> impl Iterator<Item = &'static ChronotypeTemplate> {
    Chronotype::ALL.into_iter().map(templates_for)
}

const fn w(sh: u16, sm: u16, eh: u16, em: u16) -> CanonTimeWindow {
    CanonTimeWindow::canon(ClockTime::hm(sh, sm), ClockTime::hm(eh, em))
}

static AM_SHIFTED: ChronotypeTemplate = ChronotypeTemplate {
    chronotype: Chronotype::AmShifted,
    modes: [
        ModeTemplate { mode: Mode::Framing, windows: &[w(6, 0, 8, 30)] },
        ModeTemplate { mode: Mode::Evaluation, windows: &[w(8, 30, 11, 0)] },
        ModeTemplate { mode: Mode::Synthesis, windows: &[w(5, 30, 7, 0), w(19, 0, 20, 30)] },
        ModeTemplate { mode: Mode::Execution, windows: &[w(8, 0, 12, 0)] },
        ModeTemplate { mode: Mode::Reflection, windows: &[w(18, 0, 19, 30)] },
    ],
    post_lunch_dip: w(12, 30, 14, 0),
};

static AM_LEANING: ChronotypeTemplate = ChronotypeTemplate {
    chronotype: Chronotype::AmLeaning,
    modes: [
        ModeTemplate { mode: Mode::Framing, windows: &[w(7, 0, 9, 30)] },
        ModeTemplate { mode: Mode::Evaluation, windows: &[w(9, 30, 12, 0)] },
        ModeTemplate { mode: Mode::Synthesis, windows: &[w(6, 30, 8, 0), w(20, 0, 21, 30)] },
        ModeTemplate { mode: Mode::Execution, windows: &[w(9, 0, 13, 0)] },
        ModeTemplate { mode: Mode::Reflection, windows: &[w(19, 0, 20, 30)] },
    ],
    post_lunch_dip: w(13, 0, 14, 30),
};

static BALANCED: ChronotypeTemplate = ChronotypeTemplate {
    chronotype: Chronotype::Balanced,
    modes: [
        ModeTemplate { mode: Mode::Framing, windows: &[w(8, 30, 11, 0)] },
        ModeTemplate { mode: Mode::Evaluation, windows: &[w(10, 30, 13, 0)] },
        ModeTemplate { mode: Mode::Synthesis, windows: &[w(15, 0, 17, 0)] },
        ModeTemplate { mode: Mode::Execution, windows: &[w(9, 0, 12, 0), w(14, 30, 17, 30)] },
        ModeTemplate { mode: Mode::Reflection, windows: &[w(20, 0, 21, 30)] },
    ],
    post_lunch_dip: w(13, 30, 15, 0),
};

static PM_LEANING: ChronotypeTemplate = ChronotypeTemplate {
    chronotype: Chronotype::PmLeaning,
    modes: [
        ModeTemplate { mode: Mode::Framing, windows: &[w(10, 0, 12, 30)] },
        ModeTemplate { mode: Mode::Evaluation, windows: &[w(11, 30, 14, 0)] },
        ModeTemplate { mode: Mode::Synthesis, windows: &[w(16, 0, 18, 0), w(22, 0, 24, 30)] },
        ModeTemplate { mode: Mode::Execution, windows: &[w(13, 0, 17, 0)] },
        ModeTemplate { mode: Mode::Reflection, windows: &[w(21, 0, 22, 30)] },
    ],
    post_lunch_dip: w(14, 30, 16, 0),
};

static PM_SHIFTED: ChronotypeTemplate = ChronotypeTemplate {
    chronotype: Chronotype::PmShifted,
    modes: [
        ModeTemplate { mode: Mode::Framing, windows: &[w(12, 0, 14, 30)] },
        ModeTemplate { mode: Mode::Evaluation, windows: &[w(14, 0, 16, 30)] },
        ModeTemplate { mode: Mode::Synthesis, windows: &[w(17, 0, 19, 0), w(25, 0, 27, 0)] },
        ModeTemplate { mode: Mode::Execution, windows: &[w(15, 0, 19, 0)] },
        ModeTemplate { mode: Mode::Reflection, windows: &[w(23, 0, 24, 30)] },
    ],
    post_lunch_dip: w(16, 30, 17, 30),
};

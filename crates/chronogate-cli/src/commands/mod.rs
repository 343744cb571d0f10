pub mod canon;
pub mod config;
pub mod evaluate;
pub mod windows;

use chrono::{Local, NaiveDate};
use clap::Args;

use chronogate_core::{parse_date, Chronotype, ChronotypeProfile, ConfidenceLevel, Config};

/// Profile and date flags shared by `windows` and `evaluate`.
#[derive(Args, Debug, Clone)]
pub struct DayArgs {
    /// Target date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Chronotype (am_shifted, am_leaning, balanced, pm_leaning, pm_shifted)
    #[arg(long)]
    pub chronotype: Option<String>,
    /// Confidence of the chronotype determination (high, med, low)
    #[arg(long)]
    pub confidence: Option<String>,
    /// Ignore the profile stored in the config file
    #[arg(long)]
    pub no_profile: bool,
}

impl DayArgs {
    pub fn date(&self) -> Result<NaiveDate, Box<dyn std::error::Error>> {
        match &self.date {
            Some(d) => Ok(parse_date(d)?),
            None => Ok(Local::now().date_naive()),
        }
    }

    /// Profile from flags, falling back to the config file.
    ///
    /// Flags override the stored profile field by field; a chronotype given
    /// without a confidence is taken as high confidence.
    pub fn profile(&self, config: &Config) -> Result<Option<ChronotypeProfile>, Box<dyn std::error::Error>> {
        if self.no_profile {
            return Ok(None);
        }

        let stored = config.profile();
        let chronotype = match &self.chronotype {
            Some(c) => Some(c.parse::<Chronotype>()?),
            None => stored.as_ref().map(|p| p.chronotype),
        };
        let confidence = match &self.confidence {
            Some(c) => Some(c.parse::<ConfidenceLevel>()?),
            None => stored.as_ref().map(|p| p.confidence),
        };

        Ok(chronotype.map(|chronotype| {
            let mut profile =
                ChronotypeProfile::new(chronotype, confidence.unwrap_or(ConfidenceLevel::High));
            if let Some(stored) = stored.filter(|s| s.chronotype == chronotype) {
                profile.computed_at = stored.computed_at;
            }
            profile
        }))
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! Windows command for displaying a day's baseline windows.

use clap::Args;

use chronogate_core::fragility::modulate_all;
use chronogate_core::{generate_baseline_windows, Config, FragilityLevel};

use super::DayArgs;

#[derive(Args, Debug)]
pub struct WindowsArgs {
    #[command(flatten)]
    day: DayArgs,
    /// Fragility level applied for display (low, medium, high); defaults to config
    #[arg(long)]
    fragility: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: WindowsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let date = args.day.date()?;
    let profile = args.day.profile(&config)?;
    let level = match &args.fragility {
        Some(l) => l.parse::<FragilityLevel>()?,
        None => config.fragility,
    };

    let windows = modulate_all(&generate_baseline_windows(profile.as_ref(), date), level);

    if args.json || config.output.json {
        return super::print_json(&windows);
    }

    match &profile {
        Some(p) => println!("{date}  {} ({})  fragility: {level}", p.chronotype, p.confidence),
        None => println!("{date}  no profile"),
    }
    if windows.is_empty() {
        println!("\nNo baseline windows.");
        return Ok(());
    }
    for w in &windows {
        println!(
            "  {:<11} {} - {}  ({} min)",
            w.mode.label(),
            w.start.format("%Y-%m-%d %H:%M"),
            w.end.format("%Y-%m-%d %H:%M"),
            w.duration_minutes()
        );
    }
    Ok(())
}

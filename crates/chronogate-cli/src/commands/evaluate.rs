//! Evaluate command: five per-mode verdicts for one day.

use chrono::NaiveDate;
use clap::Args;

use chronogate_core::day::evaluate;
use chronogate_core::{BusyBlock, CanonTimeWindow, Config, TimeSegment, Verdict};

use super::DayArgs;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    day: DayArgs,
    /// Unavailable time on the date as HH:MM-HH:MM (repeatable; 24:00+ is the next day)
    #[arg(long = "busy")]
    busy: Vec<String>,
    /// JSON file with an array of busy blocks ({"start", "end", "allDay", "source"})
    #[arg(long)]
    busy_file: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    /// Include the structural cause behind each verdict
    #[arg(long)]
    explain: bool,
}

fn busy_blocks(args: &EvaluateArgs, date: NaiveDate) -> Result<Vec<BusyBlock>, Box<dyn std::error::Error>> {
    let mut blocks = Vec::new();
    for range in &args.busy {
        let (start, end) = range
            .parse::<CanonTimeWindow>()?
            .resolve_on(date)
            .ok_or_else(|| format!("busy range {range} runs past the last representable date"))?;
        blocks.push(BusyBlock::new(start, end));
    }
    if let Some(path) = &args.busy_file {
        let content = std::fs::read_to_string(path)?;
        let from_file: Vec<BusyBlock> = serde_json::from_str(&content)?;
        blocks.extend(from_file);
    }
    Ok(blocks)
}

fn format_segment(s: &TimeSegment) -> String {
    format!("{}-{}", s.start.format("%H:%M"), s.end.format("%H:%M"))
}

pub fn run(args: EvaluateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let date = args.day.date()?;
    let profile = args.day.profile(&config)?;
    let busy = busy_blocks(&args, date)?;
    let explain = args.explain || config.output.explain;

    let day = evaluate(profile.as_ref(), date, &busy);
    tracing::info!(%date, busy = busy.len(), "evaluated day");

    if args.json || config.output.json {
        if explain {
            return super::print_json(&serde_json::json!({
                "evaluation": day,
                "explanations": day.explanations(),
            }));
        }
        return super::print_json(&day);
    }

    match (&day.chronotype, &day.confidence) {
        (Some(c), Some(conf)) => println!("{date}  {c} ({conf})"),
        _ => println!("{date}  no profile"),
    }
    println!("{}", "─".repeat(60));

    let explanations = explain.then(|| day.explanations());
    for decision in &day.decisions {
        let detail = match decision.decision {
            Verdict::Permit => decision.window.as_ref().map(format_segment).unwrap_or_default(),
            Verdict::Fragmented => decision
                .segments
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(format_segment)
                .collect::<Vec<_>>()
                .join(", "),
            Verdict::Silence => String::new(),
        };
        println!("{:<11} {:<10} {detail}", decision.mode.label(), decision.decision);
        println!("            {}", decision.reason);
        if let Some(explanations) = &explanations {
            println!("            {}", explanations[decision.mode.index()].text);
        }
    }
    Ok(())
}

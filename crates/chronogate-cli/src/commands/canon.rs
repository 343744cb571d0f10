//! Canon command for displaying the chronotype template table.

use clap::Args;

use chronogate_core::canon::all_templates;
use chronogate_core::{templates_for, Chronotype, ChronotypeTemplate, CANON_VERSION};

#[derive(Args, Debug)]
pub struct CanonArgs {
    /// Only show one chronotype
    #[arg(long)]
    chronotype: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CanonArgs) -> Result<(), Box<dyn std::error::Error>> {
    let templates: Vec<&ChronotypeTemplate> = match &args.chronotype {
        Some(c) => vec![templates_for(c.parse::<Chronotype>()?)],
        None => all_templates().collect(),
    };

    if args.json {
        return super::print_json(&serde_json::json!({
            "version": CANON_VERSION,
            "templates": templates,
        }));
    }

    println!("Canon {CANON_VERSION}");
    for template in templates {
        println!("\n{}", template.chronotype);
        println!("{}", "─".repeat(40));
        for mode_template in template.modes() {
            let windows: Vec<String> = mode_template.windows.iter().map(|w| w.to_string()).collect();
            println!("  {:<11} {}", mode_template.mode.label(), windows.join(", "));
        }
        println!("  {:<11} {}", "(dip)", template.post_lunch_dip());
    }
    Ok(())
}

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "chronogate", version, about = "Chronogate CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the canonical chronotype templates
    Canon(commands::canon::CanonArgs),
    /// Show baseline windows for a date
    Windows(commands::windows::WindowsArgs),
    /// Evaluate every mode for a date
    Evaluate(commands::evaluate::EvaluateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CHRONOGATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Canon(args) => commands::canon::run(args),
        Commands::Windows(args) => commands::windows::run(args),
        Commands::Evaluate(args) => commands::evaluate::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

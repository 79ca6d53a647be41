use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "math-adventures-cli", version, about = "Math Adventures CLI")]
struct Cli {
    /// Log policy decisions and model loading to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an adaptive practice session on the terminal
    Play(commands::play::PlayArgs),
    /// Generate puzzles
    Puzzle {
        #[command(subcommand)]
        action: commands::puzzle::PuzzleAction,
    },
    /// Query the difficulty policy
    Policy {
        #[command(subcommand)]
        action: commands::policy::PolicyAction,
    },
    /// Train and inspect difficulty models
    Model {
        #[command(subcommand)]
        action: commands::model::ModelAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Puzzle { action } => commands::puzzle::run(action),
        Commands::Policy { action } => commands::policy::run(action),
        Commands::Model { action } => commands::model::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

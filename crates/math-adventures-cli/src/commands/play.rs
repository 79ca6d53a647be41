//! Interactive practice session over stdin/stdout.

use clap::{Args, ValueEnum};
use math_adventures_core::export::{to_csv, to_json};
use math_adventures_core::{Difficulty, EngineKind, Operation, PuzzleGenerator, Session};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::load_config;

#[derive(Args)]
pub struct PlayArgs {
    /// Config file (default: ~/.config/math-adventures/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Learner name shown in the greeting
    #[arg(long)]
    name: Option<String>,
    /// Starting level
    #[arg(short, long)]
    start: Option<Difficulty>,
    /// Number of questions (5-50)
    #[arg(short = 'n', long)]
    questions: Option<u32>,
    /// Operations to practise, comma separated
    #[arg(short, long, value_delimiter = ',')]
    operations: Vec<Operation>,
    /// Use this model artifact as the difficulty policy
    #[arg(short, long)]
    model: Option<PathBuf>,
    /// RNG seed for reproducible puzzles
    #[arg(long)]
    seed: Option<u64>,
    /// Write the trial log to this file when the session ends
    #[arg(long)]
    export: Option<PathBuf>,
    /// Export format (default: from the file extension, else csv)
    #[arg(long, value_enum)]
    format: Option<ExportFormat>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn infer(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(name) = args.name {
        config.session.learner_name = name;
    }
    if let Some(start) = args.start {
        config.session.start_difficulty = start;
    }
    if let Some(questions) = args.questions {
        config.session.max_questions = questions;
    }
    if !args.operations.is_empty() {
        config.session.operations = args.operations;
    }
    if let Some(model) = args.model {
        config.policy.engine = EngineKind::Model;
        config.policy.model_path = Some(model);
    }
    config.validate()?;

    let mut session = Session::from_config(&config)?;
    let mut generator = PuzzleGenerator::new(config.session.operations.clone(), args.seed);

    let mut lines = io::stdin().lock().lines();
    let mut out = io::stdout().lock();

    writeln!(
        out,
        "Welcome to Math Adventures, {}! Type your answer and press Enter (q to quit).",
        config.session.learner_name
    )?;

    while !session.is_complete() {
        let puzzle = session.next_puzzle(&mut generator);
        write!(
            out,
            "\nQuestion {}/{} [{}]\n{} = ",
            session.answered() + 1,
            config.session.max_questions,
            puzzle.difficulty,
            puzzle.question
        )?;
        out.flush()?;

        let started = Instant::now();
        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let outcome = session.submit(&puzzle, line, started.elapsed().as_secs_f64());
        writeln!(out, "{}", outcome.feedback.message())?;
        if outcome.next > outcome.previous {
            writeln!(out, "Level up! Next questions are {}.", outcome.next)?;
        } else if outcome.next < outcome.previous {
            writeln!(out, "Let's ease off. Next questions are {}.", outcome.next)?;
        }
    }

    writeln!(out, "{}", session.summary().render())?;

    if let Some(path) = args.export {
        let trials = session.tracker().trials();
        let content = match args.format.unwrap_or_else(|| ExportFormat::infer(&path)) {
            ExportFormat::Csv => to_csv(trials),
            ExportFormat::Json => to_json(trials)?,
        };
        fs::write(&path, content)?;
        writeln!(out, "Session log exported to: {}", path.display())?;
    }

    Ok(())
}

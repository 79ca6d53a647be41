use clap::Subcommand;
use math_adventures_core::{Difficulty, Operation, PuzzleGenerator};

#[derive(Subcommand)]
pub enum PuzzleAction {
    /// Print puzzles as JSON
    Generate {
        /// Easy, Medium or Hard
        #[arg(short, long, default_value = "easy")]
        difficulty: Difficulty,
        /// Restrict to one operation (default: any)
        #[arg(short, long)]
        operation: Option<Operation>,
        /// Number of puzzles
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn run(action: PuzzleAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PuzzleAction::Generate {
            difficulty,
            operation,
            count,
            seed,
        } => {
            let operations = operation.into_iter().collect();
            let mut generator = PuzzleGenerator::new(operations, seed);
            let puzzles: Vec<_> = (0..count).map(|_| generator.next(difficulty)).collect();
            println!("{}", serde_json::to_string_pretty(&puzzles)?);
        }
    }
    Ok(())
}

//! Difficulty model CLI commands.
//!
//! Trains decision-tree artifacts from synthetic learner data, inspects them
//! with format-version checks, and points the config at one.

use clap::Subcommand;
use math_adventures_core::model::{check_compatibility, Compatibility, ARTIFACT_VERSION};
use math_adventures_core::{train, Config, EngineKind, ModelArtifact, TrainingConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ModelAction {
    /// Train a model on synthetic transitions and save it as JSON
    Train {
        /// Output file path
        #[arg(short, long, default_value = "difficulty_model.json")]
        output: PathBuf,
        /// Number of synthetic samples
        #[arg(long, default_value_t = 8000)]
        samples: usize,
        /// Maximum tree depth
        #[arg(long, default_value_t = 6)]
        max_depth: usize,
        /// Minimum samples required to split a node
        #[arg(long, default_value_t = 2)]
        min_samples_split: usize,
        /// RNG seed for the synthetic dataset
        #[arg(long, default_value_t = 42, conflicts_with = "random")]
        seed: u64,
        /// Draw the dataset from entropy instead of a fixed seed
        #[arg(long)]
        random: bool,
        /// Model name stored in the artifact metadata
        #[arg(long)]
        name: Option<String>,
    },
    /// Show an artifact's metadata and compatibility
    Inspect {
        /// Artifact file path
        file: PathBuf,
    },
    /// Validate an artifact and select it as the session policy
    Use {
        /// Artifact file path
        file: PathBuf,
    },
    /// Show the artifact format version this build reads
    Version,
}

pub fn run(action: ModelAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ModelAction::Train {
            output,
            samples,
            max_depth,
            min_samples_split,
            seed,
            random,
            name,
        } => {
            let defaults = TrainingConfig::default();
            let config = TrainingConfig {
                samples,
                max_depth,
                min_samples_split,
                seed: if random { None } else { Some(seed) },
                name: name.unwrap_or(defaults.name),
            };
            let artifact = train(&config);
            artifact.save(&output)?;

            println!("Model saved to: {}", output.display());
            println!("  Samples: {}", artifact.metadata.samples);
            println!("  Nodes: {}", artifact.tree.len());
            println!("  Depth: {}", artifact.tree.depth());
            println!(
                "  Training accuracy: {:.1}%",
                artifact.metadata.training_accuracy * 100.0
            );
        }
        ModelAction::Inspect { file } => inspect(file)?,
        ModelAction::Use { file } => {
            let artifact = ModelArtifact::load(&file)?;
            let path = fs::canonicalize(&file)?;

            let mut config = Config::load()?;
            config.policy.engine = EngineKind::Model;
            config.policy.model_path = Some(path.clone());
            config.save()?;

            println!("Using model '{}' from {}", artifact.metadata.name, path.display());
        }
        ModelAction::Version => {
            println!("Model artifact version: {ARTIFACT_VERSION}");
        }
    }
    Ok(())
}

fn inspect(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    // Check the version before a full parse so an incompatible file still
    // gets a readable report.
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file)?)?;
    let version = raw
        .get("version")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("unknown");

    println!("Version: {version}");
    let compatibility = check_compatibility(ARTIFACT_VERSION, version);
    match &compatibility {
        Compatibility::Compatible => println!("Compatibility: OK"),
        Compatibility::MinorNewer { .. } => println!("Warning: {compatibility}"),
        Compatibility::Incompatible { .. } => {
            print!("Error: {compatibility}");
            return Err("incompatible model artifact".into());
        }
    }

    let artifact = ModelArtifact::load(&file)?;
    let meta = &artifact.metadata;
    println!("Name: {}", meta.name);
    println!("Created: {}", meta.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Samples: {}", meta.samples);
    if let Some(seed) = meta.seed {
        println!("Seed: {seed}");
    }
    println!("Training accuracy: {:.1}%", meta.training_accuracy * 100.0);
    println!(
        "Tree: {} nodes, {} leaves, depth {}",
        artifact.tree.len(),
        artifact.tree.leaf_count(),
        artifact.tree.depth()
    );
    Ok(())
}

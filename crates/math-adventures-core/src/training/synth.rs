//! Synthetic learner transitions for training a difficulty model.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::model::FEATURE_COUNT;

/// One labelled transition: features observed at a decision, and the level
/// index the learner should move to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: [f64; FEATURE_COUNT],
    pub label: usize,
}

/// Draw one plausible transition.
///
/// Fluent learners (accuracy >= 0.8 within 6 s) move up, struggling ones
/// (accuracy <= 0.45) move down, everyone else mostly stays with a 10%
/// drift either way. 5% of labels are replaced with a random level.
pub fn synthesize_transition<R: Rng + ?Sized>(rng: &mut R) -> Sample {
    let current: usize = rng.gen_range(0..=2);
    let accuracy: f64 = rng.gen::<f64>();
    let avg_time: f64 = rng.gen_range(1.0..15.0);

    let mut label = if accuracy >= 0.8 && avg_time <= 6.0 && current < 2 {
        current + 1
    } else if accuracy <= 0.45 && current > 0 {
        current - 1
    } else {
        let r: f64 = rng.gen();
        if r < 0.1 && current < 2 {
            current + 1
        } else if r > 0.9 && current > 0 {
            current - 1
        } else {
            current
        }
    };

    if rng.gen::<f64>() < 0.05 {
        label = rng.gen_range(0..=2);
    }

    Sample {
        features: [current as f64, accuracy, avg_time],
        label,
    }
}

/// Generate `n` transitions. `None` seeds from entropy.
pub fn generate_dataset(n: usize, seed: Option<u64>) -> Vec<Sample> {
    let mut rng = match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    };
    (0..n).map(|_| synthesize_transition(&mut rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_domain() {
        for sample in generate_dataset(2000, Some(7)) {
            let [current, accuracy, time] = sample.features;
            assert!([0.0, 1.0, 2.0].contains(&current));
            assert!((0.0..1.0).contains(&accuracy));
            assert!((1.0..15.0).contains(&time));
            assert!(sample.label <= 2);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        assert_eq!(generate_dataset(50, Some(42)), generate_dataset(50, Some(42)));
        assert_ne!(generate_dataset(50, Some(42)), generate_dataset(50, Some(43)));
    }

    #[test]
    fn fluent_learners_mostly_move_up() {
        let data = generate_dataset(5000, Some(1));
        let fluent: Vec<_> = data
            .iter()
            .filter(|s| s.features[0] < 2.0 && s.features[1] >= 0.8 && s.features[2] <= 6.0)
            .collect();
        assert!(!fluent.is_empty());
        let up = fluent
            .iter()
            .filter(|s| s.label as f64 == s.features[0] + 1.0)
            .count();
        assert!(up as f64 / fluent.len() as f64 > 0.9);
    }
}

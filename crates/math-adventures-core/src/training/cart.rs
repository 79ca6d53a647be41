//! CART decision-tree fitting with Gini impurity.
//!
//! Nodes are emitted in pre-order, so every child index is larger than its
//! parent's, matching what [`DecisionTree::validate`] requires.

use super::synth::Sample;
use crate::model::{DecisionTree, TreeNode, FEATURE_COUNT};

const CLASS_COUNT: usize = 3;

/// Stopping rules for tree growth.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    /// Nodes with fewer samples become leaves
    pub min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 6,
            min_samples_split: 2,
        }
    }
}

struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Fit a classification tree. An empty training set yields a single leaf
/// predicting class 0.
pub fn fit(samples: &[Sample], params: TreeParams) -> DecisionTree {
    let mut nodes = Vec::new();
    let indices: Vec<usize> = (0..samples.len()).collect();
    grow(samples, indices, 0, params, &mut nodes);
    // Pre-order emission always yields a valid tree.
    DecisionTree::new(nodes).unwrap_or_else(|_| DecisionTree::constant(0))
}

fn grow(
    samples: &[Sample],
    indices: Vec<usize>,
    depth: usize,
    params: TreeParams,
    nodes: &mut Vec<TreeNode>,
) -> usize {
    let counts = class_counts(samples, &indices);
    let id = nodes.len();
    nodes.push(TreeNode::Leaf {
        class: majority(&counts) as i64,
    });

    let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
    if pure || depth >= params.max_depth || indices.len() < params.min_samples_split {
        return id;
    }

    let Some(split) = best_split(samples, &indices) else {
        return id;
    };
    if split.impurity >= gini(&counts) - 1e-12 {
        return id;
    }

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| samples[i].features[split.feature] <= split.threshold);

    let left = grow(samples, left_idx, depth + 1, params, nodes);
    let right = grow(samples, right_idx, depth + 1, params, nodes);
    nodes[id] = TreeNode::Split {
        feature: split.feature,
        threshold: split.threshold,
        left,
        right,
    };
    id
}

/// Lowest weighted child impurity over all features and midpoint thresholds.
fn best_split(samples: &[Sample], indices: &[usize]) -> Option<Split> {
    let n = indices.len();
    let total = class_counts(samples, indices);
    let mut best: Option<Split> = None;

    for feature in 0..FEATURE_COUNT {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_by(|&a, &b| {
            samples[a].features[feature].total_cmp(&samples[b].features[feature])
        });

        let mut left = [0usize; CLASS_COUNT];
        for pos in 0..n.saturating_sub(1) {
            let label = samples[sorted[pos]].label.min(CLASS_COUNT - 1);
            left[label] += 1;

            let here = samples[sorted[pos]].features[feature];
            let next = samples[sorted[pos + 1]].features[feature];
            if here == next {
                continue;
            }

            let mut right = total;
            for c in 0..CLASS_COUNT {
                right[c] -= left[c];
            }
            let left_n = (pos + 1) as f64;
            let right_n = (n - pos - 1) as f64;
            let impurity = (left_n * gini(&left) + right_n * gini(&right)) / n as f64;

            if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                best = Some(Split {
                    feature,
                    threshold: (here + next) / 2.0,
                    impurity,
                });
            }
        }
    }
    best
}

fn class_counts(samples: &[Sample], indices: &[usize]) -> [usize; CLASS_COUNT] {
    let mut counts = [0usize; CLASS_COUNT];
    for &i in indices {
        counts[samples[i].label.min(CLASS_COUNT - 1)] += 1;
    }
    counts
}

fn gini(counts: &[usize; CLASS_COUNT]) -> f64 {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Most frequent class; ties go to the lowest index.
fn majority(counts: &[usize; CLASS_COUNT]) -> usize {
    let mut best = 0;
    for c in 1..CLASS_COUNT {
        if counts[c] > counts[best] {
            best = c;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Classifier;

    fn sample(accuracy: f64, label: usize) -> Sample {
        Sample {
            features: [1.0, accuracy, 4.0],
            label,
        }
    }

    #[test]
    fn empty_set_is_single_leaf() {
        let tree = fit(&[], TreeParams::default());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.predict(&[0.0, 0.0, 0.0]), 0);
    }

    #[test]
    fn separable_data_is_learned_exactly() {
        let data = vec![
            sample(0.1, 0),
            sample(0.2, 0),
            sample(0.3, 0),
            sample(0.6, 1),
            sample(0.7, 1),
            sample(0.9, 2),
            sample(0.95, 2),
        ];
        let tree = fit(&data, TreeParams::default());
        for s in &data {
            assert_eq!(tree.predict(&s.features), s.label as i64);
        }
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn max_depth_is_respected() {
        let data: Vec<Sample> = (0..64).map(|i| sample(i as f64 / 64.0, i % 3)).collect();
        let tree = fit(
            &data,
            TreeParams {
                max_depth: 2,
                min_samples_split: 2,
            },
        );
        assert!(tree.depth() <= 2);
    }

    #[test]
    fn gini_of_pure_and_mixed() {
        assert_eq!(gini(&[4, 0, 0]), 0.0);
        assert!((gini(&[1, 1, 0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn majority_breaks_ties_low() {
        assert_eq!(majority(&[2, 2, 1]), 0);
        assert_eq!(majority(&[0, 3, 3]), 1);
    }
}

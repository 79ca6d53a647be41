//! Decision tree classifier stored as a flat node array.
//!
//! Node 0 is the root. A split sends `x` left when
//! `x[feature] <= threshold`. Child indices always point past their parent,
//! which keeps every path finite.

use serde::{Deserialize, Serialize};

use super::{Classifier, FEATURE_COUNT};
use crate::error::LoadError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    Leaf {
        class: i64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Build a tree from its nodes.
    ///
    /// # Errors
    /// Returns `LoadError::InvalidTree` if the nodes fail [`DecisionTree::validate`].
    pub fn new(nodes: Vec<TreeNode>) -> Result<Self, LoadError> {
        let tree = Self { nodes };
        tree.validate()?;
        Ok(tree)
    }

    /// Tree that always predicts `class`.
    pub fn constant(class: i64) -> Self {
        Self {
            nodes: vec![TreeNode::Leaf { class }],
        }
    }

    /// Check structural soundness.
    ///
    /// # Errors
    /// Returns `LoadError::InvalidTree` describing the first bad node.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.nodes.is_empty() {
            return Err(LoadError::InvalidTree("tree has no nodes".to_string()));
        }

        let len = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } = node
            {
                if *feature >= FEATURE_COUNT {
                    return Err(LoadError::InvalidTree(format!(
                        "node {idx}: feature {feature} out of range (expected < {FEATURE_COUNT})"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(LoadError::InvalidTree(format!(
                        "node {idx}: threshold is not finite"
                    )));
                }
                for child in [*left, *right] {
                    if child <= idx || child >= len {
                        return Err(LoadError::InvalidTree(format!(
                            "node {idx}: child index {child} must be in {}..{len}",
                            idx + 1
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TreeNode::Leaf { .. }))
            .count()
    }

    /// Longest root-to-leaf path, counted in splits.
    ///
    /// Computed bottom-up in one pass, so subtrees shared by several parents
    /// are measured once.
    pub fn depth(&self) -> usize {
        let len = self.nodes.len();
        let mut depths = vec![0usize; len];
        for idx in (0..len).rev() {
            if let TreeNode::Split { left, right, .. } = &self.nodes[idx] {
                let child_depth = |child: usize| {
                    if child > idx && child < len {
                        depths[child]
                    } else {
                        0
                    }
                };
                let deepest = child_depth(*left).max(child_depth(*right));
                depths[idx] = 1 + deepest;
            }
        }
        depths.first().copied().unwrap_or(0)
    }
}

impl Classifier for DecisionTree {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> i64 {
        let mut idx = 0;
        // Bounded walk: a validated tree reaches a leaf in fewer steps.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { class }) => return *class,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => break,
            }
        }
        0
    }
}

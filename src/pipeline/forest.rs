//! Random forest regression.
//!
//! Each tree is a CART regressor grown on a bootstrap sample, splitting on squared
//! error over every feature until leaves are pure or too small to split. The forest
//! predicts the mean of its trees.

use super::PipelineError;
use ndarray::{ArrayView1, ArrayView2};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,

    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,

    /// Unbounded when `None`.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_n_estimators() -> usize {
    100
}
fn default_seed() -> u64 {
    42
}
fn default_min_samples_split() -> usize {
    2
}
fn default_min_samples_leaf() -> usize {
    1
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: default_n_estimators(),
            seed: default_seed(),
            min_samples_split: default_min_samples_split(),
            min_samples_leaf: default_min_samples_leaf(),
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A single fitted regression tree stored as a flat node arena, root at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    score: f64,
}

impl RegressionTree {
    /// Grow a tree over the rows of `x` listed in `samples` (duplicates allowed).
    fn fit(x: ArrayView2<f64>, y: &[f64], samples: Vec<usize>, params: &ForestParams) -> Self {
        let mut nodes = vec![Node::Leaf { value: 0.0 }];
        let mut pending = vec![(0usize, samples, 0usize)];

        while let Some((node, samples, depth)) = pending.pop() {
            let value = mean(samples.iter().map(|&i| y[i]));
            nodes[node] = Node::Leaf { value };

            let depth_exhausted = params.max_depth.is_some_and(|max| depth >= max);
            if depth_exhausted
                || samples.len() < params.min_samples_split.max(2)
                || is_pure(&samples, y)
            {
                continue;
            }

            let Some(split) = best_split(x, y, &samples, params.min_samples_leaf.max(1)) else {
                continue;
            };

            let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
                .into_iter()
                .partition(|&i| x[[i, split.feature]] <= split.threshold);

            let left = nodes.len();
            let right = left + 1;
            nodes.push(Node::Leaf { value: 0.0 });
            nodes.push(Node::Leaf { value: 0.0 });
            nodes[node] = Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left,
                right,
            };
            pending.push((right, right_samples, depth + 1));
            pending.push((left, left_samples, depth + 1));
        }

        Self { nodes }
    }

    fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0f64, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn is_pure(samples: &[usize], y: &[f64]) -> bool {
    let first = y[samples[0]];
    samples.iter().all(|&i| y[i] == first)
}

/// Find the threshold minimizing the summed squared error of both children.
///
/// Minimizing SSE is equivalent to maximizing `sum_l^2 / n_l + sum_r^2 / n_r`, which
/// avoids accumulating squares.
fn best_split(
    x: ArrayView2<f64>,
    y: &[f64],
    samples: &[usize],
    min_samples_leaf: usize,
) -> Option<SplitCandidate> {
    let n = samples.len();
    let total: f64 = samples.iter().map(|&i| y[i]).sum();
    let mut best: Option<SplitCandidate> = None;
    let mut order = samples.to_vec();

    for feature in 0..x.ncols() {
        order.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));

        let mut left_sum = 0.0;
        for k in 1..n {
            left_sum += y[order[k - 1]];
            let lo = x[[order[k - 1], feature]];
            let hi = x[[order[k], feature]];
            if lo >= hi || k < min_samples_leaf || n - k < min_samples_leaf {
                continue;
            }

            let right_sum = total - left_sum;
            let score = left_sum * left_sum / k as f64 + right_sum * right_sum / (n - k) as f64;
            if best.as_ref().map_or(true, |b| score > b.score) {
                let mut threshold = lo + (hi - lo) / 2.0;
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    score,
                });
            }
        }
    }

    best
}

/// Bagged ensemble of [`RegressionTree`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    params: ForestParams,
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    /// Fit the forest. Trees are grown in parallel; each draws its bootstrap sample
    /// from its own seed, derived up front from `params.seed`, so the result does not
    /// depend on scheduling.
    pub fn fit(x: ArrayView2<f64>, y: &[f64], params: &ForestParams) -> Result<Self, PipelineError> {
        let n = x.nrows();
        if n == 0 {
            return Err(PipelineError::EmptyDataset);
        }
        if y.len() != n {
            return Err(PipelineError::LengthMismatch {
                rows: n,
                targets: y.len(),
            });
        }
        if params.n_estimators == 0 {
            return Err(PipelineError::InvalidParams(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if let Some(index) = y.iter().position(|v| !v.is_finite()) {
            return Err(PipelineError::NonFiniteTarget(index));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(PipelineError::NonFiniteFeature);
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let seeds: Vec<u64> = (0..params.n_estimators).map(|_| rng.random()).collect();

        let trees = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let samples = (0..n).map(|_| rng.random_range(0..n)).collect();
                RegressionTree::fit(x, y, samples, params)
            })
            .collect();

        Ok(Self {
            params: params.clone(),
            n_features: x.ncols(),
            trees,
        })
    }

    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<f64>, PipelineError> {
        if x.ncols() != self.n_features {
            return Err(PipelineError::FeatureWidth {
                expected: self.n_features,
                actual: x.ncols(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(PipelineError::NonFiniteFeature);
        }

        Ok(x
            .rows()
            .into_iter()
            .map(|row| mean(self.trees.iter().map(|tree| tree.predict_row(row))))
            .collect())
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

//! Terminal tree nodes: statistics accumulation and the split decision.
use super::node::{Branch, Node};
use super::params::TreeParams;
use crate::data::features::{ClassLabel, FeatureValue, Features, Prediction, Target};
use crate::errors::{Result, TreeError};
use crate::proba::TargetDistribution;
use crate::splitting::{SplitCandidate, SplitEnumerator, SplitTest};
use log::{debug, trace};
use std::collections::HashMap;
use std::sync::Arc;

/// With probability `1 - confidence`, the observed mean of `n` variables with
/// range `range` lies within the returned distance of the true mean.
pub fn hoeffding_bound(range: f64, confidence: f64, n: f64) -> f64 {
    (range * range * (1.0 / confidence).ln() / (2.0 * n)).sqrt()
}

#[derive(Clone, Debug)]
pub struct Leaf<C: ClassLabel> {
    depth: usize,
    params: Arc<TreeParams>,
    target_dist: TargetDistribution<C>,
    n_samples: u64,
    splitters: HashMap<String, SplitEnumerator<C>>,
}

impl<C: ClassLabel> Leaf<C> {
    pub fn new(depth: usize, params: Arc<TreeParams>, target_dist: TargetDistribution<C>) -> Self {
        Self {
            depth,
            params,
            target_dist,
            n_samples: 0,
            splitters: HashMap::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn n_samples(&self) -> u64 {
        self.n_samples
    }

    pub fn target_dist(&self) -> &TargetDistribution<C> {
        &self.target_dist
    }

    pub fn splitters(&self) -> &HashMap<String, SplitEnumerator<C>> {
        &self.splitters
    }

    pub fn size(&self) -> usize {
        1
    }

    /// The number of observed classes. Fails on a continuous target.
    pub fn n_classes(&self) -> Result<usize> {
        self.target_dist.n_classes()
    }

    pub fn is_pure(&self) -> bool {
        self.target_dist.is_pure()
    }

    /// Current Hoeffding bound. The range is the log of the class count for
    /// discrete targets and 1 for continuous ones, whose gains are relative.
    pub fn hoeffding_bound(&self) -> Result<f64> {
        let range = if self.target_dist.is_continuous() {
            1.0
        } else {
            (self.n_classes()? as f64).ln()
        };
        Ok(hoeffding_bound(
            range,
            self.params.confidence(),
            self.n_samples as f64,
        ))
    }

    /// Absorbs one example. Returns the branch that must replace this leaf when
    /// the accumulated evidence justifies a split.
    pub fn update(&mut self, features: &Features, target: &Target<C>) -> Result<Option<Branch<C>>> {
        self.target_dist.update(target)?;
        self.n_samples += 1;

        for (feature, value) in features {
            if let Some(splitter) = self.splitters.get_mut(feature) {
                splitter.update(value, target)?;
                continue;
            }
            let mut splitter =
                SplitEnumerator::for_value(feature, value, self.params.n_bins(), &self.target_dist);
            splitter.update(value, target)?;
            self.splitters.insert(feature.clone(), splitter);
        }

        if !self.params.allows_split_at(self.depth)
            || self.is_pure()
            || self.n_samples % self.params.patience() != 0
        {
            return Ok(None);
        }

        let (best, margin) = self.find_best_split()?;
        let bound = self.hoeffding_bound()?;
        if margin > bound || bound < self.params.tie_threshold() {
            debug!(
                "Splitting leaf at depth {} after {} samples on {} (margin {:.5}, bound {:.5})",
                self.depth, self.n_samples, best.test, margin, bound
            );
            return Ok(Some(self.split(best.test)));
        }
        Ok(None)
    }

    /// Children start from empty statistics; this leaf's are discarded.
    fn split(&self, test: SplitTest) -> Branch<C> {
        let child = || {
            Node::Leaf(Leaf::new(
                self.depth + 1,
                Arc::clone(&self.params),
                self.target_dist.fresh(),
            ))
        };
        Branch::new(test, child(), child())
    }

    /// The best candidate over every feature, and the margin of its gain over
    /// the runner-up's.
    pub fn find_best_split(&self) -> Result<(SplitCandidate, f64)> {
        let criterion = self.params.criterion();
        let current_impurity = criterion.impurity(&self.target_dist)?;
        let relative = self.target_dist.is_continuous();

        let mut features = self.splitters.keys().collect::<Vec<_>>();
        features.sort();

        let mut best_split = None;
        let mut best_gain = f64::NEG_INFINITY;
        let mut second_best_gain = f64::NEG_INFINITY;

        for feature in features {
            for candidate in self.splitters[feature].enumerate_splits(&self.target_dist, criterion)? {
                let mut gain = current_impurity - candidate.impurity;
                if relative {
                    gain = if current_impurity > 0.0 {
                        gain / current_impurity
                    } else {
                        0.0
                    };
                }

                if gain > best_gain {
                    second_best_gain = best_gain;
                    best_gain = gain;
                    best_split = Some(candidate);
                } else if gain > second_best_gain {
                    second_best_gain = gain;
                }
            }
        }

        let best_split = best_split.ok_or(TreeError::NoSplitCandidates(self.n_samples))?;
        Ok((best_split, best_gain - second_best_gain))
    }

    pub fn predict(&self, _features: &Features) -> Prediction<C> {
        match &self.target_dist {
            TargetDistribution::Continuous(dist) => Prediction::Value(dist.mode()),
            TargetDistribution::Discrete(dist) => Prediction::Probabilities(
                dist.keys()
                    .map(|class| (class.clone(), dist.pmf(class)))
                    .collect(),
            ),
        }
    }

    /// Class probabilities refined by the likelihood of each known feature value.
    ///
    /// Scores are renormalised after every feature so long products of
    /// densities stay finite. Non-finite numeric values carry no evidence, as
    /// during learning.
    pub fn predict_naive_bayes(&self, features: &Features) -> Result<HashMap<C, f64>> {
        let mut scores = match self.predict(features) {
            Prediction::Probabilities(probas) => probas,
            Prediction::Value(_) => return Err(TreeError::ContinuousTarget),
        };

        for (feature, value) in features {
            if matches!(value, FeatureValue::Numeric(x) if !x.is_finite()) {
                trace!("Ignoring non-finite value of feature {} at prediction", feature);
                continue;
            }
            let Some(splitter) = self.splitters.get(feature) else {
                continue;
            };
            for (class, dist) in splitter.distributions() {
                if let Some(score) = scores.get_mut(class) {
                    *score *= dist.likelihood(value);
                }
            }
            normalise(&mut scores);
        }

        let total = scores.values().sum::<f64>();
        if total > 0.0 && total.is_finite() {
            scores.values_mut().for_each(|score| *score /= total);
        } else {
            let uniform = 1.0 / scores.len() as f64;
            scores.values_mut().for_each(|score| *score = uniform);
        }
        Ok(scores)
    }
}

/// Rescales the scores to sum to one; degenerate totals are left for the caller.
fn normalise<C: ClassLabel>(scores: &mut HashMap<C, f64>) {
    let total = scores.values().sum::<f64>();
    if total > 0.0 && total.is_finite() {
        scores.values_mut().for_each(|score| *score /= total);
    }
}

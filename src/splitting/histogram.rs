//! Split search over a numeric feature with a bounded streaming histogram.
use super::{split_impurity, SplitCandidate, SplitTest};
use crate::data::features::{ClassLabel, Target};
use crate::errors::Result;
use crate::proba::{Gaussian, TargetDistribution};
use crate::trees::criterion::Criterion;
use log::trace;
use std::collections::HashMap;

#[derive(Clone, Debug)]
struct Bin<C: ClassLabel> {
    centroid: f64,
    count: f64,
    target: TargetDistribution<C>,
}

/// Keeps at most `n_bins` bins sorted by centroid. Each bin carries the target
/// statistics of the values it absorbed, so candidate thresholds sit between
/// consecutive centroids.
#[derive(Clone, Debug)]
pub struct HistogramSplitter<C: ClassLabel> {
    feature: String,
    n_bins: usize,
    bins: Vec<Bin<C>>,
    template: TargetDistribution<C>,
    class_dists: HashMap<C, Gaussian>,
}

impl<C: ClassLabel> HistogramSplitter<C> {
    pub fn new(feature: &str, n_bins: usize, template: TargetDistribution<C>) -> Self {
        Self {
            feature: feature.to_string(),
            n_bins: n_bins.max(2),
            bins: Vec::with_capacity(n_bins + 1),
            template,
            class_dists: HashMap::new(),
        }
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Number of bins currently in use.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn update(&mut self, x: f64, target: &Target<C>) -> Result<()> {
        if !x.is_finite() {
            trace!("Ignoring non-finite value of feature {}", self.feature);
            return Ok(());
        }

        match self.bins.binary_search_by(|bin| bin.centroid.total_cmp(&x)) {
            Ok(idx) => {
                let bin = &mut self.bins[idx];
                bin.target.update(target)?;
                bin.count += 1.0;
            }
            Err(idx) => {
                let mut bin = Bin {
                    centroid: x,
                    count: 1.0,
                    target: self.template.fresh(),
                };
                bin.target.update(target)?;
                self.bins.insert(idx, bin);
                if self.bins.len() > self.n_bins {
                    self.merge_closest()?;
                }
            }
        }

        if let Target::Class(class) = target {
            self.class_dists.entry(class.clone()).or_default().update(x);
        }
        Ok(())
    }

    fn merge_closest(&mut self) -> Result<()> {
        let Some(idx) = self
            .bins
            .windows(2)
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let gap_a = a[1].centroid - a[0].centroid;
                let gap_b = b[1].centroid - b[0].centroid;
                gap_a.total_cmp(&gap_b)
            })
            .map(|(idx, _)| idx)
        else {
            return Ok(());
        };

        let absorbed = self.bins.remove(idx + 1);
        let bin = &mut self.bins[idx];
        let count = bin.count + absorbed.count;
        bin.centroid = (bin.centroid * bin.count + absorbed.centroid * absorbed.count) / count;
        bin.count = count;
        bin.target.merge(&absorbed.target)
    }

    /// One `feature < threshold` candidate per gap between consecutive bins.
    pub fn enumerate_splits(
        &self,
        target_dist: &TargetDistribution<C>,
        criterion: Criterion,
    ) -> Result<Vec<SplitCandidate>> {
        let mut candidates = Vec::with_capacity(self.bins.len().saturating_sub(1));
        let mut left = target_dist.fresh();

        for pair in self.bins.windows(2) {
            left.merge(&pair[0].target)?;
            let mut right = target_dist.clone();
            right.subtract(&left)?;

            candidates.push(SplitCandidate {
                test: SplitTest::Threshold {
                    feature: self.feature.clone(),
                    threshold: (pair[0].centroid + pair[1].centroid) / 2.0,
                },
                impurity: split_impurity(&left, &right, criterion)?,
            });
        }
        Ok(candidates)
    }

    pub fn class_distributions(&self) -> impl Iterator<Item = (&C, &Gaussian)> {
        self.class_dists.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn splitter(n_bins: usize) -> HistogramSplitter<&'static str> {
        HistogramSplitter::new("x", n_bins, TargetDistribution::discrete())
    }

    fn target_of(values: &[(f64, &'static str)]) -> TargetDistribution<&'static str> {
        let mut dist = TargetDistribution::discrete();
        for (_, label) in values {
            dist.update(&Target::Class(*label)).unwrap();
        }
        dist
    }

    #[test]
    fn test_bins_are_bounded() {
        let mut hist = splitter(10);
        for i in 0..100 {
            hist.update(i as f64, &Target::Class("a")).unwrap();
        }
        assert_eq!(hist.len(), 10);

        let total: f64 = hist.bins.iter().map(|bin| bin.count).sum();
        assert_abs_diff_eq!(total, 100.0);
        assert!(hist
            .bins
            .windows(2)
            .all(|pair| pair[0].centroid < pair[1].centroid));
    }

    #[test]
    fn test_equal_values_share_a_bin() {
        let mut hist = splitter(10);
        for _ in 0..5 {
            hist.update(2.0, &Target::Class("a")).unwrap();
        }
        assert_eq!(hist.len(), 1);
        let target = target_of(&[(2.0, "a"); 5]);
        assert!(hist.enumerate_splits(&target, Criterion::Gini).unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_values_are_ignored() {
        let mut hist = splitter(10);
        hist.update(f64::NAN, &Target::Class("a")).unwrap();
        assert!(hist.is_empty());
    }

    #[test]
    fn test_best_threshold_separates_classes() {
        let data = [
            (1.0, "no"),
            (2.0, "no"),
            (3.0, "no"),
            (7.0, "yes"),
            (8.0, "yes"),
            (9.0, "yes"),
        ];
        let mut hist = splitter(30);
        for (x, label) in data {
            hist.update(x, &Target::Class(label)).unwrap();
        }

        let candidates = hist
            .enumerate_splits(&target_of(&data), Criterion::Gini)
            .unwrap();
        assert_eq!(candidates.len(), 5);

        let best = candidates
            .iter()
            .min_by(|a, b| a.impurity.total_cmp(&b.impurity))
            .unwrap();
        assert_abs_diff_eq!(best.impurity, 0.0);
        assert_eq!(
            best.test,
            SplitTest::Threshold {
                feature: "x".to_string(),
                threshold: 5.0
            }
        );
    }

    #[test]
    fn test_class_distributions() {
        let mut hist = splitter(30);
        hist.update(1.0, &Target::Class("no")).unwrap();
        hist.update(3.0, &Target::Class("no")).unwrap();
        hist.update(8.0, &Target::Class("yes")).unwrap();

        let dists: HashMap<_, _> = hist.class_distributions().collect();
        assert_abs_diff_eq!(dists[&"no"].mean(), 2.0);
        assert_abs_diff_eq!(dists[&"yes"].n(), 1.0);
    }

    #[test]
    fn test_continuous_target() {
        let mut hist = HistogramSplitter::<()>::new("x", 30, TargetDistribution::continuous());
        let mut target = TargetDistribution::continuous();
        for (x, y) in [(1.0, 10.0), (2.0, 10.0), (8.0, 50.0), (9.0, 50.0)] {
            hist.update(x, &Target::Value(y)).unwrap();
            target.update(&Target::Value(y)).unwrap();
        }

        let candidates = hist.enumerate_splits(&target, Criterion::Variance).unwrap();
        let best = candidates
            .iter()
            .min_by(|a, b| a.impurity.total_cmp(&b.impurity))
            .unwrap();
        assert_abs_diff_eq!(best.impurity, 0.0, epsilon = 1e-9);
        assert_eq!(hist.class_distributions().count(), 0);
    }
}

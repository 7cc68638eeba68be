//! Per-feature split search.
//!
//! A leaf keeps one [`SplitEnumerator`] per feature it has seen. Each enumerator
//! accumulates the statistics it needs to propose binary [`SplitTest`]s and to
//! score them with an impurity [`Criterion`].
pub mod categorical;
pub mod histogram;

pub use categorical::CategoricalSplitter;
pub use histogram::HistogramSplitter;

use crate::data::features::{ClassLabel, FeatureValue, Features, Target};
use crate::errors::Result;
use crate::proba::{Gaussian, Multinomial, TargetDistribution};
use crate::trees::criterion::Criterion;
use log::trace;
use std::fmt::{self, Display};

/// A binary routing test over an example's features.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitTest {
    /// Left when the feature is numeric and below the threshold.
    Threshold { feature: String, threshold: f64 },
    /// Left when the feature is categorical and equal to the category.
    Equals { feature: String, category: String },
}

impl SplitTest {
    pub fn feature(&self) -> &str {
        match self {
            SplitTest::Threshold { feature, .. } | SplitTest::Equals { feature, .. } => feature,
        }
    }

    /// Missing features and values of the other kind go right.
    pub fn goes_left(&self, features: &Features) -> bool {
        match (self, features.get(self.feature())) {
            (SplitTest::Threshold { threshold, .. }, Some(FeatureValue::Numeric(value))) => {
                value < threshold
            }
            (SplitTest::Equals { category, .. }, Some(FeatureValue::Categorical(value))) => {
                value == category
            }
            _ => false,
        }
    }
}

impl Display for SplitTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitTest::Threshold { feature, threshold } => write!(f, "{} < {}", feature, threshold),
            SplitTest::Equals { feature, category } => write!(f, "{} = {}", feature, category),
        }
    }
}

/// A proposed test and the impurity it would yield on the data seen so far.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitCandidate {
    pub test: SplitTest,
    pub impurity: f64,
}

/// Weighted impurity of the two sides of a split; an empty side counts for nothing.
pub(crate) fn split_impurity<C: ClassLabel>(
    left: &TargetDistribution<C>,
    right: &TargetDistribution<C>,
    criterion: Criterion,
) -> Result<f64> {
    let n_left = left.total();
    let n_right = right.total();
    let n = n_left + n_right;
    if n == 0.0 {
        return Ok(0.0);
    }
    let mut impurity = 0.0;
    if n_left > 0.0 {
        impurity += n_left / n * criterion.impurity(left)?;
    }
    if n_right > 0.0 {
        impurity += n_right / n * criterion.impurity(right)?;
    }
    Ok(impurity)
}

/// Statistics of a feature's values for one class.
#[derive(Clone, Copy, Debug)]
pub enum FeatureDistribution<'a> {
    Continuous(&'a Gaussian),
    Discrete(&'a Multinomial<String>),
}

impl FeatureDistribution<'_> {
    /// Density or mass of `value`; a value of the other kind is impossible.
    pub fn likelihood(&self, value: &FeatureValue) -> f64 {
        match (self, value) {
            (FeatureDistribution::Continuous(dist), FeatureValue::Numeric(x)) => dist.pdf(*x),
            (FeatureDistribution::Discrete(dist), FeatureValue::Categorical(category)) => {
                dist.pmf(category)
            }
            _ => 0.0,
        }
    }
}

/// Running statistics of one feature at one leaf.
#[derive(Clone, Debug)]
pub enum SplitEnumerator<C: ClassLabel> {
    Histogram(HistogramSplitter<C>),
    Categorical(CategoricalSplitter<C>),
}

impl<C: ClassLabel> SplitEnumerator<C> {
    /// Picks the enumerator matching the first value seen for `feature`.
    pub fn for_value(
        feature: &str,
        value: &FeatureValue,
        n_bins: usize,
        target: &TargetDistribution<C>,
    ) -> Self {
        match value {
            FeatureValue::Numeric(_) => {
                SplitEnumerator::Histogram(HistogramSplitter::new(feature, n_bins, target.fresh()))
            }
            FeatureValue::Categorical(_) => {
                SplitEnumerator::Categorical(CategoricalSplitter::new(feature, target.fresh()))
            }
        }
    }

    pub fn feature(&self) -> &str {
        match self {
            SplitEnumerator::Histogram(splitter) => splitter.feature(),
            SplitEnumerator::Categorical(splitter) => splitter.feature(),
        }
    }

    pub fn update(&mut self, value: &FeatureValue, target: &Target<C>) -> Result<()> {
        match (self, value) {
            (SplitEnumerator::Histogram(splitter), FeatureValue::Numeric(x)) => {
                splitter.update(*x, target)
            }
            (SplitEnumerator::Categorical(splitter), FeatureValue::Categorical(category)) => {
                splitter.update(category, target)
            }
            (splitter, value) => {
                trace!(
                    "Ignoring value {:?} of feature {}: kind differs from earlier values",
                    value,
                    splitter.feature()
                );
                Ok(())
            }
        }
    }

    /// Every split this feature can currently propose, freshly computed.
    pub fn enumerate_splits(
        &self,
        target_dist: &TargetDistribution<C>,
        criterion: Criterion,
    ) -> Result<Vec<SplitCandidate>> {
        match self {
            SplitEnumerator::Histogram(splitter) => splitter.enumerate_splits(target_dist, criterion),
            SplitEnumerator::Categorical(splitter) => {
                splitter.enumerate_splits(target_dist, criterion)
            }
        }
    }

    /// Per-class distribution of this feature, for naive-Bayes scoring.
    pub fn distributions(&self) -> Vec<(&C, FeatureDistribution<'_>)> {
        match self {
            SplitEnumerator::Histogram(splitter) => splitter
                .class_distributions()
                .map(|(class, dist)| (class, FeatureDistribution::Continuous(dist)))
                .collect(),
            SplitEnumerator::Categorical(splitter) => splitter
                .class_distributions()
                .map(|(class, dist)| (class, FeatureDistribution::Discrete(dist)))
                .collect(),
        }
    }
}

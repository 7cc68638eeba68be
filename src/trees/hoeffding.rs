//! Hoeffding Tree
use super::leaf::Leaf;
use super::node::Node;
use super::params::TreeParams;
use crate::data::dataset::{Dataset, Number, RealNumber, TargetValue};
use crate::data::features::{ClassLabel, Features, Prediction, Target};
use crate::errors::{Result, TreeError};
use crate::metrics::{ClassificationMetrics, RegressionMetrics};
use crate::proba::TargetDistribution;
use log::info;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Incremental decision tree learning from one example at a time.
///
/// The tree owns the root slot and the configuration shared by every node.
/// Learning is sequential: `learn_one` needs `&mut self`, so concurrent
/// producers must serialise their calls (e.g. behind a `Mutex`). Predictions
/// only read the tree and may run in parallel with each other.
#[derive(Clone, Debug)]
pub struct HoeffdingTree<C: ClassLabel> {
    root: Node<C>,
    params: Arc<TreeParams>,
    n_samples: u64,
}

/// Regression trees never see class labels.
pub type HoeffdingTreeRegressor = HoeffdingTree<()>;

impl<C: ClassLabel> ClassificationMetrics<C> for HoeffdingTree<C> {}

impl<C: ClassLabel> RegressionMetrics for HoeffdingTree<C> {}

impl<C: ClassLabel> HoeffdingTree<C> {
    /// Creates a tree for discrete targets.
    ///
    /// # Errors
    ///
    /// Fails when the parameters are invalid or the criterion scores continuous targets.
    pub fn classifier(params: TreeParams) -> Result<Self> {
        if params.criterion().is_continuous() {
            return Err(TreeError::InvalidParameter(
                "criterion".to_string(),
                "gini or entropy for a classifier".to_string(),
                params.criterion().to_string(),
            ));
        }
        Self::with_root(params, TargetDistribution::discrete())
    }

    /// Creates a tree for continuous targets.
    ///
    /// # Errors
    ///
    /// Fails when the parameters are invalid or the criterion scores discrete targets.
    pub fn regressor(params: TreeParams) -> Result<Self> {
        if !params.criterion().is_continuous() {
            return Err(TreeError::InvalidParameter(
                "criterion".to_string(),
                "variance for a regressor".to_string(),
                params.criterion().to_string(),
            ));
        }
        Self::with_root(params, TargetDistribution::continuous())
    }

    fn with_root(params: TreeParams, target_dist: TargetDistribution<C>) -> Result<Self> {
        params.validate()?;
        let params = Arc::new(params);
        Ok(Self {
            root: Node::Leaf(Leaf::new(0, Arc::clone(&params), target_dist)),
            params,
            n_samples: 0,
        })
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    pub fn root(&self) -> &Node<C> {
        &self.root
    }

    pub fn n_samples(&self) -> u64 {
        self.n_samples
    }

    /// Number of leaves.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Depth of the deepest leaf.
    pub fn depth(&self) -> usize {
        self.root
            .leaves()
            .iter()
            .map(|leaf| leaf.depth())
            .max()
            .unwrap_or(0)
    }

    /// Updates the tree with one example.
    ///
    /// # Errors
    ///
    /// Fails when the target kind doesn't match the tree, or when a split check
    /// runs at a leaf that has nothing to split on (e.g. every example so far had
    /// the same value). In the latter case the example has already been absorbed
    /// by its leaf and is counted.
    pub fn learn_one(&mut self, features: &Features, target: &Target<C>) -> Result<()> {
        let result = self.root.update(features, target);
        if !matches!(result, Err(TreeError::TargetMismatch { .. })) {
            self.n_samples += 1;
        }
        result
    }

    pub fn get_leaf(&self, features: &Features) -> &Leaf<C> {
        self.root.get_leaf(features)
    }

    pub fn predict_one(&self, features: &Features) -> Prediction<C> {
        self.root.predict(features)
    }

    pub fn predict_naive_bayes(&self, features: &Features) -> Result<HashMap<C, f64>> {
        self.root.predict_naive_bayes(features)
    }

    /// The most probable class, or `None` for regression trees and empty leaves.
    pub fn predict_class(&self, features: &Features) -> Option<C> {
        self.predict_one(features).class().cloned()
    }

    /// Predicts a batch of examples in parallel.
    pub fn predict_many(&self, batch: &[Features]) -> Vec<Prediction<C>> {
        batch
            .par_iter()
            .map(|features| self.predict_one(features))
            .collect()
    }

    /// Replays a dataset, row by row, as a stream of labelled examples.
    pub fn learn_dataset<XT: Number>(&mut self, dataset: &Dataset<XT, C>) -> Result<()>
    where
        C: TargetValue,
    {
        for row in 0..dataset.nrows() {
            self.learn_one(&dataset.features(row), &Target::Class(dataset.y[row]))?;
        }
        info!(
            "Learnt {} rows, the tree has {} leaves.",
            dataset.nrows(),
            self.size()
        );
        Ok(())
    }
}

impl HoeffdingTreeRegressor {
    /// Replays a dataset with real-valued targets as a stream.
    pub fn learn_regression_dataset<XT: Number, YT: RealNumber>(
        &mut self,
        dataset: &Dataset<XT, YT>,
    ) -> Result<()> {
        for row in 0..dataset.nrows() {
            let value = dataset.y[row].to_f64().unwrap_or(f64::NAN);
            self.learn_one(&dataset.features(row), &Target::Value(value))?;
        }
        info!(
            "Learnt {} rows, the tree has {} leaves.",
            dataset.nrows(),
            self.size()
        );
        Ok(())
    }

    pub fn predict_value(&self, features: &Features) -> f64 {
        self.predict_one(features).value().unwrap_or(0.0)
    }
}

impl Default for HoeffdingTree<String> {
    /// A classifier with default parameters.
    fn default() -> Self {
        let params = Arc::new(TreeParams::new());
        Self {
            root: Node::Leaf(Leaf::new(
                0,
                Arc::clone(&params),
                TargetDistribution::discrete(),
            )),
            params,
            n_samples: 0,
        }
    }
}

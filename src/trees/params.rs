use crate::errors::{Result, TreeError};
use crate::trees::criterion::Criterion;

/// Configuration shared, read-only, by every node of a tree.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub confidence: f64,
    pub patience: u64,
    pub tie_threshold: f64,
    pub n_bins: usize,
    pub criterion: Criterion,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(name: &str, expected: &str, got: impl ToString) -> TreeError {
    TreeError::InvalidParameter(name.to_string(), expected.to_string(), got.to_string())
}

impl TreeParams {
    pub fn new() -> Self {
        Self {
            max_depth: Some(5),
            confidence: 1e-7,
            patience: 250,
            tie_threshold: 0.05,
            n_bins: 30,
            criterion: Criterion::Gini,
        }
    }

    /// Splits are disallowed at or beyond `max_depth`; `None` lets the tree grow freely.
    pub fn set_max_depth(&mut self, max_depth: Option<usize>) -> Result<()> {
        self.max_depth = max_depth;
        Ok(())
    }

    pub fn set_confidence(&mut self, confidence: f64) -> Result<()> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(invalid("confidence", "a value in (0, 1)", confidence));
        }
        self.confidence = confidence;
        Ok(())
    }

    pub fn set_patience(&mut self, patience: u64) -> Result<()> {
        if patience < 1 {
            return Err(invalid("patience", "a value greater than 0", patience));
        }
        self.patience = patience;
        Ok(())
    }

    pub fn set_tie_threshold(&mut self, tie_threshold: f64) -> Result<()> {
        if !(tie_threshold >= 0.0) {
            return Err(invalid("tie_threshold", "a non-negative value", tie_threshold));
        }
        self.tie_threshold = tie_threshold;
        Ok(())
    }

    pub fn set_n_bins(&mut self, n_bins: usize) -> Result<()> {
        if n_bins < 2 {
            return Err(invalid("n_bins", "at least 2 bins", n_bins));
        }
        self.n_bins = n_bins;
        Ok(())
    }

    pub fn set_criterion(&mut self, criterion: &str) -> Result<()> {
        self.criterion = criterion.parse()?;
        Ok(())
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn patience(&self) -> u64 {
        self.patience
    }

    pub fn tie_threshold(&self) -> f64 {
        self.tie_threshold
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Whether a leaf at `depth` may still split.
    pub fn allows_split_at(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max_depth| depth < max_depth)
    }

    /// Re-checks every field, for params assembled by hand.
    pub fn validate(&self) -> Result<()> {
        let mut params = TreeParams::new();
        params.set_confidence(self.confidence)?;
        params.set_patience(self.patience)?;
        params.set_tie_threshold(self.tie_threshold)?;
        params.set_n_bins(self.n_bins)?;
        Ok(())
    }
}

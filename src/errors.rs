//! Errors
//!
//! Custom error types used throughout the `rusty-hoeffding` crate.
use thiserror::Error;

/// Errors that can occur while growing or querying a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// A class count was requested from a continuous target.
    #[error("The target is continuous, hence there are no classes.")]
    ContinuousTarget,
    /// A target of one kind was fed to statistics of the other kind.
    #[error("Expected a {expected} target but a {found} target was provided.")]
    TargetMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The impurity criterion can't score this kind of target.
    #[error("The {0} criterion can't be applied to a {1} target.")]
    CriterionMismatch(&'static str, &'static str),
    /// A split search ran without a single candidate split.
    #[error("No split candidate was found at a leaf with {0} samples.")]
    NoSplitCandidates(u64),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Two sequences that must be aligned have different lengths.
    #[error("Predictions and labels are of different sizes ({0} and {1}).")]
    LengthMismatch(usize, usize),
    /// A metric was computed over no values.
    #[error("Can't compute a metric over empty input.")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, TreeError>;

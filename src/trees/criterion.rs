//! Impurity criteria
use crate::data::features::ClassLabel;
use crate::errors::{Result, TreeError};
use crate::proba::TargetDistribution;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Scores how mixed a target distribution is; lower is purer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Criterion {
    #[default]
    Gini,
    Entropy,
    Variance,
}

impl Criterion {
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Gini => "gini",
            Criterion::Entropy => "entropy",
            Criterion::Variance => "variance",
        }
    }

    /// Whether the criterion scores continuous targets.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Criterion::Variance)
    }

    pub fn impurity<C: ClassLabel>(&self, dist: &TargetDistribution<C>) -> Result<f64> {
        match (self, dist) {
            (Criterion::Gini, TargetDistribution::Discrete(counts)) => {
                if counts.total() == 0.0 {
                    return Ok(0.0);
                }
                let sum_sq = counts
                    .iter()
                    .map(|(_, count)| (count / counts.total()).powi(2))
                    .sum::<f64>();
                Ok(1.0 - sum_sq)
            }
            (Criterion::Entropy, TargetDistribution::Discrete(counts)) => {
                if counts.total() == 0.0 {
                    return Ok(0.0);
                }
                Ok(counts
                    .iter()
                    .map(|(_, count)| count / counts.total())
                    .filter(|&p| p > 0.0)
                    .map(|p| -p * p.ln())
                    .sum())
            }
            (Criterion::Variance, TargetDistribution::Continuous(values)) => Ok(values.variance()),
            (criterion, dist) => Err(TreeError::CriterionMismatch(criterion.name(), dist.kind())),
        }
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Criterion {
    type Err = TreeError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "gini" => Ok(Criterion::Gini),
            "entropy" => Ok(Criterion::Entropy),
            "variance" => Ok(Criterion::Variance),
            other => Err(TreeError::InvalidParameter(
                "criterion".to_string(),
                "one of gini, entropy, variance".to_string(),
                other.to_string(),
            )),
        }
    }
}

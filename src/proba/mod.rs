//! Running statistics of targets and features.
pub mod gaussian;
pub mod multinomial;

pub use gaussian::Gaussian;
pub use multinomial::Multinomial;

use crate::data::features::{ClassLabel, Target};
use crate::errors::{Result, TreeError};

/// Sufficient statistics of the target observed at a node.
#[derive(Clone, Debug, PartialEq)]
pub enum TargetDistribution<C: ClassLabel> {
    Discrete(Multinomial<C>),
    Continuous(Gaussian),
}

impl<C: ClassLabel> TargetDistribution<C> {
    pub fn discrete() -> Self {
        TargetDistribution::Discrete(Multinomial::new())
    }

    pub fn continuous() -> Self {
        TargetDistribution::Continuous(Gaussian::new())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TargetDistribution::Discrete(_) => "discrete",
            TargetDistribution::Continuous(_) => "continuous",
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, TargetDistribution::Continuous(_))
    }

    /// An empty distribution of the same kind.
    pub fn fresh(&self) -> Self {
        match self {
            TargetDistribution::Discrete(_) => Self::discrete(),
            TargetDistribution::Continuous(_) => Self::continuous(),
        }
    }

    pub fn update(&mut self, target: &Target<C>) -> Result<()> {
        match (self, target) {
            (TargetDistribution::Discrete(dist), Target::Class(class)) => dist.update(class),
            (TargetDistribution::Continuous(dist), Target::Value(value)) => dist.update(*value),
            (dist, target) => {
                return Err(TreeError::TargetMismatch {
                    expected: dist.kind(),
                    found: target.kind(),
                })
            }
        }
        Ok(())
    }

    pub fn merge(&mut self, other: &Self) -> Result<()> {
        match (self, other) {
            (TargetDistribution::Discrete(dist), TargetDistribution::Discrete(other)) => {
                dist.merge(other)
            }
            (TargetDistribution::Continuous(dist), TargetDistribution::Continuous(other)) => {
                dist.merge(other)
            }
            (dist, other) => {
                return Err(TreeError::TargetMismatch {
                    expected: dist.kind(),
                    found: other.kind(),
                })
            }
        }
        Ok(())
    }

    pub fn subtract(&mut self, other: &Self) -> Result<()> {
        match (self, other) {
            (TargetDistribution::Discrete(dist), TargetDistribution::Discrete(other)) => {
                dist.subtract(other)
            }
            (TargetDistribution::Continuous(dist), TargetDistribution::Continuous(other)) => {
                dist.subtract(other)
            }
            (dist, other) => {
                return Err(TreeError::TargetMismatch {
                    expected: dist.kind(),
                    found: other.kind(),
                })
            }
        }
        Ok(())
    }

    /// Number of observations.
    pub fn total(&self) -> f64 {
        match self {
            TargetDistribution::Discrete(dist) => dist.total(),
            TargetDistribution::Continuous(dist) => dist.n(),
        }
    }

    /// Number of distinct observed classes.
    pub fn n_classes(&self) -> Result<usize> {
        match self {
            TargetDistribution::Discrete(dist) => Ok(dist.n_values()),
            TargetDistribution::Continuous(_) => Err(TreeError::ContinuousTarget),
        }
    }

    /// Fewer than two observed classes. Never true for a continuous target.
    pub fn is_pure(&self) -> bool {
        self.n_classes().map(|n| n < 2).unwrap_or(false)
    }
}

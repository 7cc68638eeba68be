pub mod classification;
pub mod regression;

pub use classification::ClassificationMetrics;
pub use regression::RegressionMetrics;

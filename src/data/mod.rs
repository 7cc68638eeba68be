pub mod dataset;
pub mod features;

pub use dataset::Dataset;
pub use features::{features, ClassLabel, FeatureValue, Features, Prediction, Target};

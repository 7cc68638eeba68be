use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// Anything usable as a class label of a discrete target.
pub trait ClassLabel: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
impl<T> ClassLabel for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// The value of a single feature in an example.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(String),
}

impl FeatureValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FeatureValue::Numeric(_))
    }

    /// Parses a raw cell, falling back to a category when it isn't a number.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => FeatureValue::Numeric(value),
            _ => FeatureValue::Categorical(raw.to_string()),
        }
    }
}

impl Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Numeric(value) => write!(f, "{}", value),
            FeatureValue::Categorical(category) => write!(f, "{}", category),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Numeric(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(category: &str) -> Self {
        FeatureValue::Categorical(category.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(category: String) -> Self {
        FeatureValue::Categorical(category)
    }
}

/// One example's features, keyed by feature id.
pub type Features = HashMap<String, FeatureValue>;

/// The label of one example.
#[derive(Clone, Debug, PartialEq)]
pub enum Target<C: ClassLabel> {
    Class(C),
    Value(f64),
}

impl<C: ClassLabel> Target<C> {
    pub fn kind(&self) -> &'static str {
        match self {
            Target::Class(_) => "discrete",
            Target::Value(_) => "continuous",
        }
    }
}

/// The output of a plain leaf prediction.
#[derive(Clone, Debug, PartialEq)]
pub enum Prediction<C: ClassLabel> {
    /// Class to probability mass, for discrete targets.
    Probabilities(HashMap<C, f64>),
    /// Central estimate, for continuous targets.
    Value(f64),
}

impl<C: ClassLabel> Prediction<C> {
    /// The most probable class, if any class was observed.
    pub fn class(&self) -> Option<&C> {
        match self {
            Prediction::Probabilities(probas) => probas
                .iter()
                .max_by(|(_, p1), (_, p2)| p1.total_cmp(p2))
                .map(|(class, _)| class),
            Prediction::Value(_) => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Prediction::Value(value) => Some(*value),
            Prediction::Probabilities(_) => None,
        }
    }
}

/// Builds a `Features` map from `(id, value)` pairs.
pub fn features<K, V, I>(pairs: I) -> Features
where
    K: Into<String>,
    V: Into<FeatureValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(FeatureValue::parse(" 3.5 "), FeatureValue::Numeric(3.5));
        assert_eq!(
            FeatureValue::parse("red"),
            FeatureValue::Categorical("red".to_string())
        );
        assert_eq!(
            FeatureValue::parse("NaN"),
            FeatureValue::Categorical("NaN".to_string())
        );
    }

    #[test]
    fn test_prediction_class() {
        let prediction = Prediction::Probabilities(HashMap::from([("a", 0.3), ("b", 0.7)]));
        assert_eq!(prediction.class(), Some(&"b"));
        assert_eq!(prediction.value(), None);

        let prediction: Prediction<&str> = Prediction::Value(1.5);
        assert_eq!(prediction.class(), None);
        assert_eq!(prediction.value(), Some(1.5));
    }

    #[test]
    fn test_features_builder() {
        let x = features([("age", FeatureValue::from(31.0)), ("city", "Warsaw".into())]);
        assert_eq!(x.len(), 2);
        assert!(x["age"].is_numeric());
        assert!(!x["city"].is_numeric());
    }
}

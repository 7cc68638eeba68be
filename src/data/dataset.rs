use crate::data::features::{FeatureValue, Features};
use crate::errors::{Result, TreeError};
use nalgebra::{DMatrix, DVector};
use num_traits::{Float, FromPrimitive, Num, ToPrimitive};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::cmp::PartialOrd;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

pub trait DataValue:
    Debug
    + Clone
    + Copy
    + Num
    + FromPrimitive
    + ToPrimitive
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + Display
    + 'static
{
}

impl<T> DataValue for T where
    T: Debug
        + Clone
        + Copy
        + Num
        + FromPrimitive
        + ToPrimitive
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + Display
        + 'static
{
}

pub trait Number: DataValue + PartialOrd {}
impl<T> Number for T where T: DataValue + PartialOrd {}

pub trait WholeNumber: Number + Eq + Hash {}
impl<T> WholeNumber for T where T: Number + Eq + Hash {}

pub trait RealNumber: Number + Float {}
impl<T> RealNumber for T where T: Number + Float {}

pub trait TargetValue: DataValue {}
impl<T> TargetValue for T where T: DataValue {}

/// A fixed, numeric dataset that can be replayed as a stream of examples.
pub struct Dataset<XT: Number, YT: TargetValue> {
    pub x: DMatrix<XT>,
    pub y: DVector<YT>,
    names: Vec<String>,
}

impl<XT: Number, YT: TargetValue> Debug for Dataset<XT, YT> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("names", &self.names)
            .field("nrows", &self.x.nrows())
            .field("y", &self.y.as_slice())
            .finish()
    }
}

impl<XT: Number, YT: TargetValue> Dataset<XT, YT> {
    pub fn new(x: DMatrix<XT>, y: DVector<YT>) -> Self {
        let names = (0..x.ncols()).map(|col| format!("x{}", col)).collect();
        Self { x, y, names }
    }

    /// Creates a dataset whose columns are exposed under the given feature ids.
    pub fn with_names(x: DMatrix<XT>, y: DVector<YT>, names: Vec<String>) -> Result<Self> {
        if names.len() != x.ncols() {
            return Err(TreeError::InvalidParameter(
                "names".to_string(),
                format!("{} column names", x.ncols()),
                names.len().to_string(),
            ));
        }
        Ok(Self { x, y, names })
    }

    pub fn into_parts(&self) -> (&DMatrix<XT>, &DVector<YT>) {
        (&self.x, &self.y)
    }

    pub fn is_not_empty(&self) -> bool {
        !(self.x.is_empty() || self.y.is_empty())
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The features of one row, keyed by column name.
    pub fn features(&self, row: usize) -> Features {
        self.names
            .iter()
            .zip(self.x.row(row).iter())
            .map(|(name, value)| {
                let value = value.to_f64().unwrap_or(f64::NAN);
                (name.clone(), FeatureValue::Numeric(value))
            })
            .collect()
    }

    pub fn train_test_split(&self, train_size: f64, seed: Option<u64>) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidParameter(
                "train_size".to_string(),
                "a value between 0.0 and 1.0".to_string(),
                train_size.to_string(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.x.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.x.nrows() as f64 * train_size).floor() as usize;
        let (train_indices, test_indices) = indices.split_at(train_size);

        Ok((self.select(train_indices), self.select(test_indices)))
    }

    fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select_rows(indices),
            y: self.y.select_rows(indices),
            names: self.names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_new() {
        let x = DMatrix::from_row_slice(2, 2, &[1, 2, 3, 4]);
        let y = DVector::from_vec(vec![5, 6]);
        let dataset = Dataset::new(x.clone(), y.clone());
        assert_eq!(dataset.x, x);
        assert_eq!(dataset.y, y);
        assert_eq!(dataset.names(), &["x0".to_string(), "x1".to_string()]);
    }

    #[test]
    fn test_dataset_is_not_empty() {
        let empty_x = DMatrix::<f64>::zeros(0, 0);
        let empty_y = DVector::<f64>::from_vec(vec![]);
        let empty_dataset = Dataset::new(empty_x, empty_y);
        assert!(!empty_dataset.is_not_empty());
    }

    #[test]
    fn test_dataset_features() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let y = DVector::from_vec(vec![0, 1]);
        let dataset =
            Dataset::with_names(x, y, vec!["width".to_string(), "height".to_string()]).unwrap();

        let row = dataset.features(1);
        assert_eq!(row["width"], FeatureValue::Numeric(3.0));
        assert_eq!(row["height"], FeatureValue::Numeric(4.0));
    }

    #[test]
    fn test_dataset_with_wrong_names() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let y = DVector::from_vec(vec![0, 1]);
        assert!(Dataset::with_names(x, y, vec!["width".to_string()]).is_err());
    }

    #[test]
    fn test_dataset_train_test_split() {
        let x = DMatrix::from_row_slice(4, 2, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let y = DVector::from_vec(vec![9, 10, 11, 12]);
        let dataset = Dataset::new(x, y);

        let (train_dataset, test_dataset) = dataset.train_test_split(0.75, Some(42)).unwrap();
        assert_eq!(train_dataset.x.nrows(), 3);
        assert_eq!(test_dataset.x.nrows(), 1);
        assert_eq!(train_dataset.y.len(), 3);
    }

    #[test]
    fn test_dataset_train_test_split_invalid_size() {
        let x = DMatrix::from_row_slice(2, 1, &[1, 2]);
        let y = DVector::from_vec(vec![0, 1]);
        let dataset = Dataset::new(x, y);

        assert!(dataset.train_test_split(1.5, None).is_err());
    }
}

use crate::data::features::ClassLabel;
use crate::errors::{Result, TreeError};
use nalgebra::DMatrix;

type ConfusionMatrix = DMatrix<usize>;

fn check_lengths<T>(y_true: &[T], y_pred: &[T]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(TreeError::LengthMismatch(y_true.len(), y_pred.len()));
    }
    if y_true.is_empty() {
        return Err(TreeError::EmptyInput);
    }
    Ok(())
}

pub trait ClassificationMetrics<C: ClassLabel> {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// Rows are true classes and columns predicted classes, both in order of
    /// first appearance (true labels first).
    ///
    /// # Errors
    ///
    /// Fails when the inputs have different lengths or are empty.
    fn confusion_matrix(&self, y_true: &[C], y_pred: &[C]) -> Result<(Vec<C>, ConfusionMatrix)> {
        check_lengths(y_true, y_pred)?;

        let mut classes = Vec::<C>::new();
        for class in y_true.iter().chain(y_pred.iter()) {
            if !classes.contains(class) {
                classes.push(class.clone());
            }
        }

        let mut matrix = DMatrix::zeros(classes.len(), classes.len());
        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            let row = classes.iter().position(|c| c == y_t).unwrap_or_default();
            let col = classes.iter().position(|c| c == y_p).unwrap_or_default();
            matrix[(row, col)] += 1;
        }

        Ok((classes, matrix))
    }

    /// Share of predictions equal to the true label.
    ///
    /// # Errors
    ///
    /// Fails when the inputs have different lengths or are empty.
    fn accuracy(&self, y_true: &[C], y_pred: &[C]) -> Result<f64> {
        let (_, matrix) = self.confusion_matrix(y_true, y_pred)?;
        let correct = matrix.diagonal().sum();
        Ok(correct as f64 / y_true.len() as f64)
    }
}

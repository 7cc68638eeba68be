use crate::errors::{Result, TreeError};

fn check_lengths(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(TreeError::LengthMismatch(y_true.len(), y_pred.len()));
    }
    if y_true.is_empty() {
        return Err(TreeError::EmptyInput);
    }
    Ok(())
}

pub trait RegressionMetrics {
    fn mse(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        check_lengths(y_true, y_pred)?;
        let sum_sq = y_true
            .iter()
            .zip(y_pred)
            .map(|(y_t, y_p)| (y_p - y_t).powi(2))
            .sum::<f64>();
        Ok(sum_sq / y_true.len() as f64)
    }

    fn mae(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        check_lengths(y_true, y_pred)?;
        let abs_sum = y_true
            .iter()
            .zip(y_pred)
            .map(|(y_t, y_p)| (y_p - y_t).abs())
            .sum::<f64>();
        Ok(abs_sum / y_true.len() as f64)
    }
}

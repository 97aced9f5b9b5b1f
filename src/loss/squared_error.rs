/// Per-unit squared error with the conventional one-half factor, so that the
/// derivative carries no stray 2.
pub struct SquaredError;

impl SquaredError {
    /// `E = 0.5 * (target - output)²`
    pub fn loss(target: f64, output: f64) -> f64 {
        0.5 * (target - output).powi(2)
    }

    /// `∂E/∂output = output - target`
    pub fn derivative(target: f64, output: f64) -> f64 {
        output - target
    }

    /// Total error: the sum of the per-unit losses over `(target, output)` pairs.
    pub fn total(pairs: &[(f64, f64)]) -> f64 {
        pairs.iter()
            .map(|&(target, output)| SquaredError::loss(target, output))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_is_symmetric_and_halved() {
        assert_eq!(SquaredError::loss(1.0, 0.0), 0.5);
        assert_eq!(SquaredError::loss(0.0, 1.0), 0.5);
        assert_eq!(SquaredError::loss(0.3, 0.3), 0.0);
    }

    #[test]
    fn derivative_points_away_from_target() {
        assert!(SquaredError::derivative(0.01, 0.75) > 0.0);
        assert!(SquaredError::derivative(0.99, 0.77) < 0.0);
    }

    #[test]
    fn total_sums_units() {
        let total = SquaredError::total(&[(1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(total, 1.0);
        assert_eq!(SquaredError::total(&[]), 0.0);
    }
}

/// Running first and second moments of a set of (undiscounted) payoffs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PayoffAccumulator {
    sum: f64,
    sum_squares: f64,
    count: usize,
}

impl PayoffAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, payoff: f64) {
        self.sum += payoff;
        self.sum_squares += payoff * payoff;
        self.count += 1;
    }

    /// Combines two partial accumulations, e.g. from different threads.
    pub fn merge(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
            sum_squares: self.sum_squares + other.sum_squares,
            count: self.count + other.count,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / self.count as f64)
    }

    /// Standard deviation with the biased (population) variance
    /// '''math
    /// sd = sqrt(sum(x^2) / M - (sum(x) / M)^2)
    /// '''
    /// Round-off can push the variance of a degenerate sample slightly below zero,
    /// such samples have a standard deviation of 0.
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let variance = self.sum_squares / self.count as f64 - mean * mean;
        Some(variance.max(0.0).sqrt())
    }

    /// Standard deviation of the estimator of the mean, sd / sqrt(M).
    pub fn std_error(&self) -> Option<f64> {
        self.std_dev()
            .map(|sd| sd / (self.count as f64).sqrt())
    }
}

impl Extend<f64> for PayoffAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, payoffs: I) {
        for payoff in payoffs {
            self.add(payoff);
        }
    }
}

impl FromIterator<f64> for PayoffAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(payoffs: I) -> Self {
        let mut acc = Self::new();
        acc.extend(payoffs);
        acc
    }
}

/// Supremum norm of the pointwise difference, 0 for empty input.
pub fn max_abs_difference<'a>(
    values: impl IntoIterator<Item = &'a f64>,
    reference: impl IntoIterator<Item = &'a f64>,
) -> f64 {
    values
        .into_iter()
        .zip(reference)
        .fold(0.0, |acc, (v, r)| acc.max((v - r).abs()))
}

/// Largest value (bounded below by 0, matching non-negative statistics).
pub fn max_value<'a>(values: impl IntoIterator<Item = &'a f64>) -> f64 {
    values.into_iter().fold(0.0, |acc, v| acc.max(*v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn moments() {
        let acc: PayoffAccumulator = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
        assert_eq!(acc.count(), 4);
        assert_eq!(acc.sum(), 10.0);
        assert_eq!(acc.mean().unwrap(), 2.5);
        // population variance of 1..4 is 1.25
        assert_approx_eq!(acc.std_dev().unwrap(), 1.25_f64.sqrt(), 1e-12);
        assert_approx_eq!(acc.std_error().unwrap(), 1.25_f64.sqrt() / 2.0, 1e-12);
    }

    #[test]
    fn empty() {
        let acc = PayoffAccumulator::new();
        assert!(acc.mean().is_none());
        assert!(acc.std_dev().is_none());
        assert!(acc.std_error().is_none());
    }

    #[test]
    fn degenerate_payoffs() {
        let acc: PayoffAccumulator = std::iter::repeat(0.0).take(1000).collect();
        assert_eq!(acc.std_dev().unwrap(), 0.0);
        assert_eq!(acc.std_error().unwrap(), 0.0);

        let acc: PayoffAccumulator = std::iter::repeat(0.1).take(1000).collect();
        assert_approx_eq!(acc.std_dev().unwrap(), 0.0, 1e-6);
    }

    #[test]
    fn merge_equals_sequential() {
        let payoffs: Vec<f64> = (0..100).map(|i| (i as f64 * 0.37).sin().abs()).collect();
        let all: PayoffAccumulator = payoffs.iter().copied().collect();
        let left: PayoffAccumulator = payoffs[..40].iter().copied().collect();
        let right: PayoffAccumulator = payoffs[40..].iter().copied().collect();
        let merged = left.merge(right);

        assert_eq!(merged.count(), all.count());
        assert_approx_eq!(merged.mean().unwrap(), all.mean().unwrap(), 1e-12);
        assert_approx_eq!(merged.std_dev().unwrap(), all.std_dev().unwrap(), 1e-12);
    }

    #[test]
    fn sup_norm() {
        let values = [1.0, 2.0, 3.5];
        let reference = [1.1, 1.0, 3.0];
        assert_approx_eq!(max_abs_difference(&values, &reference), 1.0, 1e-12);
        assert_eq!(max_abs_difference(&[], &[]), 0.0);
        assert_eq!(max_value(&[0.3, 2.0, 1.0]), 2.0);
        assert_eq!(max_value(&[]), 0.0);
    }
}

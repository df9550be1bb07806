use ndarray::{Array2, ArrayView1, Axis};
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_distr::StandardNormal;
use rand_hc::Hc128Rng;

/// Increments `dW ~ N(0, dt)` of Wiener processes, one row per simulation and
/// one column per time step (`nr_steps + 1` columns).
#[derive(Clone, Debug)]
pub struct WienerIncrements {
    increments: Array2<f64>,
    dt: f64,
}

impl WienerIncrements {
    pub fn nr_paths(&self) -> usize {
        self.increments.nrows()
    }

    pub fn nr_steps(&self) -> usize {
        self.increments.ncols() - 1
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn row(&self, path_idx: usize) -> ArrayView1<'_, f64> {
        self.increments.row(path_idx)
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.increments.axis_iter(Axis(0))
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.increments
    }
}

/// Source of the Wiener increments; a single engine, seeded once and advanced
/// with every matrix it draws.
pub struct RandomPathGenerator {
    rn_generator: Hc128Rng,
}

impl RandomPathGenerator {
    /// Seeded from the operating system, independent across runs of the process.
    pub fn new() -> Self {
        Self {
            rn_generator: Hc128Rng::from_entropy(),
        }
    }

    /// Reproducible sequence of matrices.
    pub fn with_seed(seed_nr: u64) -> Self {
        Self {
            rn_generator: Hc128Rng::seed_from_u64(seed_nr),
        }
    }

    /// `nr_paths + 1` independent sequences of `nr_steps + 1` increments with
    /// standard deviation `sqrt(dt)`.
    pub fn generate(&mut self, nr_steps: usize, nr_paths: usize, dt: f64) -> WienerIncrements {
        assert!(nr_steps > 0 && nr_paths > 0, "empty increment matrix");
        assert!(dt > 0.0, "time step {dt} must be positive");

        let sqrt_dt = dt.sqrt();
        let increments = Array2::random_using(
            (nr_paths + 1, nr_steps + 1),
            StandardNormal,
            &mut self.rn_generator,
        )
        .mapv_into(|z: f64| z * sqrt_dt);

        WienerIncrements { increments, dt }
    }
}

impl Default for RandomPathGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn shape() {
        let mut generator = RandomPathGenerator::with_seed(13241113);
        let dw = generator.generate(100, 50, 0.01);

        assert_eq!(dw.as_array().dim(), (51, 101));
        assert_eq!(dw.nr_paths(), 51);
        assert_eq!(dw.nr_steps(), 100);
        assert_eq!(dw.row(3).len(), 101);
        assert_eq!(dw.rows().count(), 51);
        assert_eq!(dw.dt(), 0.01);
    }

    #[test]
    fn moments() {
        let dt = 0.04;
        let mut generator = RandomPathGenerator::with_seed(41);
        let dw = generator.generate(99, 2_000, dt);

        let n = dw.as_array().len() as f64;
        let mean = dw.as_array().sum() / n;
        let variance = dw.as_array().fold(0.0, |acc, z| acc + (z - mean).powi(2)) / n;

        // 200_100 draws: the standard error of the mean is ~ 4.5e-4
        assert_approx_eq!(mean, 0.0, 3e-3);
        assert_approx_eq!(variance, dt, 1e-3);
    }

    #[test]
    fn reproducible_with_seed() {
        let a = RandomPathGenerator::with_seed(42).generate(10, 10, 0.1);
        let b = RandomPathGenerator::with_seed(42).generate(10, 10, 0.1);
        assert_eq!(a.as_array(), b.as_array());
    }

    #[test]
    fn engine_advances() {
        let mut generator = RandomPathGenerator::with_seed(42);
        let first = generator.generate(10, 10, 0.1);
        let second = generator.generate(10, 10, 0.1);
        assert_ne!(first.as_array(), second.as_array());
    }

    #[test]
    fn entropy_seeded_generators_differ() {
        let a = RandomPathGenerator::new().generate(10, 10, 0.1);
        let b = RandomPathGenerator::new().generate(10, 10, 0.1);
        assert_ne!(a.as_array(), b.as_array());
    }

    #[test]
    #[should_panic]
    fn no_time_steps() {
        RandomPathGenerator::with_seed(1).generate(0, 10, 0.1);
    }
}

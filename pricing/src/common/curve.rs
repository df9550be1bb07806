use crate::error::{PricingError, Result};

/// Relative tolerance when comparing stock price keys of two curves.
const KEY_TOLERANCE: f64 = 1e-9;

fn same_key(a: f64, b: f64) -> bool {
    (a - b).abs() <= KEY_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// The stock prices `s_min, s_min + ds, s_min + 2 ds, ...` strictly below `s_max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceGrid {
    s_min: f64,
    s_max: f64,
    ds: f64,
}

impl PriceGrid {
    pub fn new(s_min: f64, s_max: f64, ds: f64) -> Result<Self> {
        if !(ds > 0.0 && ds.is_finite()) {
            return Err(PricingError::invalid("ds", format!("step {ds} must be positive")));
        }
        if !(s_min > 0.0 && s_min.is_finite()) {
            return Err(PricingError::invalid("s_min", format!("{s_min} must be positive")));
        }
        if !(s_max > s_min && s_max.is_finite()) {
            return Err(PricingError::invalid(
                "s_max",
                format!("{s_max} must be larger than s_min = {s_min}"),
            ));
        }
        Ok(Self { s_min, s_max, ds })
    }

    /// For bounds known to be valid at compile time.
    pub(crate) const fn new_unchecked(s_min: f64, s_max: f64, ds: f64) -> Self {
        Self { s_min, s_max, ds }
    }

    pub fn s_min(&self) -> f64 {
        self.s_min
    }

    pub fn s_max(&self) -> f64 {
        self.s_max
    }

    pub fn ds(&self) -> f64 {
        self.ds
    }

    /// Keys are computed as `s_min + i * ds` so that every curve over the grid
    /// carries bit-identical keys.
    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        (0_usize..)
            .map(move |i| self.s_min + i as f64 * self.ds)
            .take_while(move |s| *s < self.s_max)
    }

    pub fn len(&self) -> usize {
        self.keys().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Statistic as a function of the initial stock price, keys strictly increasing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve {
    points: Vec<(f64, f64)>,
}

impl Curve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<(f64, f64)>) -> Result<Self> {
        if let Some(w) = points.windows(2).find(|w| !(w[0].0 < w[1].0)) {
            return Err(PricingError::invalid(
                "points",
                format!("keys must be strictly increasing, {} is followed by {}", w[0].0, w[1].0),
            ));
        }
        Ok(Self { points })
    }

    /// Pairs the grid's keys with `values` in order.
    pub fn from_grid(grid: &PriceGrid, values: impl IntoIterator<Item = f64>) -> Self {
        let points: Vec<(f64, f64)> = grid.keys().zip(values).collect();
        assert_eq!(points.len(), grid.len(), "one value per grid key");
        Self { points }
    }

    pub fn from_fn(grid: &PriceGrid, f: impl Fn(f64) -> f64) -> Self {
        Self {
            points: grid.keys().map(|s| (s, f(s))).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.points.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(s, _)| *s)
    }

    pub fn values(&self) -> impl Iterator<Item = &f64> {
        self.points.iter().map(|(_, v)| v)
    }

    /// Value at the stock price `key` (matched up to rounding).
    pub fn get(&self, key: f64) -> Option<f64> {
        let idx = self.points.partition_point(|(s, _)| *s < key && !same_key(*s, key));
        self.points
            .get(idx)
            .filter(|(s, _)| same_key(*s, key))
            .map(|(_, v)| *v)
    }

    pub fn first_key(&self) -> Option<f64> {
        self.points.first().map(|(s, _)| *s)
    }

    pub fn last_key(&self) -> Option<f64> {
        self.points.last().map(|(s, _)| *s)
    }

    /// The step `(max - min) / (count - 1)`, checked against every gap between
    /// consecutive keys.
    pub fn uniform_step(&self) -> Result<f64> {
        if self.points.len() < 2 {
            return Err(PricingError::InsufficientPoints(self.points.len()));
        }
        let (min, max) = (self.points[0].0, self.points[self.points.len() - 1].0);
        let step = (max - min) / (self.points.len() - 1) as f64;

        for w in self.points.windows(2) {
            let gap = w[1].0 - w[0].0;
            if (gap - step).abs() > KEY_TOLERANCE * step.max(max.abs()) {
                return Err(PricingError::NonUniformSpacing {
                    key: w[0].0,
                    gap,
                    step,
                });
            }
        }
        Ok(step)
    }

    pub fn same_domain(&self, other: &Curve) -> bool {
        self.len() == other.len() && self.keys().zip(other.keys()).all(|(a, b)| same_key(a, b))
    }

    /// Largest value of the curve, 0 for an empty curve.
    pub fn max_value(&self) -> f64 {
        risk::max_value(self.values())
    }

    /// Sup-norm distance to a curve over the same keys.
    pub fn max_abs_difference(&self, reference: &Curve) -> Result<f64> {
        if !self.same_domain(reference) {
            return Err(PricingError::DomainMismatch);
        }
        Ok(risk::max_abs_difference(self.values(), reference.values()))
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = &'a (f64, f64);
    type IntoIter = std::slice::Iter<'a, (f64, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

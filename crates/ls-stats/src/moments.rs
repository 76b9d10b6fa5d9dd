//! Running first and second moments.

/// Variances below this are checked against the mean before clamping.
const VARIANCE_TOLERANCE: f64 = -1e-2;
/// `sqrt(-variance) / mean` above this makes a negative variance fatal.
const RELATIVE_TOLERANCE: f64 = 1e-6;

/// `(Σx, Σx²)` over every run that contributed to one link.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Moments {
    pub sum:    f64,
    pub sum_sq: f64,
}

/// Outcome of [`Moments::mean_sd`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum MeanSd {
    /// Consistent moments.  `clamped` is set when a small negative variance
    /// was rounded up to zero.
    Valid { mean: f64, sd: f64, clamped: bool },
    /// The second moment is too small for the first: variance is below
    /// `-0.01` and not negligible against the mean.
    Inconsistent { mean: f64, variance: f64 },
}

impl Moments {
    /// Fold one run's total into the moments.
    #[inline]
    pub fn add(&mut self, x: f64) {
        self.sum += x;
        self.sum_sq += x * x;
    }

    /// Mean and population standard deviation over `n_runs` runs.
    ///
    /// `variance = Σx²/n − mean²`.  Rounding can push a true zero slightly
    /// negative; that is clamped to zero.  A variance below `-0.01` whose
    /// `sqrt(-variance) / mean` exceeds `1e-6` cannot come from real data and
    /// is reported as [`MeanSd::Inconsistent`].
    pub fn mean_sd(&self, n_runs: usize) -> MeanSd {
        let n = n_runs as f64;
        let mean = self.sum / n;
        let variance = self.sum_sq / n - mean * mean;
        if variance < VARIANCE_TOLERANCE && (-variance).sqrt() / mean > RELATIVE_TOLERANCE {
            return MeanSd::Inconsistent { mean, variance };
        }
        if variance > 0.0 {
            MeanSd::Valid { mean, sd: variance.sqrt(), clamped: false }
        } else {
            MeanSd::Valid { mean, sd: 0.0, clamped: variance < 0.0 }
        }
    }
}

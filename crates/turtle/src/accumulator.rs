//! Per-bin weighted accumulation state

/// Weighted counts and variances for a fixed number of bins
///
/// `counts[bin]` is the sum of weights routed to that bin since the
/// last [`clear`](Self::clear); `variances[bin]` is the sum of squared
/// weights, the usual variance proxy for weighted event counts.
/// Memory is O(number of bins), independent of how many deposits are
/// made.
#[derive(Debug, Clone, PartialEq)]
pub struct BinAccumulator {
    counts: Vec<f64>,
    variances: Vec<f64>,
}

impl BinAccumulator {
    /// Create zeroed state for `num_bins` bins
    pub fn new(num_bins: usize) -> Self {
        Self {
            counts: vec![0.0; num_bins],
            variances: vec![0.0; num_bins],
        }
    }

    /// Reset all counts and variances to zero
    ///
    /// Idempotent; touches nothing else.
    pub fn clear(&mut self) {
        self.counts.fill(0.0);
        self.variances.fill(0.0);
    }

    /// Add `weight` to a bin's count and `weight²` to its variance
    ///
    /// A bin id outside the valid range is silently dropped. That is
    /// the documented leniency for query points routed outside the
    /// training domain, not an error path.
    pub fn deposit(&mut self, bin: usize, weight: f64) {
        if bin >= self.counts.len() {
            return;
        }
        self.counts[bin] += weight;
        self.variances[bin] += weight * weight;
    }

    /// Per-bin weighted counts
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Per-bin sums of squared weights
    pub fn variances(&self) -> &[f64] {
        &self.variances
    }

    /// Number of bins tracked
    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }
}

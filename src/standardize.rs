//! Per-row allele frequency estimation and standardization
//!
//! Each row is centered on `2 * freq` and scaled by the binomial standard deviation
//! `sqrt(2 * freq * (1 - freq))`. Missing entries are imputed with the row mean,
//! which is exactly 0.0 on the standardized scale.

use crate::{genotype::MISSING_DOSAGE, policy::Degeneracy, Result};

/// Accumulators collected while decoding one row over the requested samples
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowStats {
    /// Number of requested samples in the row
    pub n_requested: usize,
    /// Sum of the non-missing dosages
    pub count: f32,
    /// Number of missing genotypes
    pub n_miss: usize,
}
impl RowStats {
    #[must_use]
    pub fn new(n_requested: usize) -> Self {
        Self {
            n_requested,
            ..Default::default()
        }
    }

    /// Adds one decoded dosage (`None` for missing)
    #[inline]
    pub fn push(&mut self, dosage: Option<f32>) {
        match dosage {
            Some(d) => self.count += d,
            None => self.n_miss += 1,
        }
    }

    /// Number of requested samples with an observed genotype
    #[must_use]
    pub fn n_present(&self) -> usize {
        self.n_requested - self.n_miss
    }

    /// Frequency of the counted allele among observed samples
    ///
    /// NaN when every requested sample is missing.
    #[must_use]
    pub fn freq(&self) -> f32 {
        self.count / (2.0 * self.n_present() as f32)
    }

    /// Binomial standard deviation of the dosage, `sqrt(2 * freq * (1 - freq))`
    #[must_use]
    pub fn sd(&self) -> f32 {
        let freq = self.freq();
        (2.0 * freq * (1.0 - freq)).sqrt()
    }
}

/// Standardizes a decoded row in place
///
/// Missing entries (`MISSING_DOSAGE`) become 0.0 and observed entries become
/// `(dosage - 2 * freq) / sd`. Rows with observed genotypes but zero standard
/// deviation are handed to `policy` first.
///
/// # Arguments
/// * `row` - Dosages of one variant over the requested samples
/// * `stats` - Accumulators collected while decoding `row`
/// * `index` - Position of the row in the output matrix
/// * `policy` - Handling of zero-variance rows
#[allow(clippy::float_cmp)]
pub fn standardize_row(
    row: &mut [f32],
    stats: RowStats,
    index: usize,
    policy: Degeneracy,
) -> Result<()> {
    let freq = stats.freq();
    let sd = stats.sd();

    if stats.n_present() > 0 && sd == 0.0 && !policy.handle(row, index, freq)? {
        return Ok(());
    }

    let mean = 2.0 * freq;
    for value in row.iter_mut() {
        if *value == MISSING_DOSAGE {
            *value = 0.0;
        } else {
            *value = (*value - mean) / sd;
        }
    }
    Ok(())
}

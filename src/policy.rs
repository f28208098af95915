use log::debug;

use crate::{error::DecodeError, Result};

/// Policy for rows whose standard deviation is zero
///
/// A row is degenerate when every observed genotype carries the same allele
/// (frequency 0 or 1). Standardizing it divides by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Degeneracy {
    /// Standardize anyway: observed entries become NaN or infinite
    #[default]
    Propagate,
    /// Write 0.0 to every entry of the row
    Zero,
    /// Fail the decode with [`DecodeError::ZeroVariance`]
    Error,
}
impl Degeneracy {
    /// Apply the policy to a degenerate row
    ///
    /// Returns a boolean indicating whether the row should still be standardized.
    /// Returns an error if the policy rejects degenerate rows.
    ///
    /// # Arguments
    /// * `row` - The decoded dosages of the row
    /// * `index` - The position of the row in the output matrix
    /// * `freq` - The allele frequency estimated for the row
    pub fn handle(&self, row: &mut [f32], index: usize, freq: f32) -> Result<bool> {
        debug!("Row {index} has zero variance (freq = {freq}), policy {self:?}");
        match self {
            Self::Propagate => Ok(true),
            Self::Zero => {
                row.fill(0.0);
                Ok(false)
            }
            Self::Error => Err(DecodeError::ZeroVariance { row: index, freq }.into()),
        }
    }
}
impl std::str::FromStr for Degeneracy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "zero" => Ok(Self::Zero),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown degeneracy policy '{other}' (expected propagate, zero or error)"
            )),
        }
    }
}

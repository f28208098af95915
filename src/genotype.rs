//! 2-bit genotype codes and their dosage values

use crate::layout::CODES_PER_BYTE;

/// Dosage sentinel written for missing genotypes before standardization
pub const MISSING_DOSAGE: f32 = -1.0;

/// One of the four 2-bit genotype codes of the packed encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenotypeCode {
    /// `00`: two copies of the first allele
    HomFirst,
    /// `01`: no call
    Missing,
    /// `10`: one copy of each allele
    Het,
    /// `11`: two copies of the second allele
    HomSecond,
}
impl GenotypeCode {
    /// Maps the two lowest bits of `bits` to a code
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::HomFirst,
            0b01 => Self::Missing,
            0b10 => Self::Het,
            _ => Self::HomSecond,
        }
    }

    /// Returns the dosage of the first allele, or `None` for a missing genotype
    #[must_use]
    pub fn dosage(self) -> Option<f32> {
        match self {
            Self::HomFirst => Some(2.0),
            Self::Het => Some(1.0),
            Self::HomSecond => Some(0.0),
            Self::Missing => None,
        }
    }

    #[must_use]
    pub fn is_missing(self) -> bool {
        self == Self::Missing
    }
}

/// Extracts the genotype code of `sample` from a packed record
///
/// Sample `s` lives in byte `s / 4` at bit offset `(s % 4) * 2`, so the lowest bit
/// pair of each byte belongs to the lowest-numbered sample.
///
/// # Panics
///
/// Panics if `sample / 4` is out of bounds for `record`
#[inline]
#[must_use]
pub fn code_at(record: &[u8], sample: usize) -> GenotypeCode {
    let byte = record[sample / CODES_PER_BYTE];
    let shift = (sample % CODES_PER_BYTE) * 2;
    GenotypeCode::from_bits(byte >> shift)
}

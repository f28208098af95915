//! Record geometry of a SNP-major packed genotype file
//!
//! Records are fixed-size and laid out contiguously after the header, one per variant,
//! each covering all samples of the file at four samples per byte.

use crate::{
    error::{ReadError, Result},
    header::SIZE_HEADER,
};

/// Number of 2-bit genotype codes packed in a single byte
pub const CODES_PER_BYTE: usize = 4;

/// Largest absolute position a record may end at
const MAX_POSITION: u64 = i64::MAX as u64;

/// Sizing information for variant records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    /// Total number of samples in the file (not just the requested ones)
    n_samples: usize,

    /// Number of bytes required to represent one variant (ceil(n_samples / 4))
    bytes_per_variant: usize,
}
impl RecordLayout {
    #[must_use]
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            bytes_per_variant: n_samples.div_ceil(CODES_PER_BYTE),
        }
    }

    /// Total number of samples covered by each record
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Size of a single variant record in bytes
    #[must_use]
    pub fn bytes_per_variant(&self) -> usize {
        self.bytes_per_variant
    }

    /// Absolute byte offset of the record for `variant`
    ///
    /// Returns `None` if the record would end past the largest position a stream can
    /// seek to (`i64::MAX`).
    #[must_use]
    pub fn record_offset(&self, variant: usize) -> Option<u64> {
        let bpv = self.bytes_per_variant as u64;
        let start = (variant as u64)
            .checked_mul(bpv)?
            .checked_add(SIZE_HEADER as u64)?;
        let end = start.checked_add(bpv)?;
        (end <= MAX_POSITION).then_some(start)
    }

    /// Number of bytes to skip forward from the current cursor to reach `variant`
    ///
    /// With no previous record the cursor is expected to sit right after the header.
    /// Otherwise it sits right after the record of `previous`, which is why one record
    /// is subtracted from the gap.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnorderedVariant`] if `variant` is not strictly greater than
    /// `previous`, since the residual would be negative, and
    /// [`ReadError::OffsetOverflow`] if the record of `variant` cannot be addressed.
    pub fn relative_advance(&self, previous: Option<usize>, variant: usize) -> Result<u64> {
        let skipped = match previous {
            None => Some(variant),
            Some(previous) => variant
                .checked_sub(previous)
                .and_then(|gap| gap.checked_sub(1)),
        };
        let Some(skipped) = skipped else {
            return Err(ReadError::UnorderedVariant {
                previous: previous.unwrap_or_default(),
                requested: variant,
            }
            .into());
        };
        // bounded by the absolute offset of `variant`
        if self.record_offset(variant).is_none() {
            return Err(ReadError::OffsetOverflow(variant).into());
        }
        Ok(skipped as u64 * self.bytes_per_variant as u64)
    }

    /// Number of complete records contained in a file of `file_size` bytes
    #[must_use]
    pub fn num_variants(&self, file_size: usize) -> usize {
        if self.bytes_per_variant == 0 {
            return 0;
        }
        file_size.saturating_sub(SIZE_HEADER) / self.bytes_per_variant
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;

    #[test]
    fn test_bytes_per_variant() {
        assert_eq!(RecordLayout::new(0).bytes_per_variant(), 0);
        assert_eq!(RecordLayout::new(1).bytes_per_variant(), 1);
        assert_eq!(RecordLayout::new(4).bytes_per_variant(), 1);
        assert_eq!(RecordLayout::new(5).bytes_per_variant(), 2);
        assert_eq!(RecordLayout::new(40).bytes_per_variant(), 10);
    }

    #[test]
    fn test_incremental_matches_absolute() -> Result<()> {
        // 40 samples -> 10 bytes per variant
        let layout = RecordLayout::new(40);
        let variants = [2, 5, 9];

        let mut cursor = SIZE_HEADER as u64;
        let mut previous = None;
        let mut starts = Vec::new();
        for &v in &variants {
            cursor += layout.relative_advance(previous, v)?;
            starts.push(cursor);
            assert_eq!(Some(cursor), layout.record_offset(v));
            cursor += layout.bytes_per_variant() as u64;
            previous = Some(v);
        }
        assert_eq!(starts, vec![23, 53, 93]);
        Ok(())
    }

    #[test]
    fn test_adjacent_variants_do_not_skip() -> Result<()> {
        let layout = RecordLayout::new(8);
        assert_eq!(layout.relative_advance(Some(3), 4)?, 0);
        assert_eq!(layout.relative_advance(None, 0)?, 0);
        Ok(())
    }

    #[test]
    fn test_negative_residual_rejected() {
        let layout = RecordLayout::new(8);
        for (previous, requested) in [(4, 4), (5, 2)] {
            assert!(matches!(
                layout.relative_advance(Some(previous), requested),
                Err(Error::ReadError(ReadError::UnorderedVariant { previous: p, requested: r }))
                    if p == previous && r == requested
            ));
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_huge_index_does_not_wrap() {
        // 8 samples -> 2 bytes per variant
        let layout = RecordLayout::new(8);
        for variant in [usize::MAX / 4, usize::MAX, 1 << (usize::BITS - 1)] {
            assert_eq!(layout.record_offset(variant), None);
            assert!(matches!(
                layout.relative_advance(None, variant),
                Err(Error::ReadError(ReadError::OffsetOverflow(v))) if v == variant
            ));
            assert!(matches!(
                layout.relative_advance(Some(0), variant),
                Err(Error::ReadError(ReadError::OffsetOverflow(v))) if v == variant
            ));
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_last_addressable_record() {
        // 4 samples -> 1 byte per variant: the record of variant i64::MAX - 4 ends at i64::MAX
        let layout = RecordLayout::new(4);
        let last = (MAX_POSITION - SIZE_HEADER as u64 - 1) as usize;
        assert_eq!(layout.record_offset(last), Some(MAX_POSITION - 1));
        assert_eq!(layout.record_offset(last + 1), None);
    }

    #[test]
    fn test_num_variants() {
        let layout = RecordLayout::new(10);
        let file_size = SIZE_HEADER + 7 * layout.bytes_per_variant();
        assert_eq!(layout.num_variants(file_size), 7);
        // trailing partial record is not counted
        assert_eq!(layout.num_variants(file_size + 2), 7);
        assert_eq!(layout.num_variants(2), 0);
    }
}

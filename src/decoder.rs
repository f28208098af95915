//! Decoding of variant and sample subsets into a dense matrix
//!
//! A [`Decoder`] holds the configuration of a decode (total sample count, seek step
//! limit, zero-variance policy) and drives any [`VariantRead`] implementation over
//! a Variant Request Set, writing one row of the caller's output buffer per variant.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;

use crate::{
    error::{BuilderError, DecodeError, Result},
    layout::RecordLayout,
    policy::Degeneracy,
    reader::{BedReader, MmapReader, VariantRead},
    seek::MAX_SEEK_STEP,
    standardize::standardize_row,
};

/// Builder for [`Decoder`] instances
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderBuilder {
    /// Required total number of samples in the file
    n_samples: Option<usize>,
    /// Optional cap on a single relative seek
    max_seek_step: Option<u64>,
    /// Optional policy for zero-variance rows
    degeneracy: Option<Degeneracy>,
}

impl DecoderBuilder {
    /// Sets the total number of samples in the file (not just the requested ones)
    #[must_use]
    pub fn n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = Some(n_samples);
        self
    }

    /// Sets the largest relative seek issued in one call
    #[must_use]
    pub fn max_seek_step(mut self, max_seek_step: u64) -> Self {
        self.max_seek_step = Some(max_seek_step);
        self
    }

    /// Sets the policy for rows with zero standard deviation
    #[must_use]
    pub fn degeneracy(mut self, degeneracy: Degeneracy) -> Self {
        self.degeneracy = Some(degeneracy);
        self
    }

    /// Builds a `Decoder` with the configured settings
    ///
    /// # Errors
    ///
    /// Returns an error if the sample count is missing or the seek step is zero
    pub fn build(self) -> Result<Decoder> {
        let Some(n_samples) = self.n_samples else {
            return Err(BuilderError::MissingSampleCount.into());
        };
        let max_seek_step = self.max_seek_step.unwrap_or(MAX_SEEK_STEP);
        if max_seek_step == 0 {
            return Err(BuilderError::InvalidSeekStep(max_seek_step).into());
        }
        Ok(Decoder {
            n_samples,
            max_seek_step,
            degeneracy: self.degeneracy.unwrap_or_default(),
        })
    }
}

/// Decodes subsets of a packed genotype file into row-major `f32` matrices
///
/// # Examples
///
/// ```no_run
/// use bedmat::{DecoderBuilder, Result};
///
/// fn main() -> Result<()> {
///     let decoder = DecoderBuilder::default().n_samples(1000).build()?;
///
///     let variants = [2, 5, 9];
///     let samples = [0, 10, 20, 30];
///     let mut matrix = vec![0.0f32; variants.len() * samples.len()];
///
///     decoder.read_path("./data/example.bed", &variants, &samples, &mut matrix)?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    n_samples: usize,
    max_seek_step: u64,
    degeneracy: Degeneracy,
}

impl Decoder {
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    #[must_use]
    pub fn degeneracy(&self) -> Degeneracy {
        self.degeneracy
    }

    /// Record geometry implied by the configured sample count
    #[must_use]
    pub fn layout(&self) -> RecordLayout {
        RecordLayout::new(self.n_samples)
    }

    /// Opens a sequential reader session on `path`
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<BedReader<BufReader<File>>> {
        BedReader::from_path(path, self.n_samples)?.with_max_seek_step(self.max_seek_step)
    }

    /// Opens a memory-mapped reader on `path`
    pub fn open_mmap<P: AsRef<Path>>(&self, path: P) -> Result<MmapReader> {
        MmapReader::new(path, self.n_samples)
    }

    /// Opens `path`, decodes the requested subset and standardizes every row
    ///
    /// The file is closed on return, whether or not the decode succeeded.
    ///
    /// # Arguments
    /// * `path` - Path to the packed genotype file
    /// * `variants` - Strictly ascending variant indices, one output row each
    /// * `samples` - Sample indices, one output column each
    /// * `out` - Row-major buffer of `variants.len() * samples.len()` values
    pub fn read_path<P: AsRef<Path>>(
        &self,
        path: P,
        variants: &[usize],
        samples: &[usize],
        out: &mut [f32],
    ) -> Result<()> {
        let mut reader = self.open(path)?;
        self.decode_into(&mut reader, variants, samples, out)
    }

    /// Decodes the requested subset from `reader` and standardizes every row
    ///
    /// Missing genotypes are imputed as 0.0 and observed genotypes become
    /// `(dosage - 2 * freq) / sd`, with `freq` and `sd` estimated from the
    /// requested samples only.
    ///
    /// On error the contents of `out` are unspecified.
    pub fn decode_into<V: VariantRead>(
        &self,
        reader: &mut V,
        variants: &[usize],
        samples: &[usize],
        out: &mut [f32],
    ) -> Result<()> {
        self.decode(reader, variants, samples, out, true)
    }

    /// Decodes the requested subset from `reader` without standardizing
    ///
    /// Rows hold raw dosages, with missing genotypes written as
    /// [`MISSING_DOSAGE`](crate::MISSING_DOSAGE).
    pub fn decode_dosages_into<V: VariantRead>(
        &self,
        reader: &mut V,
        variants: &[usize],
        samples: &[usize],
        out: &mut [f32],
    ) -> Result<()> {
        self.decode(reader, variants, samples, out, false)
    }

    fn decode<V: VariantRead>(
        &self,
        reader: &mut V,
        variants: &[usize],
        samples: &[usize],
        out: &mut [f32],
        standardize: bool,
    ) -> Result<()> {
        let n_rows = variants.len();
        let n_cols = samples.len();
        let layout = reader.layout();
        if layout.n_samples() != self.n_samples {
            return Err(DecodeError::SampleCountMismatch {
                decoder: self.n_samples,
                reader: layout.n_samples(),
            }
            .into());
        }
        check_request(layout, n_rows, samples, out.len())?;
        debug!("Decoding {n_rows} variants x {n_cols} samples (standardize = {standardize})");

        for (row_idx, &variant) in variants.iter().enumerate() {
            let row = &mut out[row_idx * n_cols..(row_idx + 1) * n_cols];
            let record = reader.read_variant(variant)?;
            let stats = record.dosages_into(samples, row);
            if standardize {
                standardize_row(row, stats, row_idx, self.degeneracy)?;
            }
        }
        Ok(())
    }
}

/// Validates the shape of a request before any record is read
fn check_request(
    layout: RecordLayout,
    n_rows: usize,
    samples: &[usize],
    out_len: usize,
) -> Result<()> {
    let expected = n_rows * samples.len();
    if out_len != expected {
        return Err(DecodeError::OutputShape {
            rows: n_rows,
            cols: samples.len(),
            expected,
            got: out_len,
        }
        .into());
    }
    if let Some(&sample) = samples.iter().find(|&&s| s >= layout.n_samples()) {
        return Err(DecodeError::SampleOutOfRange(sample, layout.n_samples()).into());
    }
    Ok(())
}

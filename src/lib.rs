//! # bedmat
//!
//! Decoding of PLINK's SNP-major packed genotype files (`.bed`) into dense,
//! standardized `f32` matrices.
//!
//! A file is a 3-byte header (`0x6C 0x1B 0x01`) followed by one fixed-size record per
//! variant. Each record packs the 2-bit genotype codes of every sample, four samples
//! per byte. The [`Decoder`] extracts a subset of variants (rows) and samples
//! (columns), converts codes to dosages, imputes missing genotypes and standardizes
//! each row using the allele frequency of the requested samples.
//!
//! ## Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use bedmat::{BedReader, DecoderBuilder};
//!
//! // 4 samples, 2 variants: one byte per variant
//! let image = vec![0x6C, 0x1B, 0x01, 0b11_10_00_00, 0b01_10_11_00];
//!
//! let decoder = DecoderBuilder::default().n_samples(4).build().unwrap();
//! let mut reader = BedReader::new(Cursor::new(image), 4).unwrap();
//!
//! let mut matrix = vec![0.0f32; 2 * 3];
//! decoder
//!     .decode_into(&mut reader, &[0, 1], &[0, 2, 3], &mut matrix)
//!     .unwrap();
//!
//! // the missing genotype of sample 3 in variant 1 is imputed
//! assert_eq!(matrix[5], 0.0);
//! ```

mod decoder;
mod error;
mod genotype;
mod header;
mod layout;
mod policy;
mod reader;
mod record;
mod seek;
mod standardize;

#[cfg(test)]
mod testing;

pub use decoder::{Decoder, DecoderBuilder};
pub use error::{BuilderError, DecodeError, Error, HeaderError, ReadError, Result};
pub use genotype::{code_at, GenotypeCode, MISSING_DOSAGE};
pub use header::{BedHeader, MAGIC, SIZE_HEADER, SNP_MAJOR};
pub use layout::{RecordLayout, CODES_PER_BYTE};
pub use policy::Degeneracy;
pub use reader::{BedReader, MmapReader, VariantRead};
pub use record::RefRecord;
pub use seek::{seek_forward, RelativeSeek, SeekSteps, MAX_SEEK_STEP};
pub use standardize::{standardize_row, RowStats};

/// Custom Result type for bedmat operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the bedmat library, encompassing all possible error cases
/// that can occur while decoding a packed genotype file.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Errors related to validating the file header
    HeaderError(#[from] HeaderError),
    /// Errors that occur while positioning on or reading variant records
    ReadError(#[from] ReadError),
    /// Errors caused by the arguments of a decode call or by degenerate rows
    DecodeError(#[from] DecodeError),
    /// Errors that occur while configuring a decoder
    BuilderError(#[from] BuilderError),
    /// Standard I/O errors from the Rust standard library
    IoError(#[from] std::io::Error),
}
impl Error {
    /// Returns true if the file is not a SNP-major packed genotype file
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Self::HeaderError(_))
    }

    /// Returns true if the error invalidated the position of the underlying reader
    ///
    /// This covers open/seek failures and records that could not be read in full.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::IoError(_) | Self::ReadError(_))
    }
}

/// Errors specific to validating the 3-byte file header
#[derive(thiserror::Error, Debug)]
pub enum HeaderError {
    /// The first two bytes do not match the packed genotype magic number
    ///
    /// # Arguments
    /// * `[u8; 2]` - The bytes that were found
    #[error("Invalid magic number: {0:02x?}")]
    InvalidMagicNumber([u8; 2]),

    /// The mode byte is not SNP-major (`0x01`)
    ///
    /// # Arguments
    /// * `u8` - The mode byte that was found
    #[error("Unsupported mode byte: {0:#04x} (only SNP-major files are supported)")]
    InvalidMode(u8),

    /// The input ended before a full header could be read
    ///
    /// # Arguments
    /// * First `usize` - The number of bytes available
    /// * Second `usize` - The number of bytes required
    #[error("Invalid number of bytes provided: {0}. Expected: {1}")]
    InvalidSize(usize, usize),
}

/// Errors that can occur while reading variant records
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The file being read is not a regular file
    #[error("File is not regular")]
    IncompatibleFile,

    /// The record for a variant ended before `expected` bytes could be read
    #[error("Record for variant {variant} is truncated: read {found} of {expected} bytes")]
    TruncatedRecord {
        variant: usize,
        expected: usize,
        found: usize,
    },

    /// A variant was requested at or before the previously read variant
    ///
    /// Sequential readers only move forward through the file.
    #[error("Variant {requested} requested after variant {previous}; indices must be strictly ascending")]
    UnorderedVariant { previous: usize, requested: usize },

    /// Attempted to access a variant index beyond the available range
    ///
    /// # Arguments
    /// * First `usize` - The requested variant index
    /// * Second `usize` - The number of variants in the file
    #[error("Requested variant index ({0}) is out of variant range ({1})")]
    OutOfRange(usize, usize),

    /// The byte offset of a variant's record does not fit in a stream position
    ///
    /// # Arguments
    /// * `usize` - The requested variant index
    #[error("Requested variant index ({0}) lies beyond any addressable file offset")]
    OffsetOverflow(usize),
}

/// Errors raised by a decode call before or during standardization
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The output buffer does not have `variants * samples` elements
    #[error("Output buffer holds {got} values but {rows} x {cols} = {expected} are required")]
    OutputShape {
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },

    /// A requested sample index is not below the total sample count
    ///
    /// # Arguments
    /// * First `usize` - The requested sample index
    /// * Second `usize` - The number of samples in the file
    #[error("Requested sample index ({0}) is out of sample range ({1})")]
    SampleOutOfRange(usize, usize),

    /// The reader was opened with a different total sample count than the decoder
    #[error("Decoder expects {decoder} samples but the reader was opened with {reader}")]
    SampleCountMismatch { decoder: usize, reader: usize },

    /// A row with observed genotypes has zero standard deviation
    #[error("Row {row} has zero variance (allele frequency {freq}) and cannot be standardized")]
    ZeroVariance { row: usize, freq: f32 },
}

/// Errors that can occur while building a decoder
#[derive(thiserror::Error, Debug)]
pub enum BuilderError {
    /// The total number of samples was never provided
    #[error("Missing sample count in decoder builder")]
    MissingSampleCount,

    /// The maximum seek step must be positive
    #[error("Invalid maximum seek step: {0}")]
    InvalidSeekStep(u64),
}

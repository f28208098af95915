//! Header module for packed genotype files
//!
//! Every SNP-major packed genotype file starts with a fixed 3-byte header: a two byte
//! magic number identifying the encoding followed by a mode byte. Only the SNP-major
//! mode (`0x01`) is supported, where each record holds one variant for all samples.

use std::io::Read;

use crate::{error::Result, HeaderError};

/// Magic number of the packed genotype encoding
pub const MAGIC: [u8; 2] = [0x6C, 0x1B];

/// Mode byte for SNP-major (variant-major) layout
pub const SNP_MAJOR: u8 = 0x01;

/// Size of the header in bytes
///
/// Records start immediately after the header.
pub const SIZE_HEADER: usize = 3;

/// Header structure for packed genotype files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BedHeader {
    /// Magic number identifying the encoding
    ///
    /// 2 bytes
    pub magic: [u8; 2],

    /// Record layout mode
    ///
    /// 1 byte
    pub mode: u8,
}
impl Default for BedHeader {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            mode: SNP_MAJOR,
        }
    }
}
impl BedHeader {
    /// Parses a header from a fixed-size byte array
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The magic number is incorrect
    /// * The mode byte is not SNP-major
    pub fn from_bytes(buffer: &[u8; SIZE_HEADER]) -> Result<Self> {
        let magic = [buffer[0], buffer[1]];
        if magic != MAGIC {
            return Err(HeaderError::InvalidMagicNumber(magic).into());
        }
        let mode = buffer[2];
        if mode != SNP_MAJOR {
            return Err(HeaderError::InvalidMode(mode).into());
        }
        Ok(Self { magic, mode })
    }

    /// Parses a header from the start of an arbitrarily sized buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is smaller than `SIZE_HEADER` or the header
    /// bytes are invalid (see `from_bytes`).
    pub fn from_buffer(buffer: &[u8]) -> Result<Self> {
        let mut bytes = [0u8; SIZE_HEADER];
        if buffer.len() < SIZE_HEADER {
            return Err(HeaderError::InvalidSize(buffer.len(), SIZE_HEADER).into());
        }
        bytes.copy_from_slice(&buffer[..SIZE_HEADER]);
        Self::from_bytes(&bytes)
    }

    /// Reads a header from a reader
    ///
    /// Consumes at most `SIZE_HEADER` bytes. A reader that runs dry before the
    /// header is complete is reported as a header error, not an I/O error.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buffer = Vec::with_capacity(SIZE_HEADER);
        reader
            .take(SIZE_HEADER as u64)
            .read_to_end(&mut buffer)?;
        Self::from_buffer(&buffer)
    }

    /// Returns the header as it appears on disk
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIZE_HEADER] {
        [self.magic[0], self.magic[1], self.mode]
    }
}

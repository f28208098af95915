//! Sequential reader session over a seekable stream
//!
//! The session owns the stream, a single scratch buffer sized to one record, and the
//! index of the last variant it read. Each request moves the cursor forward by the
//! gap since the previous record only, so requested indices must be strictly
//! ascending.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, trace};

use super::{utils::fill_record, VariantRead};
use crate::{
    error::{BuilderError, ReadError, Result},
    header::BedHeader,
    layout::RecordLayout,
    record::RefRecord,
    seek::{seek_forward, RelativeSeek, MAX_SEEK_STEP},
};

/// A reader session that walks forward through a packed genotype file
///
/// Records are returned as [`RefRecord`] borrowing the session's scratch buffer.
///
/// After any error the position of the stream is unknown and the session must be
/// discarded.
#[derive(Debug)]
pub struct BedReader<R: Read + RelativeSeek> {
    /// The underlying stream, positioned right after the last record read
    inner: R,

    /// Validated file header
    header: BedHeader,

    /// Geometry of the records in the file
    layout: RecordLayout,

    /// Scratch buffer holding the packed bytes of the current record
    buffer: Vec<u8>,

    /// Index of the last variant read, if any
    previous: Option<usize>,

    /// Largest relative seek issued in one call
    max_step: u64,

    /// Number of records read so far
    n_processed: usize,
}
impl BedReader<BufReader<File>> {
    /// Opens the file at `path` and validates its header
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The file cannot be opened
    /// * The file is not a regular file
    /// * The file header is invalid
    pub fn from_path<P: AsRef<Path>>(path: P, n_samples: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        if !file.metadata()?.is_file() {
            return Err(ReadError::IncompatibleFile.into());
        }
        debug!("Opening {} with {} samples", path.display(), n_samples);
        Self::new(BufReader::new(file), n_samples)
    }
}
impl<R: Read + RelativeSeek> BedReader<R> {
    /// Creates a session over `inner`, which must be positioned at the header
    ///
    /// Reads and validates the 3-byte header.
    pub fn new(mut inner: R, n_samples: usize) -> Result<Self> {
        let header = BedHeader::from_reader(&mut inner)?;
        let layout = RecordLayout::new(n_samples);
        debug!(
            "Validated header, {} bytes per variant",
            layout.bytes_per_variant()
        );
        Ok(Self {
            inner,
            header,
            layout,
            buffer: vec![0; layout.bytes_per_variant()],
            previous: None,
            max_step: MAX_SEEK_STEP,
            n_processed: 0,
        })
    }

    /// Sets the largest relative seek issued in one call
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidSeekStep`] if `max_step` is zero
    pub fn with_max_seek_step(mut self, max_step: u64) -> Result<Self> {
        if max_step == 0 {
            return Err(BuilderError::InvalidSeekStep(max_step).into());
        }
        self.max_step = max_step;
        Ok(self)
    }

    /// Index of the last variant read, if any
    #[must_use]
    pub fn last_variant(&self) -> Option<usize> {
        self.previous
    }

    /// Current absolute position of the underlying stream
    pub fn stream_position(&mut self) -> Result<u64> {
        Ok(Seek::stream_position(&mut self.inner)?)
    }

    fn next_record(&mut self, index: usize) -> Result<RefRecord<'_>> {
        let advance = self.layout.relative_advance(self.previous, index)?;
        trace!("Variant {index}: skipping {advance} bytes");
        seek_forward(&mut self.inner, advance, self.max_step)?;

        let found = fill_record(&mut self.inner, &mut self.buffer)?;
        if found < self.buffer.len() {
            return Err(ReadError::TruncatedRecord {
                variant: index,
                expected: self.buffer.len(),
                found,
            }
            .into());
        }

        self.previous = Some(index);
        self.n_processed += 1;
        Ok(RefRecord::new(index, &self.buffer, self.layout))
    }
}

impl<R: Read + RelativeSeek> VariantRead for BedReader<R> {
    fn read_variant(&mut self, index: usize) -> Result<RefRecord<'_>> {
        self.next_record(index)
    }

    fn header(&self) -> BedHeader {
        self.header
    }

    fn layout(&self) -> RecordLayout {
        self.layout
    }

    fn n_processed(&self) -> usize {
        self.n_processed
    }
}

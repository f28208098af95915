//! Memory-mapped reader with positioned record access
//!
//! The whole file is mapped once and records are served as slices of the map at their
//! absolute offsets. There is no cursor, so requests may come in any order.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use memmap2::Mmap;

use super::VariantRead;
use crate::{
    error::{ReadError, Result},
    header::BedHeader,
    layout::RecordLayout,
    record::RefRecord,
};

/// A memory-mapped reader for packed genotype files
///
/// The map is held in an `Arc`, so clones of the reader share it.
///
/// # Examples
///
/// ```no_run
/// use bedmat::{MmapReader, Result};
///
/// fn main() -> Result<()> {
///     let reader = MmapReader::new("./data/example.bed", 1000)?;
///     let record = reader.get(20)?;
///     println!("{:?}", record.code(0));
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct MmapReader {
    /// Memory mapped file contents
    mmap: Arc<Mmap>,

    /// Validated file header
    header: BedHeader,

    /// Geometry of the records in the file
    layout: RecordLayout,

    /// Number of records served through [`VariantRead`]
    n_processed: usize,
}

impl MmapReader {
    /// Maps the file at `path` and validates its header
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The file cannot be opened
    /// * The file is not a regular file
    /// * The file header is invalid
    pub fn new<P: AsRef<Path>>(path: P, n_samples: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        if !file.metadata()?.is_file() {
            return Err(ReadError::IncompatibleFile.into());
        }

        // Safety: the file is open and won't be modified while mapped
        let mmap = unsafe { Mmap::map(&file)? };

        let header = BedHeader::from_buffer(&mmap)?;
        let layout = RecordLayout::new(n_samples);
        debug!(
            "Mapped {} ({} bytes, {} complete variants)",
            path.display(),
            mmap.len(),
            layout.num_variants(mmap.len())
        );

        Ok(Self {
            mmap: Arc::new(mmap),
            header,
            layout,
            n_processed: 0,
        })
    }

    /// Returns the number of complete variant records in the file
    #[must_use]
    pub fn num_variants(&self) -> usize {
        self.layout.num_variants(self.mmap.len())
    }

    /// Returns the header of the file
    #[must_use]
    pub fn header(&self) -> BedHeader {
        self.header
    }

    /// Returns a reference to the record of variant `idx`
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not lie entirely within the file
    pub fn get(&self, idx: usize) -> Result<RefRecord<'_>> {
        let rsize = self.layout.bytes_per_variant() as u64;
        let Some(lbound) = self.layout.record_offset(idx) else {
            return Err(ReadError::OutOfRange(idx, self.num_variants()).into());
        };
        let rbound = lbound + rsize;
        if rbound > self.mmap.len() as u64 {
            return Err(ReadError::OutOfRange(idx, self.num_variants()).into());
        }
        let bytes = &self.mmap[lbound as usize..rbound as usize];
        Ok(RefRecord::new(idx, bytes, self.layout))
    }
}

impl VariantRead for MmapReader {
    fn read_variant(&mut self, index: usize) -> Result<RefRecord<'_>> {
        self.n_processed += 1;
        self.get(index)
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

#[cfg(test)]
mod testing {
    use super::*;
    use crate::{
        header::SIZE_HEADER,
        testing::{pack, write_temp, HET, HOM_FIRST, HOM_SECOND, MISSING},
        Error,
    };

    fn image(n_variants: usize, n_samples: usize) -> Vec<u8> {
        let codes: Vec<Vec<u8>> = (0..n_variants)
            .map(|v| {
                (0..n_samples)
                    .map(|s| [MISSING, HOM_SECOND, HET, HOM_FIRST][(v * 3 + s) % 4])
                    .collect()
            })
            .collect();
        pack(&codes)
    }

    #[test]
    fn test_random_access() -> anyhow::Result<()> {
        let bytes = image(6, 9);
        let path = write_temp("mmap_random_access", &bytes)?;
        let reader = MmapReader::new(&path, 9)?;
        assert_eq!(reader.num_variants(), 6);

        // any order, repeated indices allowed
        for v in [5, 0, 3, 3, 1] {
            let record = reader.get(v)?;
            let start = SIZE_HEADER + v * 3;
            assert_eq!(record.bytes(), &bytes[start..start + 3]);
        }

        std::fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_out_of_range() -> anyhow::Result<()> {
        let mut bytes = image(4, 8);
        bytes.pop();
        let path = write_temp("mmap_out_of_range", &bytes)?;
        let mut reader = MmapReader::new(&path, 8)?;
        assert_eq!(reader.num_variants(), 3);

        let err = reader.read_variant(3).unwrap_err();
        assert!(err.is_io());
        assert!(matches!(err, Error::ReadError(ReadError::OutOfRange(3, 3))));

        std::fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_huge_index_out_of_range() -> anyhow::Result<()> {
        // 8 samples -> 2 bytes per variant, variant 0 is all HOM_FIRST
        let bytes = pack(&[vec![HOM_FIRST; 8], vec![HET; 8]]);
        let path = write_temp("mmap_huge_index", &bytes)?;
        let mut reader = MmapReader::new(&path, 8)?;

        for idx in [usize::MAX / 4, 1 << (usize::BITS - 1), usize::MAX] {
            assert!(matches!(
                reader.get(idx),
                Err(Error::ReadError(ReadError::OutOfRange(i, 2))) if i == idx
            ));
            let err = reader.read_variant(idx).unwrap_err();
            assert!(err.is_io());
        }

        std::fs::remove_file(path)?;
        Ok(())
    }

    #[test]
    fn test_short_file_rejected() -> anyhow::Result<()> {
        let path = write_temp("mmap_short_file", &[0x6C, 0x1B])?;
        let res = MmapReader::new(&path, 8);
        assert!(matches!(res, Err(ref e) if e.is_format()));

        std::fs::remove_file(path)?;
        Ok(())
    }
}

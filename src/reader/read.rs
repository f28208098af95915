use crate::{header::BedHeader, layout::RecordLayout, record::RefRecord, Result};

/// Core trait for all variant record readers
///
/// The decoder is generic over this trait, so records can come from a seekable
/// stream or from a memory map.
pub trait VariantRead {
    /// Returns the record of variant `index`
    ///
    /// Sequential readers require `index` to be strictly greater than the index of
    /// the previous call.
    fn read_variant(&mut self, index: usize) -> Result<RefRecord<'_>>;

    /// Returns the header of the file
    fn header(&self) -> BedHeader;

    /// Returns the record geometry of the file
    fn layout(&self) -> RecordLayout;

    /// Returns the number of records read so far
    fn n_processed(&self) -> usize;
}

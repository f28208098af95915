use crate::{
    genotype::{code_at, GenotypeCode, MISSING_DOSAGE},
    layout::RecordLayout,
    standardize::RowStats,
};

/// A borrowed view of the packed bytes of a single variant record
///
/// The bytes either live in a reader's scratch buffer or in a memory-mapped file;
/// the record itself never copies them.
#[derive(Debug, Clone, Copy)]
pub struct RefRecord<'a> {
    /// The variant index of this record in the file
    index: usize,
    /// The packed 2-bit codes of all samples
    bytes: &'a [u8],
    /// The geometry of records in the file
    layout: RecordLayout,
}
impl<'a> RefRecord<'a> {
    /// Creates a new record reference
    ///
    /// # Panics
    ///
    /// Panics if the buffer length doesn't match the record size of the layout
    #[must_use]
    pub fn new(index: usize, bytes: &'a [u8], layout: RecordLayout) -> Self {
        assert_eq!(bytes.len(), layout.bytes_per_variant());
        Self {
            index,
            bytes,
            layout,
        }
    }

    /// Variant index of the record within the file
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Packed bytes of the record
    #[must_use]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[must_use]
    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Genotype code of `sample`
    ///
    /// # Panics
    ///
    /// Panics if `sample` is outside the record
    #[must_use]
    pub fn code(&self, sample: usize) -> GenotypeCode {
        code_at(self.bytes, sample)
    }

    /// Decodes the dosages of `samples` into `row`, in the order of `samples`
    ///
    /// Missing genotypes are written as [`MISSING_DOSAGE`]. The returned accumulators
    /// cover exactly the requested samples.
    ///
    /// # Panics
    ///
    /// Panics if `row` and `samples` differ in length or a sample is outside the record
    pub fn dosages_into(&self, samples: &[usize], row: &mut [f32]) -> RowStats {
        assert_eq!(samples.len(), row.len());
        let mut stats = RowStats::new(samples.len());
        for (value, &sample) in row.iter_mut().zip(samples) {
            let dosage = self.code(sample).dosage();
            *value = dosage.unwrap_or(MISSING_DOSAGE);
            stats.push(dosage);
        }
        stats
    }
}

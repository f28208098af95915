//! Helpers for building packed genotype images in tests

use std::path::PathBuf;

use crate::{header::BedHeader, layout::RecordLayout};

/// 2-bit codes in file order
pub const HOM_FIRST: u8 = 0b00;
pub const MISSING: u8 = 0b01;
pub const HET: u8 = 0b10;
pub const HOM_SECOND: u8 = 0b11;

/// Packs one row of 2-bit codes per variant into a complete file image
///
/// All rows must have the same number of samples.
pub fn pack(codes: &[Vec<u8>]) -> Vec<u8> {
    let n_samples = codes.first().map_or(0, Vec::len);
    let layout = RecordLayout::new(n_samples);

    let mut image = BedHeader::default().to_bytes().to_vec();
    for row in codes {
        assert_eq!(row.len(), n_samples);
        let mut record = vec![0u8; layout.bytes_per_variant()];
        for (sample, &code) in row.iter().enumerate() {
            record[sample / 4] |= (code & 0b11) << ((sample % 4) * 2);
        }
        image.extend_from_slice(&record);
    }
    image
}

/// Expected dosage of a code, `None` for missing
pub fn dosage(code: u8) -> Option<f32> {
    match code {
        HOM_FIRST => Some(2.0),
        HET => Some(1.0),
        HOM_SECOND => Some(0.0),
        _ => None,
    }
}

/// Writes `bytes` to a fresh file in the temp directory
///
/// The caller removes the file when done.
pub fn write_temp(name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("bedmat_{}_{name}.bed", std::process::id()));
    std::fs::write(&path, bytes)?;
    Ok(path)
}

mod mmap;
mod read;
mod sequential;
mod utils;

pub use mmap::MmapReader;
pub use read::VariantRead;
pub use sequential::BedReader;

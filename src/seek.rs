//! Forward seeking in bounded steps
//!
//! A relative advance across many records can exceed what a single seek primitive
//! accepts. Advances are therefore split into full steps of at most [`MAX_SEEK_STEP`]
//! bytes followed by one remainder step.

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};

use log::trace;

use crate::error::Result;

/// Largest single relative seek issued by default (the largest positive 32-bit `long`)
pub const MAX_SEEK_STEP: u64 = 0x7FFF_FFFF;

/// A stream that can move its cursor relative to the current position
///
/// The default goes through [`Seek::seek`]. Buffered streams override it so that
/// advances landing inside the buffer keep the buffered bytes.
pub trait RelativeSeek: Seek {
    fn seek_relative(&mut self, offset: i64) -> io::Result<()> {
        self.seek(SeekFrom::Current(offset)).map(|_| ())
    }
}
impl RelativeSeek for File {}
impl<T: AsRef<[u8]>> RelativeSeek for Cursor<T> {}
impl<R: Read + Seek> RelativeSeek for BufReader<R> {
    fn seek_relative(&mut self, offset: i64) -> io::Result<()> {
        BufReader::seek_relative(self, offset)
    }
}
impl<S: RelativeSeek + ?Sized> RelativeSeek for &mut S {
    fn seek_relative(&mut self, offset: i64) -> io::Result<()> {
        RelativeSeek::seek_relative(&mut **self, offset)
    }
}

/// Iterator over the individual steps of a bounded forward seek
///
/// Yields `advance / max_step` full steps followed by the non-zero remainder, so the
/// sum of all steps equals `advance`. A zero advance yields no steps.
///
/// `max_step` is clamped to `1..=i64::MAX`.
#[derive(Debug, Clone)]
pub struct SeekSteps {
    remaining: u64,
    max_step: u64,
}
impl SeekSteps {
    #[must_use]
    pub fn new(advance: u64, max_step: u64) -> Self {
        Self {
            remaining: advance,
            max_step: max_step.clamp(1, i64::MAX as u64),
        }
    }
}
impl Iterator for SeekSteps {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        let step = self.remaining.min(self.max_step);
        self.remaining -= step;
        Some(step)
    }
}

/// Moves `inner` forward by `advance` bytes relative to its current position
///
/// No seek is issued when `advance` is zero. `max_step` is clamped as in [`SeekSteps`].
pub fn seek_forward<S: RelativeSeek + ?Sized>(
    inner: &mut S,
    advance: u64,
    max_step: u64,
) -> Result<()> {
    let steps = SeekSteps::new(advance, max_step);
    trace!("seek_forward advance={advance} max_step={}", steps.max_step);
    for step in steps {
        #[allow(clippy::cast_possible_wrap)]
        let step = step as i64;
        RelativeSeek::seek_relative(inner, step)?;
    }
    Ok(())
}

#[cfg(test)]
mod testing {
    use std::io::Cursor;

    use super::*;

    /// Seekable stand-in that records every relative seek without holding any data
    #[derive(Default)]
    struct SeekLog {
        pos: u64,
        steps: Vec<i64>,
    }
    impl Seek for SeekLog {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            match pos {
                SeekFrom::Current(delta) => {
                    self.steps.push(delta);
                    self.pos = self.pos.checked_add_signed(delta).ok_or_else(|| {
                        std::io::Error::new(std::io::ErrorKind::InvalidInput, "negative seek")
                    })?;
                }
                SeekFrom::Start(abs) => self.pos = abs,
                SeekFrom::End(_) => unimplemented!(),
            }
            Ok(self.pos)
        }
    }
    impl RelativeSeek for SeekLog {}

    #[test]
    fn test_steps_sum_to_advance() {
        for (advance, max_step) in [(0, 7), (6, 7), (7, 7), (8, 7), (50, 7), (49, 7), (1, 1)] {
            let steps: Vec<u64> = SeekSteps::new(advance, max_step).collect();
            assert_eq!(steps.iter().sum::<u64>(), advance);
            assert!(steps.iter().all(|&s| s > 0 && s <= max_step));
            assert_eq!(steps.len() as u64, advance.div_ceil(max_step));
        }
    }

    #[test]
    fn test_exact_multiple_ends_with_full_step() {
        let steps: Vec<u64> = SeekSteps::new(21, 7).collect();
        assert_eq!(steps, vec![7, 7, 7]);
    }

    #[test]
    fn test_remainder_step() {
        let steps: Vec<u64> = SeekSteps::new(23, 7).collect();
        assert_eq!(steps, vec![7, 7, 7, 2]);
    }

    #[test]
    fn test_zero_advance_no_steps() {
        assert_eq!(SeekSteps::new(0, MAX_SEEK_STEP).count(), 0);
    }

    #[test]
    fn test_zero_step_clamped() {
        let steps: Vec<u64> = SeekSteps::new(3, 0).collect();
        assert_eq!(steps, vec![1, 1, 1]);
    }

    #[test]
    fn test_adjacent_record_issues_no_seek() -> anyhow::Result<()> {
        let mut log = SeekLog {
            pos: 13,
            ..Default::default()
        };
        seek_forward(&mut log, 0, MAX_SEEK_STEP)?;
        assert!(log.steps.is_empty());
        assert_eq!(log.pos, 13);
        Ok(())
    }

    #[test]
    fn test_chained_seeks_match_unbounded() -> anyhow::Result<()> {
        let advance = 3 * MAX_SEEK_STEP + 12_345;

        let mut bounded = SeekLog {
            pos: 3,
            ..Default::default()
        };
        seek_forward(&mut bounded, advance, MAX_SEEK_STEP)?;

        let mut unbounded = SeekLog {
            pos: 3,
            ..Default::default()
        };
        seek_forward(&mut unbounded, advance, u64::MAX)?;

        assert_eq!(bounded.pos, unbounded.pos);
        assert_eq!(bounded.pos, 3 + advance);
        assert_eq!(bounded.steps.len(), 4);
        assert_eq!(unbounded.steps.len(), 1);
        Ok(())
    }

    #[test]
    fn test_small_step_on_cursor() -> anyhow::Result<()> {
        let mut cursor = Cursor::new(vec![0u8; 100]);
        cursor.set_position(5);
        seek_forward(&mut cursor, 64, 10)?;
        assert_eq!(cursor.position(), 69);

        // zero steps behave like single-byte steps
        seek_forward(&mut cursor, 4, 0)?;
        assert_eq!(cursor.position(), 73);
        Ok(())
    }

    #[test]
    fn test_buffered_advance_keeps_buffer() -> anyhow::Result<()> {
        let data: Vec<u8> = (0..=255).collect();
        let mut reader = BufReader::with_capacity(64, Cursor::new(data));
        let mut byte = [0u8; 1];
        reader.read_exact(&mut byte)?;

        seek_forward(&mut reader, 10, MAX_SEEK_STEP)?;
        // still inside the first 64 buffered bytes
        assert_eq!(reader.get_ref().position(), 64);
        reader.read_exact(&mut byte)?;
        assert_eq!(byte[0], 11);
        Ok(())
    }
}

use std::io::{ErrorKind, Read};

/// Reads from `reader` until `buffer` is full or the stream ends
///
/// Returns the number of bytes written to `buffer`. Unlike `read_exact`, the
/// number of bytes found before the end of the stream is preserved for error
/// reporting.
pub fn fill_record<R: Read>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod testing {
    use std::io::Cursor;

    use super::*;

    /// Reader that hands out at most one byte per call
    struct Trickle(Cursor<Vec<u8>>);
    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let end = buf.len().min(1);
            self.0.read(&mut buf[..end])
        }
    }

    #[test]
    fn test_fill_across_short_reads() -> std::io::Result<()> {
        let mut reader = Trickle(Cursor::new(vec![1, 2, 3, 4, 5]));
        let mut buffer = [0u8; 4];
        assert_eq!(fill_record(&mut reader, &mut buffer)?, 4);
        assert_eq!(buffer, [1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_fill_reports_partial() -> std::io::Result<()> {
        let mut reader = Cursor::new(vec![9, 9]);
        let mut buffer = [0u8; 4];
        assert_eq!(fill_record(&mut reader, &mut buffer)?, 2);
        Ok(())
    }
}

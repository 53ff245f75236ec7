use crate::{alloc::RawAlloc, DynArray};
use std::io;

/// Write is implemented for `DynArray<u8, A>` by appending to the array.
/// The array will grow as needed; a buffer that cannot grow reports
/// [`io::ErrorKind::OutOfMemory`] and keeps its previous contents.
impl<A: RawAlloc> io::Write for DynArray<u8, A> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all(buf)?;
        Ok(buf.len())
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.try_extend_from_slice(buf)
            .map_err(|err| io::Error::new(io::ErrorKind::OutOfMemory, err))
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ArrayConfig, DynArray, Global};
    use std::io::{ErrorKind, Write};

    #[test]
    fn write_appends_and_grows() {
        let mut out: DynArray<u8> = DynArray::with_capacity(2).unwrap();
        write!(out, "{}-{}", 12, "ab").unwrap();
        out.flush().unwrap();
        assert_eq!(out, *b"12-ab");
    }

    #[test]
    fn full_sink_reports_out_of_memory() {
        let config = ArrayConfig::new(Global)
            .with_capacity(1)
            .with_max_elements(4);
        let mut out: DynArray<u8> = DynArray::new_in(config).unwrap();
        out.write_all(b"abc").unwrap();
        let err = out.write_all(b"de").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfMemory);
        assert_eq!(out, *b"abc");
    }
}

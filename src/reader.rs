use std::sync::Arc;

use log::{debug, trace};

use crate::{
    builder::IndexBuilder, index::Index, Indexable, OpenRead, ReadByLine, ReadRange, Result,
};

/// Reads single lines by looking up their position in an index and reading exactly that range
/// from a byte source.
///
/// The index is shared through an `Arc` and never changes, so cloning a `LineReader` is cheap
/// and clones can be used from multiple threads at once.
#[derive(Debug, Clone)]
pub struct LineReader<A> {
    index: Arc<Index>,
    accessor: A,
}

impl<A: ReadRange> LineReader<A> {
    /// Creates a new `LineReader` from an accessor and an index. The index won't be validated.
    /// An index which was not built from `accessor` won't return an error but make the reader
    /// return wrong lines.
    #[inline]
    pub fn new(accessor: A, index: Arc<Index>) -> LineReader<A> {
        Self { index, accessor }
    }

    #[inline]
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Returns a new handle to the published index
    #[inline]
    pub fn index_handle(&self) -> Arc<Index> {
        Arc::clone(&self.index)
    }
}

impl<A: ReadRange + OpenRead + Clone> LineReader<A> {
    /// Scan `accessor` once and create a reader over the resulting index.
    pub fn build(accessor: A, builder: &IndexBuilder) -> Result<LineReader<A>> {
        let index = builder.build(accessor.open_read()?)?;
        Ok(Self::new(accessor, Arc::new(index)))
    }

    /// Build a fresh index from the current content of the source. `self` and its index are
    /// left untouched; callers replace their reader with the returned one.
    pub fn reindex(&self, builder: &IndexBuilder) -> Result<LineReader<A>> {
        debug!("Rebuilding index, old index holds [{}] lines", self.index.size());
        Self::build(self.accessor.clone(), builder)
    }
}

impl<A> Indexable for LineReader<A> {
    #[inline(always)]
    fn get_index(&self) -> &Index {
        &self.index
    }
}

impl<A: ReadRange> ReadByLine for LineReader<A> {
    fn read_line_raw(&self, line: i64, buf: &mut Vec<u8>) -> Result<usize> {
        let position = self.index.get_position(line)?;
        trace!("Line {} is at {:?}", line, position);
        self.accessor.read_range_into(position, buf)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{error::Error, file::FileAccessor, memory::MemoryAccessor, ScanStrategy};

    #[test]
    fn test_read_line() {
        let accessor = MemoryAccessor::from("Trash\nMay the force be with you!\nTrash\n");
        let reader = LineReader::build(accessor, &IndexBuilder::default()).unwrap();

        assert_eq!(reader.total_lines(), 3);
        assert_eq!(reader.read_line(0).unwrap(), "Trash");
        assert_eq!(reader.read_line(1).unwrap(), "May the force be with you!");
        assert_eq!(reader.read_line(2).unwrap(), "Trash");
        assert!(matches!(
            reader.read_line(3),
            Err(Error::OutOfRange { line: 3, size: 3 })
        ));
        assert!(matches!(
            reader.read_line(-1),
            Err(Error::OutOfRange { line: -1, .. })
        ));
    }

    #[test]
    fn test_read_line_raw_appends() {
        let accessor = MemoryAccessor::from("a\nbc\n");
        let reader = LineReader::build(accessor, &IndexBuilder::default()).unwrap();

        let mut buf = Vec::new();
        reader.read_line_raw(0, &mut buf).unwrap();
        reader.read_line_raw(1, &mut buf).unwrap();
        assert_eq!(buf, b"abc");
    }

    #[test]
    fn test_clone_shares_index() {
        let accessor = MemoryAccessor::from("a\nb\n");
        let reader = LineReader::build(accessor, &IndexBuilder::default()).unwrap();
        let clone = reader.clone();

        assert!(Arc::ptr_eq(&reader.index_handle(), &clone.index_handle()));
        assert_eq!(clone.read_line(1).unwrap(), "b");
    }

    #[test]
    fn test_custom_index() {
        let index = Index::from_offsets(vec![3]).unwrap();
        let reader = LineReader::new(MemoryAccessor::from("abc\ndef\n"), Arc::new(index));

        assert_eq!(reader.total_lines(), 1);
        assert_eq!(reader.read_line(0).unwrap(), "abc");
        assert!(reader.read_line(1).is_err());
    }

    #[test]
    fn test_truncated_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"first\nsecond\n").unwrap();
        file.flush().unwrap();

        let reader =
            LineReader::build(FileAccessor::new(file.path()), &IndexBuilder::default()).unwrap();
        assert_eq!(reader.read_line(1).unwrap(), "second");

        file.as_file().set_len(8).unwrap();

        assert_eq!(reader.read_line(0).unwrap(), "first");
        assert!(matches!(reader.read_line(1), Err(Error::Io(_))));
    }

    #[test]
    fn test_reindex() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"one\ntwo\n").unwrap();
        file.flush().unwrap();

        let builder = IndexBuilder::new(ScanStrategy::ByteAtATime);
        let reader = LineReader::build(FileAccessor::new(file.path()), &builder).unwrap();
        let old_index = reader.index_handle();

        file.write_all(b"three\n").unwrap();
        file.flush().unwrap();

        let fresh = reader.reindex(&builder).unwrap();
        assert_eq!(fresh.total_lines(), 3);
        assert_eq!(fresh.read_line(2).unwrap(), "three");

        // The old snapshot is never mutated
        assert_eq!(reader.total_lines(), 2);
        assert_eq!(old_index.size(), 2);
        assert!(!Arc::ptr_eq(&old_index, &fresh.index_handle()));
    }
}

//! Random access to single lines of large text files using an in-memory index of line feeds

/// Async file access on top of async-std
pub mod async_file;
/// Startup sequence: validate the file, build the index and publish it
pub mod bootstrap;
/// Scans a byte source once and collects the offsets of all line feeds
pub mod builder;
pub mod config;
pub mod error;
/// Read-only access to byte ranges of a file on disk
pub mod file;
/// The index of line feeds
pub mod index;
/// In-memory byte sources
pub mod memory;
pub mod position;
/// Composition of an index and a byte source
pub mod reader;

pub use builder::{IndexBuilder, ScanStrategy};
pub use error::Error;
pub use file::FileAccessor;
pub use index::Index;
pub use memory::MemoryAccessor;
pub use position::Position;
pub use reader::LineReader;

use std::io::Read;

pub type Result<T> = std::result::Result<T, error::Error>;

pub trait Indexable {
    /// Returns a reference to the index.
    fn get_index(&self) -> &Index;

    /// Returns the amount of lines which can be read.
    #[inline]
    fn total_lines(&self) -> u64 {
        self.get_index().size()
    }

    /// Returns the byte range of `line`
    #[inline]
    fn get_position(&self, line: i64) -> Result<Position> {
        self.get_index().get_position(line)
    }
}

/// A source of raw bytes which can be read at arbitrary positions.
pub trait ReadRange {
    /// Should append exactly `position.len()` bytes, starting at `position.start`, to `buf`.
    /// On error `buf` must be left as it was.
    fn read_range_into(&self, position: Position, buf: &mut Vec<u8>) -> Result<usize>;

    /// Reads the bytes within `position` into a newly allocated buffer
    fn read_range(&self, position: Position) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_range_into(position, &mut buf)?;
        Ok(buf)
    }
}

/// A byte source which can be streamed from its beginning, used to build an index.
pub trait OpenRead {
    type Reader: Read;

    /// Open a new reader positioned at the first byte
    fn open_read(&self) -> Result<Self::Reader>;
}

/// A trait defining behavior for reading certain lines directly from indexed sources.
pub trait ReadByLine: Indexable {
    /// Should append the bytes of `line`, omitting the \n, to `buf`
    fn read_line_raw(&self, line: i64, buf: &mut Vec<u8>) -> Result<usize>;

    /// Reads the given line
    fn read_line(&self, line: i64) -> Result<String> {
        let mut buf = Vec::new();
        self.read_line_raw(line, &mut buf)?;
        Ok(file::decode_ascii(&buf))
    }
}

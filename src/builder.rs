use std::{
    io::{BufReader, ErrorKind, Read},
    num::NonZeroUsize,
    time::Instant,
};

use log::{debug, error};

use crate::{
    error::Error,
    index::{Index, MAX_LINES},
    Result,
};

/// The byte terminating a line
pub const TERMINATOR: u8 = b'\n';

/// Default length of a chunk read by `ScanStrategy::Chunked`
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Defines how many bytes are pulled from the source per read while scanning for line feeds.
/// Every strategy produces the exact same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStrategy {
    /// Read a single byte at a time
    ByteAtATime,
    /// Read fixed-size chunks
    Chunked(NonZeroUsize),
}

impl ScanStrategy {
    /// Create a chunked strategy. A `chunk_size` of 0 selects `ByteAtATime`.
    pub fn chunked(chunk_size: usize) -> ScanStrategy {
        NonZeroUsize::new(chunk_size)
            .map(ScanStrategy::Chunked)
            .unwrap_or(ScanStrategy::ByteAtATime)
    }

    /// Length of the read buffer
    #[inline]
    pub fn chunk_len(&self) -> usize {
        match self {
            ScanStrategy::ByteAtATime => 1,
            ScanStrategy::Chunked(size) => size.get(),
        }
    }
}

impl Default for ScanStrategy {
    fn default() -> Self {
        ScanStrategy::chunked(DEFAULT_CHUNK_SIZE)
    }
}

/// Builds an `Index` by scanning a source once from its current position to its end.
#[derive(Debug, Clone, Copy)]
pub struct IndexBuilder {
    strategy: ScanStrategy,
    max_lines: u64,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new(ScanStrategy::default())
    }
}

impl IndexBuilder {
    pub fn new(strategy: ScanStrategy) -> IndexBuilder {
        Self {
            strategy,
            max_lines: MAX_LINES,
        }
    }

    /// Lower the amount of lines an index may hold. Values above `MAX_LINES` are clamped.
    pub fn with_capacity(mut self, max_lines: u64) -> IndexBuilder {
        self.max_lines = max_lines.min(MAX_LINES);
        self
    }

    #[inline]
    pub fn strategy(&self) -> ScanStrategy {
        self.strategy
    }

    /// Scan `reader` and collect the absolute offset of every line feed. Offsets are counted
    /// from the position the reader is at when passed in.
    pub fn build<R: Read>(&self, reader: R) -> Result<Index> {
        let start = Instant::now();
        debug!("Start building the index ({:?})", self.strategy);

        // Small chunks are served from this buffer instead of hitting the source on every read
        let mut reader = BufReader::with_capacity(DEFAULT_CHUNK_SIZE, reader);

        let mut buf = vec![0u8; self.strategy.chunk_len()];
        let mut line_index: Vec<u64> = Vec::new();
        let mut curr_offset: u64 = 0;

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            for pos in memchr::memchr_iter(TERMINATOR, &buf[..n]) {
                if line_index.len() as u64 >= self.max_lines {
                    let found = line_index.len() as u64 + 1;
                    error!(
                        "File contains at least [{}] lines, max supported is [{}]",
                        found, self.max_lines
                    );
                    return Err(Error::BuildOverflow {
                        found,
                        max: self.max_lines,
                    });
                }

                line_index.push(curr_offset + pos as u64);
            }

            // Chunk boundaries never reset the absolute offset
            curr_offset += n as u64;
        }

        line_index.shrink_to_fit();

        debug!(
            "Scanned {} containing [{}] lines, took {:?}",
            readable_size(curr_offset),
            line_index.len(),
            start.elapsed()
        );

        Ok(Index::new(line_index))
    }
}

/// Build an index for `reader` using the default strategy and capacity.
#[inline]
pub fn build<R: Read>(reader: R) -> Result<Index> {
    IndexBuilder::default().build(reader)
}

/// Format a byte count using decimal units
pub(crate) fn readable_size(size: u64) -> String {
    match size {
        0..=999 => format!("{} bytes", size),
        1_000..=999_999 => format!("{} KB", size / 1_000),
        1_000_000..=999_999_999 => format!("{} MB", size / 1_000_000),
        _ => format!("{} GB", size / 1_000_000_000),
    }
}

use itertools::Itertools;

use crate::{error::Error, position::Position, Result};

/// Maximum amount of lines a single index can hold.
pub const MAX_LINES: u64 = i32::MAX as u64;

/// Contains an in-memory line-index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Index {
    /// Absolute offsets of every line feed in the file, in file order. The index within the Vec
    /// represents the line number the line feed terminates.
    inner: Vec<u64>,
}

impl Index {
    /// Create a new Index from offsets which are already known to be strictly increasing.
    #[inline]
    pub(crate) fn new(inner: Vec<u64>) -> Index {
        Self { inner }
    }

    /// Create an Index from terminator offsets. Returns `None` if the offsets are not strictly
    /// increasing or exceed `MAX_LINES`.
    pub fn from_offsets(offsets: Vec<u64>) -> Option<Index> {
        let increasing = offsets.iter().tuple_windows().all(|(a, b)| a < b);
        if !increasing || offsets.len() as u64 > MAX_LINES {
            return None;
        }

        Some(Self::new(offsets))
    }

    /// Returns the byte range of the line `line_number`, without its line feed.
    pub fn get_position(&self, line_number: i64) -> Result<Position> {
        let out_of_range = || Error::OutOfRange {
            line: line_number,
            size: self.size(),
        };

        let line = usize::try_from(line_number).map_err(|_| out_of_range())?;
        let end = *self.inner.get(line).ok_or_else(out_of_range)?;

        let start = match line {
            0 => 0,
            // Offsets are strictly increasing, so the previous one is always smaller than `end`
            _ => self.inner[line - 1] + 1,
        };

        Ok(Position { start, end })
    }

    /// Returns the amount of lines which can be retrieved. Trailing content without a line feed
    /// is not counted.
    #[inline]
    pub fn size(&self) -> u64 {
        self.inner.len() as u64
    }

    /// Returns `true` if the index holds no line
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The raw terminator offsets
    #[inline]
    pub fn offsets(&self) -> &[u64] {
        &self.inner
    }
}

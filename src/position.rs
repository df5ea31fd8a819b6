/// Byte range `[start, end)` of a single line inside the indexed file. The terminating line
/// feed is not part of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub start: u64,
    pub end: u64,
}

impl Position {
    /// Create a new position. Returns `None` if `start` is greater than `end`.
    #[inline]
    pub fn new(start: u64, end: u64) -> Option<Position> {
        (start <= end).then(|| Self { start, end })
    }

    /// Amount of bytes covered by the position
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

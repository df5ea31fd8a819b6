use std::{
    io::{self, Cursor},
    sync::Arc,
};

use crate::{position::Position, OpenRead, ReadRange, Result};

// little shortcut
pub trait Bytes: AsRef<[u8]> + Send + Sync {}
impl<T: AsRef<[u8]> + Send + Sync> Bytes for T {}

/// A wrapper around Arc<T> to allow using an arc as reader for Cursor<ArcBytes<T>>
#[derive(Debug)]
pub struct ArcBytes<T: Bytes>(Arc<T>);

impl<T: Bytes> Clone for ArcBytes<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Bytes> AsRef<[u8]> for ArcBytes<T> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref().as_ref()
    }
}

/// Byte source backed by data held in memory. Cloning only clones the Arc.
#[derive(Debug)]
pub struct MemoryAccessor<T: Bytes> {
    data: ArcBytes<T>,
}

impl<T: Bytes> Clone for MemoryAccessor<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl<T: Bytes> MemoryAccessor<T> {
    #[inline]
    pub fn new(data: T) -> MemoryAccessor<T> {
        Self {
            data: ArcBytes(Arc::new(data)),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_ref()
    }
}

impl From<&str> for MemoryAccessor<String> {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s.to_owned())
    }
}

impl<T: Bytes> OpenRead for MemoryAccessor<T> {
    type Reader = Cursor<ArcBytes<T>>;

    #[inline]
    fn open_read(&self) -> Result<Self::Reader> {
        Ok(Cursor::new(self.data.clone()))
    }
}

impl<T: Bytes> ReadRange for MemoryAccessor<T> {
    fn read_range_into(&self, position: Position, buf: &mut Vec<u8>) -> Result<usize> {
        let data = self.as_bytes();

        let range = usize::try_from(position.start)
            .ok()
            .zip(usize::try_from(position.end).ok())
            .filter(|(start, end)| start <= end && *end <= data.len())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "range beyond end of data")
            })?;

        let slice = &data[range.0..range.1];
        buf.extend_from_slice(slice);
        Ok(slice.len())
    }
}

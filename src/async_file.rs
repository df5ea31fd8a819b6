use std::{io::SeekFrom, sync::Arc};

use async_std::{
    fs,
    io::{self, prelude::*},
    path::PathBuf,
};
use async_trait::async_trait;
use log::{debug, error, trace};

use crate::{
    file::{decode_ascii, FileAccessor},
    index::Index,
    position::Position,
    reader::LineReader,
    Indexable, Result,
};

/// Async counterpart of `ReadRange`
#[async_trait]
pub trait AsyncReadRange {
    /// Should append exactly `position.len()` bytes, starting at `position.start`, to `buf`.
    /// On error `buf` must be left as it was.
    async fn read_range_into(&self, position: Position, buf: &mut Vec<u8>) -> Result<usize>;

    async fn read_range(&self, position: Position) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_range_into(position, &mut buf).await?;
        Ok(buf)
    }
}

/// A wrapper around a path which opens a new `async_std::fs::File` for every read.
#[derive(Debug, Clone)]
pub struct AsyncFileAccessor {
    path: PathBuf,
}

impl AsyncFileAccessor {
    pub fn new<P: Into<PathBuf>>(path: P) -> AsyncFileAccessor {
        Self { path: path.into() }
    }

    /// Returns `true` if the path points to an existing file.
    pub async fn is_valid(&self) -> bool {
        debug!("Validating file [{}]", self.path.display());

        let is_file = fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);

        if !is_file {
            error!("File {} can't be found", self.path.display());
        }
        is_file
    }
}

impl From<&FileAccessor> for AsyncFileAccessor {
    #[inline]
    fn from(accessor: &FileAccessor) -> Self {
        Self::new(accessor.path().to_path_buf())
    }
}

#[async_trait]
impl AsyncReadRange for AsyncFileAccessor {
    async fn read_range_into(&self, position: Position, buf: &mut Vec<u8>) -> Result<usize> {
        trace!("Reading {:?} from {}", position, self.path.display());

        let mut file = fs::File::open(&self.path).await?;
        file.seek(SeekFrom::Start(position.start)).await?;

        let need_read = position
            .end
            .checked_sub(position.start)
            .and_then(|len| usize::try_from(len).ok())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid range"))?;

        let old_len = buf.len();
        buf.resize(old_len + need_read, 0);

        if let Err(e) = file.read_exact(&mut buf[old_len..]).await {
            buf.truncate(old_len);
            return Err(e.into());
        }

        Ok(need_read)
    }
}

/// Async counterpart of `LineReader`. Shares the same immutable index.
#[derive(Debug, Clone)]
pub struct AsyncLineReader<A> {
    index: Arc<Index>,
    accessor: A,
}

impl<A: AsyncReadRange + Sync> AsyncLineReader<A> {
    #[inline]
    pub fn new(accessor: A, index: Arc<Index>) -> AsyncLineReader<A> {
        Self { index, accessor }
    }

    /// Appends the bytes of `line`, omitting the \n, to `buf`
    pub async fn read_line_raw(&self, line: i64, buf: &mut Vec<u8>) -> Result<usize> {
        let position = self.index.get_position(line)?;
        self.accessor.read_range_into(position, buf).await
    }

    /// Reads the given line
    pub async fn read_line(&self, line: i64) -> Result<String> {
        let mut buf = Vec::new();
        self.read_line_raw(line, &mut buf).await?;
        Ok(decode_ascii(&buf))
    }
}

impl From<&LineReader<FileAccessor>> for AsyncLineReader<AsyncFileAccessor> {
    fn from(reader: &LineReader<FileAccessor>) -> Self {
        Self::new(reader.accessor().into(), reader.index_handle())
    }
}

impl<A> Indexable for AsyncLineReader<A> {
    #[inline]
    fn get_index(&self) -> &Index {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{builder::IndexBuilder, error::Error};

    fn sync_reader(content: &[u8]) -> (tempfile::NamedTempFile, LineReader<FileAccessor>) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();

        let reader =
            LineReader::build(FileAccessor::new(file.path()), &IndexBuilder::default()).unwrap();
        (file, reader)
    }

    #[async_std::test]
    async fn test_read_line() {
        let (_file, reader) = sync_reader(b"Trash\nMay the force be with you!\nTrash\n");
        let reader = AsyncLineReader::<AsyncFileAccessor>::from(&reader);

        assert_eq!(reader.total_lines(), 3);
        assert_eq!(
            reader.read_line(1).await.unwrap(),
            "May the force be with you!"
        );
        assert!(matches!(
            reader.read_line(3).await,
            Err(Error::OutOfRange { .. })
        ));
    }

    #[async_std::test]
    async fn test_concurrent_reads() {
        let content: String = (0..100).map(|i| format!("line {}\n", i)).collect();
        let (_file, reader) = sync_reader(content.as_bytes());
        let reader = AsyncLineReader::<AsyncFileAccessor>::from(&reader);

        let tasks: Vec<_> = (0..100)
            .rev()
            .map(|i| {
                let reader = reader.clone();
                async_std::task::spawn(async move { (i, reader.read_line(i).await) })
            })
            .collect();

        for task in tasks {
            let (i, line) = task.await;
            assert_eq!(line.unwrap(), format!("line {}", i));
        }
    }

    #[async_std::test]
    async fn test_is_valid() {
        let (file, _reader) = sync_reader(b"");
        assert!(AsyncFileAccessor::new(file.path().to_path_buf()).is_valid().await);

        let dir = tempfile::tempdir().unwrap();
        let missing = AsyncFileAccessor::new(dir.path().join("missing"));
        assert!(!missing.is_valid().await);
        assert!(!AsyncFileAccessor::new(dir.path().to_path_buf()).is_valid().await);
    }

    #[async_std::test]
    async fn test_read_beyond_end() {
        let (file, _reader) = sync_reader(b"abc\n");
        let accessor = AsyncFileAccessor::new(file.path().to_path_buf());

        assert!(accessor.is_valid().await);
        let res = accessor.read_range(Position { start: 1, end: 9 }).await;
        assert!(matches!(res, Err(Error::Io(_))));
    }
}

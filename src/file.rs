use std::{
    fs,
    io::{self, prelude::*, SeekFrom},
    path::{Path, PathBuf},
};

use log::{debug, error, trace};

use crate::{
    builder::{readable_size, IndexBuilder},
    index::Index,
    position::Position,
    OpenRead, ReadRange, Result,
};

/// Read-only access to a file on disk. No handle is kept open: every read opens its own handle
/// and closes it before returning, so reads never share a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAccessor {
    path: PathBuf,
}

impl FileAccessor {
    pub fn new<P: AsRef<Path>>(path: P) -> FileAccessor {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the path points to an existing file.
    pub fn is_valid(&self) -> bool {
        debug!("Validating file [{}]", self.path.display());

        if self.path.is_file() {
            return true;
        }

        error!("File {} can't be found", self.path.display());
        false
    }

    /// Scan the whole file and build its index.
    pub fn build_index(&self, builder: &IndexBuilder) -> Result<Index> {
        let file = self.open_read()?;
        debug!(
            "Stream size is [{}]",
            readable_size(file.metadata()?.len())
        );
        builder.build(file)
    }
}

impl OpenRead for FileAccessor {
    type Reader = fs::File;

    #[inline]
    fn open_read(&self) -> Result<fs::File> {
        Ok(fs::File::open(&self.path)?)
    }
}

impl ReadRange for FileAccessor {
    fn read_range_into(&self, position: Position, buf: &mut Vec<u8>) -> Result<usize> {
        trace!("Reading {:?} from {}", position, self.path.display());

        // Dropped on every return path
        let mut file = self.open_read()?;
        file.seek(SeekFrom::Start(position.start))?;

        let need_read = position
            .end
            .checked_sub(position.start)
            .and_then(|len| usize::try_from(len).ok())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid range"))?;

        let old_len = buf.len();
        buf.resize(old_len + need_read, 0);

        // Seeking past the end succeeds, so a truncated file shows up as a short read here
        if let Err(e) = file.read_exact(&mut buf[old_len..]) {
            buf.truncate(old_len);
            return Err(e.into());
        }

        Ok(need_read)
    }
}

/// Decode single byte text. Bytes outside of ASCII are replaced with `?`.
pub fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

use std::path::PathBuf;

/// Exit status used when no file path was supplied.
pub const EXIT_ARGUMENT_MISSING: i32 = 1;
/// Exit status used when building the index failed.
pub const EXIT_BUILD_FAILED: i32 = 2;
/// Exit status used when the supplied file does not exist.
pub const EXIT_FILE_NOT_FOUND: i32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No file path was supplied at startup
    #[error("no file path was supplied")]
    ArgumentMissing,

    /// The supplied path does not point to an existing file
    #[error("file {} can't be found", .0.display())]
    FileNotFound(PathBuf),

    /// The file contains more lines than an index can hold. `found` is the count reached when
    /// the scan was aborted.
    #[error("file contains at least {found} lines, max supported is {max}")]
    BuildOverflow { found: u64, max: u64 },

    /// On request for a line which is not in the index
    #[error("line {line} is out of range, index holds {size} lines")]
    OutOfRange { line: i64, size: u64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for errors which have to stop the process before it serves any request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ArgumentMissing | Error::FileNotFound(_) | Error::BuildOverflow { .. }
        )
    }

    /// Process exit status for a failure during startup.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ArgumentMissing => EXIT_ARGUMENT_MISSING,
            Error::FileNotFound(_) => EXIT_FILE_NOT_FOUND,
            Error::BuildOverflow { .. } | Error::OutOfRange { .. } | Error::Io(_) => {
                EXIT_BUILD_FAILED
            }
        }
    }
}

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::builder::{IndexBuilder, ScanStrategy, DEFAULT_CHUNK_SIZE};

/// Command line configuration of the line server
#[derive(Parser, Debug, Clone)]
#[command(name = "line-server")]
#[command(about = "Index a text file once and serve single lines of it")]
pub struct Config {
    /// File to index. Required; checked by the bootstrap so a missing path gets its own exit code
    pub file: Option<PathBuf>,

    /// Line numbers (zero based) to print. Read from stdin, one per line, when omitted
    #[arg(allow_negative_numbers = true)]
    pub lines: Vec<String>,

    /// Bytes read per chunk while indexing. 0 scans one byte at a time
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Maximum log level written to stderr
    #[arg(short, long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Config {
    #[inline]
    pub fn scan_strategy(&self) -> ScanStrategy {
        ScanStrategy::chunked(self.chunk_size)
    }

    #[inline]
    pub fn builder(&self) -> IndexBuilder {
        IndexBuilder::new(self.scan_strategy())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["line-server", "input.txt"]).unwrap();

        assert_eq!(config.file, Some(PathBuf::from("input.txt")));
        assert!(config.lines.is_empty());
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(
            config.scan_strategy(),
            ScanStrategy::Chunked(NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap())
        );
    }

    #[test]
    fn test_missing_file_is_accepted() {
        let config = Config::try_parse_from(["line-server"]).unwrap();
        assert!(config.file.is_none());
    }

    #[test]
    fn test_options() {
        let config = Config::try_parse_from([
            "line-server",
            "--chunk-size",
            "0",
            "--log-level",
            "debug",
            "input.txt",
            "3",
            "-1",
        ])
        .unwrap();

        assert_eq!(config.scan_strategy(), ScanStrategy::ByteAtATime);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.lines, vec!["3".to_string(), "-1".to_string()]);
    }
}

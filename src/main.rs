//! Index a text file and answer line requests on stdout

use std::process;

use async_std::{
    io::{self, prelude::BufReadExt, BufReader},
    stream::StreamExt,
};
use clap::Parser;
use line_index::{
    async_file::{AsyncFileAccessor, AsyncLineReader, AsyncReadRange},
    bootstrap::bootstrap,
    config::Config,
    Error,
};
use log::{error, info, LevelFilter, Log, Metadata, Record};

/// Writes log records to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logger(level: LevelFilter) {
    // Only fails if a logger was already installed
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Failure reply for a single request
#[derive(Debug, PartialEq, Eq)]
enum Rejection {
    /// The request does not name a line, or names a negative one
    NotFound(String),
    /// The line number is beyond the last indexed line
    TooLarge { line: i64, size: u64 },
    /// The line could not be read from the file
    Failed(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NotFound(query) => write!(f, "not found: {}", query),
            Rejection::TooLarge { line, size } => {
                write!(f, "too large: line {}, file has {} lines", line, size)
            }
            Rejection::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}

async fn respond<A: AsyncReadRange + Sync>(
    reader: &AsyncLineReader<A>,
    query: &str,
) -> Result<String, Rejection> {
    let query = query.trim();
    let line: i64 = query
        .parse()
        .map_err(|_| Rejection::NotFound(query.to_string()))?;

    match reader.read_line(line).await {
        Ok(text) => Ok(text),
        Err(Error::OutOfRange { line, .. }) if line < 0 => {
            Err(Rejection::NotFound(line.to_string()))
        }
        Err(Error::OutOfRange { line, size }) => Err(Rejection::TooLarge { line, size }),
        Err(e) => {
            error!("Reading line {} failed: {}", line, e);
            Err(Rejection::Failed(e.to_string()))
        }
    }
}

async fn answer<A: AsyncReadRange + Sync>(reader: &AsyncLineReader<A>, query: &str) {
    match respond(reader, query).await {
        Ok(text) => println!("{}", text),
        Err(rejection) => eprintln!("{}", rejection),
    }
}

#[async_std::main]
async fn main() {
    let config = Config::parse();
    init_logger(config.log_level);

    info!("Application starting");

    let reader = match bootstrap(&config) {
        Ok(reader) => reader,
        Err(e) => {
            error!("Application ended abnormally: {}", e);
            process::exit(e.exit_code());
        }
    };

    let reader = AsyncLineReader::<AsyncFileAccessor>::from(&reader);

    if !config.lines.is_empty() {
        for query in &config.lines {
            answer(&reader, query).await;
        }
        return;
    }

    let mut queries = BufReader::new(io::stdin()).lines();
    while let Some(query) = queries.next().await {
        match query {
            Ok(query) if query.trim().is_empty() => continue,
            Ok(query) => answer(&reader, &query).await,
            Err(e) => {
                error!("Reading requests failed: {}", e);
                break;
            }
        }
    }
}

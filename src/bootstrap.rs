use std::sync::Arc;

use log::{debug, error, info};

use crate::{config::Config, error::Error, file::FileAccessor, reader::LineReader, Result};

/// Validate the configured file and build its index. The returned reader is the only owner of
/// the freshly built index; nothing is published if any step fails.
///
/// All errors returned here are fatal and have to stop the process before it serves requests.
pub fn bootstrap(config: &Config) -> Result<LineReader<FileAccessor>> {
    debug!("Supplied arguments are [{:?}]", config);

    let path = config.file.as_ref().ok_or_else(|| {
        error!("No file path was supplied");
        Error::ArgumentMissing
    })?;

    let accessor = FileAccessor::new(path);
    if !accessor.is_valid() {
        return Err(Error::FileNotFound(path.clone()));
    }

    let index = accessor.build_index(&config.builder())?;
    info!(
        "Indexed [{}] lines of {}",
        index.size(),
        accessor.path().display()
    );

    Ok(LineReader::new(accessor, Arc::new(index)))
}

//! Retrieval of divergent remote files into the local mirror directory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sshdiff_core::RemoteChannel;

use crate::error::{io_err, CompareError};

/// Copy `remote_path` into `destination`, creating parent directories and
/// overwriting any existing file. Returns the number of bytes written.
///
/// A partially written destination is removed on failure.
pub fn retrieve(
    channel: &mut dyn RemoteChannel,
    remote_path: &str,
    destination: &Path,
) -> Result<u64, CompareError> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let file = File::create(destination).map_err(|e| io_err(destination, e))?;
    let mut sink = BufWriter::new(file);

    let copied = match channel.fetch(remote_path, &mut sink) {
        Ok(copied) => copied,
        Err(err) => {
            drop(sink);
            let _ = std::fs::remove_file(destination);
            return Err(err.into());
        }
    };

    if let Err(e) = sink.flush() {
        drop(sink);
        let _ = std::fs::remove_file(destination);
        return Err(io_err(destination, e));
    }

    tracing::debug!(
        "retrieved {remote_path} -> {} ({copied} bytes)",
        destination.display()
    );
    Ok(copied)
}

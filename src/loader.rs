use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Errors raised before the engine starts: reading the program or the config.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Read at most `max_len` bytes of program text from `path`.
///
/// Anything past the ceiling is dropped with a warning.
pub fn load_program(path: &Path, max_len: usize) -> Result<Vec<u8>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let mut buf = Vec::new();
    file.by_ref()
        .take(max_len as u64)
        .read_to_end(&mut buf)
        .map_err(io_err)?;

    let mut probe = [0u8; 1];
    if file.read(&mut probe).map_err(io_err)? > 0 {
        warn!(
            path = %path.display(),
            max_len,
            "program exceeds the maximum size and was truncated"
        );
    }

    debug!(path = %path.display(), len = buf.len(), "loaded program");
    Ok(buf)
}

/// Apply the same ceiling to program text given inline.
pub fn inline_program(code: String, max_len: usize) -> Vec<u8> {
    let mut bytes = code.into_bytes();
    if bytes.len() > max_len {
        warn!(len = bytes.len(), max_len, "inline program truncated");
        bytes.truncate(max_len);
    }
    bytes
}

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cross_xdg::BaseDirs;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::engine::EofPolicy;
use crate::loader::LoadError;

/// Tape length used when nothing else is configured.
pub const DEFAULT_TAPE_SIZE: usize = 100_000;

/// Largest program the loader reads; longer sources are truncated.
pub const DEFAULT_MAX_PROGRAM_SIZE: usize = 1_000_000;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CBF_CONFIG";

const CONFIG_FILE_NAME: &str = "cbf.toml";

/// Contents of `cbf.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub engine: EngineSection,
    pub loader: LoaderSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSection {
    pub tape_size: Option<usize>,
    pub eof: Option<EofPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderSection {
    pub max_program_size: Option<usize>,
}

/// One layer of optional settings (command-line flags or environment).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub tape_size: Option<usize>,
    pub eof: Option<EofPolicy>,
    pub max_program_size: Option<usize>,
}

/// Fully resolved settings handed to the loader and engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub tape_size: usize,
    pub eof: EofPolicy,
    pub max_program_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            eof: EofPolicy::default(),
            max_program_size: DEFAULT_MAX_PROGRAM_SIZE,
        }
    }
}

impl Settings {
    /// Resolve: flags -> env -> config file -> defaults.
    pub fn resolve(flags: Overrides, env: Overrides, file: &FileConfig) -> Self {
        let defaults = Settings::default();
        Self {
            tape_size: flags
                .tape_size
                .or(env.tape_size)
                .or(file.engine.tape_size)
                .unwrap_or(defaults.tape_size),
            eof: flags
                .eof
                .or(env.eof)
                .or(file.engine.eof)
                .unwrap_or(defaults.eof),
            max_program_size: flags
                .max_program_size
                .or(env.max_program_size)
                .or(file.loader.max_program_size)
                .unwrap_or(defaults.max_program_size),
        }
    }
}

/// Read overrides from `CBF_TAPE_SIZE`, `CBF_EOF` and `CBF_MAX_PROGRAM_SIZE`.
/// Unparseable values are ignored with a warning.
pub fn env_overrides() -> Overrides {
    overrides_from(|key| env::var(key).ok())
}

fn overrides_from(lookup: impl Fn(&str) -> Option<String>) -> Overrides {
    fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
        let raw = lookup(key)?;
        match raw.trim().parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(key, value = %raw, "ignoring unparseable environment value");
                None
            }
        }
    }

    Overrides {
        tape_size: parsed(&lookup, "CBF_TAPE_SIZE"),
        eof: parsed(&lookup, "CBF_EOF"),
        max_program_size: parsed(&lookup, "CBF_MAX_PROGRAM_SIZE"),
    }
}

/// Location of the config file: `$CBF_CONFIG` if set, otherwise
/// `cbf.toml` under the XDG config home.
pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }

    // On Linux: /home/<user>/.config
    // On Windows: C:\Users\<user>\.config
    // On macOS: /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE_NAME);
    Some(path)
}

/// Load the config file at `path`. A missing file yields the defaults.
pub fn load_file(path: &Path) -> Result<FileConfig, LoadError> {
    let content = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(FileConfig::default());
        }
        Err(e) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    debug!(path = %path.display(), "loading config file");
    toml::from_str(&content).map_err(|e| LoadError::Config {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load whichever config file [`config_path`] points at.
pub fn load() -> Result<FileConfig, LoadError> {
    match config_path() {
        Some(path) => load_file(&path),
        None => Ok(FileConfig::default()),
    }
}

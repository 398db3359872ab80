use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::settings::{ParticleSettings, SettingsError};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot access settings file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed settings file '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings in '{}': {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: SettingsError,
    },
}

/// Write `settings` as pretty-printed JSON, replacing any existing file.
///
/// Settings that fail validation are not written.
pub fn save_settings(path: impl AsRef<Path>, settings: &ParticleSettings) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    settings.validate().map_err(|source| PersistenceError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    let json = serde_json::to_string_pretty(settings).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json + "\n").map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("saved settings to {}", path.display());
    Ok(())
}

/// Read and validate settings from a JSON file.
///
/// The formula is returned as stored; it is compiled only when an emitter
/// activates it.
pub fn load_settings(path: impl AsRef<Path>) -> Result<ParticleSettings, PersistenceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: ParticleSettings =
        serde_json::from_str(&text).map_err(|source| PersistenceError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    settings.validate().map_err(|source| PersistenceError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded settings from {}", path.display());
    Ok(settings)
}

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Files looked up in the working directory when `--config` is absent, first match wins.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["buswatch.toml", "buswatch.json"];

/// Reads `--config` when given, else the first of `buswatch.toml` and
/// `buswatch.json` found in the working directory. No file is not an error.
///
/// # Errors
///
/// Returns an error when the chosen file cannot be read or decoded.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let chosen = match path {
        Some(path) => Some(PathBuf::from(path)),
        None => DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists()),
    };
    chosen.map(|path| load_config_file(&path)).transpose()
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    debug!("Loading config from {}", path.display());
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext @ ("toml" | "json")) => ext,
        Some(ext) => {
            return Err(AppError::config(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }));
        }
        None => return Err(AppError::config(ConfigError::MissingExtension)),
    };

    let content = std::fs::read_to_string(path).map_err(|source| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })
    })?;

    let parsed = if ext == "toml" {
        toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(&content).map_err(|source| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source,
        })
    };
    parsed.map_err(AppError::config)
}

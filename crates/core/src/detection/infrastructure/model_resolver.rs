use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::APP_DATA_DIR_NAME;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("model file {name} not found (searched: {searched})")]
    NotFound { name: String, searched: String },
}

/// Resolve the weights file by name.
///
/// Resolution order:
/// 1. Working directory
/// 2. Directory containing the executable (pre-packaged installs)
/// 3. Platform data directory (`<data dir>/YOLO Processor/models/`)
pub fn resolve(name: &str) -> Result<PathBuf, ModelResolveError> {
    resolve_in(name, &search_dirs())
}

/// Returns the first `dir/name` that exists as a file.
pub fn resolve_in(name: &str, dirs: &[PathBuf]) -> Result<PathBuf, ModelResolveError> {
    for dir in dirs {
        let candidate = dir.join(name);
        if candidate.is_file() {
            log::debug!("Resolved model {name} at {}", candidate.display());
            return Ok(candidate);
        }
    }

    Err(ModelResolveError::NotFound {
        name: name.to_string(),
        searched: dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    if let Some(data_dir) = model_data_dir() {
        dirs.push(data_dir);
    }
    dirs
}

/// Platform-specific model directory.
///
/// - macOS: `~/Library/Application Support/YOLO Processor/models/`
/// - Linux: `$XDG_DATA_HOME/YOLO Processor/models/` or `~/.local/share/YOLO Processor/models/`
/// - Windows: `%APPDATA%/YOLO Processor/models/`
pub fn model_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DATA_DIR_NAME).join("models"))
}

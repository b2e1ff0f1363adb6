use std::path::{Path, PathBuf};

use super::constants::{IMAGE_OUTPUT_NAME, VIDEO_OUTPUT_NAME};

/// Where annotated results land.
///
/// Both files are overwritten on every run without confirmation. The
/// application always uses [`OutputPaths::default`], which resolves them
/// against the working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub video: PathBuf,
    pub image: PathBuf,
}

impl OutputPaths {
    /// Places both fixed file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            video: dir.join(VIDEO_OUTPUT_NAME),
            image: dir.join(IMAGE_OUTPUT_NAME),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            video: PathBuf::from(VIDEO_OUTPUT_NAME),
            image: PathBuf::from(IMAGE_OUTPUT_NAME),
        }
    }
}

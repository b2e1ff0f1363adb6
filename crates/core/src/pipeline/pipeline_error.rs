use std::path::PathBuf;

use thiserror::Error;

use crate::shared::constants::{
    STATUS_IMAGE_OPEN_FAILED, STATUS_VIDEO_OPEN_FAILED, STATUS_VIDEO_WRITER_FAILED,
};
use crate::shared::source::SourceKind;

/// Why a run stopped before producing its output.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not open {} {}: {detail}", .kind.noun(), .path.display())]
    SourceOpen {
        kind: SourceKind,
        path: PathBuf,
        detail: String,
    },

    #[error("could not create output video {}: {detail}", .path.display())]
    WriterOpen { path: PathBuf, detail: String },

    #[error("inference failed on frame {frame}: {detail}")]
    Inference { frame: usize, detail: String },

    #[error("could not write {}: {detail}", .path.display())]
    OutputWrite { path: PathBuf, detail: String },
}

impl PipelineError {
    /// Text for the status label.
    pub fn status_message(&self) -> String {
        match self {
            PipelineError::SourceOpen {
                kind: SourceKind::Video,
                ..
            } => STATUS_VIDEO_OPEN_FAILED.to_string(),
            PipelineError::SourceOpen {
                kind: SourceKind::Image,
                ..
            } => STATUS_IMAGE_OPEN_FAILED.to_string(),
            PipelineError::WriterOpen { .. } => STATUS_VIDEO_WRITER_FAILED.to_string(),
            PipelineError::Inference { detail, .. } => {
                format!("Error: Detection failed: {detail}")
            }
            PipelineError::OutputWrite { path, detail } => {
                format!("Error: Could not write {}: {detail}", path.display())
            }
        }
    }
}

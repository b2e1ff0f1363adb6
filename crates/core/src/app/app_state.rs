use std::path::{Path, PathBuf};

use crate::app::command::Command;
use crate::pipeline::run_observer::RunObserver;
use crate::rendering::infrastructure::preview_scaler::scale_to_fit;
use crate::shared::constants::{
    PREVIEW_HEIGHT, PREVIEW_WIDTH, STATUS_INSTRUCTIONS, STATUS_NO_SOURCE,
};
use crate::shared::frame::Frame;
use crate::shared::output_paths::OutputPaths;
use crate::shared::source::{RunTarget, SourceKind, SourceSelection};
use crate::video::domain::media_factory::MediaFactory;

/// Everything the window shows, kept outside the toolkit so it can be
/// driven headlessly.
pub struct AppState {
    selection: SourceSelection,
    status: String,
    preview: Option<Frame>,
    outputs: OutputPaths,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_outputs(OutputPaths::default())
    }

    pub fn with_outputs(outputs: OutputPaths) -> Self {
        Self {
            selection: SourceSelection::new(),
            status: STATUS_INSTRUCTIONS.to_string(),
            preview: None,
            outputs,
        }
    }

    pub fn selection(&self) -> &SourceSelection {
        &self.selection
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    /// Current preview, already fitted to the preview panel.
    pub fn preview(&self) -> Option<&Frame> {
        self.preview.as_ref()
    }

    pub fn outputs(&self) -> &OutputPaths {
        &self.outputs
    }

    /// Applies a command. Only [`Command::Run`] can return something other
    /// than [`RunTarget::None`]; the caller then hands that target to a
    /// [`crate::pipeline::processor::Processor`].
    pub fn handle(&mut self, command: Command, media: &dyn MediaFactory) -> RunTarget {
        match command {
            Command::BrowseVideo(Some(path)) => self.select(SourceKind::Video, path, media),
            Command::BrowseImage(Some(path)) => self.select(SourceKind::Image, path, media),
            Command::BrowseVideo(None) | Command::BrowseImage(None) => {}
            Command::Drop(paths) => {
                for path in paths {
                    match SourceKind::classify(&path) {
                        Some(kind) => self.select(kind, path, media),
                        None => log::debug!("Ignoring dropped file {}", path.display()),
                    }
                }
            }
            Command::Run => {
                let target = self.selection.run_target();
                if target == RunTarget::None {
                    self.status = STATUS_NO_SOURCE.to_string();
                }
                return target;
            }
        }
        RunTarget::None
    }

    fn select(&mut self, kind: SourceKind, path: PathBuf, media: &dyn MediaFactory) {
        log::info!("Selected {} {}", kind.noun(), path.display());
        match first_frame(kind, &path, media) {
            Ok(frame) => self.preview = Some(fit_preview(&frame)),
            Err(e) => log::debug!("No preview for {}: {e}", path.display()),
        }
        self.selection.set(kind, path);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunObserver for AppState {
    fn frame(&mut self, frame: &Frame) {
        self.preview = Some(fit_preview(frame));
    }

    fn status(&mut self, message: &str) {
        self.status = message.to_string();
    }
}

fn fit_preview(frame: &Frame) -> Frame {
    scale_to_fit(frame, PREVIEW_WIDTH, PREVIEW_HEIGHT)
}

/// Decodes the representative frame of a source: the first frame of a video
/// or the image itself.
pub fn first_frame(
    kind: SourceKind,
    path: &Path,
    media: &dyn MediaFactory,
) -> Result<Frame, Box<dyn std::error::Error>> {
    let mut reader = match kind {
        SourceKind::Video => media.video_reader(),
        SourceKind::Image => media.image_reader(),
    };
    reader.open(path)?;
    let frame = reader.frames().next();
    reader.close();
    frame.ok_or("no decodable frame")?
}

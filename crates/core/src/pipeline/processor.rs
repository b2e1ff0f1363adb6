use std::path::Path;
use std::sync::atomic::AtomicBool;

use crate::detection::domain::object_detector::ObjectDetector;
use crate::detection::domain::run_config::RunConfig;
use crate::pipeline::pipeline_error::PipelineError;
use crate::pipeline::pipeline_logger::LogPipelineLogger;
use crate::pipeline::process_image_use_case::ProcessImageUseCase;
use crate::pipeline::process_video_use_case::{ProcessVideoUseCase, VideoRunSummary};
use crate::pipeline::run_observer::RunObserver;
use crate::rendering::domain::annotation_renderer::AnnotationRenderer;
use crate::shared::constants::{STATUS_NO_SOURCE, STATUS_PROCESSING_IMAGE, STATUS_PROCESSING_VIDEO};
use crate::shared::output_paths::OutputPaths;
use crate::shared::source::RunTarget;
use crate::video::domain::media_factory::MediaFactory;

/// Owns the long-lived pieces of a run: the loaded model, the renderer and
/// the media backend.
///
/// The model is loaded once at startup and reused for every run.
pub struct Processor {
    detector: Box<dyn ObjectDetector>,
    renderer: Box<dyn AnnotationRenderer>,
    media: Box<dyn MediaFactory>,
    config: RunConfig,
}

impl Processor {
    pub fn new(
        detector: Box<dyn ObjectDetector>,
        renderer: Box<dyn AnnotationRenderer>,
        media: Box<dyn MediaFactory>,
        config: RunConfig,
    ) -> Self {
        Self {
            detector,
            renderer,
            media,
            config,
        }
    }

    /// Runs whichever pipeline `target` selects and returns the final status
    /// text, which is also the last status sent to `observer`.
    ///
    /// Failures never escape as errors; they become the returned status.
    pub fn execute(
        &mut self,
        target: &RunTarget,
        outputs: &OutputPaths,
        observer: &mut dyn RunObserver,
        quit: &AtomicBool,
    ) -> String {
        let status = match target {
            RunTarget::None => STATUS_NO_SOURCE.to_string(),
            RunTarget::Video(input) => {
                observer.status(STATUS_PROCESSING_VIDEO);
                match self.process_video(input, &outputs.video, observer, quit) {
                    Ok(summary) => {
                        log::info!(
                            "Video done: {} frames written{}",
                            summary.frames_written,
                            if summary.cancelled { " (quit early)" } else { "" }
                        );
                        format!("Processed video saved as {}", outputs.video.display())
                    }
                    Err(e) => failure_status(&e),
                }
            }
            RunTarget::Image(input) => {
                observer.status(STATUS_PROCESSING_IMAGE);
                match self.process_image(input, &outputs.image, observer) {
                    Ok(()) => format!("Processed image saved as {}", outputs.image.display()),
                    Err(e) => failure_status(&e),
                }
            }
        };

        observer.status(&status);
        status
    }

    fn process_video(
        &mut self,
        input: &Path,
        output: &Path,
        observer: &mut dyn RunObserver,
        quit: &AtomicBool,
    ) -> Result<VideoRunSummary, PipelineError> {
        let mut logger = LogPipelineLogger::default();
        let mut use_case = ProcessVideoUseCase::new(
            self.media.video_reader(),
            self.media.video_writer(),
            self.detector.as_mut(),
            self.renderer.as_ref(),
            &self.config,
        );
        use_case.execute(input, output, observer, quit, &mut logger)
    }

    fn process_image(
        &mut self,
        input: &Path,
        output: &Path,
        observer: &mut dyn RunObserver,
    ) -> Result<(), PipelineError> {
        let mut logger = LogPipelineLogger::default();
        let mut use_case = ProcessImageUseCase::new(
            self.media.image_reader(),
            self.media.image_writer(),
            self.detector.as_mut(),
            self.renderer.as_ref(),
            &self.config,
        );
        use_case.execute(input, output, observer, &mut logger)?;
        logger.summary();
        Ok(())
    }
}

fn failure_status(error: &PipelineError) -> String {
    log::error!("Run failed: {error}");
    error.status_message()
}

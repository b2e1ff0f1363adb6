use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::detection::domain::object_detector::ObjectDetector;
use crate::detection::domain::run_config::RunConfig;
use crate::pipeline::pipeline_error::PipelineError;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::process_image_use_case::elapsed_ms;
use crate::pipeline::run_observer::RunObserver;
use crate::rendering::domain::annotation_renderer::AnnotationRenderer;
use crate::shared::source::SourceKind;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

/// Counts reported at the end of a video run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VideoRunSummary {
    pub frames_read: usize,
    pub frames_written: usize,
    /// The quit flag stopped the loop before end-of-stream.
    pub cancelled: bool,
}

/// Frame-by-frame video pipeline: read → detect → render → write → show.
///
/// One frame is fully handled before the next is decoded. The quit flag is
/// checked once per frame, after that frame has been shown.
pub struct ProcessVideoUseCase<'a> {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    detector: &'a mut dyn ObjectDetector,
    renderer: &'a dyn AnnotationRenderer,
    config: &'a RunConfig,
}

impl<'a> ProcessVideoUseCase<'a> {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        detector: &'a mut dyn ObjectDetector,
        renderer: &'a dyn AnnotationRenderer,
        config: &'a RunConfig,
    ) -> Self {
        Self {
            reader,
            writer,
            detector,
            renderer,
            config,
        }
    }

    /// Runs the whole video. Reader and writer are closed on every path out
    /// of this function.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
        observer: &mut dyn RunObserver,
        quit: &AtomicBool,
        logger: &mut dyn PipelineLogger,
    ) -> Result<VideoRunSummary, PipelineError> {
        let metadata = self
            .reader
            .open(input_path)
            .map_err(|e| PipelineError::SourceOpen {
                kind: SourceKind::Video,
                path: input_path.to_path_buf(),
                detail: e.to_string(),
            })?;

        logger.info(&format!(
            "Processing {} ({}x{} @ {:.2} fps, {} codec)",
            input_path.display(),
            metadata.width,
            metadata.height,
            metadata.fps,
            metadata.codec
        ));

        if let Err(e) = self.writer.open(output_path, &metadata) {
            self.reader.close();
            let _ = self.writer.close();
            return Err(PipelineError::WriterOpen {
                path: output_path.to_path_buf(),
                detail: e.to_string(),
            });
        }

        let result = self.run_frames(
            output_path,
            metadata.total_frames,
            observer,
            quit,
            logger,
        );

        self.reader.close();
        let closed = self.writer.close().map_err(|e| PipelineError::OutputWrite {
            path: output_path.to_path_buf(),
            detail: e.to_string(),
        });

        let summary = result?;
        closed?;

        logger.summary();
        Ok(summary)
    }

    fn run_frames(
        &mut self,
        output_path: &Path,
        total_frames: usize,
        observer: &mut dyn RunObserver,
        quit: &AtomicBool,
        logger: &mut dyn PipelineLogger,
    ) -> Result<VideoRunSummary, PipelineError> {
        let config = self.config;
        let renderer = self.renderer;
        let detector = &mut *self.detector;
        let writer = &mut self.writer;

        let mut summary = VideoRunSummary::default();
        let mut frames = self.reader.frames();

        loop {
            let started = Instant::now();
            let frame = match frames.next() {
                Some(Ok(frame)) => frame,
                Some(Err(e)) => {
                    log::warn!(
                        "Decode stopped after {} frames: {e}",
                        summary.frames_read
                    );
                    break;
                }
                None => break,
            };
            summary.frames_read += 1;
            logger.timing("read", elapsed_ms(started));

            let started = Instant::now();
            let detections =
                detector
                    .detect(&frame, config)
                    .map_err(|e| PipelineError::Inference {
                        frame: frame.index(),
                        detail: e.to_string(),
                    })?;
            logger.timing("detect", elapsed_ms(started));
            logger.metric("detections", detections.len() as f64);

            let started = Instant::now();
            let annotated = renderer.render(&frame, &detections);
            logger.timing("render", elapsed_ms(started));

            let started = Instant::now();
            writer
                .write(&annotated)
                .map_err(|e| PipelineError::OutputWrite {
                    path: output_path.to_path_buf(),
                    detail: e.to_string(),
                })?;
            summary.frames_written += 1;
            logger.timing("write", elapsed_ms(started));

            observer.frame(&annotated);
            logger.progress(summary.frames_read, total_frames);

            if quit.load(Ordering::Relaxed) {
                log::info!("Quit requested after {} frames", summary.frames_read);
                summary.cancelled = true;
                break;
            }
        }

        logger.info(&format!(
            "Wrote {} of {} frames to {}",
            summary.frames_written,
            summary.frames_read,
            output_path.display()
        ));
        Ok(summary)
    }
}

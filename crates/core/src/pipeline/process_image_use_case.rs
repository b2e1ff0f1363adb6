use std::path::Path;
use std::time::Instant;

use crate::detection::domain::object_detector::ObjectDetector;
use crate::detection::domain::run_config::RunConfig;
use crate::pipeline::pipeline_error::PipelineError;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::run_observer::RunObserver;
use crate::rendering::domain::annotation_renderer::AnnotationRenderer;
use crate::shared::frame::Frame;
use crate::shared::source::SourceKind;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

/// Single-image pipeline: read → detect → render → show → write.
pub struct ProcessImageUseCase<'a> {
    reader: Box<dyn VideoReader>,
    image_writer: Box<dyn ImageWriter>,
    detector: &'a mut dyn ObjectDetector,
    renderer: &'a dyn AnnotationRenderer,
    config: &'a RunConfig,
}

impl<'a> ProcessImageUseCase<'a> {
    pub fn new(
        reader: Box<dyn VideoReader>,
        image_writer: Box<dyn ImageWriter>,
        detector: &'a mut dyn ObjectDetector,
        renderer: &'a dyn AnnotationRenderer,
        config: &'a RunConfig,
    ) -> Self {
        Self {
            reader,
            image_writer,
            detector,
            renderer,
            config,
        }
    }

    /// Annotates `input_path` and saves it to `output_path`, overwriting.
    ///
    /// The annotated frame reaches the observer before the file is written,
    /// so a write failure still leaves the result on screen.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
        observer: &mut dyn RunObserver,
        logger: &mut dyn PipelineLogger,
    ) -> Result<(), PipelineError> {
        let started = Instant::now();
        let frame = self.decode(input_path);
        self.reader.close();
        let frame = frame?;
        logger.timing("read", elapsed_ms(started));

        let started = Instant::now();
        let detections = self
            .detector
            .detect(&frame, self.config)
            .map_err(|e| PipelineError::Inference {
                frame: 0,
                detail: e.to_string(),
            })?;
        logger.timing("detect", elapsed_ms(started));
        logger.metric("detections", detections.len() as f64);
        log::debug!("{} detections in {}", detections.len(), input_path.display());

        let started = Instant::now();
        let annotated = self.renderer.render(&frame, &detections);
        logger.timing("render", elapsed_ms(started));

        observer.frame(&annotated);

        let started = Instant::now();
        self.image_writer
            .write(output_path, &annotated)
            .map_err(|e| PipelineError::OutputWrite {
                path: output_path.to_path_buf(),
                detail: e.to_string(),
            })?;
        logger.timing("write", elapsed_ms(started));
        logger.progress(1, 1);
        logger.info(&format!("Saved {}", output_path.display()));

        Ok(())
    }

    fn decode(&mut self, input_path: &Path) -> Result<Frame, PipelineError> {
        let open_error = |detail: String| PipelineError::SourceOpen {
            kind: SourceKind::Image,
            path: input_path.to_path_buf(),
            detail,
        };

        self.reader
            .open(input_path)
            .map_err(|e| open_error(e.to_string()))?;

        match self.reader.frames().next() {
            Some(Ok(frame)) => Ok(frame),
            Some(Err(e)) => Err(open_error(e.to_string())),
            None => Err(open_error("no frames in image".to_string())),
        }
    }
}

pub(crate) fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::pipeline::test_support::*;
    use crate::rendering::infrastructure::box_annotation_renderer::BoxAnnotationRenderer;
    use crate::video::domain::media_factory::MediaFactory;
    use crate::video::infrastructure::ffmpeg_media_factory::FfmpegMediaFactory;
    use std::path::PathBuf;

    fn run(
        media: &dyn MediaFactory,
        detector: &mut StubDetector,
        observer: &mut RecordingObserver,
    ) -> Result<(), PipelineError> {
        let config = RunConfig::default();
        let renderer = MarkingRenderer;
        let mut uc = ProcessImageUseCase::new(
            media.image_reader(),
            media.image_writer(),
            detector,
            &renderer,
            &config,
        );
        uc.execute(
            Path::new("in.jpg"),
            Path::new("output.jpg"),
            observer,
            &mut NullPipelineLogger,
        )
    }

    #[test]
    fn test_writes_annotated_frame_to_output() {
        let media = StubMediaFactory::with_image(solid_frame(0, 10, 6, 50));
        let mut detector = StubDetector {
            detections: vec![detection(0, 0.9), detection(1, 0.5)],
            ..Default::default()
        };
        let mut observer = RecordingObserver::default();

        run(&media, &mut detector, &mut observer).unwrap();

        let probe = media.probe.lock().unwrap();
        assert_eq!(probe.images_written.len(), 1);
        let (path, frame) = &probe.images_written[0];
        assert_eq!(path, &PathBuf::from("output.jpg"));
        assert_eq!((frame.width(), frame.height()), (10, 6));
        assert_eq!(frame.data()[0], 202);
        assert_eq!(observer.frames, vec![frame.clone()]);
        assert!(!probe.reader_open);
    }

    #[test]
    fn test_open_failure_maps_to_image_open_error() {
        let media = StubMediaFactory {
            fail_reader_open: true,
            ..StubMediaFactory::with_image(solid_frame(0, 4, 4, 0))
        };
        let mut observer = RecordingObserver::default();

        let err = run(&media, &mut StubDetector::default(), &mut observer).unwrap_err();

        assert_eq!(err.status_message(), "Error: Could not open image.");
        assert!(observer.frames.is_empty());
        assert!(media.probe.lock().unwrap().images_written.is_empty());
    }

    #[test]
    fn test_decode_failure_maps_to_image_open_error() {
        let media = StubMediaFactory {
            image_frames: vec![Err("truncated".into())],
            ..Default::default()
        };
        let err = run(
            &media,
            &mut StubDetector::default(),
            &mut RecordingObserver::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::SourceOpen {
                kind: SourceKind::Image,
                ..
            }
        ));
        assert!(!media.probe.lock().unwrap().reader_open);
    }

    #[test]
    fn test_inference_failure_writes_nothing() {
        let media = StubMediaFactory::with_image(solid_frame(0, 4, 4, 0));
        let mut detector = StubDetector {
            fail_at: Some(0),
            ..Default::default()
        };
        let mut observer = RecordingObserver::default();

        let err = run(&media, &mut detector, &mut observer).unwrap_err();

        assert!(matches!(err, PipelineError::Inference { .. }));
        assert!(observer.frames.is_empty());
        assert!(media.probe.lock().unwrap().images_written.is_empty());
    }

    #[test]
    fn test_real_image_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("road.png");
        image::RgbImage::from_pixel(123, 77, image::Rgb([90, 90, 90]))
            .save(&input)
            .unwrap();
        let output = dir.path().join("output.jpg");

        let media = FfmpegMediaFactory::new();
        let config = RunConfig::default();
        let renderer = BoxAnnotationRenderer::new();
        let mut detector = StubDetector {
            detections: vec![detection(0, 0.8)],
            ..Default::default()
        };
        let mut uc = ProcessImageUseCase::new(
            media.image_reader(),
            media.image_writer(),
            &mut detector,
            &renderer,
            &config,
        );
        uc.execute(
            &input,
            &output,
            &mut RecordingObserver::default(),
            &mut NullPipelineLogger,
        )
        .unwrap();

        let saved = image::open(&output).unwrap();
        assert_eq!((saved.width(), saved.height()), (123, 77));
    }
}

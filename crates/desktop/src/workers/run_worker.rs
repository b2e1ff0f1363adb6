use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use yolo_processor_core::pipeline::processor::Processor;
use yolo_processor_core::pipeline::run_observer::RunObserver;
use yolo_processor_core::rendering::infrastructure::preview_scaler::scale_to_fit;
use yolo_processor_core::shared::constants::{PREVIEW_HEIGHT, PREVIEW_WIDTH};
use yolo_processor_core::shared::frame::Frame;
use yolo_processor_core::shared::output_paths::OutputPaths;
use yolo_processor_core::shared::source::RunTarget;

/// A few frames of slack so decoding overlaps with repainting without
/// letting a slow UI pile up full frames in memory.
const CHANNEL_CAPACITY: usize = 4;

/// Messages sent from the worker thread to the UI.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Annotated frame, already fitted to the preview panel.
    Frame(Frame),
    Status(String),
    Finished,
}

/// Forwards run events to the UI thread.
struct ChannelObserver {
    tx: Sender<WorkerMessage>,
}

impl RunObserver for ChannelObserver {
    fn frame(&mut self, frame: &Frame) {
        let preview = scale_to_fit(frame, PREVIEW_WIDTH, PREVIEW_HEIGHT);
        let _ = self.tx.send(WorkerMessage::Frame(preview));
    }

    fn status(&mut self, message: &str) {
        let _ = self.tx.send(WorkerMessage::Status(message.to_string()));
    }
}

/// Spawn a background run. Returns the channel receiver and the quit flag.
pub fn spawn(
    processor: Arc<Mutex<Processor>>,
    target: RunTarget,
    outputs: OutputPaths,
) -> (Receiver<WorkerMessage>, Arc<AtomicBool>) {
    let (tx, rx) = crossbeam_channel::bounded::<WorkerMessage>(CHANNEL_CAPACITY);
    let quit = Arc::new(AtomicBool::new(false));
    let quit_clone = quit.clone();

    thread::spawn(move || {
        let mut observer = ChannelObserver { tx: tx.clone() };
        // A panic in an earlier run poisons the lock; the processor holds
        // no cross-run state, so the next run can still use it.
        let mut guard = processor.lock().unwrap_or_else(|poisoned| {
            log::warn!("Recovering processor after a panicked run");
            poisoned.into_inner()
        });
        guard.execute(&target, &outputs, &mut observer, &quit_clone);
        let _ = tx.send(WorkerMessage::Finished);
    });

    (rx, quit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use yolo_processor_core::detection::domain::object_detector::ObjectDetector;
    use yolo_processor_core::detection::domain::run_config::RunConfig;
    use yolo_processor_core::rendering::infrastructure::box_annotation_renderer::BoxAnnotationRenderer;
    use yolo_processor_core::shared::detection::Detection;
    use yolo_processor_core::video::infrastructure::ffmpeg_media_factory::FfmpegMediaFactory;

    struct NoDetections;

    impl ObjectDetector for NoDetections {
        fn detect(
            &mut self,
            _frame: &Frame,
            _config: &RunConfig,
        ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            Ok(Vec::new())
        }
    }

    fn processor() -> Arc<Mutex<Processor>> {
        Arc::new(Mutex::new(Processor::new(
            Box::new(NoDetections),
            Box::new(BoxAnnotationRenderer::new()),
            Box::new(FfmpegMediaFactory::new()),
            RunConfig::default(),
        )))
    }

    fn drain(rx: &Receiver<WorkerMessage>) -> Vec<WorkerMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = rx.recv_timeout(Duration::from_secs(30)) {
            let finished = matches!(message, WorkerMessage::Finished);
            messages.push(message);
            if finished {
                break;
            }
        }
        messages
    }

    #[test]
    fn test_image_run_streams_frame_then_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("road.png");
        image::RgbImage::from_pixel(64, 48, image::Rgb([40, 40, 40]))
            .save(&input)
            .unwrap();
        let outputs = OutputPaths::in_dir(dir.path());

        let (rx, _quit) = spawn(processor(), RunTarget::Image(input), outputs.clone());
        let messages = drain(&rx);

        let statuses: Vec<_> = messages
            .iter()
            .filter_map(|m| match m {
                WorkerMessage::Status(s) => Some(s.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(statuses.first().map(String::as_str), Some("Processing image..."));
        assert!(statuses.last().unwrap().starts_with("Processed image saved as"));

        let frame = messages
            .iter()
            .find_map(|m| match m {
                WorkerMessage::Frame(f) => Some(f),
                _ => None,
            })
            .unwrap();
        assert_eq!((frame.width(), frame.height()), (800, 600));
        assert!(matches!(messages.last(), Some(WorkerMessage::Finished)));
        assert!(outputs.image.exists());
    }

    #[test]
    fn test_run_after_panicked_run_still_processes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("road.png");
        image::RgbImage::from_pixel(32, 24, image::Rgb([90, 90, 90]))
            .save(&input)
            .unwrap();
        let outputs = OutputPaths::in_dir(dir.path());

        let shared = processor();
        let poisoner = shared.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("run panicked");
        })
        .join();
        assert!(shared.is_poisoned());

        let (rx, _quit) = spawn(shared, RunTarget::Image(input), outputs.clone());
        let messages = drain(&rx);

        assert!(messages.iter().any(
            |m| matches!(m, WorkerMessage::Status(s) if s.starts_with("Processed image saved as"))
        ));
        assert!(outputs.image.exists());
    }

    #[test]
    fn test_missing_image_reports_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::in_dir(dir.path());
        let (rx, _quit) = spawn(
            processor(),
            RunTarget::Image(dir.path().join("missing.jpg")),
            outputs.clone(),
        );

        let messages = drain(&rx);
        assert!(messages.iter().any(
            |m| matches!(m, WorkerMessage::Status(s) if s == "Error: Could not open image.")
        ));
        assert!(!outputs.image.exists());
    }
}

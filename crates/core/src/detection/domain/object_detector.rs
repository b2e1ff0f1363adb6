use crate::detection::domain::run_config::RunConfig;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Domain interface for object detection.
///
/// Implementations may hold mutable inference state (ONNX sessions run
/// through `&mut`), hence `&mut self`. For a fixed frame and configuration
/// the result is expected to be deterministic.
pub trait ObjectDetector: Send {
    fn detect(
        &mut self,
        frame: &Frame,
        config: &RunConfig,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}

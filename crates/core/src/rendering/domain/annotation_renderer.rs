use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Domain interface for drawing a detection set onto a frame.
///
/// Rendering is pure: the source frame is left untouched and a new frame
/// with the same dimensions and index is returned.
pub trait AnnotationRenderer: Send {
    fn render(&self, frame: &Frame, detections: &[Detection]) -> Frame;
}

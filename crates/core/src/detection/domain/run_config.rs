use crate::shared::constants::{
    DEFAULT_CONFIDENCE, DEFAULT_IOU_THRESHOLD, DEFAULT_MAX_DETECTIONS,
};

/// Detection thresholds, fixed for the lifetime of the application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunConfig {
    /// Candidates scoring below this are discarded before suppression.
    pub confidence: f32,
    /// Overlap above which the lower-scoring box is suppressed.
    pub iou_threshold: f32,
    /// When set, boxes of different classes may suppress each other.
    pub agnostic_nms: bool,
    pub max_detections: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            agnostic_nms: false,
            max_detections: DEFAULT_MAX_DETECTIONS,
        }
    }
}

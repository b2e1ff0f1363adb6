pub const MODEL_FILE_NAME: &str = "path_hole.onnx";
/// Folder under the platform data directory that may hold the weights.
pub const APP_DATA_DIR_NAME: &str = "YOLO Processor";

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

pub const VIDEO_OUTPUT_NAME: &str = "output.mp4";
pub const IMAGE_OUTPUT_NAME: &str = "output.jpg";

pub const DEFAULT_CONFIDENCE: f32 = 0.25;
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.45;
pub const DEFAULT_MAX_DETECTIONS: usize = 1000;

pub const STATUS_INSTRUCTIONS: &str = "Drag and drop a video or image file or click to browse";
pub const STATUS_NO_SOURCE: &str = "No video or image loaded. Please load a video or image first.";
pub const STATUS_VIDEO_OPEN_FAILED: &str = "Error: Could not open video.";
pub const STATUS_IMAGE_OPEN_FAILED: &str = "Error: Could not open image.";
pub const STATUS_VIDEO_WRITER_FAILED: &str = "Error: Could not create output video.";
pub const STATUS_PROCESSING_VIDEO: &str = "Processing video...";
pub const STATUS_PROCESSING_IMAGE: &str = "Processing image...";

pub const WINDOW_TITLE: &str = "YOLO Video Processor";
pub const WINDOW_WIDTH: f32 = 1000.0;
pub const WINDOW_HEIGHT: f32 = 745.0;

/// Logical size of the preview panel that thumbnails are fitted into.
pub const PREVIEW_WIDTH: u32 = 960;
pub const PREVIEW_HEIGHT: u32 = 600;

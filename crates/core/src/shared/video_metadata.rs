use std::path::PathBuf;

/// Frame rate used when a source does not report one.
const FALLBACK_FRAME_RATE: (i32, i32) = (30, 1);

#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Exact stream rate as numerator and denominator; `(0, 1)` when unknown.
    pub frame_rate: (i32, i32),
    /// Container-reported frame count; 0 when unknown.
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Rate the output stream is encoded at. NTSC rates such as 30000/1001
    /// pass through unchanged.
    pub fn output_frame_rate(&self) -> (i32, i32) {
        let (num, den) = self.frame_rate;
        if num > 0 && den > 0 {
            (num, den)
        } else {
            FALLBACK_FRAME_RATE
        }
    }
}

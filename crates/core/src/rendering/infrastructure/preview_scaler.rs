use crate::shared::frame::Frame;

/// Largest size with the source aspect ratio that fits in `max_w` × `max_h`.
///
/// May upscale. Never returns a zero dimension.
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (max_w.max(1), max_h.max(1));
    }
    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (w, h)
}

/// Resizes a frame to fit the preview area with a smooth (triangle) filter.
pub fn scale_to_fit(frame: &Frame, max_w: u32, max_h: u32) -> Frame {
    let (w, h) = fit_within(frame.width(), frame.height(), max_w, max_h);
    if (w, h) == (frame.width(), frame.height()) {
        return frame.clone();
    }
    let resized = image::imageops::resize(
        &frame.to_rgb_image(),
        w,
        h,
        image::imageops::FilterType::Triangle,
    );
    Frame::from_rgb_image(resized, frame.index())
}

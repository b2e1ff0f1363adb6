use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::rendering::domain::annotation_renderer::AnnotationRenderer;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

use super::font_loader::load_system_font;
use super::palette::class_color;

const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Minimum box outline width in pixels.
const MIN_LINE_WIDTH: u32 = 2;

/// Minimum label text height in pixels.
const MIN_FONT_SIZE: f32 = 12.0;

/// Draws Ultralytics-style annotations: a class-coloured outline per box and
/// a filled label tab carrying `"{label} {score}"`.
///
/// Line width and font size scale with the frame so annotations stay
/// legible on both thumbnails and 4K frames.
pub struct BoxAnnotationRenderer {
    font: Option<FontArc>,
}

impl BoxAnnotationRenderer {
    /// Uses the first available system font.
    pub fn new() -> Self {
        Self::with_font(load_system_font())
    }

    pub fn with_font(font: Option<FontArc>) -> Self {
        Self { font }
    }

    fn draw_box(&self, image: &mut RgbImage, det: &Detection, line_width: u32, font_size: f32) {
        let (img_w, img_h) = image.dimensions();
        let color = class_color(det.class_id);

        let x = det.x1.round().max(0.0) as i32;
        let y = det.y1.round().max(0.0) as i32;
        let w = (det.x2.round() as i32 - x).min(img_w as i32 - x);
        let h = (det.y2.round() as i32 - y).min(img_h as i32 - y);
        if w <= 0 || h <= 0 {
            return;
        }

        // Thick outline as nested 1px rectangles, growing inwards
        for inset in 0..line_width as i32 {
            let (iw, ih) = (w - 2 * inset, h - 2 * inset);
            if iw <= 0 || ih <= 0 {
                break;
            }
            draw_hollow_rect_mut(
                image,
                Rect::at(x + inset, y + inset).of_size(iw as u32, ih as u32),
                color,
            );
        }

        self.draw_label(image, &det.caption(), x, y, color, line_width, font_size);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_label(
        &self,
        image: &mut RgbImage,
        caption: &str,
        box_x: i32,
        box_y: i32,
        color: Rgb<u8>,
        line_width: u32,
        font_size: f32,
    ) {
        let (img_w, _) = image.dimensions();
        let scale = PxScale::from(font_size);
        let pad = line_width as i32;

        let (text_w, text_h) = match &self.font {
            Some(font) => text_size(scale, font, caption),
            // Rough glyph box so the tab still marks the label position
            None => (
                (caption.chars().count() as f32 * font_size * 0.6) as u32,
                font_size as u32,
            ),
        };
        let tab_w = (text_w as i32 + 2 * pad).min(img_w as i32 - box_x);
        let tab_h = text_h as i32 + 2 * pad;
        if tab_w <= 0 {
            return;
        }

        // Above the box, or inside it when there is no room at the top
        let tab_y = if box_y - tab_h >= 0 {
            box_y - tab_h
        } else {
            box_y
        };

        draw_filled_rect_mut(
            image,
            Rect::at(box_x, tab_y).of_size(tab_w as u32, tab_h as u32),
            color,
        );
        if let Some(font) = &self.font {
            draw_text_mut(
                image,
                TEXT_COLOR,
                box_x + pad,
                tab_y + pad,
                scale,
                font,
                caption,
            );
        }
    }
}

impl Default for BoxAnnotationRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationRenderer for BoxAnnotationRenderer {
    fn render(&self, frame: &Frame, detections: &[Detection]) -> Frame {
        if detections.is_empty() {
            return frame.clone();
        }

        let mut image = frame.to_rgb_image();
        let line_width = line_width(frame.width(), frame.height());
        let font_size = font_size(frame.width(), frame.height());
        for det in detections {
            self.draw_box(&mut image, det, line_width, font_size);
        }
        Frame::from_rgb_image(image, frame.index())
    }
}

/// `max(round((w + h) / 2 * 0.003), 2)`
fn line_width(width: u32, height: u32) -> u32 {
    let lw = ((width + height) as f32 / 2.0 * 0.003).round() as u32;
    lw.max(MIN_LINE_WIDTH)
}

/// `max(round((w + h) / 2 * 0.035), 12)`
fn font_size(width: u32, height: u32) -> f32 {
    ((width + height) as f32 / 2.0 * 0.035)
        .round()
        .max(MIN_FONT_SIZE)
}

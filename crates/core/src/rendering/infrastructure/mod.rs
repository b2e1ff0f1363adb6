pub mod box_annotation_renderer;
pub mod font_loader;
mod palette;
pub mod preview_scaler;

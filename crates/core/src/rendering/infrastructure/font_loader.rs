use std::path::Path;

use ab_glyph::FontArc;

/// Common TrueType locations, tried in order.
const FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
];

/// Loads the first system font that parses. `None` when nothing usable is
/// installed; labels are then drawn without glyphs.
pub fn load_system_font() -> Option<FontArc> {
    let font = FONT_CANDIDATES
        .iter()
        .find_map(|candidate| load_font(Path::new(candidate)));
    if font.is_none() {
        log::warn!("No system font found; detection labels will be drawn without text");
    }
    font
}

pub fn load_font(path: &Path) -> Option<FontArc> {
    let bytes = std::fs::read(path).ok()?;
    match FontArc::try_from_vec(bytes) {
        Ok(font) => {
            log::debug!("Using label font {}", path.display());
            Some(font)
        }
        Err(e) => {
            log::debug!("Skipping font {}: {e}", path.display());
            None
        }
    }
}

use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

/// The single dark theme the window uses.
pub fn app_theme() -> Theme {
    Theme::custom("YOLO Processor", dark_palette())
}

fn dark_palette() -> Palette {
    Palette {
        background: color!(0x1c, 0x1c, 0x1e),
        text: color!(0xcc, 0xcc, 0xcc),
        primary: color!(0x5e, 0x9f, 0xf5),
        success: color!(0x30, 0xd1, 0x58),
        warning: color!(0xff, 0xcc, 0x00),
        danger: color!(0xff, 0x45, 0x3a),
    }
}

/// Slightly lifted background for the preview panel.
pub fn surface_color(theme: &Theme) -> Color {
    let base = theme.extended_palette().background.base.color;
    Color {
        r: (base.r + 0.04).min(1.0),
        g: (base.g + 0.04).min(1.0),
        b: (base.b + 0.04).min(1.0),
        a: 1.0,
    }
}

pub fn muted_color(theme: &Theme) -> Color {
    Color {
        a: 0.6,
        ..theme.extended_palette().background.base.text
    }
}

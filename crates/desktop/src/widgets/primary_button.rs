use iced::border::Border;
use iced::widget::{button, text};
use iced::{Color, Element, Shadow, Theme, Vector};

const HOVER_DARKEN: f32 = 0.05;
const CORNER_RADIUS: f32 = 10.0;
const SHADOW_BLUR: f32 = 10.0;
const SHADOW_OFFSET_Y: f32 = 3.0;
const SHADOW_ALPHA: f32 = 0.25;
const DISABLED_ALPHA: f32 = 0.4;

/// Accent-coloured button. `on_press = None` renders it disabled.
pub fn primary_button<'a, Message: Clone + 'a>(
    label: &'a str,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    button(text(label).size(15))
        .on_press_maybe(on_press)
        .padding([10, 22])
        .style(|theme: &Theme, status: button::Status| {
            let base = theme.extended_palette().primary.base.color;
            match status {
                button::Status::Active => styled(base, 0.0),
                button::Status::Hovered => styled(base, 1.0),
                button::Status::Pressed => styled(base, 2.0),
                button::Status::Disabled => disabled(base),
            }
        })
        .into()
}

fn styled(base: Color, hover_amount: f32) -> button::Style {
    button::Style {
        background: Some(darken(base, hover_amount).into()),
        text_color: Color::WHITE,
        border: Border {
            radius: CORNER_RADIUS.into(),
            ..Border::default()
        },
        shadow: Shadow {
            color: Color::from_rgba(base.r, base.g, base.b, SHADOW_ALPHA),
            offset: Vector::new(0.0, SHADOW_OFFSET_Y),
            blur_radius: SHADOW_BLUR,
        },
        ..button::Style::default()
    }
}

fn disabled(base: Color) -> button::Style {
    button::Style {
        background: Some(Color { a: DISABLED_ALPHA, ..base }.into()),
        text_color: Color {
            a: 0.7,
            ..Color::WHITE
        },
        border: Border {
            radius: CORNER_RADIUS.into(),
            ..Border::default()
        },
        ..button::Style::default()
    }
}

fn darken(color: Color, amount: f32) -> Color {
    let shift = HOVER_DARKEN * amount;
    Color {
        r: (color.r - shift).max(0.0),
        g: (color.g - shift).max(0.0),
        b: (color.b - shift).max(0.0),
        a: 1.0,
    }
}

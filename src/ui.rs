// src/ui.rs
use iced::widget::{button, container};
use iced::{Background, Color, Theme, Vector};
use once_cell::sync::Lazy;

#[derive(Debug, Clone)]
pub struct Styles {
    pub bg: Color,
    pub fg: Color,
    pub muted_fg: Color,
    pub panel_bg: Color,
    pub footer_bg: Color,
    pub footer_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub success_bg: Color,
    pub success_fg: Color,
    pub error_bg: Color,
    pub error_fg: Color,
    pub button_hover_bg: Color,
}

pub static DARK_THEME: Lazy<Styles> = Lazy::new(|| Styles {
    bg: Color::from_rgb(0.07, 0.07, 0.09),
    fg: Color::from_rgb(0.95, 0.95, 0.95),
    muted_fg: Color::from_rgb(0.6, 0.6, 0.65),
    panel_bg: Color::from_rgb(0.12, 0.12, 0.15),
    footer_bg: Color::from_rgb(0.0078, 0.325, 0.6118), // #02539c
    footer_fg: Color::from_rgb(1.0, 1.0, 1.0),
    header_bg: Color::from_rgb(0.2, 0.2, 0.24),
    header_fg: Color::from_rgb(1.0, 1.0, 1.0),
    success_bg: Color::from_rgb(0.1, 0.35, 0.18),
    success_fg: Color::from_rgb(0.85, 1.0, 0.9),
    error_bg: Color::from_rgb(0.45, 0.12, 0.12),
    error_fg: Color::from_rgb(1.0, 0.9, 0.9),
    button_hover_bg: Color::from_rgb(0.0, 0.26, 0.5),
});

pub static LIGHT_THEME: Lazy<Styles> = Lazy::new(|| Styles {
    bg: Color::from_rgb(1.0, 1.0, 1.0),
    fg: Color::from_rgb(0.05, 0.05, 0.05),
    muted_fg: Color::from_rgb(0.45, 0.45, 0.5),
    panel_bg: Color::from_rgb(0.95, 0.95, 0.97),
    footer_bg: Color::from_rgb(0.0078, 0.325, 0.6118), // #02539c
    footer_fg: Color::from_rgb(1.0, 1.0, 1.0),
    header_bg: Color::from_rgb(0.8784, 0.8784, 0.8784), // #e0e0e0
    header_fg: Color::from_rgb(0.0, 0.0, 0.0),
    success_bg: Color::from_rgb(0.85, 0.95, 0.88),
    success_fg: Color::from_rgb(0.05, 0.3, 0.12),
    error_bg: Color::from_rgb(0.98, 0.87, 0.87),
    error_fg: Color::from_rgb(0.45, 0.08, 0.08),
    button_hover_bg: Color::from_rgb(0.0, 0.26, 0.5),
});

// Custom styles for containers and buttons
pub struct ContainerStyle {
    pub bg: Color,
}

impl container::StyleSheet for ContainerStyle {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(self.bg)),
            ..container::Appearance::default()
        }
    }
}

pub struct ButtonStyle {
    pub bg: Color,
    pub fg: Color,
    pub hover_bg: Color,
}

impl button::StyleSheet for ButtonStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(self.bg)),
            border_radius: 4.0.into(),
            text_color: self.fg,
            shadow_offset: Vector::new(0.0, 0.0),
            ..button::Appearance::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(self.hover_bg)),
            ..self.active(style)
        }
    }
}

//! Theme builder with derived defaults
//!
//! A theme only has to name its core colours; everything left unset is
//! derived from them in [`ThemeBuilder::build`].

use leaf_core::theme::{hex_to_rgb, Swatch};
use leaf_core::ThemeId;
use ratatui::style::Color;

use super::Theme;

/// Marks a field as "derive me"
const UNSET: Color = Color::Reset;

pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    pub fn new(id: ThemeId) -> Self {
        Self {
            theme: Theme {
                id,
                display_name: id.label(),
                bg_color: UNSET,
                border_color: UNSET,
                title_color: UNSET,
                accent_color: UNSET,
                text_color: UNSET,
                success_color: UNSET,
                dim_color: UNSET,
                warning_color: UNSET,
                error_color: UNSET,
                code_bg_color: UNSET,
                selection_bg_color: UNSET,
                selection_fg_color: UNSET,
                user_msg_color: UNSET,
                user_msg_bg_color: UNSET,
                assistant_msg_color: UNSET,
                input_bg_color: UNSET,
                input_placeholder_color: UNSET,
                sidebar_bg_color: UNSET,
                link_color: UNSET,
                quote_color: UNSET,
            },
        }
    }

    /// Start from a catalogue swatch: background, primary as accent and
    /// title, secondary for borders and surfaces
    pub fn from_swatch(id: ThemeId) -> Self {
        let Swatch {
            primary,
            secondary,
            background,
        } = id.swatch();
        let primary = hex_color(primary);
        let secondary = hex_color(secondary);
        let bg = hex_color(background);

        Self::new(id)
            .core_colors(bg, secondary, primary, primary, contrast_on(bg))
            .surface_colors(mix(bg, secondary, 0.5), mix(bg, secondary, 0.35))
            .extended_colors(|t| {
                t.user_msg_bg_color = secondary;
                t.user_msg_color = contrast_on(secondary);
            })
    }

    pub fn core_colors(
        mut self,
        bg: Color,
        border: Color,
        title: Color,
        accent: Color,
        text: Color,
    ) -> Self {
        self.theme.bg_color = bg;
        self.theme.border_color = border;
        self.theme.title_color = title;
        self.theme.accent_color = accent;
        self.theme.text_color = text;
        self
    }

    /// Backgrounds for code and the sidebar
    pub fn surface_colors(mut self, code_bg: Color, sidebar_bg: Color) -> Self {
        self.theme.code_bg_color = code_bg;
        self.theme.sidebar_bg_color = sidebar_bg;
        self
    }

    pub fn extended_colors(mut self, f: impl FnOnce(&mut Theme)) -> Self {
        f(&mut self.theme);
        self
    }

    /// Fill every unset field from the core colours
    pub fn build(mut self) -> Theme {
        let t = &mut self.theme;
        let dark = is_dark(t.bg_color);

        if t.text_color == UNSET {
            t.text_color = contrast_on(t.bg_color);
        }
        if t.dim_color == UNSET {
            t.dim_color = mix(t.text_color, t.bg_color, 0.45);
        }
        if t.code_bg_color == UNSET {
            t.code_bg_color = mix(t.bg_color, t.text_color, 0.08);
        }
        if t.sidebar_bg_color == UNSET {
            t.sidebar_bg_color = t.bg_color;
        }

        let (success, warning, error) = if dark {
            (
                Color::Rgb(140, 190, 130),
                Color::Rgb(230, 190, 110),
                Color::Rgb(230, 120, 120),
            )
        } else {
            (
                Color::Rgb(60, 120, 60),
                Color::Rgb(160, 110, 20),
                Color::Rgb(170, 50, 50),
            )
        };
        if t.success_color == UNSET {
            t.success_color = success;
        }
        if t.warning_color == UNSET {
            t.warning_color = warning;
        }
        if t.error_color == UNSET {
            t.error_color = error;
        }

        if t.selection_bg_color == UNSET {
            t.selection_bg_color = t.accent_color;
        }
        if t.selection_fg_color == UNSET {
            t.selection_fg_color = contrast_on(t.selection_bg_color);
        }
        if t.user_msg_bg_color == UNSET {
            t.user_msg_bg_color = t.code_bg_color;
        }
        if t.user_msg_color == UNSET {
            t.user_msg_color = t.text_color;
        }
        if t.assistant_msg_color == UNSET {
            t.assistant_msg_color = t.text_color;
        }
        if t.input_bg_color == UNSET {
            t.input_bg_color = t.code_bg_color;
        }
        if t.input_placeholder_color == UNSET {
            t.input_placeholder_color = t.dim_color;
        }
        if t.link_color == UNSET {
            t.link_color = t.accent_color;
        }
        if t.quote_color == UNSET {
            t.quote_color = t.dim_color;
        }

        self.theme
    }
}

fn hex_color(hex: &str) -> Color {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => {
            tracing::warn!(hex, "Invalid swatch colour");
            Color::Gray
        }
    }
}

fn rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::White => (255, 255, 255),
        _ => (128, 128, 128),
    }
}

/// Relative luminance in `0.0..=1.0`
pub fn luminance(color: Color) -> f32 {
    let (r, g, b) = rgb(color);
    (0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32) / 255.0
}

pub fn is_dark(color: Color) -> bool {
    luminance(color) < 0.5
}

/// Linear blend; `amount` 0.0 is `from`, 1.0 is `to`
pub fn mix(from: Color, to: Color, amount: f32) -> Color {
    let (r1, g1, b1) = rgb(from);
    let (r2, g2, b2) = rgb(to);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * amount).round() as u8;
    Color::Rgb(lerp(r1, r2), lerp(g1, g2), lerp(b1, b2))
}

/// Readable foreground for text drawn on `bg`
pub fn contrast_on(bg: Color) -> Color {
    if is_dark(bg) {
        mix(bg, Color::White, 0.85)
    } else {
        mix(bg, Color::Black, 0.8)
    }
}

//! Terminal palettes for the built-in themes
//!
//! Each [`ThemeId`] from the core catalogue maps to a full [`Theme`], built
//! once from its three-colour swatch.

use ratatui::style::Color;

pub mod base;
mod registry;

use leaf_core::ThemeId;
use once_cell::sync::Lazy;
pub use registry::ThemeRegistry;

/// Every built-in palette, built on first use
pub static THEME_REGISTRY: Lazy<ThemeRegistry> = Lazy::new(ThemeRegistry::new);

/// Palette for `id`
pub fn theme_for(id: ThemeId) -> &'static Theme {
    THEME_REGISTRY.get(id)
}

/// A complete palette
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub id: ThemeId,
    pub display_name: String,

    // Core colors
    pub bg_color: Color,
    pub border_color: Color,
    pub title_color: Color,
    pub accent_color: Color,
    pub text_color: Color,
    pub success_color: Color,
    pub dim_color: Color,

    // Special colors
    pub warning_color: Color,
    pub error_color: Color,
    pub code_bg_color: Color,

    // Selection
    pub selection_bg_color: Color,
    pub selection_fg_color: Color,

    // Messages
    pub user_msg_color: Color,
    pub user_msg_bg_color: Color,
    pub assistant_msg_color: Color,

    // Composer
    pub input_bg_color: Color,
    pub input_placeholder_color: Color,

    pub sidebar_bg_color: Color,
    pub link_color: Color,
    pub quote_color: Color,
}

//! Built-in theme lookup

use leaf_core::ThemeId;

use super::base::ThemeBuilder;
use super::Theme;

pub struct ThemeRegistry {
    /// Indexed by `ThemeId::index()`
    themes: Vec<Theme>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    pub fn new() -> Self {
        let themes = ThemeId::ALL
            .into_iter()
            .map(|id| ThemeBuilder::from_swatch(id).build())
            .collect();
        Self { themes }
    }

    pub fn get(&self, id: ThemeId) -> &Theme {
        &self.themes[id.index()]
    }

    /// Themes in menu order
    pub fn list(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

//! Theme catalogue
//!
//! The active theme is a plain [`ThemeId`] value owned by the application and
//! handed to whatever renders; nothing here holds global style state.

use serde::{Deserialize, Serialize};

/// Built-in colour themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    #[default]
    Leaf,
    Ocean,
    CherryWitch,
    ChocoStrawberry,
    Lavender,
    Paper,
    Nord,
    NordLight,
    Dark,
}

/// Three-colour preview of a theme, as `#rrggbb` strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
}

impl ThemeId {
    /// Every theme in menu order
    pub const ALL: [ThemeId; 9] = [
        ThemeId::Leaf,
        ThemeId::Ocean,
        ThemeId::CherryWitch,
        ThemeId::ChocoStrawberry,
        ThemeId::Lavender,
        ThemeId::Paper,
        ThemeId::Nord,
        ThemeId::NordLight,
        ThemeId::Dark,
    ];

    /// Stable identifier, as used in config files and on the command line
    pub fn key(self) -> &'static str {
        match self {
            ThemeId::Leaf => "leaf",
            ThemeId::Ocean => "ocean",
            ThemeId::CherryWitch => "cherry-witch",
            ThemeId::ChocoStrawberry => "choco-strawberry",
            ThemeId::Lavender => "lavender",
            ThemeId::Paper => "paper",
            ThemeId::Nord => "nord",
            ThemeId::NordLight => "nord-light",
            ThemeId::Dark => "dark",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeId::Leaf => "Leaf",
            ThemeId::Ocean => "Ocean",
            ThemeId::CherryWitch => "Cherry Witch",
            ThemeId::ChocoStrawberry => "Choco Strawberry",
            ThemeId::Lavender => "Lavender",
            ThemeId::Paper => "Paper",
            ThemeId::Nord => "Nord",
            ThemeId::NordLight => "Nord Light",
            ThemeId::Dark => "Dark",
        }
    }

    pub fn label(self) -> String {
        format!("{} Theme", self.name())
    }

    pub fn description(self) -> &'static str {
        match self {
            ThemeId::Leaf => "Natural green theme",
            ThemeId::Ocean => "Cool blue theme",
            ThemeId::CherryWitch => "Soft pink and sage theme",
            ThemeId::ChocoStrawberry => "Dark chocolate with cream",
            ThemeId::Lavender => "Dreamy purple theme",
            ThemeId::Paper => "Clean paper-like theme",
            ThemeId::Nord => "Arctic inspired theme",
            ThemeId::NordLight => "Light arctic theme",
            ThemeId::Dark => "Dark mode theme",
        }
    }

    pub fn swatch(self) -> Swatch {
        let (primary, secondary, background) = match self {
            ThemeId::Leaf => ("#6b886b", "#cbd0bf", "#e4e4d4"),
            ThemeId::Ocean => ("#4a90a4", "#a4c3cc", "#d4e4e4"),
            ThemeId::CherryWitch => ("#56786a", "#ddb4a7", "#f3dbda"),
            ThemeId::ChocoStrawberry => ("#f0d3c9", "#343231", "#262727"),
            ThemeId::Lavender => ("#2f2a41", "#a19bb9", "#ada6c2"),
            ThemeId::Paper => ("#444444", "#dddddd", "#eeeeee"),
            ThemeId::Nord => ("#6a7791", "#d8dee9", "#242933"),
            ThemeId::NordLight => ("#929aaa", "#2e3440", "#eceff4"),
            ThemeId::Dark => ("#6b886b", "#2a2a2a", "#1a1a1a"),
        };
        Swatch {
            primary,
            secondary,
            background,
        }
    }

    /// Position in [`ThemeId::ALL`]
    pub fn index(self) -> usize {
        ThemeId::ALL
            .iter()
            .position(|t| *t == self)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ThemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ThemeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "-");
        ThemeId::ALL
            .into_iter()
            .find(|t| t.key() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ThemeId::ALL.iter().map(|t| t.key()).collect();
                format!("unknown theme '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Parse `#rrggbb` into its components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for theme in ThemeId::ALL {
            assert_eq!(theme.key().parse::<ThemeId>(), Ok(theme));
        }
    }

    #[test]
    fn test_parse_accepts_display_names() {
        assert_eq!("Cherry Witch".parse::<ThemeId>(), Ok(ThemeId::CherryWitch));
        assert_eq!("nord_light".parse::<ThemeId>(), Ok(ThemeId::NordLight));
        assert!("neon".parse::<ThemeId>().is_err());
    }

    #[test]
    fn test_serde_names_match_keys() {
        #[derive(Deserialize)]
        struct Wrapper {
            theme: ThemeId,
        }
        let parsed: Wrapper = toml::from_str("theme = \"choco-strawberry\"").unwrap();
        assert_eq!(parsed.theme, ThemeId::ChocoStrawberry);
    }

    #[test]
    fn test_swatches_are_valid_hex() {
        for theme in ThemeId::ALL {
            let swatch = theme.swatch();
            for hex in [swatch.primary, swatch.secondary, swatch.background] {
                assert!(hex_to_rgb(hex).is_some(), "{theme}: {hex}");
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(ThemeId::Leaf.label(), "Leaf Theme");
        assert_eq!(ThemeId::NordLight.label(), "Nord Light Theme");
        assert_eq!(ThemeId::default(), ThemeId::Leaf);
        assert_eq!(ThemeId::Dark.index(), 8);
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#6b886b"), Some((0x6b, 0x88, 0x6b)));
        assert_eq!(hex_to_rgb("6b886b"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }
}

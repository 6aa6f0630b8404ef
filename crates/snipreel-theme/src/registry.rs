use once_cell::sync::Lazy;

use crate::builtin;
use crate::types::Theme;

/// Identifier of the theme used when a request names an unknown one.
pub const DEFAULT_THEME_ID: &str = "revorgs-bronze";

/// Longest theme identifier accepted by [`is_valid_theme_id`].
pub const MAX_THEME_ID_LEN: usize = 64;

static REGISTRY: Lazy<ThemeRegistry> = Lazy::new(ThemeRegistry::builtin);

/// Global registry accessor.
pub fn registry() -> &'static ThemeRegistry {
    &REGISTRY
}

/// Read-only set of themes, populated once and never mutated.
#[derive(Debug)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
    default_index: usize,
}

impl ThemeRegistry {
    fn builtin() -> Self {
        Self {
            themes: vec![builtin::revorgs_bronze(), builtin::midnight_blue()],
            default_index: 0,
        }
    }

    /// Look up `id`, falling back to the default theme. Never fails.
    pub fn get(&self, id: &str) -> &Theme {
        match self.try_get(id) {
            Some(theme) => theme,
            None => {
                tracing::warn!(theme_id = %id, fallback = DEFAULT_THEME_ID, "Theme not found, falling back to default");
                self.default_theme()
            }
        }
    }

    pub fn try_get(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.try_get(id).is_some()
    }

    pub fn all(&self) -> &[Theme] {
        &self.themes
    }

    pub fn default_theme(&self) -> &Theme {
        &self.themes[self.default_index]
    }
}

/// Look up a built-in theme, falling back to the default.
pub fn get_theme(id: &str) -> &'static Theme {
    registry().get(id)
}

pub fn all_themes() -> &'static [Theme] {
    registry().all()
}

pub fn default_theme() -> &'static Theme {
    registry().default_theme()
}

/// Format check for theme identifiers: lowercase ASCII letters, digits and
/// hyphens, 1 to 64 characters. A well-formed id need not be registered.
pub fn is_valid_theme_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_THEME_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_theme() {
        let theme = get_theme("midnight-blue");
        assert_eq!(theme.name, "Midnight Blue");
        assert_eq!(theme.accent.to_css(), "#3B82F6");
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let theme = get_theme("forest-green");
        assert_eq!(theme.id, DEFAULT_THEME_ID);
        assert_eq!(theme, default_theme());
        assert!(registry().try_get("forest-green").is_none());
    }

    #[test]
    fn test_all_themes_have_unique_ids() {
        let ids: Vec<_> = all_themes().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["revorgs-bronze", "midnight-blue"]);
        assert!(ids.iter().all(|id| is_valid_theme_id(id)));
    }

    #[test]
    fn test_theme_id_format() {
        assert!(is_valid_theme_id("sunset-orange"));
        assert!(is_valid_theme_id("v2"));
        assert!(!is_valid_theme_id(""));
        assert!(!is_valid_theme_id("Midnight"));
        assert!(!is_valid_theme_id("../etc"));
        assert!(!is_valid_theme_id(&"a".repeat(65)));
    }

    #[test]
    fn test_theme_serializes_as_css() {
        let json = serde_json::to_value(default_theme()).unwrap();
        assert_eq!(json["background"], "#0B0B0B");
        assert_eq!(json["codeWindow"]["borderColor"], "rgba(184, 115, 51, 0.2)");
        assert_eq!(json["syntax"]["className"], "#BB9AF7");
        assert_eq!(json["windowChrome"]["buttons"]["close"], "#FF5F56");
        assert_eq!(json["lineNumbers"]["background"], "rgba(0, 0, 0, 0)");
    }
}

//! # snipreel-theme
//!
//! Static registry of the visual themes a code video can be rendered with.
//! Themes are immutable; lookups by an unknown id fall back to the default.

pub mod builtin;
pub mod registry;
pub mod types;

pub use registry::{
    all_themes, default_theme, get_theme, is_valid_theme_id, registry, ThemeRegistry,
    DEFAULT_THEME_ID,
};
pub use types::{
    CodeWindowStyle, CursorStyle, LineNumberStyle, SyntaxPalette, SyntaxRole, Theme,
    TrafficLights, Typography, WindowChromeStyle,
};

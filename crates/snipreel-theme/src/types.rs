use serde::Serialize;

use snipreel_core::{BoxShadow, Color};

/// An immutable named bundle of colors, typography and chrome styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,

    pub background: Color,
    pub foreground: Color,
    pub accent: Color,

    pub typography: Typography,
    pub code_window: CodeWindowStyle,
    pub window_chrome: WindowChromeStyle,
    pub syntax: SyntaxPalette,
    pub line_numbers: LineNumberStyle,
    pub cursor: CursorStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: &'static str,
    /// Font size in pixels.
    pub font_size: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeWindowStyle {
    pub background: Color,
    pub border_radius: f64,
    /// Resting drop shadow under the window.
    pub shadow: BoxShadow,
    /// Static ambient glow; also the base color of the pulsing glow animation.
    pub glow: BoxShadow,
    pub padding: f64,
    pub border_width: f64,
    pub border_color: Color,
}

impl CodeWindowStyle {
    pub fn glow_color(&self) -> Color {
        self.glow.color
    }
}

/// The macOS-style title bar with three traffic-light buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowChromeStyle {
    pub show: bool,
    pub background: Color,
    pub height: f64,
    pub buttons: TrafficLights,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrafficLights {
    pub close: Color,
    pub minimize: Color,
    pub maximize: Color,
}

/// Semantic roles a syntax token can be colored by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxRole {
    Keyword,
    String,
    Number,
    Comment,
    Function,
    Variable,
    Operator,
    Punctuation,
    ClassName,
    Parameter,
    Property,
    Tag,
    Attribute,
    Constant,
    Regex,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxPalette {
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub comment: Color,
    pub function: Color,
    pub variable: Color,
    pub operator: Color,
    pub punctuation: Color,
    pub class_name: Color,
    pub parameter: Color,
    pub property: Color,
    pub tag: Color,
    pub attribute: Color,
    pub constant: Color,
    pub regex: Color,
}

impl SyntaxPalette {
    pub fn color(&self, role: SyntaxRole) -> Color {
        match role {
            SyntaxRole::Keyword => self.keyword,
            SyntaxRole::String => self.string,
            SyntaxRole::Number => self.number,
            SyntaxRole::Comment => self.comment,
            SyntaxRole::Function => self.function,
            SyntaxRole::Variable => self.variable,
            SyntaxRole::Operator => self.operator,
            SyntaxRole::Punctuation => self.punctuation,
            SyntaxRole::ClassName => self.class_name,
            SyntaxRole::Parameter => self.parameter,
            SyntaxRole::Property => self.property,
            SyntaxRole::Tag => self.tag,
            SyntaxRole::Attribute => self.attribute,
            SyntaxRole::Constant => self.constant,
            SyntaxRole::Regex => self.regex,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineNumberStyle {
    pub show: bool,
    pub color: Color,
    pub background: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorStyle {
    pub color: Color,
    pub blink_frames: u32,
}

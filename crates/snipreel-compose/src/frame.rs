//! The per-frame visual tree handed to the external renderer.
//!
//! Everything here is plain data with CSS-ready colors, so a frame serializes
//! to JSON without any further interpretation.

use serde::Serialize;

use snipreel_anim::FrameState;
use snipreel_core::{BoxShadow, Color, Transform2D};
use snipreel_theme::TrafficLights;

use crate::highlight::TokenKind;

/// Full visual description of one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDescription {
    pub frame: u64,
    pub canvas: Canvas,
    pub background_layers: Vec<BackgroundLayer>,
    pub window: CodeWindow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<Watermark>,
    /// The animation state the window style was derived from.
    pub animation: FrameState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub background: Color,
    pub padding: f64,
}

/// Ambient layers drawn between the canvas background and the code window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BackgroundLayer {
    /// Elliptical accent glow fading out towards `extent` of the canvas.
    #[serde(rename_all = "camelCase")]
    RadialGlow {
        color: Color,
        center_x: f64,
        center_y: f64,
        extent: f64,
    },
    /// Gradient from `color` at the bottom edge to transparent at `height` of the canvas.
    #[serde(rename_all = "camelCase")]
    BottomFade { color: Color, height: f64 },
    /// Fractal-noise film grain; `base_frequency` shifts every frame.
    #[serde(rename_all = "camelCase")]
    Grain {
        opacity: f64,
        base_frequency: f64,
        tile_size: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeWindow {
    pub background: Color,
    pub border_radius: f64,
    pub border_width: f64,
    pub border_color: Color,
    /// Theme drop shadow followed by any glow layers.
    pub box_shadow: Vec<BoxShadow>,
    pub opacity: f64,
    pub transform: Transform2D,
    pub max_width: f64,
    pub padding: f64,
    pub font_family: String,
    pub font_size: f64,
    pub line_height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome: Option<WindowChrome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_numbers: Option<LineNumberGutter>,
    pub lines: Vec<CodeLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowChrome {
    pub background: Color,
    pub height: f64,
    pub border_color: Color,
    pub buttons: TrafficLights,
    pub button_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineNumberGutter {
    pub color: Color,
    pub background: Color,
    pub opacity: f64,
    pub min_width: f64,
    pub padding_right: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLine {
    /// 1-based line number, present when the gutter is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,
    pub spans: Vec<StyledSpan>,
}

impl CodeLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledSpan {
    pub text: String,
    pub kind: TokenKind,
    pub color: Color,
}

/// Typing caret placed after the last visible character.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub color: Color,
    /// 0-based line index.
    pub line: usize,
    /// Characters before the caret on its line.
    pub column: usize,
    pub width: f64,
    /// Height relative to the font size.
    pub height_em: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Watermark {
    pub text: String,
    pub position: &'static str,
    pub opacity: f64,
    pub background: Color,
    pub text_color: Color,
    pub icon_color: Color,
}

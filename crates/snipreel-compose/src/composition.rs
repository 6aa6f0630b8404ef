use serde::{Deserialize, Serialize};

use snipreel_anim::{AnimationConfig, AnimationOverrides, FrameState};
use snipreel_core::{AnimationKind, Color, Language, VideoSettings};
use snipreel_theme::{get_theme, Theme, DEFAULT_THEME_ID};

use crate::frame::*;
use crate::highlight::highlight_lines;

const CANVAS_PADDING: f64 = 60.0;
const WINDOW_MAX_WIDTH: f64 = 960.0;
const WATERMARK_TEXT: &str = "Made with CodeSnippet";
const WATERMARK_FADE_FRAMES: u64 = 15;
const WATERMARK_MAX_OPACITY: f64 = 0.6;

fn default_theme_id() -> String {
    DEFAULT_THEME_ID.to_string()
}

fn default_true() -> bool {
    true
}

/// Parameters of a code video, as sent by clients and forwarded to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionProps {
    pub code: String,
    pub language: Language,
    #[serde(default = "default_theme_id")]
    pub theme_id: String,
    #[serde(default)]
    pub animation_type: AnimationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_config: Option<AnimationOverrides>,
    #[serde(default = "default_true")]
    pub show_line_numbers: bool,
    #[serde(default = "default_true")]
    pub show_watermark: bool,
}

impl CompositionProps {
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            language,
            theme_id: default_theme_id(),
            animation_type: AnimationKind::default(),
            animation_config: None,
            show_line_numbers: true,
            show_watermark: true,
        }
    }

    /// The animation configuration these props resolve to, before any theme is applied.
    pub fn animation(&self) -> AnimationConfig {
        AnimationConfig::resolve(self.animation_type, self.animation_config.as_ref())
    }
}

/// A composition bound to its theme and resolved animation, ready to describe frames.
#[derive(Debug, Clone)]
pub struct Composition {
    props: CompositionProps,
    theme: &'static Theme,
    animation: AnimationConfig,
    settings: VideoSettings,
}

impl Composition {
    /// Bind `props` to a theme. Unknown theme ids fall back to the default theme.
    pub fn new(props: CompositionProps, settings: VideoSettings) -> Self {
        let theme = get_theme(&props.theme_id);
        let mut animation = props.animation();
        if let AnimationConfig::Glow(glow) = &mut animation {
            let color_overridden = props
                .animation_config
                .as_ref()
                .is_some_and(|o| o.color.is_some());
            if !color_overridden {
                glow.color = theme.code_window.glow_color();
            }
        }
        tracing::debug!(
            theme = theme.id,
            animation = %animation.kind(),
            language = %props.language,
            "Composition bound"
        );
        Self {
            props,
            theme,
            animation,
            settings,
        }
    }

    pub fn props(&self) -> &CompositionProps {
        &self.props
    }

    pub fn theme(&self) -> &'static Theme {
        self.theme
    }

    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    pub fn settings(&self) -> VideoSettings {
        self.settings
    }

    /// Describe frame `frame`. Pure: the same frame always yields the same description.
    pub fn frame(&self, frame: u64) -> FrameDescription {
        let state =
            snipreel_anim::evaluate(&self.animation, &self.props.code, frame, self.settings.fps);
        let theme = self.theme;

        FrameDescription {
            frame,
            canvas: Canvas {
                width: self.settings.width,
                height: self.settings.height,
                fps: self.settings.fps,
                background: theme.background,
                padding: CANVAS_PADDING,
            },
            background_layers: background_layers(theme, frame),
            window: self.window(&state),
            watermark: self
                .props
                .show_watermark
                .then(|| watermark(theme, frame)),
            animation: state,
        }
    }

    fn window(&self, state: &FrameState) -> CodeWindow {
        let theme = self.theme;
        let style = &theme.code_window;

        let typing = state.as_typing();
        let displayed = match typing {
            Some(t) => t.visible_code.as_str(),
            None => self.props.code.as_str(),
        };
        let lines = self.code_lines(displayed);

        let cursor = typing.filter(|t| t.cursor_visible).map(|_| {
            let last = lines.len().saturating_sub(1);
            Cursor {
                color: theme.cursor.color,
                line: last,
                column: lines
                    .last()
                    .map(|l| l.text().chars().count())
                    .unwrap_or(0),
                width: 2.0,
                height_em: 1.2,
            }
        });

        let mut box_shadow = vec![style.shadow];
        box_shadow.extend_from_slice(state.glow_shadows());

        CodeWindow {
            background: style.background,
            border_radius: style.border_radius,
            border_width: style.border_width,
            border_color: style.border_color,
            box_shadow,
            opacity: state.container_opacity(),
            transform: state.container_transform(),
            max_width: WINDOW_MAX_WIDTH,
            padding: style.padding,
            font_family: theme.typography.font_family.to_string(),
            font_size: theme.typography.font_size,
            line_height: theme.typography.line_height,
            chrome: theme.window_chrome.show.then(|| WindowChrome {
                background: theme.window_chrome.background,
                height: theme.window_chrome.height,
                border_color: Color::WHITE.with_alpha(0.05),
                buttons: theme.window_chrome.buttons,
                button_size: 12.0,
            }),
            line_numbers: self.props.show_line_numbers.then(|| LineNumberGutter {
                color: theme.line_numbers.color,
                background: theme.line_numbers.background,
                opacity: 0.6,
                min_width: 40.0,
                padding_right: 24.0,
            }),
            lines,
            cursor,
        }
    }

    fn code_lines(&self, code: &str) -> Vec<CodeLine> {
        let palette = &self.theme.syntax;
        highlight_lines(code, self.props.language)
            .into_iter()
            .enumerate()
            .map(|(i, tokens)| CodeLine {
                number: self.props.show_line_numbers.then_some(i + 1),
                spans: tokens
                    .into_iter()
                    .map(|token| StyledSpan {
                        color: token
                            .kind
                            .role()
                            .map(|role| palette.color(role))
                            .unwrap_or(self.theme.foreground),
                        kind: token.kind,
                        text: token.text,
                    })
                    .collect(),
            })
            .collect()
    }
}

fn background_layers(theme: &Theme, frame: u64) -> Vec<BackgroundLayer> {
    vec![
        BackgroundLayer::RadialGlow {
            color: theme.accent.with_alpha(0.08),
            center_x: 0.5,
            center_y: 0.3,
            extent: 0.6,
        },
        BackgroundLayer::BottomFade {
            color: theme.background.with_alpha(0.9),
            height: 0.3,
        },
        BackgroundLayer::Grain {
            opacity: 0.03,
            base_frequency: 0.7 + (frame % 10) as f64 * 0.1,
            tile_size: 200.0,
        },
    ]
}

fn watermark(theme: &Theme, frame: u64) -> Watermark {
    let ramp = frame.min(WATERMARK_FADE_FRAMES) as f64 / WATERMARK_FADE_FRAMES as f64;
    Watermark {
        text: WATERMARK_TEXT.to_string(),
        position: "bottom-right",
        opacity: ramp * WATERMARK_MAX_OPACITY,
        background: Color::BLACK.with_alpha(0.4),
        text_color: Color::WHITE.with_alpha(0.8),
        icon_color: theme.accent,
    }
}

use serde::{Deserialize, Serialize};

use snipreel_core::{AnimationKind, Color, FieldIssue, SlideDirection};

/// Character-by-character reveal with a cursor that blinks once typing is done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingConfig {
    pub chars_per_frame: f64,
    pub show_cursor: bool,
    pub cursor_blink_frames: u32,
    pub delay: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            chars_per_frame: 2.0,
            show_cursor: true,
            cursor_blink_frames: 15,
            delay: 0,
        }
    }
}

/// Fade, slide and scale of the whole code container, driven by a spring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntranceConfig {
    pub fade_in: bool,
    pub slide_from: SlideDirection,
    pub slide_distance: f64,
    pub scale: bool,
    pub scale_from: f64,
    /// Nominal length in frames; the spring itself decides when the motion settles.
    pub duration: u32,
    pub delay: u32,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            fade_in: true,
            slide_from: SlideDirection::Bottom,
            slide_distance: 80.0,
            scale: true,
            scale_from: 0.95,
            duration: 30,
            delay: 0,
        }
    }
}

/// Continuously pulsing glow around the code container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlowConfig {
    pub intensity: f64,
    pub pulse_frames: u32,
    pub color: Color,
    pub delay: u32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            intensity: 1.5,
            pulse_frames: 60,
            color: Color::from_hex_u32(0xB87333).with_alpha(0.3),
            delay: 0,
        }
    }
}

/// The one animation active for a render. The `type` tag names the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnimationConfig {
    Typing(TypingConfig),
    Entrance(EntranceConfig),
    Glow(GlowConfig),
}

impl AnimationConfig {
    /// The default configuration for `kind`.
    pub fn default_for(kind: AnimationKind) -> Self {
        match kind {
            AnimationKind::Typing => AnimationConfig::Typing(TypingConfig::default()),
            AnimationKind::Entrance => AnimationConfig::Entrance(EntranceConfig::default()),
            AnimationKind::Glow => AnimationConfig::Glow(GlowConfig::default()),
        }
    }

    /// Defaults for `kind` with any matching fields of `overrides` applied.
    pub fn resolve(kind: AnimationKind, overrides: Option<&AnimationOverrides>) -> Self {
        let config = Self::default_for(kind);
        match overrides {
            Some(o) => o.apply(config),
            None => config,
        }
    }

    pub fn kind(&self) -> AnimationKind {
        match self {
            AnimationConfig::Typing(_) => AnimationKind::Typing,
            AnimationConfig::Entrance(_) => AnimationKind::Entrance,
            AnimationConfig::Glow(_) => AnimationKind::Glow,
        }
    }

    /// Frames withheld before the animation's local clock starts.
    pub fn delay(&self) -> u32 {
        match self {
            AnimationConfig::Typing(c) => c.delay,
            AnimationConfig::Entrance(c) => c.delay,
            AnimationConfig::Glow(c) => c.delay,
        }
    }

    /// Check numeric bounds; every problem is reported, not just the first.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        let mut check = |ok: bool, field: &str, message: &str| {
            if !ok {
                issues.push(FieldIssue::new(format!("animationConfig.{field}"), message));
            }
        };

        match self {
            AnimationConfig::Typing(c) => {
                check(
                    c.chars_per_frame.is_finite() && c.chars_per_frame > 0.0,
                    "charsPerFrame",
                    "must be a positive number",
                );
                check(
                    c.cursor_blink_frames >= 1,
                    "cursorBlinkFrames",
                    "must be at least 1",
                );
            }
            AnimationConfig::Entrance(c) => {
                check(
                    c.slide_distance.is_finite() && c.slide_distance >= 0.0,
                    "slideDistance",
                    "must be a non-negative number",
                );
                check(
                    c.scale_from > 0.0 && c.scale_from <= 1.0,
                    "scaleFrom",
                    "must be in (0, 1]",
                );
                check(c.duration >= 1, "duration", "must be at least 1 frame");
            }
            AnimationConfig::Glow(c) => {
                check(
                    c.intensity.is_finite() && c.intensity > 0.0,
                    "intensity",
                    "must be a positive number",
                );
                check(c.pulse_frames >= 1, "pulseFrames", "must be at least 1");
            }
        }
        issues
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::default_for(AnimationKind::Typing)
    }
}

/// A flat, partial override of animation settings as sent by clients.
///
/// Only the fields that belong to the chosen animation kind are applied;
/// the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chars_per_frame: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_cursor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_blink_frames: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_from: Option<SlideDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulse_frames: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
}

impl AnimationOverrides {
    /// Overlay the populated fields onto `config`.
    pub fn apply(&self, config: AnimationConfig) -> AnimationConfig {
        match config {
            AnimationConfig::Typing(mut c) => {
                set(&mut c.chars_per_frame, self.chars_per_frame);
                set(&mut c.show_cursor, self.show_cursor);
                set(&mut c.cursor_blink_frames, self.cursor_blink_frames);
                set(&mut c.delay, self.delay);
                AnimationConfig::Typing(c)
            }
            AnimationConfig::Entrance(mut c) => {
                set(&mut c.fade_in, self.fade_in);
                set(&mut c.slide_from, self.slide_from);
                set(&mut c.slide_distance, self.slide_distance);
                set(&mut c.scale, self.scale);
                set(&mut c.scale_from, self.scale_from);
                set(&mut c.duration, self.duration);
                set(&mut c.delay, self.delay);
                AnimationConfig::Entrance(c)
            }
            AnimationConfig::Glow(mut c) => {
                set(&mut c.intensity, self.intensity);
                set(&mut c.pulse_frames, self.pulse_frames);
                set(&mut c.color, self.color);
                set(&mut c.delay, self.delay);
                AnimationConfig::Glow(c)
            }
        }
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_presets() {
        let AnimationConfig::Typing(t) = AnimationConfig::default_for(AnimationKind::Typing) else {
            panic!("expected typing");
        };
        assert_eq!(t.chars_per_frame, 2.0);
        assert_eq!(t.cursor_blink_frames, 15);

        let AnimationConfig::Glow(g) = AnimationConfig::default_for(AnimationKind::Glow) else {
            panic!("expected glow");
        };
        assert_eq!(g.pulse_frames, 60);
        assert_eq!(g.color.to_css(), "rgba(184, 115, 51, 0.3)");
    }

    #[test]
    fn test_overrides_only_touch_matching_kind() {
        let overrides: AnimationOverrides =
            serde_json::from_str(r#"{"charsPerFrame": 4, "intensity": 3.0, "delay": 10}"#).unwrap();

        let typing = AnimationConfig::resolve(AnimationKind::Typing, Some(&overrides));
        match typing {
            AnimationConfig::Typing(c) => {
                assert_eq!(c.chars_per_frame, 4.0);
                assert_eq!(c.delay, 10);
                assert!(c.show_cursor);
            }
            other => panic!("unexpected {:?}", other),
        }

        let entrance = AnimationConfig::resolve(AnimationKind::Entrance, Some(&overrides));
        assert_eq!(entrance.delay(), 10);
        assert_eq!(entrance.kind(), AnimationKind::Entrance);
    }

    #[test]
    fn test_tagged_serialization() {
        let json = serde_json::to_value(AnimationConfig::default_for(AnimationKind::Entrance)).unwrap();
        assert_eq!(json["type"], "entrance");
        assert_eq!(json["slideFrom"], "bottom");
        assert_eq!(json["scaleFrom"], 0.95);
    }

    #[test]
    fn test_validate_reports_every_bad_field() {
        let overrides = AnimationOverrides {
            chars_per_frame: Some(0.0),
            cursor_blink_frames: Some(0),
            ..Default::default()
        };
        let issues = AnimationConfig::resolve(AnimationKind::Typing, Some(&overrides)).validate();
        let paths: Vec<_> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            ["animationConfig.charsPerFrame", "animationConfig.cursorBlinkFrames"]
        );
    }

    #[test]
    fn test_validate_scale_from_bounds() {
        let overrides = AnimationOverrides {
            scale_from: Some(1.5),
            ..Default::default()
        };
        let issues = AnimationConfig::resolve(AnimationKind::Entrance, Some(&overrides)).validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "animationConfig.scaleFrom");
        assert!(AnimationConfig::default_for(AnimationKind::Glow)
            .validate()
            .is_empty());
    }
}

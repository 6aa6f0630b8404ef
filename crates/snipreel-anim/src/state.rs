use serde::{Deserialize, Serialize};

use snipreel_core::{AnimationKind, BoxShadow, Transform2D};

use crate::entrance::EntranceState;
use crate::glow::GlowState;
use crate::typing::TypingState;

/// Result of evaluating the active animation at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FrameState {
    Typing(TypingState),
    Entrance(EntranceState),
    Glow(GlowState),
}

impl FrameState {
    pub fn kind(&self) -> AnimationKind {
        match self {
            FrameState::Typing(_) => AnimationKind::Typing,
            FrameState::Entrance(_) => AnimationKind::Entrance,
            FrameState::Glow(_) => AnimationKind::Glow,
        }
    }

    /// Opacity to apply to the code container.
    pub fn container_opacity(&self) -> f64 {
        match self {
            FrameState::Entrance(s) => s.opacity,
            _ => 1.0,
        }
    }

    /// Transform to apply to the code container.
    pub fn container_transform(&self) -> Transform2D {
        match self {
            FrameState::Entrance(s) => s.transform,
            _ => Transform2D::identity(),
        }
    }

    /// Extra shadow layers drawn around the code container.
    pub fn glow_shadows(&self) -> &[BoxShadow] {
        match self {
            FrameState::Glow(s) => &s.shadows,
            _ => &[],
        }
    }

    pub fn as_typing(&self) -> Option<&TypingState> {
        match self {
            FrameState::Typing(s) => Some(s),
            _ => None,
        }
    }
}

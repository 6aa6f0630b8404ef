use serde::Serialize;

use snipreel_core::AnimationKind;

use crate::config::AnimationConfig;

/// A named, ready-to-use animation configuration offered to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub config: AnimationConfig,
}

/// All presets, one per animation kind.
pub fn presets() -> Vec<AnimationPreset> {
    vec![
        AnimationPreset {
            id: "typing",
            name: "Typing",
            description: "Code appears character-by-character with a blinking cursor",
            icon: "⌨️",
            config: AnimationConfig::default_for(AnimationKind::Typing),
        },
        AnimationPreset {
            id: "entrance",
            name: "Entrance",
            description: "Smooth fade-in with slide and scale effect",
            icon: "✨",
            config: AnimationConfig::default_for(AnimationKind::Entrance),
        },
        AnimationPreset {
            id: "glow",
            name: "Glow Pulse",
            description: "Ambient glow effect that pulses continuously",
            icon: "💫",
            config: AnimationConfig::default_for(AnimationKind::Glow),
        },
    ]
}

pub fn preset(id: &str) -> Option<AnimationPreset> {
    presets().into_iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_ids_match_kinds() {
        for p in presets() {
            assert_eq!(p.id, p.config.kind().to_string());
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(preset("glow").map(|p| p.name), Some("Glow Pulse"));
        assert!(preset("bounce").is_none());
    }
}

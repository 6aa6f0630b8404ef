//! # snipreel-anim
//!
//! Frame-accurate animation evaluator. Every function here maps a frame index
//! and a configuration to a visual state with no hidden inputs, so frames can
//! be evaluated in any order and any number of times.

pub mod config;
pub mod entrance;
pub mod glow;
pub mod presets;
pub mod spring;
pub mod state;
pub mod typing;

pub use config::{AnimationConfig, AnimationOverrides, EntranceConfig, GlowConfig, TypingConfig};
pub use entrance::EntranceState;
pub use glow::GlowState;
pub use presets::{preset, presets, AnimationPreset};
pub use spring::Spring;
pub use state::FrameState;
pub use typing::TypingState;

/// Evaluate the active animation at `frame`.
///
/// `code` is only read by the typing animation; `fps` only by the entrance spring.
pub fn evaluate(config: &AnimationConfig, code: &str, frame: u64, fps: u32) -> FrameState {
    match config {
        AnimationConfig::Typing(c) => FrameState::Typing(typing::evaluate(code, c, frame)),
        AnimationConfig::Entrance(c) => FrameState::Entrance(entrance::evaluate(c, frame, fps)),
        AnimationConfig::Glow(c) => FrameState::Glow(glow::evaluate(c, frame)),
    }
}

//! # snipreel-compose
//!
//! Turns a code sample, a theme and an animation into a frame-by-frame visual
//! tree: highlighted lines, window chrome, ambient background layers and an
//! optional watermark, with the animation state applied to the code window.

pub mod composition;
pub mod frame;
pub mod highlight;

pub use composition::{Composition, CompositionProps};
pub use frame::{BackgroundLayer, CodeLine, CodeWindow, FrameDescription, StyledSpan};
pub use highlight::{highlight, highlight_lines, Token, TokenKind};

//! # snipreel-core
//!
//! Core types and primitives for the Snipreel code-video engine.
//! This crate contains foundational types shared across all Snipreel crates:
//! colors, transforms, shadows, durations, request enums, configuration and
//! error types.

pub mod color;
pub mod config;
pub mod error;
pub mod math;
pub mod time;
pub mod types;

pub use config::*;

pub use color::Color;
pub use error::{FieldIssue, SnipError, SnipResult};
pub use math::{BoxShadow, Point2D, Transform2D};
pub use time::Duration;
pub use types::{AnimationKind, Language, OutputFormat, SlideDirection, VideoSettings};

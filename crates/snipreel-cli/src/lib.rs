//! # snipreel-cli
//!
//! The `snipreel` binary: the render API server plus offline commands for
//! inspecting frames, durations, themes and animation presets.

pub mod commands;
pub mod server;
pub mod telemetry;

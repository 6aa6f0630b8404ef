use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use snipreel_core::BoxShadow;

use crate::config::GlowConfig;

/// Blur radius and alpha weight of each concentric glow layer, innermost first.
const LAYERS: [(f64, f64); 4] = [(20.0, 0.5), (40.0, 0.3), (60.0, 0.2), (80.0, 0.1)];

/// Glow around the code container at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlowState {
    pub intensity: f64,
    pub shadows: Vec<BoxShadow>,
}

/// Evaluate the pulsing glow at `frame`. The pulse never terminates.
pub fn evaluate(config: &GlowConfig, frame: u64) -> GlowState {
    let delayed = frame.saturating_sub(config.delay as u64);
    let period = config.pulse_frames.max(1) as u64;

    let cycle = (delayed % period) as f64 / period as f64;
    let pulse = (cycle * TAU).sin();
    // [-1, 1] -> [0.5, intensity]
    let intensity = 0.5 + (pulse + 1.0) / 2.0 * (config.intensity - 0.5);

    GlowState {
        intensity,
        shadows: glow_layers(config, intensity),
    }
}

fn glow_layers(config: &GlowConfig, intensity: f64) -> Vec<BoxShadow> {
    let base_alpha = config.color.a as f64;
    LAYERS
        .iter()
        .map(|&(radius, weight)| {
            let alpha = (base_alpha * intensity * weight) as f32;
            BoxShadow::glow(radius * intensity, config.color.with_alpha(alpha))
        })
        .collect()
}

use serde::{Deserialize, Serialize};

use snipreel_core::time::frame_to_seconds;
use snipreel_core::{Point2D, SlideDirection, Transform2D};

use crate::config::EntranceConfig;
use crate::spring::Spring;

/// Container style produced by the entrance animation at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntranceState {
    /// Spring progress in `[0, 1]`.
    pub progress: f64,
    pub opacity: f64,
    pub transform: Transform2D,
}

/// Evaluate the entrance at `frame` for a video running at `fps`.
pub fn evaluate(config: &EntranceConfig, frame: u64, fps: u32) -> EntranceState {
    let delayed = frame.saturating_sub(config.delay as u64);
    let p = Spring::ENTRANCE.progress(frame_to_seconds(delayed, fps));

    let opacity = if config.fade_in { p } else { 1.0 };
    let scale = if config.scale {
        config.scale_from + (1.0 - config.scale_from) * p
    } else {
        1.0
    };

    EntranceState {
        progress: p,
        opacity,
        transform: Transform2D {
            translate: slide_offset(config.slide_from, config.slide_distance * (1.0 - p)),
            scale,
        },
    }
}

/// Offset of the container while `remaining` pixels of the slide are left.
fn slide_offset(from: SlideDirection, remaining: f64) -> Point2D {
    match from {
        SlideDirection::Bottom => Point2D::new(0.0, remaining),
        SlideDirection::Top => Point2D::new(0.0, -remaining),
        SlideDirection::Right => Point2D::new(remaining, 0.0),
        SlideDirection::Left => Point2D::new(-remaining, 0.0),
    }
}

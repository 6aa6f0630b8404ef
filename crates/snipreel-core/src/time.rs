use serde::{Deserialize, Serialize};
use std::fmt;

/// Time duration with sub-millisecond precision (stored as fractional seconds).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Duration {
    /// Duration in seconds.
    seconds: f64,
}

impl Duration {
    /// Create a duration from seconds.
    pub fn from_seconds(s: f64) -> Self {
        Self {
            seconds: s.max(0.0),
        }
    }

    /// Duration covered by `frames` frames at `fps`.
    pub fn from_frames(frames: u64, fps: u32) -> Self {
        if fps == 0 {
            return Self::zero();
        }
        Self::from_seconds(frames as f64 / fps as f64)
    }

    /// Create a zero duration.
    pub fn zero() -> Self {
        Self { seconds: 0.0 }
    }

    /// Get duration as seconds.
    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::zero()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds < 1.0 {
            write!(f, "{:.0}ms", self.seconds * 1000.0)
        } else {
            write!(f, "{:.2}s", self.seconds)
        }
    }
}

/// Seconds elapsed at `frame`, the clock the spring simulation runs on.
pub fn frame_to_seconds(frame: u64, fps: u32) -> f64 {
    Duration::from_frames(frame, fps).as_seconds()
}

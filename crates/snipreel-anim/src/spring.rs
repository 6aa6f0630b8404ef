use serde::{Deserialize, Serialize};

/// A damped harmonic spring pulling a value from 0 to 1.
///
/// Evaluated in closed form rather than stepped, so the value at any instant
/// depends only on the elapsed time and never on which frames came before.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub damping: f64,
    pub stiffness: f64,
    pub mass: f64,
}

impl Spring {
    /// The spring driving entrance animations. Slightly overdamped: settles without overshoot.
    pub const ENTRANCE: Spring = Spring {
        damping: 20.0,
        stiffness: 100.0,
        mass: 0.8,
    };

    /// Natural angular frequency, in radians per second.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio; 1.0 is critical damping.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Progress toward 1 after `seconds`, starting from 0 at rest. Clamped to [0, 1].
    pub fn progress(&self, seconds: f64) -> f64 {
        if seconds <= 0.0 {
            return 0.0;
        }
        if self.mass <= 0.0 || self.stiffness <= 0.0 {
            return 1.0;
        }

        // Displacement from the target, starting one unit short with zero velocity.
        let x0 = -1.0;
        let v0 = 0.0;
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio().max(0.0);
        let t = seconds;

        let displacement = if (zeta - 1.0).abs() < 1e-9 {
            (x0 + (v0 + w0 * x0) * t) * (-w0 * t).exp()
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * w0 * t).exp();
            envelope * (x0 * (wd * t).cos() + ((v0 + zeta * w0 * x0) / wd) * (wd * t).sin())
        } else {
            let s = w0 * (zeta * zeta - 1.0).sqrt();
            let r1 = -zeta * w0 + s;
            let r2 = -zeta * w0 - s;
            let a = (v0 - r2 * x0) / (r1 - r2);
            let b = x0 - a;
            a * (r1 * t).exp() + b * (r2 * t).exp()
        };

        (1.0 + displacement).clamp(0.0, 1.0)
    }
}

impl Default for Spring {
    fn default() -> Self {
        Spring::ENTRANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entrance_spring_is_overdamped() {
        assert!(Spring::ENTRANCE.damping_ratio() > 1.0);
    }

    #[test]
    fn test_progress_starts_at_zero_and_settles() {
        let s = Spring::ENTRANCE;
        assert_eq!(s.progress(0.0), 0.0);
        assert!(s.progress(1.0) > 0.99);
        assert!(s.progress(5.0) > 0.999_999);
    }

    #[test]
    fn test_progress_monotone_without_overshoot() {
        let s = Spring::ENTRANCE;
        let mut prev = 0.0;
        for frame in 1..=120 {
            let p = s.progress(frame as f64 / 30.0);
            assert!(p >= prev, "spring went backwards at frame {}", frame);
            assert!(p <= 1.0);
            prev = p;
        }
    }

    #[test]
    fn test_underdamped_and_critical_branches_start_at_rest() {
        let under = Spring {
            damping: 2.0,
            stiffness: 100.0,
            mass: 1.0,
        };
        let critical = Spring {
            damping: 20.0,
            stiffness: 100.0,
            mass: 1.0,
        };
        assert!((critical.damping_ratio() - 1.0).abs() < 1e-12);
        assert!(under.progress(1e-6) < 1e-3);
        assert!(critical.progress(1e-6) < 1e-3);
        assert!(critical.progress(3.0) > 0.999);
    }
}

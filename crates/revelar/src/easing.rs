//! Interpolation curves for animated values.

use serde::{Deserialize, Serialize};

/// Easing function applied to normalized animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    /// Linear interpolation
    Linear,
    /// Cubic ease-out: `1 - (1-t)^3`
    CubicOut,
    /// Cubic ease-in-out
    CubicInOut,
}

impl Easing {
    /// Evaluate the curve at progress `t`, clamped to [0, 1].
    ///
    /// All variants satisfy `evaluate(0) == 0` and `evaluate(1) == 1` exactly.
    #[must_use]
    pub fn evaluate(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicOut => {
                let t1 = 1.0 - t;
                1.0 - t1 * t1 * t1
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t1 = 2.0 * t - 2.0;
                    0.5 * t1 * t1 * t1 + 1.0
                }
            }
        }
    }
}

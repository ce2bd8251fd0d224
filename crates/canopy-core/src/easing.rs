//! Easing curves for animation timing.
//!
//! Every curve maps a linear progress value in `[0, 1]` to eased progress.
//! Input is clamped, and `0 → 0`, `1 → 1` hold exactly for every variant so
//! that animations land on their end values. Some curves (springs, custom
//! Bezier timings) overshoot in between.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Overshoot constant used by the spring curves.
const SPRING_OVERSHOOT: f64 = 1.70158;

/// An easing function.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Identity, no easing.
    #[default]
    Linear,
    SinIn,
    SinOut,
    SinInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    BounceIn,
    BounceOut,
    /// Pulls back before accelerating towards the end.
    SpringIn,
    /// Overshoots the end before settling.
    SpringOut,
    /// CSS-style timing curve with control points `(x1, y1)` and `(x2, y2)`.
    /// `x1` and `x2` are clamped to `[0, 1]` when evaluated.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Evaluate the curve at progress `t`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t == 0.0 || t == 1.0 {
            return t;
        }

        match self {
            Self::Linear => t,
            Self::SinIn => 1.0 - (t * PI * 0.5).cos(),
            Self::SinOut => (t * PI * 0.5).sin(),
            Self::SinInOut => -(PI * t).cos() / 2.0 + 0.5,
            Self::CubicIn => t * t * t,
            Self::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    u * u * u / 2.0 + 1.0
                }
            }
            Self::BounceIn => 1.0 - bounce_out(1.0 - t),
            Self::BounceOut => bounce_out(t),
            Self::SpringIn => t * t * ((SPRING_OVERSHOOT + 1.0) * t - SPRING_OVERSHOOT),
            Self::SpringOut => {
                let u = t - 1.0;
                u * u * ((SPRING_OVERSHOOT + 1.0) * u + SPRING_OVERSHOOT) + 1.0
            }
            Self::CubicBezier { x1, y1, x2, y2 } => {
                let x1 = x1.clamp(0.0, 1.0);
                let x2 = x2.clamp(0.0, 1.0);
                let s = solve_timing_x(x1, x2, t);
                timing_component(y1, y2, s)
            }
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let u = t - 1.5 / D;
        N * u * u + 0.75
    } else if t < 2.5 / D {
        let u = t - 2.25 / D;
        N * u * u + 0.9375
    } else {
        let u = t - 2.625 / D;
        N * u * u + 0.984375
    }
}

/// One axis of a timing curve anchored at (0,0) and (1,1).
#[inline]
fn timing_component(c1: f64, c2: f64, s: f64) -> f64 {
    let ms = 1.0 - s;
    3.0 * ms * ms * s * c1 + 3.0 * ms * s * s * c2 + s * s * s
}

#[inline]
fn timing_derivative(c1: f64, c2: f64, s: f64) -> f64 {
    let ms = 1.0 - s;
    3.0 * ms * ms * c1 + 6.0 * ms * s * (c2 - c1) + 3.0 * s * s * (1.0 - c2)
}

/// Find the curve parameter whose x coordinate equals `target`.
///
/// Newton–Raphson first, falling back to bisection when the slope flattens
/// out (x1 or x2 at the ends of the range).
fn solve_timing_x(x1: f64, x2: f64, target: f64) -> f64 {
    let mut s = target;
    for _ in 0..8 {
        let err = timing_component(x1, x2, s) - target;
        if err.abs() < 1e-9 {
            return s;
        }
        let slope = timing_derivative(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = target;
    for _ in 0..64 {
        let x = timing_component(x1, x2, s);
        if (x - target).abs() < 1e-9 {
            break;
        }
        if x < target {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

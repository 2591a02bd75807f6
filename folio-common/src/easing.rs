//! Easing curves for entrance transitions
//!
//! Named curves follow the CSS / motion-library cubic-bézier definitions so the
//! Rust side reproduces the same motion as the browser:
//! - Linear: `cubic-bezier(0, 0, 1, 1)`
//! - EaseIn: `cubic-bezier(0.42, 0, 1, 1)`
//! - EaseOut: `cubic-bezier(0, 0, 0.58, 1)`
//! - EaseInOut: `cubic-bezier(0.42, 0, 0.58, 1)`

use serde::{Deserialize, Serialize};

/// Newton iterations before falling back to bisection
const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f32 = 1e-3;
const SUBDIVISION_PRECISION: f32 = 1e-6;
const SUBDIVISION_MAX_ITERATIONS: usize = 24;

/// Easing curve applied to normalized transition progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// y = t
    Linear,

    /// Slow start, fast finish
    EaseIn,

    /// Fast start, gentle settle (entrance default)
    EaseOut,

    /// Gentle at both ends
    EaseInOut,

    /// Arbitrary cubic bézier with control points (x1, y1) and (x2, y2)
    ///
    /// x1 and x2 must lie in [0, 1] for the curve to be a function of time;
    /// they are clamped on evaluation.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Map normalized progress to eased progress
    ///
    /// # Arguments
    /// * `progress` - Normalized time through the transition (0.0 to 1.0)
    ///
    /// # Returns
    /// Eased progress. 0.0 maps to 0.0 and 1.0 maps to 1.0 for every curve;
    /// custom béziers may overshoot in between.
    pub fn apply(&self, progress: f32) -> f32 {
        let t = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        if t == 0.0 || t == 1.0 {
            return t;
        }

        match *self {
            Easing::Linear => t,
            _ => {
                let (x1, y1, x2, y2) = self.control_points();
                let x1 = x1.clamp(0.0, 1.0);
                let x2 = x2.clamp(0.0, 1.0);
                if x1 == y1 && x2 == y2 {
                    return t;
                }
                let s = solve_curve_x(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }

    /// Control points of the equivalent cubic bézier
    pub fn control_points(&self) -> (f32, f32, f32, f32) {
        match *self {
            Easing::Linear => (0.0, 0.0, 1.0, 1.0),
            Easing::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Easing::CubicBezier { x1, y1, x2, y2 } => (x1, y1, x2, y2),
        }
    }

    /// Parse a curve name as written in animation tables
    ///
    /// Accepts camelCase (`easeOut`), kebab-case (`ease-out`) and snake_case
    /// (`ease_out`), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "linear" => Some(Easing::Linear),
            "easein" => Some(Easing::EaseIn),
            "easeout" => Some(Easing::EaseOut),
            "easeinout" => Some(Easing::EaseInOut),
            _ => None,
        }
    }

    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::EaseIn => "Ease In",
            Easing::EaseOut => "Ease Out",
            Easing::EaseInOut => "Ease In-Out",
            Easing::CubicBezier { .. } => "Cubic Bézier",
        }
    }

    /// Named curves (custom béziers excluded)
    pub fn named_variants() -> &'static [Easing] {
        &[
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ]
    }
}

impl Default for Easing {
    /// Entrance transitions settle gently
    fn default() -> Self {
        Easing::EaseOut
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One coordinate of a unit cubic bézier (P0 = 0, P3 = 1)
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate equals `x`
fn solve_curve_x(x: f32, x1: f32, x2: f32) -> f32 {
    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < NEWTON_MIN_SLOPE {
            break;
        }
        let err = bezier(s, x1, x2) - x;
        if err.abs() < SUBDIVISION_PRECISION {
            return s;
        }
        s -= err / slope;
    }

    // Newton stalled (flat tangent) or overshot: bisect
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..SUBDIVISION_MAX_ITERATIONS {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < SUBDIVISION_PRECISION {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in Easing::named_variants() {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0.0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1.0", easing);
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Easing::EaseOut.apply(-0.5), 0.0);
        assert_eq!(Easing::EaseOut.apply(1.5), 1.0);
        assert_eq!(Easing::EaseOut.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_ease_out_leads_linear() {
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!(
                Easing::EaseOut.apply(t) > t,
                "ease-out should be ahead of linear at {}",
                t
            );
            assert!(
                Easing::EaseIn.apply(t) < t,
                "ease-in should trail linear at {}",
                t
            );
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in Easing::named_variants() {
            let mut previous = 0.0;
            for i in 0..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(
                    value + 1e-5 >= previous,
                    "{:?} not monotonic at step {}",
                    easing,
                    i
                );
                previous = value;
            }
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let a = Easing::EaseInOut.apply(0.25);
        let b = Easing::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-3, "got {} and {}", a, b);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let curve = Easing::CubicBezier {
            x1: 0.25,
            y1: 0.25,
            x2: 0.75,
            y2: 0.75,
        };
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((curve.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Easing::from_name("easeOut"), Some(Easing::EaseOut));
        assert_eq!(Easing::from_name("ease-in-out"), Some(Easing::EaseInOut));
        assert_eq!(Easing::from_name("EASE_IN"), Some(Easing::EaseIn));
        assert_eq!(Easing::from_name("linear"), Some(Easing::Linear));
        assert_eq!(Easing::from_name("bounce"), None);
        assert_eq!(Easing::from_name(""), None);
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(Easing::default(), Easing::EaseOut);
        assert_eq!(format!("{}", Easing::EaseInOut), "Ease In-Out");
    }
}

//! Easing functions for animations
//!
//! Every curve maps normalized time `t` in `0.0..=1.0` to progress, computed
//! in `f64`. All curves satisfy `f(0) == 0` and `f(1) == 1`; the back,
//! elastic, bounce and underdamped spring curves leave `0.0..=1.0` between
//! the endpoints.
//!
//! Curves are available both as free functions (`ease_out_bounce(t)`) and as
//! [`Easing`] variants, which can be selected by kebab-case name:
//!
//! ```rust
//! use qmui_animation::Easing;
//!
//! let easing: Easing = "ease-out-back".parse().unwrap();
//! assert!(easing.apply(0.9) > 1.0);
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const BACK_C1: f64 = 1.70158;
const BACK_C2: f64 = BACK_C1 * 1.525;
const BACK_C3: f64 = BACK_C1 + 1.0;
const ELASTIC_C4: f64 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f64 = (2.0 * PI) / 4.5;
const BOUNCE_N1: f64 = 7.5625;
const BOUNCE_D1: f64 = 2.75;

/// Returned when an easing name is not in the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown easing {0:?}")]
pub struct ParseEasingError(pub String);

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
    CubicBezier(f64, f64, f64, f64),
    /// Damped spring normalised to land on 1 at `t = 1`, see [`spring`]
    Spring { damping: f64, stiffness: f64 },
}

/// Named curves, in catalog order
const NAMED: [(Easing, &str); 34] = [
    (Easing::Linear, "linear"),
    (Easing::EaseIn, "ease-in"),
    (Easing::EaseOut, "ease-out"),
    (Easing::EaseInOut, "ease-in-out"),
    (Easing::EaseInQuad, "ease-in-quad"),
    (Easing::EaseOutQuad, "ease-out-quad"),
    (Easing::EaseInOutQuad, "ease-in-out-quad"),
    (Easing::EaseInCubic, "ease-in-cubic"),
    (Easing::EaseOutCubic, "ease-out-cubic"),
    (Easing::EaseInOutCubic, "ease-in-out-cubic"),
    (Easing::EaseInQuart, "ease-in-quart"),
    (Easing::EaseOutQuart, "ease-out-quart"),
    (Easing::EaseInOutQuart, "ease-in-out-quart"),
    (Easing::EaseInQuint, "ease-in-quint"),
    (Easing::EaseOutQuint, "ease-out-quint"),
    (Easing::EaseInOutQuint, "ease-in-out-quint"),
    (Easing::EaseInSine, "ease-in-sine"),
    (Easing::EaseOutSine, "ease-out-sine"),
    (Easing::EaseInOutSine, "ease-in-out-sine"),
    (Easing::EaseInExpo, "ease-in-expo"),
    (Easing::EaseOutExpo, "ease-out-expo"),
    (Easing::EaseInOutExpo, "ease-in-out-expo"),
    (Easing::EaseInCirc, "ease-in-circ"),
    (Easing::EaseOutCirc, "ease-out-circ"),
    (Easing::EaseInOutCirc, "ease-in-out-circ"),
    (Easing::EaseInBack, "ease-in-back"),
    (Easing::EaseOutBack, "ease-out-back"),
    (Easing::EaseInOutBack, "ease-in-out-back"),
    (Easing::EaseInElastic, "ease-in-elastic"),
    (Easing::EaseOutElastic, "ease-out-elastic"),
    (Easing::EaseInOutElastic, "ease-in-out-elastic"),
    (Easing::EaseInBounce, "ease-in-bounce"),
    (Easing::EaseOutBounce, "ease-out-bounce"),
    (Easing::EaseInOutBounce, "ease-in-out-bounce"),
];

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        match *self {
            Easing::Linear => t,
            Easing::EaseIn | Easing::EaseInCubic => ease_in_cubic(t),
            Easing::EaseOut | Easing::EaseOutCubic => ease_out_cubic(t),
            Easing::EaseInOut | Easing::EaseInOutCubic => ease_in_out_cubic(t),
            Easing::EaseInQuad => ease_in_quad(t),
            Easing::EaseOutQuad => ease_out_quad(t),
            Easing::EaseInOutQuad => ease_in_out_quad(t),
            Easing::EaseInQuart => ease_in_quart(t),
            Easing::EaseOutQuart => ease_out_quart(t),
            Easing::EaseInOutQuart => ease_in_out_quart(t),
            Easing::EaseInQuint => ease_in_quint(t),
            Easing::EaseOutQuint => ease_out_quint(t),
            Easing::EaseInOutQuint => ease_in_out_quint(t),
            Easing::EaseInSine => ease_in_sine(t),
            Easing::EaseOutSine => ease_out_sine(t),
            Easing::EaseInOutSine => ease_in_out_sine(t),
            Easing::EaseInExpo => ease_in_expo(t),
            Easing::EaseOutExpo => ease_out_expo(t),
            Easing::EaseInOutExpo => ease_in_out_expo(t),
            Easing::EaseInCirc => ease_in_circ(t),
            Easing::EaseOutCirc => ease_out_circ(t),
            Easing::EaseInOutCirc => ease_in_out_circ(t),
            Easing::EaseInBack => ease_in_back(t),
            Easing::EaseOutBack => ease_out_back(t),
            Easing::EaseInOutBack => ease_in_out_back(t),
            Easing::EaseInElastic => ease_in_elastic(t),
            Easing::EaseOutElastic => ease_out_elastic(t),
            Easing::EaseInOutElastic => ease_in_out_elastic(t),
            Easing::EaseInBounce => ease_in_bounce(t),
            Easing::EaseOutBounce => ease_out_bounce(t),
            Easing::EaseInOutBounce => ease_in_out_bounce(t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, x1, y1, x2, y2),
            Easing::Spring { damping, stiffness } => spring_ease(t, damping, stiffness),
        }
    }

    /// All named curves, in a stable order suitable for pickers
    pub fn catalog() -> impl Iterator<Item = Easing> {
        NAMED.iter().map(|(easing, _)| *easing)
    }

    /// Kebab-case name for catalog curves; `None` for parameterized ones
    pub fn name(&self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(easing, _)| easing == self)
            .map(|(_, name)| *name)
    }

    /// True for curves that leave `0.0..=1.0` between the endpoints
    pub fn overshoots(&self) -> bool {
        match *self {
            Easing::EaseInBack
            | Easing::EaseOutBack
            | Easing::EaseInOutBack
            | Easing::EaseInElastic
            | Easing::EaseOutElastic
            | Easing::EaseInOutElastic
            | Easing::EaseInBounce
            | Easing::EaseOutBounce
            | Easing::EaseInOutBounce => true,
            Easing::CubicBezier(_, y1, _, y2) => {
                !(0.0..=1.0).contains(&y1) || !(0.0..=1.0).contains(&y2)
            }
            Easing::Spring { damping, stiffness } => damping < 2.0 * stiffness.max(0.0).sqrt(),
            _ => false,
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
            Easing::Spring { damping, stiffness } => write!(f, "spring({damping}, {stiffness})"),
            _ => f.write_str(self.name().unwrap_or("linear")),
        }
    }
}

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.to_ascii_lowercase().replace('_', "-");

        if let Some((easing, _)) = NAMED.iter().find(|(_, name)| *name == normalized) {
            return Ok(*easing);
        }

        let err = || ParseEasingError(trimmed.to_string());

        if let Some(args) = call_args(&normalized, "cubic-bezier") {
            return match args.as_slice() {
                [x1, y1, x2, y2] => Ok(Easing::CubicBezier(*x1, *y1, *x2, *y2)),
                _ => Err(err()),
            };
        }
        if let Some(args) = call_args(&normalized, "spring") {
            return match args.as_slice() {
                [damping, stiffness] => Ok(Easing::Spring {
                    damping: *damping,
                    stiffness: *stiffness,
                }),
                _ => Err(err()),
            };
        }

        Err(err())
    }
}

/// Parse `name(a, b, ...)` into its numeric arguments
fn call_args(input: &str, name: &str) -> Option<Vec<f64>> {
    let inner = input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    inner
        .split(',')
        .map(|arg| arg.trim().parse::<f64>().ok())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Polynomial curves
// ─────────────────────────────────────────────────────────────────────────────

pub fn linear(t: f64) -> f64 {
    t
}

pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

pub fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn ease_in_cubic(t: f64) -> f64 {
    t * t * t
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub fn ease_in_quart(t: f64) -> f64 {
    t * t * t * t
}

pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

pub fn ease_in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

pub fn ease_in_quint(t: f64) -> f64 {
    t.powi(5)
}

pub fn ease_out_quint(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

pub fn ease_in_out_quint(t: f64) -> f64 {
    if t < 0.5 {
        16.0 * t.powi(5)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Trigonometric, exponential and circular curves
// ─────────────────────────────────────────────────────────────────────────────

pub fn ease_in_sine(t: f64) -> f64 {
    1.0 - (t * PI / 2.0).cos()
}

pub fn ease_out_sine(t: f64) -> f64 {
    (t * PI / 2.0).sin()
}

pub fn ease_in_out_sine(t: f64) -> f64 {
    -((PI * t).cos() - 1.0) / 2.0
}

pub fn ease_in_expo(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f64.powf(10.0 * t - 10.0)
    }
}

pub fn ease_out_expo(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

pub fn ease_in_out_expo(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2f64.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
    }
}

pub fn ease_in_circ(t: f64) -> f64 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

pub fn ease_out_circ(t: f64) -> f64 {
    (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt()
}

pub fn ease_in_out_circ(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overshooting curves
// ─────────────────────────────────────────────────────────────────────────────

pub fn ease_in_back(t: f64) -> f64 {
    BACK_C3 * t * t * t - BACK_C1 * t * t
}

pub fn ease_out_back(t: f64) -> f64 {
    1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
}

pub fn ease_in_out_back(t: f64) -> f64 {
    if t < 0.5 {
        ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
    } else {
        ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0) / 2.0
    }
}

pub fn ease_in_elastic(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
    }
}

pub fn ease_out_elastic(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
    }
}

pub fn ease_in_out_elastic(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        -(2f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
    } else {
        (2f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0 + 1.0
    }
}

pub fn ease_out_bounce(t: f64) -> f64 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}

pub fn ease_in_bounce(t: f64) -> f64 {
    1.0 - ease_out_bounce(1.0 - t)
}

pub fn ease_in_out_bounce(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - ease_out_bounce(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + ease_out_bounce(2.0 * t - 1.0)) / 2.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parameterized curves
// ─────────────────────────────────────────────────────────────────────────────

/// Build a damped-spring curve for the given damping and stiffness (unit mass)
///
/// Underdamped parameters (`damping < 2 * sqrt(stiffness)`) overshoot 1
/// before settling.
///
/// A soft spring has not settled by `t = 1`; its remaining displacement is
/// spread linearly over the curve so progress still reaches 1 without a jump.
///
/// ```rust
/// let wobbly = qmui_animation::easing::spring(6.0, 100.0);
/// assert_eq!(wobbly(0.0), 0.0);
/// assert_eq!(wobbly(1.0), 1.0);
/// ```
pub fn spring(damping: f64, stiffness: f64) -> impl Fn(f64) -> f64 + Copy + Send + Sync {
    move |t| spring_ease(t, damping, stiffness)
}

fn spring_ease(t: f64, damping: f64, stiffness: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 || stiffness <= 0.0 {
        return 1.0;
    }

    let residual = 1.0 - spring_response(1.0, damping, stiffness);
    spring_response(t, damping, stiffness) + residual * t
}

/// Unit-mass damped oscillator released from 0 towards 1
fn spring_response(t: f64, damping: f64, stiffness: f64) -> f64 {
    let w0 = stiffness.sqrt();
    let zeta = damping.max(0.0) / (2.0 * w0);

    if (zeta - 1.0).abs() < 1e-9 {
        // Critically damped
        1.0 - (-w0 * t).exp() * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        // Underdamped
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * w0 * t).exp();
        1.0 - decay * ((wd * t).cos() + (zeta * w0 / wd) * (wd * t).sin())
    } else {
        // Overdamped
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = w0 * (-zeta + root);
        let r2 = w0 * (-zeta - root);
        1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
    }
}

/// Cubic bezier easing calculation (matches CSS `cubic-bezier()` as browsers implement it).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t;

    // Solve for parameter `p` where bezier_x(p) == x using Newton-Raphson,
    // falling back to binary search if the slope is too flat.
    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2);
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    // Binary search fallback (always converges)
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2)
}

/// Evaluate cubic bezier at parameter t: B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    // Horner form: ((1-3p2+3p1)t + 3p2-6p1)t + 3p1) * t
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

/// Derivative of cubic bezier: B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

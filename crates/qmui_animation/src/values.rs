//! Animatable value types
//!
//! Linear interpolation for the value types animations commonly drive, and
//! helpers that start an [`Animation`] feeding interpolated values to a
//! consumer.
//!
//! The helpers start the animation before returning it. Attach a completion
//! callback through [`Animation::builder`] and [`animate_with`] when the
//! callback must be in place before the first tick.

use crate::driver::{Animation, AnimationBuilder};
use crate::easing::Easing;
use qmui_core::{Color, Point, Size};
use std::time::Duration;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// `self + (other - self) * t`, per component; `t` is not clamped
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t as f32
    }
}

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Color::lerp(self, other, t as f32)
    }
}

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

impl Interpolate for Size {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Size::new(
            self.width.lerp(&other.width, t),
            self.height.lerp(&other.height, t),
        )
    }
}

/// Build and start an animation from `builder` that interpolates `from → to`
pub fn animate_with<T, F>(builder: AnimationBuilder, from: T, to: T, consumer: F) -> Animation
where
    T: Interpolate + Send + Sync + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    let animation = builder.build(move |progress| consumer(from.lerp(&to, progress)));
    animation.start();
    animation
}

/// Start an animation interpolating `from → to`
pub fn animate<T, F>(
    from: T,
    to: T,
    duration: Duration,
    easing: Option<Easing>,
    consumer: F,
) -> Animation
where
    T: Interpolate + Send + Sync + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    let builder = Animation::builder(duration).easing(easing.unwrap_or_default());
    animate_with(builder, from, to, consumer)
}

pub fn animate_float<F>(
    from: f64,
    to: f64,
    duration: Duration,
    easing: Option<Easing>,
    consumer: F,
) -> Animation
where
    F: Fn(f64) + Send + Sync + 'static,
{
    animate(from, to, duration, easing, consumer)
}

pub fn animate_color<F>(
    from: Color,
    to: Color,
    duration: Duration,
    easing: Option<Easing>,
    consumer: F,
) -> Animation
where
    F: Fn(Color) + Send + Sync + 'static,
{
    animate(from, to, duration, easing, consumer)
}

pub fn animate_point<F>(
    from: Point,
    to: Point,
    duration: Duration,
    easing: Option<Easing>,
    consumer: F,
) -> Animation
where
    F: Fn(Point) + Send + Sync + 'static,
{
    animate(from, to, duration, easing, consumer)
}

pub fn animate_size<F>(
    from: Size,
    to: Size,
    duration: Duration,
    easing: Option<Easing>,
    consumer: F,
) -> Animation
where
    F: Fn(Size) + Send + Sync + 'static,
{
    animate(from, to, duration, easing, consumer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_per_channel() {
        let from = Color::rgba(0.0, 0.2, 1.0, 1.0);
        let to = Color::rgba(1.0, 0.2, 0.0, 0.0);
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid, Color::rgba(0.5, 0.2, 0.5, 0.5));

        let p = Point::new(0.0, 10.0).lerp(&Point::new(100.0, 20.0), 0.25);
        assert_eq!(p, Point::new(25.0, 12.5));

        let s = Size::new(10.0, 10.0).lerp(&Size::new(20.0, 0.0), 1.0);
        assert_eq!(s, Size::new(20.0, 0.0));
    }

    #[test]
    fn test_lerp_is_not_clamped() {
        assert!((0.0_f64.lerp(&10.0, 1.1) - 11.0).abs() < 1e-9);
        assert!(0.0_f64.lerp(&10.0, -0.5) < 0.0);
    }
}

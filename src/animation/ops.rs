//! Ready-made setters and updaters for [`DynamicValue`](crate::DynamicValue).
//!
//! Every builder captures its arguments by value, so the returned closures stay pure functions
//! of `(value, frame)`.

use crate::animation::ease::Ease;
use crate::foundation::core::{FrameIndex, Rgb8};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Interpolate from `a` (at `t = 0`) to `b` (at `t = 1`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Rgb8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
        }
    }
}

/// Periodic function used by [`wave`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Wave {
    /// `sin(frame / period)`.
    Sin,
    /// `cos(frame / period)`.
    Cos,
}

/// Updater adding `per_frame * frame` to the incoming value.
pub fn drift(per_frame: f64) -> impl Fn(f64, FrameIndex) -> f64 + Send + Sync + 'static {
    move |v, f| v + f.as_f64() * per_frame
}

/// Updater adding `amplitude * wave(frame / period)` to the incoming value.
///
/// `period` is in frames per radian; a zero period leaves the value untouched.
pub fn wave(
    amplitude: f64,
    period: f64,
    kind: Wave,
) -> impl Fn(f64, FrameIndex) -> f64 + Send + Sync + 'static {
    move |v, f| {
        if period == 0.0 {
            return v;
        }
        let phase = f.as_f64() / period;
        let w = match kind {
            Wave::Sin => phase.sin(),
            Wave::Cos => phase.cos(),
        };
        v + amplitude * w
    }
}

/// Updater clamping the incoming value into `[min, max]`.
pub fn clamp(min: f64, max: f64) -> impl Fn(f64, FrameIndex) -> f64 + Send + Sync + 'static {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    move |v, _| v.clamp(lo, hi)
}

/// Setter easing from `from` to `to` over `[start, end]`, holding the end values outside it.
pub fn tween<T>(
    from: T,
    to: T,
    start: FrameIndex,
    end: FrameIndex,
    ease: Ease,
) -> impl Fn(FrameIndex) -> T + Send + Sync + 'static
where
    T: Lerp + Clone + Send + Sync + 'static,
{
    move |f| {
        if f.0 <= start.0 {
            return from.clone();
        }
        if f.0 >= end.0 {
            return to.clone();
        }
        let t = (f.0 - start.0) as f64 / (end.0 - start.0) as f64;
        T::lerp(&from, &to, ease.apply(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;

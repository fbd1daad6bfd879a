//! Piecewise-linear splines over arbitrary value types.
//!
//! A [`Spline`] maps a parameter `t` (usually a particle's age fraction in
//! `0.0..=1.0`) to a value by finding the two control points that bracket `t`
//! and blending between them. The blend is injected, so the same lookup works
//! for scalars, colors, or anything else with a sensible interpolation.
//!
//! # Example
//!
//! ```
//! use pyre::Spline;
//!
//! let mut alpha = Spline::<f32>::linear();
//! alpha.add_point(0.0, 0.0);
//! alpha.add_point(0.1, 1.0);
//! alpha.add_point(0.6, 1.0);
//! alpha.add_point(1.0, 0.0);
//!
//! assert_eq!(alpha.get(0.35), Some(1.0));
//! assert_eq!(alpha.get(2.0), Some(0.0));
//! ```
//!
//! Control points must be added in non-decreasing `t` order. The spline does
//! not sort or validate them; out-of-order points give meaningless results.

use glam::{Vec3, Vec4};
use std::fmt;

/// Linear interpolation between two values of the same type.
///
/// `t = 0.0` yields `a`, `t = 1.0` yields `b`.
pub trait Lerp {
    fn lerp(t: f32, a: &Self, b: &Self) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(t: f32, a: &Self, b: &Self) -> Self {
        a + t * (b - a)
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(t: f32, a: &Self, b: &Self) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Vec4 {
    #[inline]
    fn lerp(t: f32, a: &Self, b: &Self) -> Self {
        a.lerp(*b, t)
    }
}

/// Blend function used by a [`Spline`]: `(fraction, low, high) -> value`.
pub type BlendFn<T> = fn(f32, &T, &T) -> T;

/// Piecewise-linear interpolation table.
#[derive(Clone)]
pub struct Spline<T> {
    points: Vec<(f32, T)>,
    blend: BlendFn<T>,
}

impl<T: Clone> Spline<T> {
    /// Create an empty spline with a custom blend function.
    pub fn new(blend: BlendFn<T>) -> Self {
        Self {
            points: Vec::new(),
            blend,
        }
    }

    /// Create a spline from `(t, value)` pairs in domain order.
    pub fn from_points<I>(blend: BlendFn<T>, points: I) -> Self
    where
        I: IntoIterator<Item = (f32, T)>,
    {
        Self {
            points: points.into_iter().collect(),
            blend,
        }
    }

    /// Append a control point.
    pub fn add_point(&mut self, t: f32, value: T) {
        self.points.push((t, value));
    }

    /// Evaluate the spline at `t`.
    ///
    /// Returns `None` only when the spline has no control points. Outside the
    /// control point range the nearest endpoint value is returned as-is.
    pub fn get(&self, t: f32) -> Option<T> {
        let (first_t, first) = self.points.first()?;
        if t <= *first_t {
            return Some(first.clone());
        }

        // Highest-indexed point strictly below t.
        let lo = self
            .points
            .iter()
            .position(|(pt, _)| *pt >= t)
            .map_or(self.points.len() - 1, |i| i.saturating_sub(1));
        let hi = (lo + 1).min(self.points.len() - 1);

        let (t_lo, v_lo) = &self.points[lo];
        let (t_hi, v_hi) = &self.points[hi];

        if lo == hi || t >= *t_hi {
            return Some(v_hi.clone());
        }
        let span = t_hi - t_lo;
        if span <= 0.0 {
            return Some(v_hi.clone());
        }

        Some((self.blend)((t - t_lo) / span, v_lo, v_hi))
    }

    /// Control points in insertion order.
    pub fn points(&self) -> &[(f32, T)] {
        &self.points
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the spline has no control points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<T: Lerp + Clone> Spline<T> {
    /// Create an empty spline that blends with [`Lerp`].
    pub fn linear() -> Self {
        Self::new(T::lerp)
    }
}

impl<T: Lerp + Clone> Default for Spline<T> {
    fn default() -> Self {
        Self::linear()
    }
}

impl<T: fmt::Debug> fmt::Debug for Spline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spline")
            .field("points", &self.points)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Spline<f32> {
        Spline::from_points(<f32 as Lerp>::lerp, [(0.0, 0.0), (1.0, 10.0)])
    }

    #[test]
    fn test_empty_spline() {
        let spline = Spline::<f32>::linear();
        assert!(spline.is_empty());
        assert_eq!(spline.get(0.5), None);
    }

    #[test]
    fn test_interior_interpolation() {
        let spline = ramp();
        assert_eq!(spline.get(0.25), Some(2.5));
        assert_eq!(spline.get(0.75), Some(7.5));
    }

    #[test]
    fn test_clamps_to_endpoints() {
        let spline = ramp();
        assert_eq!(spline.get(-3.0), Some(0.0));
        assert_eq!(spline.get(0.0), Some(0.0));
        assert_eq!(spline.get(1.0), Some(10.0));
        assert_eq!(spline.get(42.0), Some(10.0));
    }

    #[test]
    fn test_exact_control_points() {
        let mut spline = Spline::<f32>::linear();
        spline.add_point(0.0, 1.0);
        spline.add_point(0.3, 0.1);
        spline.add_point(0.7, 0.7);
        spline.add_point(1.0, 0.2);

        for (t, v) in spline.points().to_vec() {
            assert_eq!(spline.get(t), Some(v), "t = {}", t);
        }
    }

    #[test]
    fn test_single_point() {
        let mut spline = Spline::<f32>::linear();
        spline.add_point(0.5, 3.0);
        assert_eq!(spline.get(0.0), Some(3.0));
        assert_eq!(spline.get(0.5), Some(3.0));
        assert_eq!(spline.get(1.0), Some(3.0));
    }

    #[test]
    fn test_non_monotonic_queries() {
        let spline = ramp();
        let queries = [0.9, 0.1, 0.5, 0.1, 0.9];
        let first: Vec<_> = queries.iter().map(|&t| spline.get(t)).collect();
        let second: Vec<_> = queries.iter().map(|&t| spline.get(t)).collect();
        assert_eq!(first, second);
        assert_eq!(first[1], first[3]);
    }

    #[test]
    fn test_vector_spline() {
        let spline = Spline::from_points(
            <Vec3 as Lerp>::lerp,
            [(0.0, Vec3::new(1.0, 1.0, 0.5)), (1.0, Vec3::new(1.0, 0.5, 0.5))],
        );
        let mid = spline.get(0.5).unwrap();
        assert!((mid - Vec3::new(1.0, 0.75, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_custom_blend() {
        // Step function: holds the low value until the next point.
        let spline = Spline::from_points(|_: f32, a: &u32, _: &u32| *a, [(0.0, 1u32), (1.0, 2u32)]);
        assert_eq!(spline.get(0.99), Some(1));
        assert_eq!(spline.get(1.0), Some(2));
    }

    #[test]
    fn test_duplicate_t_does_not_divide_by_zero() {
        let spline = Spline::from_points(
            <f32 as Lerp>::lerp,
            [(0.0, 0.0), (0.5, 1.0), (0.5, 2.0), (1.0, 3.0)],
        );
        let v = spline.get(0.5).unwrap();
        assert!(v.is_finite());
    }
}

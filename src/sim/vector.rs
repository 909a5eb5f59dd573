//! 2-D vector helpers
//!
//! Positions, velocities and forces are plain `glam::Vec2` values. The
//! in-place `+=`, `-=`, `*=` and `/=` come from glam's operators; everything
//! here is a thin name over the matching glam method.

use glam::Vec2;

/// Zero-guarded normalization and squared length
pub trait Vector2Ext {
    fn squared_length(&self) -> f32;

    /// Scale to unit length in place; no-op on the zero vector
    fn normalize_in_place(&mut self);

    /// Unit-length copy, or zero for the zero vector
    fn normalized(&self) -> Vec2;
}

impl Vector2Ext for Vec2 {
    #[inline]
    fn squared_length(&self) -> f32 {
        self.length_squared()
    }

    #[inline]
    fn normalize_in_place(&mut self) {
        *self = self.normalize_or_zero();
    }

    #[inline]
    fn normalized(&self) -> Vec2 {
        self.normalize_or_zero()
    }
}

#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a.lerp(b, t)
}

#[inline]
pub fn squared_distance(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// `a - b` as a new value
#[inline]
pub fn subtract(a: Vec2, b: Vec2) -> Vec2 {
    a - b
}

/// Component-wise product
#[inline]
pub fn scale(a: Vec2, b: Vec2) -> Vec2 {
    a * b
}

#[inline]
pub fn component_min(a: Vec2, b: Vec2) -> Vec2 {
    a.min(b)
}

#[inline]
pub fn component_max(a: Vec2, b: Vec2) -> Vec2 {
    a.max(b)
}

/// Shorten `v` to at most `max_len`; shorter vectors pass through
#[inline]
pub fn clamp_magnitude(v: Vec2, max_len: f32) -> Vec2 {
    v.clamp_length_max(max_len)
}

//! Drag-damped point mass
//!
//! External forces accumulate between steps and are consumed by exactly one
//! `integrate` call. Drag is quadratic in speed, so a pushed particle settles
//! at a terminal velocity instead of needing a hard cap.

use glam::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct PointMass {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Pending external force, cleared by `integrate`
    force: Vec2,
    pub mass: f32,
    pub drag: f32,
}

impl PointMass {
    pub fn new(position: Vec2, mass: f32, drag: f32) -> Self {
        debug_assert!(mass > 0.0, "point mass needs positive mass");
        Self {
            position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            mass,
            drag,
        }
    }

    /// Queue a force for the next step
    #[inline]
    pub fn add_force(&mut self, f: Vec2) {
        self.force += f;
    }

    /// Force waiting to be applied
    #[inline]
    pub fn pending_force(&self) -> Vec2 {
        self.force
    }

    #[inline]
    pub fn clear_force(&mut self) {
        self.force = Vec2::ZERO;
    }

    /// External force plus drag opposing the current velocity
    fn net_force(&self) -> Vec2 {
        let speed = self.velocity.length();
        self.force - self.velocity * (self.drag * self.mass * speed)
    }

    /// Semi-implicit Euler step: position moves with the velocity from before
    /// this step, then velocity takes the new acceleration.
    pub fn integrate(&mut self, dt: f32) {
        let acceleration = self.net_force() / self.mass;
        self.position += self.velocity * dt;
        self.velocity += acceleration * dt;
        self.clear_force();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_accumulates_until_integrate() {
        let mut p = PointMass::new(Vec2::ZERO, 1.0, 0.0);
        p.add_force(Vec2::new(1.0, 0.0));
        p.add_force(Vec2::new(0.0, 2.0));
        assert_eq!(p.pending_force(), Vec2::new(1.0, 2.0));
        assert_eq!(p.position, Vec2::ZERO);

        p.integrate(0.5);
        assert_eq!(p.pending_force(), Vec2::ZERO);
    }

    #[test]
    fn test_position_uses_old_velocity() {
        let mut p = PointMass::new(Vec2::ZERO, 2.0, 0.0);
        p.add_force(Vec2::new(4.0, 0.0));
        p.integrate(1.0);
        // Started at rest: position unchanged, velocity picked up a = F/m
        assert_eq!(p.position, Vec2::ZERO);
        assert_eq!(p.velocity, Vec2::new(2.0, 0.0));

        p.integrate(1.0);
        assert_eq!(p.position, Vec2::new(2.0, 0.0));
        assert_eq!(p.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_drag_is_quadratic() {
        let mut p = PointMass::new(Vec2::ZERO, 1.0, 0.1);
        p.velocity = Vec2::new(10.0, 0.0);
        p.integrate(0.01);
        // a = -v * drag * |v| = -10 * 0.1 * 10 = -10
        assert!((p.velocity.x - 9.9).abs() < 1e-5);
        assert_eq!(p.velocity.y, 0.0);
        assert!((p.position.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_drag_scales_out_mass() {
        let mut light = PointMass::new(Vec2::ZERO, 1.0, 0.05);
        let mut heavy = PointMass::new(Vec2::ZERO, 8.0, 0.05);
        light.velocity = Vec2::new(30.0, -40.0);
        heavy.velocity = light.velocity;
        light.integrate(0.02);
        heavy.integrate(0.02);
        assert!((light.velocity - heavy.velocity).length() < 1e-4);
    }

    #[test]
    fn test_resting_mass_without_force_stays_put() {
        let mut p = PointMass::new(Vec2::new(5.0, 5.0), 1.0, 0.05);
        for _ in 0..100 {
            p.integrate(0.02);
        }
        assert_eq!(p.position, Vec2::new(5.0, 5.0));
        assert_eq!(p.velocity, Vec2::ZERO);
    }
}

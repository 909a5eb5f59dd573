//! Flat paper confetti
//!
//! A paper square falls at a constant rate, drifts side to side and spins.
//! The spin is faked in 2-D: `cos_a` squashes the square vertically and its
//! sign picks which face color is showing.

use glam::Vec2;
use rand::Rng;

use super::state::Bounds;
use crate::consts::DEG_TO_RAD;
use crate::palette::{Color, ColorPair};
use crate::settings::PaperSettings;
use crate::unit_from_degrees;

#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    pub position: Vec2,
    /// Base orientation of the square (degrees, fixed at creation)
    pub angle_deg: f32,
    pub rotation_deg_per_sec: f32,
    /// Current spin angle (degrees, kept in 0..360)
    pub rotation_phase_deg: f32,
    /// Cosine of the spin angle; drives foreshortening and face color
    pub cos_a: f32,
    pub size: f32,
    pub oscillation_speed: f32,
    /// Seconds of drift accumulated so far
    pub oscillation_phase: f32,
    pub horizontal_speed: f32,
    pub vertical_speed: f32,
    pub front_color: Color,
    pub back_color: Color,
    /// Unit offsets of the four corners, rotated by `angle_deg`
    pub corners: [Vec2; 4],
}

impl Paper {
    pub fn new(
        position: Vec2,
        settings: &PaperSettings,
        palette: &[ColorPair],
        rng: &mut impl Rng,
    ) -> Self {
        let rotation_deg_per_sec = rng.random_range(800.0..1400.0);
        let angle_deg = rng.random_range(0.0..360.0);
        let rotation_phase_deg = rng.random_range(0.0..360.0);
        let oscillation_speed = rng.random_range(0.5..2.0);
        let vertical_speed = rng.random_range(50.0..110.0);
        let oscillation_phase = rng.random::<f32>();
        let colors = pick_colors(palette, rng);

        let corners = std::array::from_fn(|i| unit_from_degrees(angle_deg + (i as f32 * 90.0 + 45.0)));

        Self {
            position,
            angle_deg,
            rotation_deg_per_sec,
            rotation_phase_deg,
            cos_a: 1.0,
            size: settings.size,
            oscillation_speed,
            oscillation_phase,
            horizontal_speed: settings.horizontal_speed,
            vertical_speed,
            front_color: colors.front,
            back_color: colors.back,
            corners,
        }
    }

    /// Advance one step. Returns true if the piece fell past the bottom and
    /// was recycled to the top edge.
    pub fn update(&mut self, dt: f32, bounds: &Bounds, rng: &mut impl Rng) -> bool {
        self.oscillation_phase += dt;
        self.rotation_phase_deg =
            (self.rotation_phase_deg + self.rotation_deg_per_sec * dt).rem_euclid(360.0);
        self.cos_a = (self.rotation_phase_deg * DEG_TO_RAD).cos();

        self.position.x +=
            (self.oscillation_phase * self.oscillation_speed).cos() * self.horizontal_speed * dt;
        self.position.y += self.vertical_speed * dt;

        if self.position.y > bounds.height {
            self.position = Vec2::new(rng.random::<f32>() * bounds.width, 0.0);
            return true;
        }
        false
    }

    /// Color of the face currently turned toward the viewer
    #[inline]
    pub fn face_color(&self) -> Color {
        if self.cos_a > 0.0 {
            self.front_color
        } else {
            self.back_color
        }
    }

    /// Quad corners in logical pixels, squashed by the spin
    pub fn outline(&self) -> [Vec2; 4] {
        self.corners.map(|c| {
            self.position + Vec2::new(c.x * self.size, c.y * self.size * self.cos_a)
        })
    }
}

/// Uniform pick of a front/back pair
pub(crate) fn pick_colors(palette: &[ColorPair], rng: &mut impl Rng) -> ColorPair {
    palette[rng.random_range(0..palette.len())]
}

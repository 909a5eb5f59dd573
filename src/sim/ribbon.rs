//! Ribbon streamers
//!
//! A ribbon is a chain of point masses. The head follows a scripted falling
//! wobble; each trailing particle is pulled toward the one ahead with a force
//! proportional to how fast the head just moved, integrated, and then pinned
//! back to exactly `particle_spacing` from its predecessor. The result flexes
//! like a damped spring but never stretches.

use glam::Vec2;
use rand::Rng;

use super::paper::pick_colors;
use super::point_mass::PointMass;
use super::state::Bounds;
use super::vector::{Vector2Ext, distance};
use crate::palette::{Color, ColorPair};
use crate::polar_to_cartesian;
use crate::settings::RibbonSettings;

/// Trailing direction used when a particle lands exactly on its predecessor
const FALLBACK_TRAIL: Vec2 = Vec2::NEG_Y;

#[derive(Debug, Clone, PartialEq)]
pub struct Ribbon {
    /// Scripted head position
    pub anchor: Vec2,
    /// Head position at the end of the previous step
    pub prev_anchor: Vec2,
    /// Chain from head (index 0) to tail
    pub particles: Vec<PointMass>,
    pub particle_count: usize,
    pub particle_spacing: f32,
    pub particle_mass: f32,
    pub particle_drag: f32,
    /// Scales the velocity-inheritance pull on trailing particles
    pub head_inherit_factor: f32,
    pub oscillation_speed: f32,
    pub oscillation_phase: f32,
    pub oscillation_amplitude: f32,
    pub fall_speed: f32,
    /// Offset from a chain point to the far edge of the streamer
    pub thickness_offset: Vec2,
    pub front_color: Color,
    pub back_color: Color,
}

impl Ribbon {
    pub fn new(
        anchor: Vec2,
        settings: &RibbonSettings,
        palette: &[ColorPair],
        rng: &mut impl Rng,
    ) -> Self {
        let colors = pick_colors(palette, rng);
        let mut ribbon = Self {
            anchor,
            prev_anchor: anchor,
            particles: Vec::with_capacity(settings.particle_count),
            particle_count: settings.particle_count,
            particle_spacing: settings.particle_spacing,
            particle_mass: settings.particle_mass,
            particle_drag: settings.particle_drag,
            head_inherit_factor: rng.random_range(4.0..6.0),
            oscillation_phase: rng.random_range(0.0..100.0),
            oscillation_speed: rng.random_range(2.0..4.0),
            oscillation_amplitude: rng.random_range(40.0..80.0),
            fall_speed: rng.random_range(80.0..120.0),
            thickness_offset: polar_to_cartesian(settings.thickness, settings.angle_deg),
            front_color: colors.front,
            back_color: colors.back,
        };
        ribbon.rebuild_chain();
        ribbon
    }

    /// Lay the chain out straight up from the anchor
    fn rebuild_chain(&mut self) {
        let (anchor, spacing) = (self.anchor, self.particle_spacing);
        let (mass, drag) = (self.particle_mass, self.particle_drag);
        self.particles.clear();
        self.particles.extend((0..self.particle_count).map(|i| {
            PointMass::new(anchor - Vec2::new(0.0, i as f32 * spacing), mass, drag)
        }));
    }

    /// Anchor depth past which the whole chain is off screen
    #[inline]
    pub fn reset_line(&self, bounds: &Bounds) -> f32 {
        bounds.height + self.particle_spacing * self.particle_count as f32
    }

    /// Start over above the top edge with fresh motion and colors
    pub fn reset(&mut self, bounds: &Bounds, palette: &[ColorPair], rng: &mut impl Rng) {
        self.anchor.y = -rng.random::<f32>() * bounds.height;
        self.anchor.x = rng.random::<f32>() * bounds.width;
        self.prev_anchor = self.anchor;
        self.head_inherit_factor = rng.random_range(4.0..6.0);
        self.oscillation_phase = rng.random_range(0.0..100.0);
        self.oscillation_speed = rng.random_range(1.5..3.5);
        self.oscillation_amplitude = rng.random_range(40.0..80.0);
        self.fall_speed = rng.random_range(80.0..120.0);
        let colors = pick_colors(palette, rng);
        self.front_color = colors.front;
        self.back_color = colors.back;
        self.rebuild_chain();
    }

    /// Advance one step. Returns true if the ribbon left the bottom and was
    /// reset above the top edge.
    pub fn update(
        &mut self,
        dt: f32,
        bounds: &Bounds,
        palette: &[ColorPair],
        rng: &mut impl Rng,
    ) -> bool {
        // Kinematic head
        self.oscillation_phase += dt * self.oscillation_speed;
        self.anchor.y += self.fall_speed * dt;
        self.anchor.x += self.oscillation_phase.cos() * self.oscillation_amplitude * dt;
        self.particles[0].position = self.anchor;

        let delta = distance(self.prev_anchor, self.anchor);
        self.prev_anchor = self.anchor;

        // Velocity inheritance
        let pull = (delta / dt) * self.head_inherit_factor;
        for i in 1..self.particles.len() {
            let dir = (self.particles[i - 1].position - self.particles[i].position).normalized();
            self.particles[i].add_force(dir * pull);
        }
        for particle in self.particles.iter_mut().skip(1) {
            particle.integrate(dt);
        }

        self.relax();

        if self.anchor.y > self.reset_line(bounds) {
            self.reset(bounds, palette, rng);
            return true;
        }
        false
    }

    /// Pin every particle to `particle_spacing` from its predecessor, head to tail
    fn relax(&mut self) {
        for i in 1..self.particles.len() {
            let prev = self.particles[i - 1].position;
            let mut dir = (self.particles[i].position - prev).normalized();
            if dir == Vec2::ZERO {
                dir = FALLBACK_TRAIL;
            }
            self.particles[i].position = prev + dir * self.particle_spacing;
        }
    }

    /// Which side of segment `i` faces the viewer. The sign of the cross
    /// product between the segment and its offset far edge flips as the
    /// streamer twists past the thickness direction.
    pub fn segment_color(&self, i: usize) -> Color {
        let p0 = self.particles[i].position;
        let p1 = self.particles[i + 1].position;
        if side(p0, p1, p1 + self.thickness_offset) < 0.0 {
            self.front_color
        } else {
            self.back_color
        }
    }
}

/// Signed area test of `c` against the line `b -> a`
#[inline]
fn side(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (a - b).perp_dot(c - b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::default_palette;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ribbon_with(count: usize, anchor: Vec2) -> (Ribbon, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(99);
        let settings = RibbonSettings {
            particle_count: count,
            ..Default::default()
        };
        let ribbon = Ribbon::new(anchor, &settings, &default_palette(), &mut rng);
        (ribbon, rng)
    }

    fn assert_spacing(ribbon: &Ribbon) {
        for pair in ribbon.particles.windows(2) {
            let d = distance(pair[0].position, pair[1].position);
            assert!(
                (d - ribbon.particle_spacing).abs() < 1e-3,
                "spacing drifted to {}",
                d
            );
        }
    }

    #[test]
    fn test_new_chain_stacks_above_anchor() {
        let (ribbon, _) = ribbon_with(10, Vec2::new(100.0, 50.0));
        assert_eq!(ribbon.particles.len(), 10);
        for (i, p) in ribbon.particles.iter().enumerate() {
            assert_eq!(p.position, Vec2::new(100.0, 50.0 - i as f32 * 8.0));
        }
        let off = ribbon.thickness_offset;
        assert!((off.length() - 8.0).abs() < 1e-4);
        assert!((off.x - off.y).abs() < 1e-4);
    }

    #[test]
    fn test_head_follows_anchor() {
        let (mut ribbon, mut rng) = ribbon_with(10, Vec2::new(100.0, 50.0));
        let bounds = Bounds::new(400.0, 400.0);
        ribbon.update(0.02, &bounds, &default_palette(), &mut rng);
        assert_eq!(ribbon.particles[0].position, ribbon.anchor);
        assert_eq!(ribbon.prev_anchor, ribbon.anchor);
        assert!(ribbon.anchor.y > 50.0);
    }

    #[test]
    fn test_spacing_holds_every_step() {
        let (mut ribbon, mut rng) = ribbon_with(10, Vec2::new(200.0, -100.0));
        let bounds = Bounds::new(400.0, 300.0);
        let palette = default_palette();
        for _ in 0..2000 {
            ribbon.update(0.02, &bounds, &palette, &mut rng);
            assert_spacing(&ribbon);
        }
    }

    #[test]
    fn test_trailing_particles_get_pulled() {
        let (mut ribbon, mut rng) = ribbon_with(3, Vec2::new(100.0, 100.0));
        let bounds = Bounds::new(400.0, 400.0);
        ribbon.update(0.02, &bounds, &default_palette(), &mut rng);
        // The pull is consumed by integration, leaving velocity behind
        for p in &ribbon.particles[1..] {
            assert_eq!(p.pending_force(), Vec2::ZERO);
            assert!(p.velocity.length() > 0.0);
        }
    }

    #[test]
    fn test_head_only_chain() {
        let (mut ribbon, mut rng) = ribbon_with(1, Vec2::new(100.0, 100.0));
        let bounds = Bounds::new(400.0, 400.0);
        for _ in 0..50 {
            ribbon.update(0.02, &bounds, &default_palette(), &mut rng);
            assert_eq!(ribbon.particles.len(), 1);
            let head = &ribbon.particles[0];
            assert!(head.position.is_finite());
            assert_eq!(head.position, ribbon.anchor);
            assert_eq!(head.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_reset_after_leaving_bottom() {
        let bounds = Bounds::new(400.0, 300.0);
        let (mut ribbon, mut rng) = ribbon_with(10, Vec2::new(100.0, 0.0));
        ribbon.anchor.y = ribbon.reset_line(&bounds) - 0.5;
        ribbon.prev_anchor = ribbon.anchor;

        assert!(ribbon.update(0.02, &bounds, &default_palette(), &mut rng));
        assert!(ribbon.anchor.y <= 0.0);
        assert!(ribbon.anchor.y >= -300.0);
        assert_eq!(ribbon.prev_anchor, ribbon.anchor);
        assert!((1.5..3.5).contains(&ribbon.oscillation_speed));
        assert_eq!(ribbon.particles.len(), 10);
        for (i, p) in ribbon.particles.iter().enumerate() {
            assert_eq!(p.velocity, Vec2::ZERO);
            assert_eq!(p.position.y, ribbon.anchor.y - i as f32 * 8.0);
        }
    }

    #[test]
    fn test_coincident_particles_stay_spaced() {
        let (mut ribbon, _) = ribbon_with(3, Vec2::new(10.0, 10.0));
        for p in ribbon.particles.iter_mut() {
            p.position = Vec2::new(10.0, 10.0);
        }
        ribbon.relax();
        assert_spacing(&ribbon);
        assert!(ribbon.particles[2].position.is_finite());
    }

    #[test]
    fn test_segment_color_flips_with_orientation() {
        let (mut ribbon, _) = ribbon_with(2, Vec2::ZERO);
        ribbon.thickness_offset = Vec2::new(8.0, 0.0);
        ribbon.particles[0].position = Vec2::new(0.0, 0.0);
        ribbon.particles[1].position = Vec2::new(0.0, -8.0);
        let up = ribbon.segment_color(0);
        ribbon.particles[1].position = Vec2::new(0.0, 8.0);
        let down = ribbon.segment_color(0);
        assert_ne!(up == ribbon.front_color, down == ribbon.front_color);
    }
}

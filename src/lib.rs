//! Prize Confetti - paper and ribbon overlay for the prize reveal
//!
//! Core modules:
//! - `sim`: Deterministic confetti simulation (papers, ribbons, point masses)
//! - `renderer`: Triangle batching and the WebGPU pipeline
//! - `platform`: Container measurement and frame scheduling
//! - `surface`: The simulation surface that ties the above together

pub mod error;
pub mod palette;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod surface;

pub use error::ConfettiError;
pub use palette::{Color, ColorPair};
pub use settings::{PaperSettings, QualityPreset, RibbonSettings, Settings};
pub use surface::ConfettiSurface;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Logical simulation rate; one fixed step per displayed frame
    pub const TICKS_PER_SECOND: f32 = 50.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND;

    pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

    /// Default piece counts
    pub const RIBBON_COUNT: usize = 11;
    pub const PAPER_COUNT: usize = 95;

    /// Ribbon defaults
    pub const RIBBON_PARTICLE_COUNT: usize = 10;
    pub const RIBBON_PARTICLE_SPACING: f32 = 8.0;
    pub const RIBBON_THICKNESS: f32 = 8.0;
    pub const RIBBON_ANGLE_DEG: f32 = 45.0;
    pub const RIBBON_PARTICLE_MASS: f32 = 1.0;
    pub const RIBBON_PARTICLE_DRAG: f32 = 0.05;

    /// Paper defaults
    pub const PAPER_SIZE: f32 = 5.0;
    pub const PAPER_HORIZONTAL_SPEED: f32 = 40.0;

    /// Seed used when the host supplies none and there is no clock to draw from
    pub const DEFAULT_SEED: u64 = 0x00C0_FFEE;
}

/// Unit vector pointing at `degrees` (screen space, y down)
#[inline]
pub fn unit_from_degrees(degrees: f32) -> Vec2 {
    let theta = degrees * consts::DEG_TO_RAD;
    Vec2::new(theta.cos(), theta.sin())
}

/// Convert polar (r, degrees) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, degrees: f32) -> Vec2 {
    unit_from_degrees(degrees) * r
}

//! Deterministic confetti simulation
//!
//! All motion lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (papers, then ribbons, in creation order)
//! - No rendering or platform dependencies

pub mod paper;
pub mod point_mass;
pub mod ribbon;
pub mod state;
pub mod tick;
pub mod vector;

pub use paper::Paper;
pub use point_mass::PointMass;
pub use ribbon::Ribbon;
pub use state::{Bounds, ConfettiState, SimStats};
pub use tick::tick;
pub use vector::{
    Vector2Ext, clamp_magnitude, component_max, component_min, distance, lerp, scale,
    squared_distance, subtract,
};

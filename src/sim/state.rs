//! Simulation state
//!
//! Everything the confetti loop mutates lives here, owned by one value.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::paper::Paper;
use super::ribbon::Ribbon;
use crate::error::ConfettiError;
use crate::palette::ColorPair;
use crate::settings::Settings;

/// Visible area in logical pixels. Read fresh by every recycle check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when there is no area to simulate in
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Running counters, for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    pub ticks: u64,
    pub paper_recycles: u64,
    pub ribbon_resets: u64,
}

/// Complete confetti state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct ConfettiState {
    /// Seed the layout was generated from
    pub seed: u64,
    pub bounds: Bounds,
    /// Drawn first
    pub papers: Vec<Paper>,
    /// Drawn on top of the papers
    pub ribbons: Vec<Ribbon>,
    /// Color pairs for ribbon resets
    pub palette: Vec<ColorPair>,
    pub stats: SimStats,
    pub(crate) rng: Pcg32,
}

impl ConfettiState {
    /// Seed every piece inside `bounds`
    pub fn new(seed: u64, settings: &Settings, bounds: Bounds) -> Result<Self, ConfettiError> {
        settings.validate()?;
        if bounds.is_empty() {
            return Err(ConfettiError::EmptyContainer {
                width: bounds.width,
                height: bounds.height,
            });
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let palette = settings.palette.clone();

        // Ribbons start staggered up to two screens above the top edge
        let ribbons = (0..settings.effective_ribbon_count())
            .map(|_| {
                let x = rng.random::<f32>() * bounds.width;
                let y = -rng.random::<f32>() * bounds.height * 2.0;
                Ribbon::new(Vec2::new(x, y), &settings.ribbon, &palette, &mut rng)
            })
            .collect();

        let papers = (0..settings.effective_paper_count())
            .map(|_| {
                let x = rng.random::<f32>() * bounds.width;
                let y = rng.random::<f32>() * bounds.height;
                Paper::new(Vec2::new(x, y), &settings.paper, &palette, &mut rng)
            })
            .collect();

        Ok(Self {
            seed,
            bounds,
            papers,
            ribbons,
            palette,
            stats: SimStats::default(),
            rng,
        })
    }

    /// Apply a new visible area; takes effect on the next tick
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}

//! Overlay settings
//!
//! Persisted in LocalStorage so a deployment can retune piece counts and
//! colors without a rebuild.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfettiError;
use crate::palette::{ColorPair, default_palette};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn name(&self) -> &'static str {
        match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
        }
    }

    /// Multiplier applied to the configured piece counts
    pub fn count_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QualityPreset {
    type Err = ConfettiError;

    /// Case-insensitive preset name, as passed in from the page
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            other => Err(ConfettiError::invalid(format!(
                "unknown quality preset {:?}",
                other
            ))),
        }
    }
}

/// Shape of every ribbon streamer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonSettings {
    /// Particles per ribbon, head included
    pub particle_count: usize,
    /// Fixed distance between neighbouring particles (logical px)
    pub particle_spacing: f32,
    /// Width of the streamer (logical px)
    pub thickness: f32,
    /// Direction the streamer's width extends in (degrees)
    pub angle_deg: f32,
    pub particle_mass: f32,
    pub particle_drag: f32,
}

impl Default for RibbonSettings {
    fn default() -> Self {
        Self {
            particle_count: RIBBON_PARTICLE_COUNT,
            particle_spacing: RIBBON_PARTICLE_SPACING,
            thickness: RIBBON_THICKNESS,
            angle_deg: RIBBON_ANGLE_DEG,
            particle_mass: RIBBON_PARTICLE_MASS,
            particle_drag: RIBBON_PARTICLE_DRAG,
        }
    }
}

/// Shape of every paper piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperSettings {
    /// Half-diagonal of the square (logical px)
    pub size: f32,
    /// Peak sideways drift speed (logical px/s)
    pub horizontal_speed: f32,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            size: PAPER_SIZE,
            horizontal_speed: PAPER_HORIZONTAL_SPEED,
        }
    }
}

/// Confetti overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scales the piece counts below
    pub quality: QualityPreset,
    pub ribbon_count: usize,
    pub paper_count: usize,
    /// Logical steps per second; every displayed frame advances one step
    pub ticks_per_second: f32,
    pub ribbon: RibbonSettings,
    pub paper: PaperSettings,
    /// Front/back color pairs pieces pick from
    pub palette: Vec<ColorPair>,
    /// Fixed seed for reproducible layouts (None = per session)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            ribbon_count: RIBBON_COUNT,
            paper_count: PAPER_COUNT,
            ticks_per_second: TICKS_PER_SECOND,
            ribbon: RibbonSettings::default(),
            paper: PaperSettings::default(),
            palette: default_palette(),
            seed: None,
        }
    }
}

impl Settings {
    /// Switch to the named preset and persist the result. Unknown names
    /// leave the settings untouched.
    pub fn select_quality(&mut self, name: &str) -> Result<QualityPreset, ConfettiError> {
        let preset: QualityPreset = name.parse()?;
        self.quality = preset;
        self.save();
        log::info!(
            "Confetti quality set to {}: {} ribbons, {} papers",
            preset,
            self.effective_ribbon_count(),
            self.effective_paper_count()
        );
        Ok(preset)
    }

    /// Ribbon count after the quality preset is applied
    pub fn effective_ribbon_count(&self) -> usize {
        (self.ribbon_count as f32 * self.quality.count_scale()).round() as usize
    }

    /// Paper count after the quality preset is applied
    pub fn effective_paper_count(&self) -> usize {
        (self.paper_count as f32 * self.quality.count_scale()).round() as usize
    }

    /// Logical time advanced by each tick
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.ticks_per_second
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfettiError> {
        if !(self.ticks_per_second.is_finite() && self.ticks_per_second > 0.0) {
            return Err(ConfettiError::invalid(format!(
                "ticks_per_second must be positive, got {}",
                self.ticks_per_second
            )));
        }
        if self.palette.is_empty() {
            return Err(ConfettiError::invalid("palette needs at least one color pair"));
        }
        let ribbon = &self.ribbon;
        if ribbon.particle_count == 0 {
            return Err(ConfettiError::invalid("ribbon.particle_count must be at least 1"));
        }
        if !(ribbon.particle_spacing > 0.0) {
            return Err(ConfettiError::invalid(format!(
                "ribbon.particle_spacing must be positive, got {}",
                ribbon.particle_spacing
            )));
        }
        if !(ribbon.particle_mass > 0.0) {
            return Err(ConfettiError::invalid(format!(
                "ribbon.particle_mass must be positive, got {}",
                ribbon.particle_mass
            )));
        }
        if !(ribbon.particle_drag >= 0.0) {
            return Err(ConfettiError::invalid(format!(
                "ribbon.particle_drag must not be negative, got {}",
                ribbon.particle_drag
            )));
        }
        if !(self.paper.size > 0.0) {
            return Err(ConfettiError::invalid(format!(
                "paper.size must be positive, got {}",
                self.paper.size
            )));
        }
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "prize_confetti_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(settings) => {
                        log::info!("Loaded confetti settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored confetti settings: {}", e),
                }
            }
        }

        log::info!("Using default confetti settings");
        Self::default()
    }

    /// Write the settings back to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    fn save(&self) {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            log::warn!("LocalStorage unavailable; confetti settings not persisted");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("LocalStorage rejected confetti settings");
                }
            }
            Err(e) => log::warn!("Could not serialize confetti settings: {}", e),
        }
    }

    /// Native runs always start from the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save(&self) {
        log::debug!("Settings persistence is web-only; keeping {} in memory", self.quality);
    }
}

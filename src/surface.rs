//! The simulation surface
//!
//! Owns the confetti state, the triangle batch it is drawn into, and the
//! pending frame request. The host calls `start()` at the reward moment,
//! `resize()` whenever the container changes size, and `on_frame()` from the
//! frame callback it wired into the scheduler.

use crate::error::ConfettiError;
use crate::platform::{self, Container, FrameHandle, FrameScheduler};
use crate::renderer::{DrawSurface, VertexBatch, draw_state};
use crate::settings::Settings;
use crate::sim::{self, Bounds, ConfettiState};

pub struct ConfettiSurface<C: Container, S: FrameScheduler> {
    container: C,
    scheduler: S,
    state: ConfettiState,
    batch: VertexBatch,
    /// Logical time per tick, independent of real frame timing
    dt: f32,
    pixel_ratio: f32,
    /// Backing store size in device pixels
    device_size: (u32, u32),
    /// Frame queued by the last tick; None while stopped
    pending: Option<FrameHandle>,
}

/// Logical size times pixel ratio, rounded down to whole device pixels
fn device_size(bounds: Bounds, ratio: f32) -> (u32, u32) {
    (
        (bounds.width * ratio).floor() as u32,
        (bounds.height * ratio).floor() as u32,
    )
}

impl<C: Container, S: FrameScheduler> ConfettiSurface<C, S> {
    /// Measure the container and seed every piece. Fails if the container
    /// has not been laid out yet.
    pub fn new(mut container: C, scheduler: S, settings: &Settings) -> Result<Self, ConfettiError> {
        let (width, height) = container.logical_size();
        let bounds = Bounds::new(width, height);
        if bounds.is_empty() {
            return Err(ConfettiError::EmptyContainer { width, height });
        }

        let seed = settings.seed.unwrap_or_else(platform::session_seed);
        let state = ConfettiState::new(seed, settings, bounds)?;

        let pixel_ratio = container.pixel_ratio();
        let size = device_size(bounds, pixel_ratio);
        container.resize_backing(size.0, size.1);

        log::info!(
            "Confetti surface {}x{} @{}x: {} papers, {} ribbons, seed {}",
            width,
            height,
            pixel_ratio,
            state.papers.len(),
            state.ribbons.len(),
            seed
        );

        Ok(Self {
            container,
            scheduler,
            state,
            batch: VertexBatch::new(),
            dt: settings.fixed_dt(),
            pixel_ratio,
            device_size: size,
            pending: None,
        })
    }

    /// Re-measure the container and apply the new bounds to every piece.
    /// A container that currently measures empty (hidden, collapsed) keeps
    /// the previous bounds.
    pub fn resize(&mut self) {
        let (width, height) = self.container.logical_size();
        let bounds = Bounds::new(width, height);
        if bounds.is_empty() {
            log::debug!("Ignoring resize to empty container {}x{}", width, height);
            return;
        }

        self.pixel_ratio = self.container.pixel_ratio();
        self.device_size = device_size(bounds, self.pixel_ratio);
        self.container
            .resize_backing(self.device_size.0, self.device_size.1);
        self.state.set_bounds(bounds);

        log::info!(
            "Confetti surface resized to {}x{} ({}x{} device px)",
            width,
            height,
            self.device_size.0,
            self.device_size.1
        );
    }

    /// Rebuild every piece from new settings inside the current bounds. A
    /// running loop carries on with the new pieces; invalid settings leave
    /// the current ones in place.
    pub fn reconfigure(&mut self, settings: &Settings) -> Result<(), ConfettiError> {
        let seed = settings.seed.unwrap_or(self.state.seed);
        self.state = ConfettiState::new(seed, settings, self.state.bounds)?;
        self.dt = settings.fixed_dt();
        log::info!(
            "Confetti reconfigured: {} papers, {} ribbons",
            self.state.papers.len(),
            self.state.ribbons.len()
        );
        Ok(())
    }

    /// Begin (or restart) the frame loop. Runs one tick immediately.
    pub fn start(&mut self) {
        if self.is_running() {
            self.stop();
        }
        log::info!("Confetti started");
        self.tick();
    }

    /// Cancel the queued frame. Pieces keep their state for the next start.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
            log::info!("Confetti stopped after {} ticks", self.state.stats.ticks);
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Frame callback entry. Returns true if a tick ran and the batch holds
    /// a new frame; a frame arriving after `stop()` is ignored.
    pub fn on_frame(&mut self) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.tick();
        true
    }

    fn tick(&mut self) {
        self.batch.clear();
        sim::tick(&mut self.state, self.dt);
        draw_state(&mut self.batch, &self.state, self.pixel_ratio);
        self.pending = Some(self.scheduler.request_frame());
    }

    /// Triangles of the most recent tick, in device pixels
    pub fn batch(&self) -> &VertexBatch {
        &self.batch
    }

    pub fn state(&self) -> &ConfettiState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ConfettiState {
        &mut self.state
    }

    pub fn device_size(&self) -> (u32, u32) {
        self.device_size
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FixedContainer, ManualScheduler};

    type TestSurface = ConfettiSurface<FixedContainer, ManualScheduler>;

    fn surface(width: f32, height: f32) -> Result<TestSurface, ConfettiError> {
        let settings = Settings {
            seed: Some(11),
            ..Default::default()
        };
        ConfettiSurface::new(
            FixedContainer::new(width, height, 2.0),
            ManualScheduler::new(),
            &settings,
        )
    }

    /// Fire the pending frame the way the display refresh would
    fn frame(s: &mut TestSurface) -> bool {
        s.scheduler_mut().fire();
        s.on_frame()
    }

    #[test]
    fn test_new_sizes_backing_store() {
        let s = surface(400.0, 300.0).unwrap();
        assert_eq!(s.device_size(), (800, 600));
        assert_eq!(s.container().backing, (800, 600));
        assert!(!s.is_running());
        assert!(s.batch().is_empty());
    }

    #[test]
    fn test_empty_container_is_an_error() {
        let err = surface(0.0, 300.0).err().unwrap();
        assert!(matches!(err, ConfettiError::EmptyContainer { .. }));
        assert!(surface(400.0, 0.0).is_err());
    }

    #[test]
    fn test_start_ticks_and_schedules() {
        let mut s = surface(400.0, 300.0).unwrap();
        s.start();
        assert!(s.is_running());
        assert_eq!(s.state().stats.ticks, 1);
        assert!(s.scheduler().pending().is_some());
        assert!(!s.batch().is_empty());

        assert!(frame(&mut s));
        assert!(frame(&mut s));
        assert_eq!(s.state().stats.ticks, 3);
    }

    #[test]
    fn test_stop_pauses_without_reseeding() {
        let mut s = surface(400.0, 300.0).unwrap();
        s.start();
        frame(&mut s);
        s.stop();
        assert!(!s.is_running());
        assert_eq!(s.scheduler().pending(), None);
        assert_eq!(s.scheduler().cancelled, 1);

        let papers = s.state().papers.clone();
        // A late frame after stop does nothing
        assert!(!s.on_frame());
        assert_eq!(s.state().papers, papers);

        s.start();
        assert_eq!(s.state().stats.ticks, 3);
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut s = surface(400.0, 300.0).unwrap();
        s.start();
        s.start();
        assert_eq!(s.scheduler().cancelled, 1);
        assert_eq!(s.scheduler().requested, 2);
        assert!(s.is_running());
    }

    #[test]
    fn test_stop_before_start_is_safe() {
        let mut s = surface(400.0, 300.0).unwrap();
        s.stop();
        s.resize();
        assert!(!s.is_running());
        assert_eq!(s.scheduler().cancelled, 0);
    }

    #[test]
    fn test_resize_updates_bounds() {
        let mut s = surface(400.0, 300.0).unwrap();
        s.container_mut().set_size(200.0, 150.0);
        s.resize();
        assert_eq!(s.state().bounds, Bounds::new(200.0, 150.0));
        assert_eq!(s.device_size(), (400, 300));
        assert_eq!(s.container().backing, (400, 300));
    }

    #[test]
    fn test_resize_to_empty_keeps_bounds() {
        let mut s = surface(400.0, 300.0).unwrap();
        s.container_mut().set_size(0.0, 0.0);
        s.resize();
        assert_eq!(s.state().bounds, Bounds::new(400.0, 300.0));
    }

    #[test]
    fn test_resize_mid_flight_recycles() {
        let mut s = surface(400.0, 300.0).unwrap();
        s.state_mut().papers[0].position.y = 270.0;
        s.container_mut().set_size(400.0, 150.0);
        s.resize();
        s.start();
        assert_eq!(s.state().papers[0].position.y, 0.0);
    }

    #[test]
    fn test_reconfigure_rebuilds_within_bounds() {
        let mut s = surface(400.0, 300.0).unwrap();
        s.container_mut().set_size(200.0, 150.0);
        s.resize();
        s.start();

        let mut settings = Settings {
            seed: Some(11),
            ..Default::default()
        };
        settings.select_quality("low").unwrap();
        s.reconfigure(&settings).unwrap();

        assert_eq!(s.state().papers.len(), 48);
        assert_eq!(s.state().ribbons.len(), 6);
        assert_eq!(s.state().bounds, Bounds::new(200.0, 150.0));
        assert!(s.is_running());
        assert!(frame(&mut s));
        assert_eq!(s.state().stats.ticks, 1);
    }

    #[test]
    fn test_reconfigure_rejects_invalid_settings() {
        let mut s = surface(400.0, 300.0).unwrap();
        let papers = s.state().papers.clone();
        let mut settings = Settings::default();
        settings.palette.clear();
        assert!(s.reconfigure(&settings).is_err());
        assert_eq!(s.state().papers, papers);
    }

    #[test]
    fn test_batch_in_device_pixels() {
        let mut s = surface(400.0, 300.0).unwrap();
        s.start();
        // Papers live inside the logical bounds, so their vertices land
        // within the doubled device area (plus one paper size of overhang)
        let papers = s.state().papers.len();
        let paper_vertices = &s.batch().vertices()[..papers * 6];
        for v in paper_vertices {
            assert!(v.position[0] > -20.0 && v.position[0] < 820.0);
            assert!(v.position[1] > -20.0 && v.position[1] < 620.0);
        }
    }
}

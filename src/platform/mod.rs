//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Measuring the element the overlay covers
//! - Scheduling one callback per display frame
//! - Seeding a session

#[cfg(target_arch = "wasm32")]
pub mod web;

/// The element the overlay is laid over
pub trait Container {
    /// Current size in logical (CSS) pixels
    fn logical_size(&self) -> (f32, f32);

    /// Device pixels per logical pixel
    fn pixel_ratio(&self) -> f32;

    /// Resize the drawing backing store, in device pixels
    fn resize_backing(&mut self, width: u32, height: u32);
}

/// Identifies one requested frame so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// One-shot per-frame callback source (requestAnimationFrame on the web).
/// The callback itself is wired up by the host; the scheduler only queues
/// and cancels it.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Seed for a session when settings don't pin one
#[cfg(target_arch = "wasm32")]
pub fn session_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn session_seed() -> u64 {
    crate::consts::DEFAULT_SEED
}

/// Container with a size set by hand (headless runs, tests)
#[derive(Debug, Clone, PartialEq)]
pub struct FixedContainer {
    pub width: f32,
    pub height: f32,
    pub ratio: f32,
    /// Last backing size applied
    pub backing: (u32, u32),
}

impl FixedContainer {
    pub fn new(width: f32, height: f32, ratio: f32) -> Self {
        Self {
            width,
            height,
            ratio,
            backing: (0, 0),
        }
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

impl Container for FixedContainer {
    fn logical_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn pixel_ratio(&self) -> f32 {
        self.ratio
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }
}

/// Scheduler driven by hand: frames are "due" until the host fires or
/// cancels them.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameHandle>,
    /// Total frames ever requested
    pub requested: u64,
    /// Total frames cancelled before firing
    pub cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame waiting to fire, if any
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the pending frame, as the display refresh would
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_cancel() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        assert_eq!(s.pending(), Some(a));
        s.cancel_frame(a);
        assert_eq!(s.pending(), None);
        assert_eq!(s.cancelled, 1);

        // Cancelling a stale handle is a no-op
        let b = s.request_frame();
        s.cancel_frame(a);
        assert_eq!(s.pending(), Some(b));
        assert_eq!(s.fire(), Some(b));
        assert_eq!(s.pending(), None);
    }

    #[test]
    fn test_fixed_container() {
        let mut c = FixedContainer::new(320.0, 200.0, 2.0);
        assert_eq!(c.logical_size(), (320.0, 200.0));
        c.resize_backing(640, 400);
        assert_eq!(c.backing, (640, 400));
    }
}

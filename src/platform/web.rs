//! Browser implementations of the platform traits

use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement};

use super::{Container, FrameHandle, FrameScheduler};

/// The overlay canvas, measured through its parent element
pub struct ElementContainer {
    canvas: HtmlCanvasElement,
    parent: HtmlElement,
}

impl ElementContainer {
    /// Returns None if the canvas is detached from the document
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let parent = canvas.parent_element()?.dyn_into::<HtmlElement>().ok()?;
        Some(Self { canvas, parent })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Container for ElementContainer {
    fn logical_size(&self) -> (f32, f32) {
        (
            self.parent.offset_width() as f32,
            self.parent.offset_height() as f32,
        )
    }

    fn pixel_ratio(&self) -> f32 {
        web_sys::window()
            .map(|w| w.device_pixel_ratio() as f32)
            .unwrap_or(1.0)
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

/// requestAnimationFrame / cancelAnimationFrame
#[derive(Default)]
pub struct AnimationFrameScheduler {
    callback: Option<js_sys::Function>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Function invoked on each requested frame
    pub fn set_callback(&mut self, callback: js_sys::Function) {
        self.callback = Some(callback);
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let id = match (web_sys::window(), &self.callback) {
            (Some(window), Some(callback)) => window.request_animation_frame(callback).unwrap_or_else(|e| {
                log::error!("requestAnimationFrame failed: {:?}", e);
                0
            }),
            _ => {
                log::warn!("Frame requested before the frame callback was installed");
                0
            }
        };
        FrameHandle(id)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle.0);
        }
    }
}

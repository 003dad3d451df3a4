//! Owning context for the tracer and presentation state.
//!
//! Each [`Engine`] lazily constructs its own demo scene and frame buffer on
//! first use and tears both down in `shutdown()`. There are no process-wide
//! singletons; independent engines can coexist (useful for tests).

use ember_core::Scene;
use ember_math::Vec3;

use crate::framebuffer::{DualFrameBuffer, FrameBufferError, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Lazily initialized tracer + frame buffer pair.
///
/// Single-threaded and synchronous: every operation runs to completion
/// before returning. After `shutdown()` the next use lazily re-creates
/// whatever it needs.
#[derive(Default)]
pub struct Engine {
    scene: Option<Scene>,
    framebuffer: Option<DualFrameBuffer>,
}

impl Engine {
    /// Create an engine with nothing constructed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Warm-up trace against the demo scene.
    ///
    /// The first call builds the single-triangle demo scene and its BVH;
    /// every call casts one ray from the origin down +Z and discards the
    /// result. Side-effect-only, intended for warm-up and benchmarking.
    pub fn trace_demo_scene(&mut self) {
        let scene = self.scene.get_or_insert_with(Scene::demo);
        let _ = scene.cast_ray(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
    }

    /// Draw and present one test frame.
    ///
    /// The first call allocates the frame buffer at the default resolution.
    /// Every call clears the back surface to a fixed color, draws a
    /// 100-pixel red diagonal, and swaps.
    pub fn render_test_frame(&mut self) -> Result<(), FrameBufferError> {
        let fb = match &mut self.framebuffer {
            Some(fb) => fb,
            slot => slot.insert(DualFrameBuffer::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)?),
        };

        fb.clear(64, 64, 128, 255);
        for i in 0..100 {
            fb.set_pixel(i, i, 255, 0, 0, 255);
        }
        fb.swap();

        Ok(())
    }

    /// Tear down the scene and frame buffer.
    ///
    /// No partial-teardown mode; both members drop together. The next call
    /// to either entry point re-creates its member lazily.
    pub fn shutdown(&mut self) {
        self.scene = None;
        self.framebuffer = None;
        log::info!("Engine shut down");
    }

    /// The demo scene, if it has been built.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// The frame buffer, if it has been allocated.
    pub fn framebuffer(&self) -> Option<&DualFrameBuffer> {
        self.framebuffer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::CHANNELS;

    fn front_pixel(fb: &DualFrameBuffer, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * fb.width() + x) * CHANNELS;
        let front = fb.front();
        [
            front[offset],
            front[offset + 1],
            front[offset + 2],
            front[offset + 3],
        ]
    }

    #[test]
    fn test_trace_demo_scene_builds_lazily() {
        let mut engine = Engine::new();
        assert!(engine.scene().is_none());

        engine.trace_demo_scene();
        let scene = engine.scene().unwrap();
        assert_eq!(scene.triangles().len(), 1);

        // The demo ray hits the demo triangle at t = 5.
        let t = scene.cast_ray(Vec3::ZERO, Vec3::Z).unwrap();
        assert!((t - 5.0).abs() < 1e-5);

        // Repeat calls reuse the built scene.
        engine.trace_demo_scene();
        assert_eq!(engine.scene().unwrap().triangles().len(), 1);
    }

    #[test]
    fn test_render_test_frame_presents_diagonal() {
        let mut engine = Engine::new();
        assert!(engine.framebuffer().is_none());

        engine.render_test_frame().unwrap();
        let fb = engine.framebuffer().unwrap();
        assert_eq!(fb.width(), DEFAULT_WIDTH);
        assert_eq!(fb.height(), DEFAULT_HEIGHT);

        // The frame was swapped, so the front surface shows the drawing.
        assert_eq!(front_pixel(fb, 0, 0), [255, 0, 0, 255]);
        assert_eq!(front_pixel(fb, 99, 99), [255, 0, 0, 255]);
        assert_eq!(front_pixel(fb, 100, 100), [64, 64, 128, 255]);
        assert_eq!(front_pixel(fb, 5, 0), [64, 64, 128, 255]);
    }

    #[test]
    fn test_shutdown_and_lazy_recreate() {
        let mut engine = Engine::new();
        engine.trace_demo_scene();
        engine.render_test_frame().unwrap();

        engine.shutdown();
        assert!(engine.scene().is_none());
        assert!(engine.framebuffer().is_none());

        engine.trace_demo_scene();
        assert!(engine.scene().is_some());
    }
}

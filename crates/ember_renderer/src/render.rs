//! Primary-ray depth rendering into the back surface.
//!
//! One ray per pixel from a pinhole camera; hit distance shades the pixel
//! as grayscale (near = bright). Rows render in parallel with rayon - a
//! built scene is read-only, so concurrent queries against it are safe.

use ember_core::Scene;
use ember_math::Vec3;
use rayon::prelude::*;

use crate::framebuffer::{DualFrameBuffer, CHANNELS};

/// A minimal pinhole camera looking down +Z.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Eye position rays originate from.
    pub origin: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            fov_y: 60.0,
        }
    }
}

/// Trace one primary ray per back-surface pixel and write hit depths.
///
/// Misses leave the pixel untouched, so the background is whatever the
/// preceding `clear` put there. The front surface is not modified; call
/// `swap()` afterwards to present the frame.
pub fn render_depth(scene: &Scene, framebuffer: &mut DualFrameBuffer, camera: &Camera) {
    let width = framebuffer.width();
    let height = framebuffer.height();

    let tan_half_fov = (camera.fov_y.to_radians() * 0.5).tan();
    let aspect = width as f32 / height as f32;
    let origin = camera.origin;

    framebuffer
        .back_mut()
        .par_chunks_exact_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let ndc_x = ((x as f32 + 0.5) / width as f32) * 2.0 - 1.0;
                let ndc_y = 1.0 - ((y as f32 + 0.5) / height as f32) * 2.0;

                let direction = Vec3::new(
                    ndc_x * aspect * tan_half_fov,
                    ndc_y * tan_half_fov,
                    1.0,
                )
                .normalize();

                if let Some(t) = scene.cast_ray(origin, direction) {
                    let shade = (255.0 / (1.0 + t)) as u8;
                    let px = &mut row[x * CHANNELS..(x + 1) * CHANNELS];
                    px.copy_from_slice(&[shade, shade, shade, 255]);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::Triangle;

    fn lit_pixels(fb: &DualFrameBuffer) -> usize {
        fb.back()
            .chunks_exact(CHANNELS)
            .filter(|px| px[3] == 255)
            .count()
    }

    #[test]
    fn test_depth_pass_lights_covered_pixels() {
        // Large triangle in front of the camera.
        let scene = Scene::build(vec![Triangle::new(
            Vec3::new(-20.0, -20.0, 5.0),
            Vec3::new(20.0, -20.0, 5.0),
            Vec3::new(0.0, 40.0, 5.0),
        )]);

        let mut fb = DualFrameBuffer::new(32, 32).unwrap();
        render_depth(&scene, &mut fb, &Camera::default());

        // The triangle spans the whole field of view.
        assert_eq!(lit_pixels(&fb), 32 * 32);

        // Depth 5 along the view axis shades to roughly 255 / 6.
        let center = &fb.back()[(16 * 32 + 16) * CHANNELS..][..CHANNELS];
        assert!(center[0] >= 35 && center[0] <= 45, "shade {}", center[0]);
        assert_eq!(center[0], center[1]);
        assert_eq!(center[1], center[2]);
    }

    #[test]
    fn test_depth_pass_leaves_misses_untouched() {
        let scene = Scene::build(Vec::new());
        let mut fb = DualFrameBuffer::new(16, 16).unwrap();

        fb.clear(1, 2, 3, 4);
        render_depth(&scene, &mut fb, &Camera::default());

        assert!(fb
            .back()
            .chunks_exact(CHANNELS)
            .all(|px| px == [1, 2, 3, 4]));
    }

    #[test]
    fn test_depth_pass_writes_back_surface_only() {
        let scene = Scene::demo();
        let mut fb = DualFrameBuffer::new(16, 16).unwrap();

        render_depth(&scene, &mut fb, &Camera::default());
        assert!(fb.front().iter().all(|&b| b == 0));
    }
}

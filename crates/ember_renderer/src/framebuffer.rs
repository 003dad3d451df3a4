//! Dual frame buffer with zero-copy presentation.
//!
//! Two fixed-size RGBA8 surfaces play the "front" (presented) and "back"
//! (drawable) roles. `swap()` exchanges the roles in constant time by
//! flipping an index - pixel data is never copied or reallocated. Drawing
//! calls only ever touch the back surface.

use thiserror::Error;

/// Color channels per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// Default surface width in pixels.
pub const DEFAULT_WIDTH: usize = 1920;

/// Default surface height in pixels.
pub const DEFAULT_HEIGHT: usize = 1080;

/// Errors that can occur when creating a frame buffer.
#[derive(Error, Debug)]
pub enum FrameBufferError {
    #[error("frame buffer dimensions must be non-zero, got {width}x{height}")]
    ZeroSized { width: usize, height: usize },
}

/// Two pixel surfaces plus the index of whichever currently plays "front".
///
/// Invariant: front and back never alias the same surface. Both surfaces
/// are allocated once at construction and held until the buffer is dropped;
/// an out-of-memory condition aborts the process (there is no degraded
/// partial-buffer mode).
pub struct DualFrameBuffer {
    surfaces: [Vec<u8>; 2],
    front: usize,
    width: usize,
    height: usize,
}

impl DualFrameBuffer {
    /// Allocate two zero-filled surfaces of `width * height` RGBA8 pixels.
    pub fn new(width: usize, height: usize) -> Result<Self, FrameBufferError> {
        if width == 0 || height == 0 {
            return Err(FrameBufferError::ZeroSized { width, height });
        }

        let size = width * height * CHANNELS;
        let surfaces = [vec![0u8; size], vec![0u8; size]];
        log::info!(
            "Dual frame buffer: {}x{}, {} KiB per surface",
            width,
            height,
            size / 1024
        );

        Ok(Self {
            surfaces,
            front: 0,
            width,
            height,
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Exchange the front and back roles.
    ///
    /// Constant time: only the role index moves, no pixel data. The
    /// just-drawn back surface becomes readable as front; the old front
    /// becomes the new drawable back, keeping its stale contents until the
    /// next `clear`.
    pub fn swap(&mut self) {
        self.front = 1 - self.front;
    }

    /// The presented surface. Read-only by convention.
    pub fn front(&self) -> &[u8] {
        &self.surfaces[self.front]
    }

    /// The drawable surface.
    pub fn back(&self) -> &[u8] {
        &self.surfaces[1 - self.front]
    }

    /// Mutable access to the drawable surface, for bulk pixel writers.
    pub fn back_mut(&mut self) -> &mut [u8] {
        &mut self.surfaces[1 - self.front]
    }

    /// Fill every back-surface pixel with the given color.
    pub fn clear(&mut self, r: u8, g: u8, b: u8, a: u8) {
        for px in self.back_mut().chunks_exact_mut(CHANNELS) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = a;
        }
    }

    /// Write one back-surface pixel.
    ///
    /// Coordinates outside the surface are silently ignored; there is no
    /// error path for out-of-range writes.
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        if x < 0 || x as usize >= self.width || y < 0 || y as usize >= self.height {
            return;
        }

        let offset = (y as usize * self.width + x as usize) * CHANNELS;
        let back = self.back_mut();
        back[offset] = r;
        back[offset + 1] = g;
        back[offset + 2] = b;
        back[offset + 3] = a;
    }

    /// Copy a single-channel source into the back surface as opaque
    /// grayscale (`r = g = b = value`).
    ///
    /// Clipped to `min(src_width, width) x min(src_height, height)`; no
    /// scaling. `src` must hold at least `src_width * src_height` bytes.
    pub fn blit_texture(&mut self, src: &[u8], src_width: usize, src_height: usize) {
        let min_w = src_width.min(self.width);
        let min_h = src_height.min(self.height);

        for y in 0..min_h {
            for x in 0..min_w {
                let value = src[y * src_width + x];
                self.set_pixel(x as i32, y as i32, value, value, value, 255);
            }
        }
    }
}

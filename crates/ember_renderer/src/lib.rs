//! Ember Renderer - double-buffered presentation for the tracer core.
//!
//! This crate provides:
//!
//! - **[`DualFrameBuffer`]**: two fixed-size RGBA8 surfaces with a
//!   constant-time front/back role swap (no pixel copies)
//! - **[`render_depth`]**: a rayon-parallel primary-ray depth pass writing
//!   trace results into the back surface
//! - **[`Engine`]**: an owning context bundling the lazily-built demo scene
//!   and the frame buffer, with explicit shutdown
//!
//! Drawing always targets the back surface; readers present the front
//! surface and never observe a partially drawn frame across a completed
//! `swap()`.

mod engine;
mod framebuffer;
mod render;

pub use engine::Engine;
pub use framebuffer::{
    DualFrameBuffer, FrameBufferError, CHANNELS, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
pub use render::{render_depth, Camera};

/// Re-export the tracer types callers pair with the buffer
pub use ember_core::{Scene, Triangle};
pub use ember_math::{Ray, Vec3};

//! Ember Core - triangle geometry and BVH ray acceleration.
//!
//! This crate provides:
//!
//! - **Geometry**: the [`Triangle`] primitive with on-demand bounds and a
//!   Möller-Trumbore intersection test
//! - **Acceleration**: an arena-based bounding volume hierarchy ([`Bvh`])
//!   built with an exhaustive surface-area split search
//! - **Scene**: an owning handle ([`Scene`]) pairing a triangle set with its
//!   built tree, exposing nearest-hit ray queries
//!
//! # Example
//!
//! ```
//! use ember_core::{Scene, Triangle, Vec3};
//!
//! let tri = Triangle::new(
//!     Vec3::new(0.0, 0.0, 5.0),
//!     Vec3::new(1.0, 0.0, 5.0),
//!     Vec3::new(0.0, 1.0, 5.0),
//! );
//! let scene = Scene::build(vec![tri]);
//!
//! let t = scene.cast_ray(Vec3::ZERO, Vec3::Z).unwrap();
//! assert!((t - 5.0).abs() < 1e-5);
//! ```

mod bvh;
mod scene;
mod triangle;

pub use bvh::{Bvh, BvhNode, NodeKind};
pub use scene::Scene;
pub use triangle::Triangle;

/// Re-export common math types from ember_math
pub use ember_math::{Aabb, Ray, Vec3};

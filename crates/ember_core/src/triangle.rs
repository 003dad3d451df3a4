//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use ember_math::{Aabb, Ray, Vec3};

/// Determinant threshold below which a ray counts as parallel to the
/// triangle plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Minimum accepted hit distance; rejects hits behind or at the origin.
const HIT_EPSILON: f32 = 1e-8;

/// A triangle owned by value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Compute the bounding box of the triangle.
    ///
    /// Computed on demand, not cached.
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::EMPTY;
        aabb.expand_point(self.v0);
        aabb.expand_point(self.v1);
        aabb.expand_point(self.v2);
        aabb
    }

    /// Centroid of the triangle, used as the split key by the BVH builder.
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) * (1.0 / 3.0)
    }

    /// Möller-Trumbore ray-triangle intersection.
    ///
    /// Two-sided (no back-face culling). Returns the hit distance along the
    /// ray direction, or `None` on a miss. Degenerate triangles and rays
    /// parallel to the triangle plane miss via the epsilon guard rather
    /// than erroring.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);

        // Intersection outside the triangle (u parameter)
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);

        // Intersection outside the triangle (v parameter)
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        (t > HIT_EPSILON).then_some(t)
    }
}

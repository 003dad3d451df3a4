use crate::Vec3;

/// Axis-aligned bounding box for spatial acceleration structures (BVH).
///
/// Defined by `min`/`max` corner points. A freshly created box is *empty*:
/// its corners hold sentinel values (`min = +1e30`, `max = -1e30`) so that
/// expanding with any point or box establishes the `min[i] <= max[i]`
/// invariant on every axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty box (contains nothing, any expansion makes it valid).
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::new(1e30, 1e30, 1e30),
        max: Vec3::new(-1e30, -1e30, -1e30),
    };

    /// Create a box directly from its two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Grow the box componentwise to include a point.
    pub fn expand_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow the box to enclose another box.
    ///
    /// Equivalent to expanding by `other.min` and `other.max`.
    pub fn expand_box(&mut self, other: &Aabb) {
        self.expand_point(other.min);
        self.expand_point(other.max);
    }

    /// Surface area `2 * (dx*dy + dy*dz + dz*dx)`.
    ///
    /// Only meaningful as a relative cost metric once the box has been
    /// expanded at least once; an empty box produces a nonsensical (but
    /// finite) value rather than panicking.
    pub fn surface_area(&self) -> f32 {
        let d = self.max - self.min;
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }

    /// Center point of the box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Slab-method ray/box intersection.
    ///
    /// Takes the ray origin and the precomputed componentwise reciprocal of
    /// the ray direction (see [`crate::Ray::inv_direction`]). Returns the
    /// entry/exit parameters `(tmin, tmax)` on a hit, defined as a non-empty
    /// parameter interval with `tmax > 0` (the box is not entirely behind
    /// the origin).
    pub fn intersect(&self, origin: Vec3, inv_dir: Vec3) -> Option<(f32, f32)> {
        let t0 = (self.min - origin) * inv_dir;
        let t1 = (self.max - origin) * inv_dir;

        let tmin = t0.min(t1).max_element();
        let tmax = t0.max(t1).min_element();

        if tmin <= tmax && tmax > 0.0 {
            Some((tmin, tmax))
        } else {
            None
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

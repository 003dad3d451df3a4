use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Represents the half-line `origin + t * direction` for `t >= 0`. The
/// direction is not required to be normalized; intersection distances are
/// reported in units of the direction's length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Componentwise reciprocal of the direction, precomputed for slab tests.
    ///
    /// A zero direction component is mapped to a signed huge-but-finite
    /// reciprocal instead of `±inf`: an origin lying exactly on a slab
    /// plane would otherwise produce `0 * inf = NaN` in
    /// [`crate::Aabb::intersect`] and misclassify the box as a miss.
    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        fn recip(d: f32) -> f32 {
            if d == 0.0 {
                1e30_f32.copysign(d)
            } else {
                1.0 / d
            }
        }

        Vec3::new(
            recip(self.direction.x),
            recip(self.direction.y),
            recip(self.direction.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_inv_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(2.0, -4.0, 0.5));
        assert_eq!(ray.inv_direction(), Vec3::new(0.5, -0.25, 2.0));
    }

    #[test]
    fn test_inv_direction_zero_component() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, -0.0));
        let inv = ray.inv_direction();
        assert!(inv.x.is_finite());
        assert_eq!(inv.x, 1e30);
        assert_eq!(inv.y, 1.0);
        assert_eq!(inv.z, -1e30);
    }
}

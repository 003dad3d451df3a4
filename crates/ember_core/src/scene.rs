//! Scene handle owning a triangle set and its acceleration structure.

use ember_math::{Ray, Vec3};

use crate::{Bvh, Triangle};

/// An immutable, traced scene.
///
/// Owns the triangle array and the BVH built over it, so independent scenes
/// can coexist. Once built, a scene is never mutated; geometry changes mean
/// building a new scene wholesale.
#[derive(Debug, Clone)]
pub struct Scene {
    triangles: Vec<Triangle>,
    bvh: Bvh,
}

impl Scene {
    /// Build a scene from a triangle set.
    ///
    /// Never fails; an empty set produces a scene whose every query misses.
    pub fn build(triangles: Vec<Triangle>) -> Self {
        let bvh = Bvh::build(&triangles);
        log::debug!(
            "Scene built: {} triangles, {} BVH nodes",
            triangles.len(),
            bvh.node_count()
        );
        Self { triangles, bvh }
    }

    /// The single-triangle demonstration scene used for warm-up traces.
    pub fn demo() -> Self {
        Self::build(vec![Triangle::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(1.0, 0.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        )])
    }

    /// Cast a ray and return the nearest hit distance, if any.
    pub fn cast_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let ray = Ray::new(origin, direction);
        self.bvh.intersect(&self.triangles, &ray)
    }

    /// The triangles this scene was built from.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of nodes in the underlying BVH.
    pub fn node_count(&self) -> usize {
        self.bvh.node_count()
    }

    /// True if the scene holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_vec(rng: &mut StdRng, range: std::ops::Range<f32>) -> Vec3 {
        Vec3::new(
            rng.gen_range(range.clone()),
            rng.gen_range(range.clone()),
            rng.gen_range(range),
        )
    }

    fn random_triangles(rng: &mut StdRng, count: usize) -> Vec<Triangle> {
        (0..count)
            .map(|_| {
                let base = random_vec(rng, -10.0..10.0);
                Triangle::new(
                    base,
                    base + random_vec(rng, -1.5..1.5),
                    base + random_vec(rng, -1.5..1.5),
                )
            })
            .collect()
    }

    #[test]
    fn test_demo_scene_end_to_end() {
        let scene = Scene::demo();

        let t = scene.cast_ray(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)).unwrap();
        assert!((t - 5.0).abs() < 1e-5);

        assert!(scene
            .cast_ray(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
            .is_none());
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::build(Vec::new());
        assert!(scene.is_empty());
        assert!(scene.cast_ray(Vec3::ZERO, Vec3::Z).is_none());
    }

    #[test]
    fn test_traversal_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);

        for &count in &[1usize, 3, 10, 50] {
            let tris = random_triangles(&mut rng, count);
            let scene = Scene::build(tris.clone());

            for _ in 0..200 {
                let origin = random_vec(&mut rng, -15.0..15.0);
                let mut direction = random_vec(&mut rng, -1.0..1.0);
                if direction.length_squared() < 1e-6 {
                    direction = Vec3::Z;
                }

                let ray = Ray::new(origin, direction);
                let brute = tris
                    .iter()
                    .filter_map(|tri| tri.intersect(&ray))
                    .fold(None, |best, t| Some(best.map_or(t, |b: f32| b.min(t))));

                let traced = scene.cast_ray(origin, direction);

                match (traced, brute) {
                    (None, None) => {}
                    (Some(a), Some(b)) => {
                        assert!((a - b).abs() < 1e-5, "traced {a} vs brute {b}")
                    }
                    other => panic!("traversal disagrees with brute force: {other:?}"),
                }
            }
        }
    }
}

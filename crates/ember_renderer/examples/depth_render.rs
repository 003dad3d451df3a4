//! Depth-pass example.
//!
//! Builds a small two-triangle scene, renders a grayscale depth frame into
//! the back surface, presents it with a swap, and prints a few stats.

use anyhow::Result;
use ember_renderer::{
    render_depth, Camera, DualFrameBuffer, Scene, Triangle, Vec3, CHANNELS,
};

fn main() -> Result<()> {
    env_logger::init();

    println!("Ember depth renderer");
    println!("====================");

    let start = std::time::Instant::now();
    let scene = Scene::build(vec![
        Triangle::new(
            Vec3::new(-2.0, -1.5, 5.0),
            Vec3::new(2.0, -1.5, 5.0),
            Vec3::new(0.0, 2.0, 5.0),
        ),
        Triangle::new(
            Vec3::new(-4.0, -3.0, 9.0),
            Vec3::new(4.0, -3.0, 9.0),
            Vec3::new(0.0, 4.0, 9.0),
        ),
    ]);
    println!(
        "Scene built in {:?} ({} triangles, {} BVH nodes)",
        start.elapsed(),
        scene.triangles().len(),
        scene.node_count()
    );

    let mut framebuffer = DualFrameBuffer::new(320, 180)?;
    let camera = Camera {
        origin: Vec3::ZERO,
        fov_y: 60.0,
    };

    let start = std::time::Instant::now();
    framebuffer.clear(0, 0, 0, 255);
    render_depth(&scene, &mut framebuffer, &camera);
    framebuffer.swap();
    println!("Frame rendered in {:?}", start.elapsed());

    let lit = framebuffer
        .front()
        .chunks_exact(CHANNELS)
        .filter(|px| px[0] > 0)
        .count();
    println!(
        "{} of {} pixels hit geometry",
        lit,
        framebuffer.width() * framebuffer.height()
    );

    Ok(())
}

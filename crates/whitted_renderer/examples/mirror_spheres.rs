//! Mirror spheres example.
//!
//! Renders a checkered floor with a mirror ball, a glass ball and a cone
//! and saves the result in PPM format.

use std::fs::File;
use std::io::{BufWriter, Write};

use whitted_core::Material;
use whitted_renderer::{
    color_to_rgba, render_parallel, Camera, Color, Cone, ImageBuffer, Plane, RenderConfig, Scene,
    SceneObject, Shading, Sphere, Vec3, DEFAULT_BUCKET_SIZE,
};

fn main() {
    println!("Whitted Ray Tracer - Mirror Spheres");
    println!("===================================");

    let scene = build_scene();
    println!("Created {} objects", scene.len());

    let camera = Camera::new().with_resolution(600, 600);
    let config = RenderConfig::default();

    println!(
        "Rendering {}x{} @ {}x{} supersampling...",
        camera.image_width, camera.image_height, config.supersampling, config.supersampling
    );

    let start = std::time::Instant::now();
    let image = render_parallel(&camera, &scene, &config, DEFAULT_BUCKET_SIZE);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "mirror_spheres.ppm";
    match save_ppm(&image, filename) {
        Ok(()) => println!("Saved to {}", filename),
        Err(e) => eprintln!("Failed to save {}: {}", filename, e),
    }
}

fn build_scene() -> Scene {
    let mut scene = Scene::default();

    scene.add(
        SceneObject::new(
            Plane::new(
                Vec3::new(-40.0, -10.0, -20.0),
                Vec3::new(40.0, -10.0, -20.0),
                Vec3::new(40.0, -10.0, -200.0),
                Vec3::new(-40.0, -10.0, -200.0),
            ),
            Material::default().without_specular(),
        )
        .with_name("floor")
        .with_shading(Shading::Checker {
            size: 5.0,
            even: Color::new(0.9, 0.9, 0.9),
            odd: Color::new(0.1, 0.1, 0.1),
        }),
    );

    scene.add(
        SceneObject::new(
            Sphere::new(Vec3::new(-6.0, 0.0, -90.0), 10.0),
            Material::new(Color::new(0.1, 0.1, 0.3)).with_reflection(0.8),
        )
        .with_name("mirror"),
    );

    scene.add(
        SceneObject::new(
            Sphere::new(Vec3::new(8.0, -5.0, -65.0), 4.0),
            Material::new(Color::new(0.0, 0.4, 0.4)).with_refraction(1.01, 0.0),
        )
        .with_name("glass"),
    );

    scene.add(
        SceneObject::new(
            Cone::new(Vec3::new(-2.0, -10.0, -60.0), 2.5, 5.0),
            Material::new(Color::new(0.8, 0.3, 0.1)),
        )
        .with_name("cone"),
    );

    scene
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let rgba = color_to_rgba(image.get(x, y));
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    Ok(())
}

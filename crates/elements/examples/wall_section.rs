//! A wall standing on wavy terrain, probed with rays.

use elements::elements_kernel_geom::Line;
use elements::elements_kernel_math::{Point3, Vec3};
use elements::elements_kernel_raytrace::intersect::{cast_rays, intersect_mesh};
use elements::elements_kernel_raytrace::Ray;
use elements::{Material, StandardWall, Topography};

fn main() {
    let n = 11;
    let elevations: Vec<f64> = (0..n * n)
        .map(|k| ((k % n) as f64 / 10.0 * std::f64::consts::PI).sin() * 2.0)
        .collect();
    let terrain = Topography::new(Point3::new(-5.0, -5.0, -3.0), 2.0, elevations).unwrap();

    let line = Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)).unwrap();
    let mut wall = StandardWall::new(line, 0.3, 3.0)
        .unwrap()
        .with_name("South")
        .with_material(Material::concrete());
    wall.add_opening(1.0, 2.0, 2.5, 1.0, 1.0, 1.0).unwrap();
    wall.add_opening(1.5, 1.2, 7.0, 1.5, 1.0, 1.0).unwrap();

    println!(
        "wall: {} triangles, {} voids",
        wall.representation().mesh().num_triangles(),
        wall.voids().unwrap().len()
    );

    // Shoot through the wall along +Y at a few stations.
    let wall_mesh = wall.representation().mesh();
    for x in [1.0, 5.0, 9.0] {
        let ray = Ray::new(Point3::new(x, -5.0, 1.5), Vec3::y()).unwrap();
        let hits = intersect_mesh(&ray, &wall_mesh);
        println!("x = {x}: {} hits", hits.len());
    }

    // Drop a grid of rays onto the terrain.
    let rays: Vec<Ray> = (0..10)
        .map(|i| Ray::new(Point3::new(-4.0 + 2.0 * i as f64, 3.0, 50.0), -Vec3::z()).unwrap())
        .collect();
    for (ray, hits) in rays.iter().zip(cast_rays(&rays, terrain.mesh())) {
        let (x, y) = (ray.origin.x, ray.origin.y);
        match hits.first() {
            Some(hit) => println!("ground at ({:.1}, {:.1}): {:.3}", x, y, hit.point.z),
            None => println!("no ground below ({x:.1}, {y:.1})"),
        }
    }
}

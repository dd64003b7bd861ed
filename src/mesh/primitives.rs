//! Unit primitives for the instanced ornaments and the star

use std::f32::consts::{FRAC_PI_4, PI, TAU};
use crate::math::{Mat4, Vec3};
use super::geometry::{Mesh, Vertex};

/// UV sphere of the given radius
pub fn sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = Mesh::new();

    for ring in 0..=rings {
        let phi = ring as f32 / rings as f32 * PI;
        for seg in 0..=segments {
            let theta = seg as f32 / segments as f32 * TAU;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.add_vertex(Vertex::new(normal.scale(radius), normal));
        }
    }

    let row = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * row + seg;
            let b = a + row;
            mesh.add_quad(a, a + 1, b + 1, b);
        }
    }

    mesh
}

/// Axis-aligned cube with flat faces
pub fn cube(size: f32) -> Mesh {
    let h = size / 2.0;
    let mut mesh = Mesh::new();

    // (normal, u axis, v axis) with u x v = normal
    let faces = [
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
    ];

    for (normal, u, v) in faces {
        let center = normal.scale(h);
        let corner = |su: f32, sv: f32| {
            Vertex::new(center + u.scale(su * h) + v.scale(sv * h), normal)
        };
        let a = mesh.add_vertex(corner(-1.0, -1.0));
        let b = mesh.add_vertex(corner(1.0, -1.0));
        let c = mesh.add_vertex(corner(1.0, 1.0));
        let d = mesh.add_vertex(corner(-1.0, 1.0));
        mesh.add_quad(a, b, c, d);
    }

    mesh
}

/// Flat-shaded octahedron with vertices at distance `radius`
pub fn octahedron(radius: f32) -> Mesh {
    let tips = [
        Vec3::new(radius, 0.0, 0.0),
        Vec3::new(0.0, 0.0, radius),
        Vec3::new(-radius, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -radius),
    ];
    let top = Vec3::new(0.0, radius, 0.0);
    let bottom = Vec3::new(0.0, -radius, 0.0);
    let mut mesh = Mesh::new();

    for i in 0..4 {
        let a = tips[i];
        let b = tips[(i + 1) % 4];
        for (p0, p1, p2) in [(a, top, b), (b, bottom, a)] {
            let normal = (p1 - p0).cross(&(p2 - p0)).normalize();
            let i0 = mesh.add_vertex(Vertex::new(p0, normal));
            let i1 = mesh.add_vertex(Vertex::new(p1, normal));
            let i2 = mesh.add_vertex(Vertex::new(p2, normal));
            mesh.add_triangle(i0, i1, i2);
        }
    }

    mesh
}

/// Star ornament: a small core, the main spikes, and a smaller halo
/// turned an eighth of a turn against them
pub fn star() -> Mesh {
    let mut mesh = sphere(0.4, 16, 16);
    mesh.append_rotated(&octahedron(1.2), &Mat4::identity());
    mesh.append_rotated(&octahedron(1.8 * 0.6), &Mat4::rotation_y(FRAC_PI_4));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outward_winding(mesh: &Mesh) -> bool {
        mesh.indices.chunks(3).all(|tri| {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize].position);
            let face_normal = (b - a).cross(&(c - a));
            let centroid = (a + b + c).scale(1.0 / 3.0);
            // Degenerate triangles at the sphere poles have no direction
            face_normal.length() < 1e-6 || face_normal.dot(&centroid) > 0.0
        })
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let mesh = sphere(1.0, 16, 12);
        assert_eq!(mesh.vertex_count(), 17 * 13);
        assert_eq!(mesh.triangle_count(), 16 * 12 * 2);
        for v in &mesh.vertices {
            assert!((v.position.length() - 1.0).abs() < 1e-5);
            assert!((v.normal.length() - 1.0).abs() < 1e-5);
        }
        assert!(outward_winding(&mesh));
    }

    #[test]
    fn test_cube_faces() {
        let mesh = cube(1.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for v in &mesh.vertices {
            for axis in v.position.to_array() {
                assert!((axis.abs() - 0.5).abs() < 1e-6);
            }
        }
        assert!(outward_winding(&mesh));
    }

    #[test]
    fn test_octahedron() {
        let mesh = octahedron(1.2);
        assert_eq!(mesh.triangle_count(), 8);
        for v in &mesh.vertices {
            assert!((v.position.length() - 1.2).abs() < 1e-5);
        }
        assert!(outward_winding(&mesh));
    }

    #[test]
    fn test_star_bounds() {
        let mesh = star();
        assert_eq!(mesh.triangle_count(), 16 * 16 * 2 + 8 + 8);
        let extent = mesh.vertices.iter().map(|v| v.position.length()).fold(0.0, f32::max);
        assert!((extent - 1.2).abs() < 1e-5);
    }
}

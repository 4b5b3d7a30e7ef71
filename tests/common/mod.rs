//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashSet;

use libase::{EdgeKey, Material, SourceMesh, SourceObject, SourcePolygon, UvCoord, Vertex};

/// A single triangle with one material and no sharp edges
pub fn triangle_object() -> SourceObject {
    let mut mesh = SourceMesh::new();
    mesh.positions = vec![
        Vertex::new(0.0, 0.0, 0.0),
        Vertex::new(1.0, 0.0, 0.0),
        Vertex::new(0.0, 1.0, 0.0),
    ];
    mesh.polygons = vec![SourcePolygon::triangle(0, 1, 2)];
    mesh.uv_channels = vec![vec![
        UvCoord::new(0.0, 0.0),
        UvCoord::new(1.0, 0.0),
        UvCoord::new(0.0, 1.0),
    ]];

    let mut object = SourceObject::new("tri", mesh);
    object.materials.push(Material::new("textures/base_wall/metal"));
    object
}

/// Unit cube: 8 vertices, 12 triangles, 2 per axis-aligned side
pub fn cube_triangles() -> Vec<[usize; 3]> {
    vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ]
}

pub fn cube_positions() -> Vec<Vertex> {
    vec![
        Vertex::new(0.0, 0.0, 0.0),
        Vertex::new(1.0, 0.0, 0.0),
        Vertex::new(1.0, 1.0, 0.0),
        Vertex::new(0.0, 1.0, 0.0),
        Vertex::new(0.0, 0.0, 1.0),
        Vertex::new(1.0, 0.0, 1.0),
        Vertex::new(1.0, 1.0, 1.0),
        Vertex::new(0.0, 1.0, 1.0),
    ]
}

/// Every edge of every cube face, diagonals included
pub fn all_cube_edges() -> HashSet<EdgeKey> {
    let mut edges = HashSet::new();
    for tri in cube_triangles() {
        edges.insert(EdgeKey::new(tri[0], tri[1]));
        edges.insert(EdgeKey::new(tri[1], tri[2]));
        edges.insert(EdgeKey::new(tri[2], tri[0]));
    }
    edges
}

/// Cube object with a configurable sharp-edge set
pub fn cube_object(sharp_edges: HashSet<EdgeKey>) -> SourceObject {
    let mut mesh = SourceMesh::new();
    mesh.positions = cube_positions();
    mesh.polygons = cube_triangles()
        .into_iter()
        .map(|[a, b, c]| SourcePolygon::triangle(a, b, c))
        .collect();
    mesh.sharp_edges = sharp_edges;

    let mut object = SourceObject::new("cube", mesh);
    object.materials.push(Material::new("textures/base_wall/metal"));
    object
}

/// Quad strip of 4 triangles over 6 vertices, the left half on material slot
/// 0 and the right half on slot 1
pub fn two_material_strip() -> SourceObject {
    let mut mesh = SourceMesh::new();
    mesh.positions = vec![
        Vertex::new(0.0, 0.0, 0.0),
        Vertex::new(1.0, 0.0, 0.0),
        Vertex::new(2.0, 0.0, 0.0),
        Vertex::new(0.0, 1.0, 0.0),
        Vertex::new(1.0, 1.0, 0.0),
        Vertex::new(2.0, 1.0, 0.0),
    ];
    mesh.polygons = vec![
        SourcePolygon::triangle_with_slot(0, 1, 4, 0),
        SourcePolygon::triangle_with_slot(0, 4, 3, 0),
        SourcePolygon::triangle_with_slot(1, 2, 5, 1),
        SourcePolygon::triangle_with_slot(1, 5, 4, 1),
    ];

    let mut object = SourceObject::new("strip", mesh);
    object.materials.push(Material::new("textures/base_wall/metal"));
    object.materials.push(Material::new("textures/base_trim/rust"));
    object
}

/// Two smoothing-group partitions are equivalent when they group the same
/// faces together, whatever the actual label values
pub fn partition_equivalent(a: &[u32], b: &[u32]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    for i in 0..a.len() {
        for j in (i + 1)..a.len() {
            if (a[i] == a[j]) != (b[i] == b[j]) {
                return false;
            }
        }
    }
    true
}

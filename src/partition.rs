//! Splitting a multi-material mesh into per-material sub-meshes
//!
//! The engine resolves a face's material through the object-level
//! `MATERIAL_REF`, not the per-face `MESH_MTLID`, so a mesh whose faces use
//! more than one material slot has to become one geometry object per used
//! slot before serialization. Chunks keep their per-corner UV/color/normal
//! data byte-for-byte and duplicate boundary vertices, so independently
//! loaded chunks reconstruct the original continuous surface without seams.

use crate::model::{EdgeKey, SourceMesh, SourcePolygon};

/// One per-material sub-mesh produced by [`partition_by_material`]
#[derive(Debug, Clone)]
pub struct MaterialChunk {
    /// The material slot (into the source object's slot table) this chunk uses
    pub slot: usize,
    /// The sub-mesh, reindexed to a dense 0-based vertex range
    pub mesh: SourceMesh,
}

/// Split a mesh into one chunk per used material slot
///
/// Slots are enumerated in ascending order for determinism. Vertices not
/// referenced by a chunk's faces are dropped and the remainder densely
/// reindexed; corner attributes are carried over per face in order. Chunks
/// that would end up with zero faces are silently dropped. A single-material
/// mesh yields exactly one chunk with unchanged geometry.
pub fn partition_by_material(mesh: &SourceMesh) -> Vec<MaterialChunk> {
    let mut used_slots: Vec<usize> = mesh.polygons.iter().map(|p| p.material_slot).collect();
    used_slots.sort_unstable();
    used_slots.dedup();

    // One used slot means nothing to split; keep the vertex order as-is so
    // the round trip preserves indices exactly.
    if let [slot] = used_slots[..] {
        return vec![MaterialChunk {
            slot,
            mesh: mesh.clone(),
        }];
    }

    used_slots
        .into_iter()
        .filter_map(|slot| {
            let chunk = extract_slot(mesh, slot);
            if chunk.polygons.is_empty() {
                None
            } else {
                Some(MaterialChunk { slot, mesh: chunk })
            }
        })
        .collect()
}

/// Build the sub-mesh containing only faces of one material slot
fn extract_slot(mesh: &SourceMesh, slot: usize) -> SourceMesh {
    let mut out = SourceMesh::new();
    // Old vertex index -> new dense index, assigned in first-use order
    let mut remap: Vec<Option<usize>> = vec![None; mesh.positions.len()];

    let channel_count = mesh.uv_channels.len();
    out.uv_channels = vec![Vec::new(); channel_count];
    if mesh.corner_colors.is_some() {
        out.corner_colors = Some(Vec::new());
    }
    if mesh.corner_normals.is_some() {
        out.corner_normals = Some(Vec::new());
    }

    let mut corner_base = 0usize;
    for polygon in &mesh.polygons {
        let arity = polygon.corners.len();
        if polygon.material_slot != slot {
            corner_base += arity;
            continue;
        }

        let corners: Vec<usize> = polygon
            .corners
            .iter()
            .map(|&old| {
                *remap[old].get_or_insert_with(|| {
                    out.positions.push(mesh.positions[old]);
                    out.positions.len() - 1
                })
            })
            .collect();
        out.polygons.push(SourcePolygon {
            corners,
            material_slot: slot,
        });

        for (channel, source) in mesh.uv_channels.iter().enumerate() {
            out.uv_channels[channel].extend_from_slice(&source[corner_base..corner_base + arity]);
        }
        if let (Some(out_colors), Some(src_colors)) = (&mut out.corner_colors, &mesh.corner_colors)
        {
            out_colors.extend_from_slice(&src_colors[corner_base..corner_base + arity]);
        }
        if let (Some(out_normals), Some(src_normals)) =
            (&mut out.corner_normals, &mesh.corner_normals)
        {
            out_normals.extend_from_slice(&src_normals[corner_base..corner_base + arity]);
        }

        corner_base += arity;
    }

    // Carry over sharp flags for edges whose both endpoints survived
    for edge in &mesh.sharp_edges {
        if let (Some(a), Some(b)) = (remap[edge.0], remap[edge.1]) {
            out.sharp_edges.insert(EdgeKey::new(a, b));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, UvCoord, Vertex};

    /// Quad strip: 4 triangles over 6 vertices, first half slot 0, second slot 1
    fn two_material_strip() -> SourceMesh {
        let mut mesh = SourceMesh::new();
        mesh.positions = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
            Vertex::new(1.0, 1.0, 0.0),
            Vertex::new(0.0, 2.0, 0.0),
            Vertex::new(1.0, 2.0, 0.0),
        ];
        mesh.polygons = vec![
            SourcePolygon::triangle_with_slot(0, 1, 2, 0),
            SourcePolygon::triangle_with_slot(2, 1, 3, 0),
            SourcePolygon::triangle_with_slot(2, 3, 4, 1),
            SourcePolygon::triangle_with_slot(4, 3, 5, 1),
        ];
        let corners = mesh.corner_count();
        mesh.uv_channels = vec![(0..corners).map(|i| UvCoord::new(i as f64, 0.0)).collect()];
        mesh.corner_colors = Some(vec![Color::new(0.5, 0.5, 0.5); corners]);
        mesh
    }

    #[test]
    fn test_two_slots_two_chunks() {
        let mesh = two_material_strip();
        let chunks = partition_by_material(&mesh);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].slot, 0);
        assert_eq!(chunks[1].slot, 1);
        assert_eq!(chunks[0].mesh.polygons.len(), 2);
        assert_eq!(chunks[1].mesh.polygons.len(), 2);
    }

    #[test]
    fn test_face_count_preserved() {
        let mesh = two_material_strip();
        let chunks = partition_by_material(&mesh);
        let total: usize = chunks.iter().map(|c| c.mesh.polygons.len()).sum();
        assert_eq!(total, mesh.polygons.len());
    }

    #[test]
    fn test_dense_reindex_no_orphans() {
        let mesh = two_material_strip();
        let chunks = partition_by_material(&mesh);
        for chunk in &chunks {
            // every vertex referenced, every reference in range
            let mut seen = vec![false; chunk.mesh.positions.len()];
            for polygon in &chunk.mesh.polygons {
                for &c in &polygon.corners {
                    assert!(c < chunk.mesh.positions.len());
                    seen[c] = true;
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn test_boundary_positions_bit_identical() {
        let mesh = two_material_strip();
        let chunks = partition_by_material(&mesh);
        // Vertices 2 and 3 sit on the material boundary and appear in both chunks
        for shared in [2usize, 3usize] {
            let original = mesh.positions[shared];
            for chunk in &chunks {
                let found = chunk.mesh.positions.iter().any(|v| *v == original);
                assert!(found, "vertex {} missing from a chunk", shared);
            }
        }
    }

    #[test]
    fn test_corner_attributes_follow_faces() {
        let mesh = two_material_strip();
        let chunks = partition_by_material(&mesh);
        // Chunk 1 owns faces 2..4, i.e. source corners 6..12
        let uvs = &chunks[1].mesh.uv_channels[0];
        assert_eq!(uvs.len(), 6);
        assert_eq!(uvs[0], UvCoord::new(6.0, 0.0));
        assert_eq!(uvs[5], UvCoord::new(11.0, 0.0));
        assert_eq!(chunks[1].mesh.corner_colors.as_ref().unwrap().len(), 6);
    }

    #[test]
    fn test_single_material_unchanged() {
        let mut mesh = two_material_strip();
        for polygon in &mut mesh.polygons {
            polygon.material_slot = 0;
        }
        let chunks = partition_by_material(&mesh);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].mesh.positions.len(), mesh.positions.len());
        assert_eq!(chunks[0].mesh.polygons.len(), mesh.polygons.len());
    }

    #[test]
    fn test_single_material_keeps_vertex_indices() {
        let mut mesh = two_material_strip();
        for polygon in &mut mesh.polygons {
            polygon.material_slot = 0;
        }
        // First face now touches high vertices first; a first-use renumber
        // would permute the index space
        mesh.polygons.swap(0, 3);
        let chunks = partition_by_material(&mesh);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].mesh.polygons[0].corners, vec![4, 3, 5]);
        assert_eq!(chunks[0].mesh.polygons[3].corners, vec![0, 1, 2]);
        assert_eq!(chunks[0].mesh.positions, mesh.positions);
    }

    #[test]
    fn test_sharp_edges_remapped() {
        let mut mesh = two_material_strip();
        mesh.sharp_edges.insert(EdgeKey::new(2, 3));
        let chunks = partition_by_material(&mesh);
        for chunk in &chunks {
            // Edge 2-3 survives in both chunks under its remapped indices
            assert_eq!(chunk.mesh.sharp_edges.len(), 1);
            let edge = chunk.mesh.sharp_edges.iter().next().unwrap();
            assert!(edge.0 < chunk.mesh.positions.len());
            assert!(edge.1 < chunk.mesh.positions.len());
        }
    }

    #[test]
    fn test_empty_mesh_no_chunks() {
        let chunks = partition_by_material(&SourceMesh::new());
        assert!(chunks.is_empty());
    }
}

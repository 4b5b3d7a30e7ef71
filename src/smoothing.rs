//! Smoothing-group computation
//!
//! The export direction partitions faces into smoothing groups by flood
//! filling across edges that are not marked sharp: faces connected through
//! non-sharp edges shade smoothly into each other and share a group id.
//! The import direction inverts this, recovering sharp edges from group-id
//! discontinuities between adjacent faces.
//!
//! Group ids are per-object labels with no meaning beyond the partition they
//! describe. The wire format can only encode 32 physical groups, so ids are
//! reduced modulo 32 at serialization time ([`wire_group`]); a mesh with more
//! than 32 disjoint smooth regions will alias groups on the wire. That loss
//! belongs to the format, not to this algorithm.

use std::collections::HashMap;

use crate::model::EdgeKey;

/// Compute a 1-based smoothing-group id for every face
///
/// Two faces receive the same id iff they are connected through a chain of
/// shared non-sharp edges. Ids are assigned in discovery order, iterating
/// faces by index, so output is deterministic for a given input.
///
/// A mesh with no sharp edges at all is a single smooth surface; that case
/// is answered directly with group 1 for every face, skipping the traversal.
pub fn compute_groups(
    faces: &[[usize; 3]],
    sharp_edges: &std::collections::HashSet<EdgeKey>,
) -> Vec<u32> {
    if sharp_edges.is_empty() {
        return vec![1; faces.len()];
    }

    let adjacency = smooth_adjacency(faces, sharp_edges);

    let mut groups = vec![0u32; faces.len()];
    let mut next_id = 0u32;
    let mut stack = Vec::new();

    for start in 0..faces.len() {
        if groups[start] != 0 {
            continue;
        }
        next_id += 1;
        stack.push(start);
        while let Some(face) = stack.pop() {
            if groups[face] != 0 {
                continue;
            }
            groups[face] = next_id;
            for &neighbor in &adjacency[face] {
                if groups[neighbor] == 0 {
                    stack.push(neighbor);
                }
            }
        }
    }

    groups
}

/// Reduce a group id to the wire format's 1..=32 range
///
/// Id 0 ("ungrouped / always hard") passes through unchanged.
pub fn wire_group(id: u32) -> u32 {
    if id == 0 { 0 } else { ((id - 1) % 32) + 1 }
}

/// Derive sharp edges from per-face smoothing-group ids
///
/// The exact inverse of [`compute_groups`]: an edge shared by exactly two
/// faces is sharp iff the faces' group ids differ or either id is 0.
/// Boundary edges (a single incident face) stay smooth, the format default.
pub fn derive_sharp_edges(
    faces: &[[usize; 3]],
    groups: &[u32],
) -> std::collections::HashSet<EdgeKey> {
    let edge_faces = edge_face_map(faces);
    let mut sharp = std::collections::HashSet::new();

    for (edge, incident) in edge_faces {
        if let [f0, f1] = incident[..] {
            let g0 = groups.get(f0).copied().unwrap_or(0);
            let g1 = groups.get(f1).copied().unwrap_or(0);
            if g0 == 0 || g1 == 0 || g0 != g1 {
                sharp.insert(edge);
            }
        }
    }

    sharp
}

/// Map every edge to the faces incident on it, in face-index order
pub(crate) fn edge_face_map(faces: &[[usize; 3]]) -> HashMap<EdgeKey, Vec<usize>> {
    let mut map: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
    for (idx, face) in faces.iter().enumerate() {
        for (a, b) in face_edge_pairs(face) {
            map.entry(EdgeKey::new(a, b)).or_default().push(idx);
        }
    }
    map
}

/// Face-adjacency lists restricted to non-sharp shared edges
fn smooth_adjacency(
    faces: &[[usize; 3]],
    sharp_edges: &std::collections::HashSet<EdgeKey>,
) -> Vec<Vec<usize>> {
    let edge_faces = edge_face_map(faces);
    let mut adjacency = vec![Vec::new(); faces.len()];

    for (idx, face) in faces.iter().enumerate() {
        for (a, b) in face_edge_pairs(face) {
            let edge = EdgeKey::new(a, b);
            if sharp_edges.contains(&edge) {
                continue;
            }
            if let Some(incident) = edge_faces.get(&edge) {
                for &other in incident {
                    if other != idx {
                        adjacency[idx].push(other);
                    }
                }
            }
        }
    }

    adjacency
}

fn face_edge_pairs(face: &[usize; 3]) -> [(usize, usize); 3] {
    [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])]
}

//! Smoothing-group engine scenarios

mod common;

use std::collections::HashSet;

use libase::EdgeKey;
use libase::smoothing::{compute_groups, derive_sharp_edges, wire_group};

#[test]
fn test_all_sharp_cube_gives_twelve_singletons() {
    // Scenario: unit cube with every edge sharp
    let faces = common::cube_triangles();
    let groups = compute_groups(&faces, &common::all_cube_edges());

    let distinct: HashSet<u32> = groups.iter().copied().collect();
    assert_eq!(distinct.len(), 12);
    assert!(groups.iter().all(|&g| wire_group(g) == g), "12 < 32, no aliasing");
}

#[test]
fn test_fully_smooth_cube_is_one_group() {
    let faces = common::cube_triangles();
    let groups = compute_groups(&faces, &HashSet::new());
    assert_eq!(groups, vec![1; 12]);
}

#[test]
fn test_one_sharp_edge_splits_a_strip_in_two() {
    // Strip of four triangles; the middle interior edge is sharp
    let faces = vec![[0, 1, 2], [1, 3, 2], [2, 3, 4], [3, 5, 4]];
    let sharp = HashSet::from([EdgeKey::new(2, 3)]);
    let groups = compute_groups(&faces, &sharp);

    assert_eq!(groups[0], groups[1]);
    assert_eq!(groups[2], groups[3]);
    assert_ne!(groups[1], groups[2]);
}

#[test]
fn test_derive_inverts_compute() {
    let faces = common::cube_triangles();
    let sharp = common::all_cube_edges();
    let groups = compute_groups(&faces, &sharp);
    let recovered = derive_sharp_edges(&faces, &groups);
    let regroups = compute_groups(&faces, &recovered);

    assert!(common::partition_equivalent(&groups, &regroups));
}

#[test]
fn test_boundary_edges_never_sharp_on_derive() {
    // Two coplanar triangles in separate groups: only the shared diagonal
    // comes back sharp, the outline stays smooth
    let faces = vec![[0, 1, 2], [0, 2, 3]];
    let sharp = derive_sharp_edges(&faces, &[1, 2]);
    assert_eq!(sharp, HashSet::from([EdgeKey::new(0, 2)]));
}

#[test]
fn test_group_zero_forces_sharp() {
    let faces = vec![[0, 1, 2], [0, 2, 3]];
    let sharp = derive_sharp_edges(&faces, &[0, 0]);
    assert_eq!(sharp, HashSet::from([EdgeKey::new(0, 2)]));
}

#[test]
fn test_wire_group_wraps_mod_32() {
    assert_eq!(wire_group(0), 0);
    assert_eq!(wire_group(1), 1);
    assert_eq!(wire_group(32), 32);
    assert_eq!(wire_group(33), 1);
    assert_eq!(wire_group(64), 32);
    assert_eq!(wire_group(65), 1);
}

#[test]
fn test_deterministic_group_assignment() {
    let faces = common::cube_triangles();
    let sharp = common::all_cube_edges();
    assert_eq!(compute_groups(&faces, &sharp), compute_groups(&faces, &sharp));
    // Discovery order follows face index order
    assert_eq!(compute_groups(&faces, &sharp), (1..=12).collect::<Vec<u32>>());
}

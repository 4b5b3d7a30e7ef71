//! Serialize, parse, reconstruct equivalence

mod common;

use libase::smoothing::compute_groups;
use libase::{
    ExportOptions, ImportOptions, ReconstructedMesh, build_scene, parse_scene, reconstruct_scene,
};

fn roundtrip(object: libase::SourceObject) -> ReconstructedMesh {
    let scene = build_scene(std::slice::from_ref(&object), &ExportOptions::default()).unwrap();
    let parsed = parse_scene(&scene.to_ase_string()).unwrap();
    let (mut meshes, warnings) = reconstruct_scene(&parsed, &ImportOptions::default());
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(meshes.len(), 1);
    meshes.remove(0)
}

fn assert_positions_close(a: &[libase::Vertex], b: &[libase::Vertex]) {
    assert_eq!(a.len(), b.len());
    for (va, vb) in a.iter().zip(b) {
        assert!((va.x - vb.x).abs() < 1e-4);
        assert!((va.y - vb.y).abs() < 1e-4);
        assert!((va.z - vb.z).abs() < 1e-4);
    }
}

#[test]
fn test_triangle_roundtrip() {
    let object = common::triangle_object();
    let mesh = roundtrip(object.clone());

    assert_eq!(mesh.name, "tri");
    assert_eq!(mesh.material_index, 0);
    assert_positions_close(&mesh.positions, &object.mesh.positions);
    assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
    assert!(mesh.sharp_edges.is_empty());

    let uvs = &mesh.uv_channels[0];
    assert_eq!(uvs.len(), 3);
    assert_eq!(uvs[1], libase::UvCoord::new(1.0, 0.0));
}

#[test]
fn test_cube_sharp_edges_survive_as_partition() {
    let object = common::cube_object(common::all_cube_edges());
    let mesh = roundtrip(object.clone());

    let faces = common::cube_triangles();
    let original = compute_groups(&faces, &object.mesh.sharp_edges);
    let recovered = compute_groups(&mesh.triangles, &mesh.sharp_edges);
    assert!(common::partition_equivalent(&original, &recovered));
}

#[test]
fn test_smooth_cube_stays_smooth() {
    let object = common::cube_object(Default::default());
    let mesh = roundtrip(object);

    let groups = compute_groups(&mesh.triangles, &mesh.sharp_edges);
    assert_eq!(groups, vec![1; 12]);
}

#[test]
fn test_winding_preserved() {
    let object = common::cube_object(Default::default());
    let mesh = roundtrip(object.clone());
    let original: Vec<[usize; 3]> = object
        .mesh
        .polygons
        .iter()
        .map(|p| [p.corners[0], p.corners[1], p.corners[2]])
        .collect();
    assert_eq!(mesh.triangles, original);
}

#[test]
fn test_one_roundtrip_is_a_fixed_point() {
    // Reserializing a parsed document reconstructs the same model
    let scene = build_scene(&[common::two_material_strip()], &ExportOptions::default()).unwrap();
    let first_text = scene.to_ase_string();

    let parsed_once = parse_scene(&first_text).unwrap();
    let second_text = parsed_once.to_ase_string();
    let parsed_twice = parse_scene(&second_text).unwrap();

    let (meshes_once, _) = reconstruct_scene(&parsed_once, &ImportOptions::default());
    let (meshes_twice, _) = reconstruct_scene(&parsed_twice, &ImportOptions::default());

    assert_eq!(meshes_once.len(), meshes_twice.len());
    for (a, b) in meshes_once.iter().zip(&meshes_twice) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.triangles, b.triangles);
        assert_eq!(a.material_index, b.material_index);
        assert_positions_close(&a.positions, &b.positions);
        assert_eq!(a.sharp_edges, b.sharp_edges);
    }
}

#[test]
fn test_export_scale_and_import_scale_cancel() {
    let export = ExportOptions {
        scale: 16.0,
        ..ExportOptions::default()
    };
    let import = ImportOptions {
        scale: 1.0 / 16.0,
        ..ImportOptions::default()
    };

    let object = common::triangle_object();
    let scene = build_scene(std::slice::from_ref(&object), &export).unwrap();
    let parsed = parse_scene(&scene.to_ase_string()).unwrap();
    let (meshes, _) = reconstruct_scene(&parsed, &import);

    assert_positions_close(&meshes[0].positions, &object.mesh.positions);
}

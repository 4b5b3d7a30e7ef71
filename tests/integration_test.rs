//! End-to-end export, persist, import

mod common;

use libase::persist::{ase_file_name, read_scene_file, sanitize_object_name, write_scene_file};
use libase::{
    Error, ExportOptions, ImportOptions, build_scene, build_split_documents, reconstruct_scene,
};

#[test]
fn test_export_file_import_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.ase");

    let object = common::cube_object(common::all_cube_edges());
    let scene = build_scene(std::slice::from_ref(&object), &ExportOptions::default()).unwrap();
    write_scene_file(&path, &scene).unwrap();

    let loaded = read_scene_file(&path).unwrap();
    let (meshes, warnings) = reconstruct_scene(&loaded, &ImportOptions::default());

    assert!(warnings.is_empty());
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].positions.len(), 8);
    assert_eq!(meshes[0].triangles.len(), 12);
}

#[test]
fn test_split_documents_to_separate_files() {
    let dir = tempfile::tempdir().unwrap();

    let object = common::two_material_strip();
    let documents = build_split_documents(&object, &ExportOptions::default()).unwrap();
    assert_eq!(documents.len(), 2);

    let mut paths = Vec::new();
    for (name, scene) in &documents {
        let path = dir.path().join(ase_file_name(name));
        write_scene_file(&path, scene).unwrap();
        paths.push(path);
    }

    assert!(paths[0].ends_with("strip_chunk000.ase"));
    assert!(paths[1].ends_with("strip_chunk001.ase"));

    // Each chunk file is self-contained: full table, one object
    for (index, path) in paths.iter().enumerate() {
        let loaded = read_scene_file(path).unwrap();
        assert_eq!(loaded.materials.len(), 2);
        assert_eq!(loaded.objects.len(), 1);
        assert_eq!(loaded.objects[0].material_ref, index);
    }
}

#[test]
fn test_hostile_object_name_becomes_valid_filename() {
    let dir = tempfile::tempdir().unwrap();

    let mut object = common::triangle_object();
    object.name = "props/crate.001".to_string();

    let scene = build_scene(std::slice::from_ref(&object), &ExportOptions::default()).unwrap();
    let file_name = ase_file_name(&scene.objects[0].name);
    assert_eq!(file_name, "props_crate_001.ase");

    let path = dir.path().join(&file_name);
    write_scene_file(&path, &scene).unwrap();

    let loaded = read_scene_file(&path).unwrap();
    // The document keeps the original name; only the filename is sanitized
    assert_eq!(loaded.objects[0].name, "props/crate.001");
    assert_eq!(sanitize_object_name(&loaded.objects[0].name), "props_crate_001");
}

#[test]
fn test_reading_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_scene_file(dir.path().join("nope.ase")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.to_string().contains("[E1001]"));
}

#[test]
fn test_reading_non_ase_file_is_empty_scene() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("readme.txt");
    std::fs::write(&path, "not a scene\n").unwrap();

    assert!(matches!(read_scene_file(&path), Err(Error::EmptyScene)));
}

//! File persistence helpers
//!
//! The codec itself is I/O-free; these are thin `std::fs` conveniences for
//! callers that just want a file on disk, plus the filename derivation the
//! split export modes use.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::Scene;
use crate::parser::parse_scene;
use crate::writer::write_scene;

/// Replace path-hostile characters in an object name with `_`
///
/// Covers the separator and wildcard set (`. / \ : * ? " < > |`) and ASCII
/// control characters, so any node name becomes a usable filename stem.
pub fn sanitize_object_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '.' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Derive the `.ase` filename for an object or chunk name
pub fn ase_file_name(name: &str) -> String {
    format!("{}.ase", sanitize_object_name(name))
}

/// Serialize a scene and write it to `path`
pub fn write_scene_file(path: impl AsRef<Path>, scene: &Scene) -> Result<()> {
    fs::write(path, write_scene(scene))?;
    Ok(())
}

/// Read and parse an ASE file
pub fn read_scene_file(path: impl AsRef<Path>) -> Result<Scene> {
    let text = fs::read_to_string(path)?;
    parse_scene(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_object_name() {
        assert_eq!(sanitize_object_name("plain_name"), "plain_name");
        assert_eq!(sanitize_object_name("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_object_name("mesh.001"), "mesh_001");
        assert_eq!(sanitize_object_name("what?*\"<>|"), "what______");
    }

    #[test]
    fn test_ase_file_name() {
        assert_eq!(ase_file_name("crate.001_chunk000"), "crate_001_chunk000.ase");
    }
}

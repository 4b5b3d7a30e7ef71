//! # libase
//!
//! A pure Rust codec for ASE (ASCII Scene Export) mesh scenes, the
//! brace-delimited text format consumed by idTech 4-class engines.
//!
//! The crate converts both ways: caller-supplied triangulated meshes are
//! serialized to deterministic ASE text (transforms baked, multi-material
//! meshes partitioned, smoothing groups computed from sharp edges), and ASE
//! text from any of the historical exporters parses back into plain triangle
//! meshes with per-corner UVs, colors, normals and a recovered sharp-edge set.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Deterministic, byte-stable serialization
//! - Tolerant parser: unknown blocks, `GROUP` nesting, and both shared
//!   (3DS Max) and sequential UV index layouts are accepted
//! - Smoothing groups round-trip as sharp-edge sets
//! - Per-material splitting with seamless chunk boundaries
//!
//! ## Example
//!
//! ```no_run
//! use libase::{ExportOptions, Material, Scene, SourceMesh, SourceObject, SourcePolygon, Vertex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut mesh = SourceMesh::new();
//! mesh.positions = vec![
//!     Vertex::new(0.0, 0.0, 0.0),
//!     Vertex::new(1.0, 0.0, 0.0),
//!     Vertex::new(0.0, 1.0, 0.0),
//! ];
//! mesh.polygons = vec![SourcePolygon::triangle(0, 1, 2)];
//!
//! let mut object = SourceObject::new("tri", mesh);
//! object.materials.push(Material::new("textures/base_wall/metal"));
//!
//! let scene = libase::build_scene(&[object], &ExportOptions::default())?;
//! std::fs::write("tri.ase", scene.to_ase_string())?;
//!
//! let parsed = Scene::from_ase_str(&std::fs::read_to_string("tri.ase")?)?;
//! println!("{} object(s)", parsed.objects.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod partition;
pub mod persist;
pub mod reconstruct;
pub mod smoothing;
pub mod transform;
pub mod writer;

pub use error::{Error, ImportWarning, Result};
pub use export::{
    ExportContext, ExportOptions, build_object_documents, build_scene, build_split_documents,
};
pub use model::{
    AseMesh, Color, EdgeKey, Face, FaceNormals, GeomObject, MapDiffuse, Material, MaterialTable,
    Normal, Scene, SceneInfo, SourceMesh, SourceObject, SourcePolygon, Transform, UvChannel,
    UvCoord, Vertex,
};
pub use parser::parse_scene;
pub use reconstruct::{ImportOptions, ReconstructedMesh, reconstruct_object, reconstruct_scene};
pub use writer::write_scene;

impl Scene {
    /// Serialize this scene to ASE text
    ///
    /// Output is deterministic: equal scenes serialize to identical bytes.
    pub fn to_ase_string(&self) -> String {
        writer::write_scene(self)
    }

    /// Parse a scene from ASE text
    ///
    /// Accepts output from this crate, from 3DS Max, and from the historical
    /// engine exporters. Fails with [`Error::EmptyScene`] when the text holds
    /// no geometry object.
    pub fn from_ase_str(source: &str) -> Result<Self> {
        parser::parse_scene(source)
    }
}

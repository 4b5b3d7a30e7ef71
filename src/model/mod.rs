//! Data structures representing ASE scenes

mod core;
mod material;

pub use core::{
    AseMesh, Color, EdgeKey, Face, FaceNormals, GeomObject, Normal, Scene, SceneInfo, SourceMesh,
    SourceObject, SourcePolygon, Transform, UvChannel, UvCoord, Vertex,
};

pub use material::{MapDiffuse, Material, MaterialTable};

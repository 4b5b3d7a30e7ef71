//! Core ASE scene types and structures

use std::collections::HashSet;

use nalgebra::{UnitQuaternion, Vector3};

/// A 3D vertex with x, y, z coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A UV texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvCoord {
    /// U coordinate
    pub u: f64,
    /// V coordinate
    pub v: f64,
}

impl UvCoord {
    /// Create a new UV coordinate
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

/// An RGB color with float components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f64,
    /// Green component
    pub g: f64,
    /// Blue component
    pub b: f64,
}

impl Color {
    /// Create a new color
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Black (the ASE ambient default)
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// White
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// A unit-length direction vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Normal {
    /// Create a new normal (not normalized here; see [`Normal::normalized`])
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Return this vector scaled to unit length, or +Z if degenerate
    pub fn normalized(self) -> Self {
        let len = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if len > f64::EPSILON {
            Self::new(self.x / len, self.y / len, self.z / len)
        } else {
            Self::new(0.0, 0.0, 1.0)
        }
    }
}

/// An undirected mesh edge identified by its two vertex indices
///
/// The constructor normalizes orientation so `(a, b)` and `(b, a)` compare
/// equal, which is what every adjacency computation in the crate relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub usize, pub usize);

impl EdgeKey {
    /// Create an edge key from two vertex indices in either order
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

/// A triangle face as stored on the wire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Index of the first vertex (the `A:` field)
    pub a: usize,
    /// Index of the second vertex (the `B:` field)
    pub b: usize,
    /// Index of the third vertex (the `C:` field)
    pub c: usize,
    /// Edge visibility flag for edge A-B
    pub edge_ab: bool,
    /// Edge visibility flag for edge B-C
    pub edge_bc: bool,
    /// Edge visibility flag for edge C-A
    pub edge_ca: bool,
    /// Smoothing group id, 1..=32 on the wire, 0 = none/hard
    pub smoothing_group: u32,
    /// Per-face material id (`MESH_MTLID`)
    ///
    /// Informational only on import: the engine resolves the material
    /// through the object-level `MATERIAL_REF`.
    pub material_id: usize,
}

impl Face {
    /// Create a new face with default flags (invisible edges, no group)
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self {
            a,
            b,
            c,
            edge_ab: false,
            edge_bc: false,
            edge_ca: false,
            smoothing_group: 0,
            material_id: 0,
        }
    }

    /// The three vertex indices in winding order
    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }

    /// The three edges of this face in A-B, B-C, C-A order
    pub fn edges(&self) -> [EdgeKey; 3] {
        [
            EdgeKey::new(self.a, self.b),
            EdgeKey::new(self.b, self.c),
            EdgeKey::new(self.c, self.a),
        ]
    }
}

/// The normals emitted for one face: the face normal plus one normal per
/// corner in A, B, C order
///
/// Corner normals are positional, not keyed by vertex index: two corners may
/// share a vertex index yet carry distinct normals across a hard edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceNormals {
    /// The geometric face normal
    pub face: Normal,
    /// Per-corner normals in face winding order
    pub corners: [Normal; 3],
}

/// One UV mapping channel: a texture-vertex pool plus per-face index triples
///
/// Channel 0 is the primary `MESH_TVERTLIST`/`MESH_TFACELIST` pair; channels
/// 1 and up come from `MESH_MAPPINGCHANNEL` blocks, each fully
/// self-contained. 3DS Max pools shared texture vertices while this crate's
/// writer emits them sequentially (3 per face); both index styles round-trip
/// through the same representation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UvChannel {
    /// Texture vertices
    pub tvertices: Vec<UvCoord>,
    /// Per-face index triples into `tvertices`
    pub tfaces: Vec<[usize; 3]>,
}

/// Mesh payload of one `GEOMOBJECT` block
#[derive(Debug, Clone, Default)]
pub struct AseMesh {
    /// Vertex positions
    pub vertices: Vec<Vertex>,
    /// Triangle faces
    pub faces: Vec<Face>,
    /// UV channels (index 0 = primary)
    pub uv_channels: Vec<UvChannel>,
    /// Vertex-color pool
    pub cvertices: Vec<Color>,
    /// Per-face index triples into `cvertices`
    pub cfaces: Vec<[usize; 3]>,
    /// Per-face normals (face + 3 corners), parallel to `faces`
    pub normals: Vec<FaceNormals>,
}

impl AseMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mesh with pre-allocated vertex and face capacity
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
            uv_channels: Vec::new(),
            cvertices: Vec::new(),
            cfaces: Vec::new(),
            normals: Vec::with_capacity(faces),
        }
    }

    /// Per-face smoothing group ids, in face order
    pub fn smoothing_groups(&self) -> Vec<u32> {
        self.faces.iter().map(|f| f.smoothing_group).collect()
    }
}

/// A named geometry object with a single material reference
#[derive(Debug, Clone)]
pub struct GeomObject {
    /// Node name (`NODE_NAME`)
    pub name: String,
    /// Index into the scene's material table (`MATERIAL_REF`)
    pub material_ref: usize,
    /// Mesh data
    pub mesh: AseMesh,
}

impl GeomObject {
    /// Create a new geometry object with an empty mesh
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            material_ref: 0,
            mesh: AseMesh::new(),
        }
    }
}

/// Header metadata of a scene document
#[derive(Debug, Clone, PartialEq)]
pub struct SceneInfo {
    /// Header format version (`*3DSMAX_ASCIIEXPORT` value)
    pub format_version: u32,
    /// Free-form comment line
    pub comment: String,
    /// Source filename recorded in the `SCENE` block
    pub filename: String,
    /// First frame placeholder
    pub first_frame: i32,
    /// Last frame placeholder
    pub last_frame: i32,
    /// Frame speed placeholder
    pub frame_speed: i32,
    /// Ticks per frame placeholder
    pub ticks_per_frame: i32,
}

impl SceneInfo {
    /// Create header metadata with the historical exporter's defaults
    pub fn new() -> Self {
        Self {
            format_version: 200,
            comment: "ASE Exporter for idTech 4".to_string(),
            filename: String::new(),
            first_frame: 0,
            last_frame: 100,
            frame_speed: 30,
            ticks_per_frame: 160,
        }
    }
}

impl Default for SceneInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete ASE scene document
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Header metadata
    pub info: SceneInfo,
    /// The material table
    pub materials: super::MaterialTable,
    /// Geometry objects in document order
    pub objects: Vec<GeomObject>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::default()
    }
}

/// One polygon of a caller-supplied source mesh
///
/// Arity is deliberately open: export validates that every polygon has
/// exactly 3 corners and rejects the object otherwise. The codec never
/// triangulates.
#[derive(Debug, Clone)]
pub struct SourcePolygon {
    /// Vertex indices in winding order
    pub corners: Vec<usize>,
    /// Index into the owning object's material slot table
    pub material_slot: usize,
}

impl SourcePolygon {
    /// Create a triangle polygon
    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Self {
            corners: vec![a, b, c],
            material_slot: 0,
        }
    }

    /// Create a triangle polygon with a material slot
    pub fn triangle_with_slot(a: usize, b: usize, c: usize, slot: usize) -> Self {
        Self {
            corners: vec![a, b, c],
            material_slot: slot,
        }
    }
}

/// Caller-supplied mesh data for export
///
/// Corner attribute arrays are flat and parallel to the mesh's corners taken
/// in polygon order: entry `3 * f + i` belongs to corner `i` of triangle `f`.
/// Their source is per-corner and topology-independent, so partitioning
/// carries them over unchanged.
#[derive(Debug, Clone, Default)]
pub struct SourceMesh {
    /// Vertex positions
    pub positions: Vec<Vertex>,
    /// Polygons (must all be triangles)
    pub polygons: Vec<SourcePolygon>,
    /// UV channels, each flat with one entry per corner
    pub uv_channels: Vec<Vec<UvCoord>>,
    /// Vertex colors, flat with one entry per corner
    pub corner_colors: Option<Vec<Color>>,
    /// Custom normals, flat with one entry per corner
    pub corner_normals: Option<Vec<Normal>>,
    /// Edges marked sharp by the author
    pub sharp_edges: HashSet<EdgeKey>,
}

impl SourceMesh {
    /// Create a new empty source mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of corners across all polygons
    pub fn corner_count(&self) -> usize {
        self.polygons.iter().map(|p| p.corners.len()).sum()
    }
}

/// An object's local transform, already decomposed by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// World translation
    pub translation: Vector3<f64>,
    /// World rotation
    pub rotation: UnitQuaternion<f64>,
    /// World scale (per axis; non-uniform allowed)
    pub scale: Vector3<f64>,
}

impl Transform {
    /// The identity transform
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A caller-supplied object to export: mesh, materials, transform
#[derive(Debug, Clone)]
pub struct SourceObject {
    /// Object name (becomes `NODE_NAME`, possibly with a chunk suffix)
    pub name: String,
    /// Mesh data
    pub mesh: SourceMesh,
    /// Material slot table; `SourcePolygon::material_slot` indexes into this
    pub materials: Vec<super::Material>,
    /// Local transform to bake into vertex data
    pub transform: Transform,
}

impl SourceObject {
    /// Create a new source object with an identity transform and no materials
    pub fn new(name: impl Into<String>, mesh: SourceMesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            materials: Vec::new(),
            transform: Transform::identity(),
        }
    }
}

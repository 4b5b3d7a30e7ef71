//! Source-mesh to scene-document conversion
//!
//! The export pipeline turns caller-supplied [`SourceObject`]s into wire-side
//! [`Scene`] documents: transforms are baked into vertex data, multi-material
//! meshes are partitioned into one [`GeomObject`] per used material, smoothing
//! groups are computed from sharp edges, and all materials land in one
//! name-deduplicated table collected up front.

use log::debug;

use crate::error::{Error, Result};
use crate::model::{
    AseMesh, Face, FaceNormals, GeomObject, MaterialTable, Normal, Scene, SourceObject, UvChannel,
    UvCoord, Vertex,
};
use crate::partition::{MaterialChunk, partition_by_material};
use crate::smoothing::{compute_groups, edge_face_map};
use crate::transform::{BakeFlags, bake_matrix, bake_normal, bake_vertex, normal_matrix};

/// Knobs for an export job
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Uniform factor applied to baked positions (unit conversion, e.g. 16.0
    /// for meters to Doom units)
    pub scale: f64,
    /// Bake the object's translation into vertex data
    pub apply_location: bool,
    /// Bake the object's rotation into vertex data
    pub apply_rotation: bool,
    /// Bake the object's scale into vertex data
    pub apply_scale: bool,
    /// Compute smoothing groups from sharp edges; when off, every face is
    /// written with `MESH_SMOOTHING 0`
    pub smoothing_groups: bool,
    /// Value recorded as `SCENE_FILENAME`, typically the source file the
    /// scene came from
    pub filename: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            apply_location: true,
            apply_rotation: true,
            apply_scale: true,
            smoothing_groups: true,
            filename: String::new(),
        }
    }
}

impl ExportOptions {
    fn bake_flags(&self) -> BakeFlags {
        BakeFlags {
            apply_location: self.apply_location,
            apply_rotation: self.apply_rotation,
            apply_scale: self.apply_scale,
        }
    }
}

/// State shared across the objects of one export job
///
/// Owns the material table so that every chunk's `MATERIAL_REF` and
/// `MESH_MTLID` index into the same job-wide list, whichever document the
/// chunk ends up in.
#[derive(Debug, Default)]
pub struct ExportContext {
    materials: MaterialTable,
}

impl ExportContext {
    /// Create a context with an empty material table
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the materials of the given objects, in order of first
    /// appearance, deduplicated by name
    pub fn collect_materials(&mut self, objects: &[SourceObject]) {
        for object in objects {
            for material in &object.materials {
                self.materials.add(material.clone());
            }
        }
    }

    /// The table built so far
    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// Convert one source object into its wire-side geometry objects, one
    /// per used material slot
    pub fn convert_object(
        &self,
        object: &SourceObject,
        options: &ExportOptions,
    ) -> Result<Vec<GeomObject>> {
        validate_object(object)?;

        let chunks = partition_by_material(&object.mesh);
        let split = chunks.len() > 1;
        debug!(
            "object \"{}\": {} vertices, {} polygons, {} chunk(s)",
            object.name,
            object.mesh.positions.len(),
            object.mesh.polygons.len(),
            chunks.len()
        );

        let mut out = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let name = if split {
                chunk_name(&object.name, index)
            } else {
                object.name.clone()
            };
            out.push(self.convert_chunk(object, chunk, name, options));
        }
        Ok(out)
    }

    fn convert_chunk(
        &self,
        object: &SourceObject,
        chunk: &MaterialChunk,
        name: String,
        options: &ExportOptions,
    ) -> GeomObject {
        let source = &chunk.mesh;
        let matrix = bake_matrix(&object.transform, &options.bake_flags());
        let nmatrix = normal_matrix(&matrix);

        let material_ref = object
            .materials
            .get(chunk.slot)
            .and_then(|m| self.materials.index_of(&m.name))
            .unwrap_or(0);

        let mut mesh = AseMesh::with_capacity(source.positions.len(), source.polygons.len());

        for position in &source.positions {
            let baked = bake_vertex(&matrix, position);
            mesh.vertices.push(Vertex::new(
                baked.x * options.scale,
                baked.y * options.scale,
                baked.z * options.scale,
            ));
        }

        let triangles: Vec<[usize; 3]> = source
            .polygons
            .iter()
            .map(|p| [p.corners[0], p.corners[1], p.corners[2]])
            .collect();

        let groups = if options.smoothing_groups {
            compute_groups(&triangles, &source.sharp_edges)
        } else {
            vec![0; triangles.len()]
        };

        let edge_faces = edge_face_map(&triangles);
        for (index, tri) in triangles.iter().enumerate() {
            let mut face = Face::new(tri[0], tri[1], tri[2]);
            let edges = face.edges();
            // Visibility marks boundary edges only
            face.edge_ab = edge_faces.get(&edges[0]).is_some_and(|f| f.len() == 1);
            face.edge_bc = edge_faces.get(&edges[1]).is_some_and(|f| f.len() == 1);
            face.edge_ca = edge_faces.get(&edges[2]).is_some_and(|f| f.len() == 1);
            face.smoothing_group = groups[index];
            face.material_id = material_ref;
            mesh.faces.push(face);
        }

        for corners in &source.uv_channels {
            mesh.uv_channels.push(sequential_uv_channel(corners));
        }

        if let Some(colors) = &source.corner_colors {
            mesh.cvertices = colors.clone();
            mesh.cfaces = (0..triangles.len())
                .map(|f| [3 * f, 3 * f + 1, 3 * f + 2])
                .collect();
        }

        for (index, tri) in triangles.iter().enumerate() {
            let face_normal = face_normal(&mesh.vertices, tri);
            let corners = match &source.corner_normals {
                Some(normals) => {
                    let base = 3 * index;
                    [
                        bake_normal(&nmatrix, &normals[base]),
                        bake_normal(&nmatrix, &normals[base + 1]),
                        bake_normal(&nmatrix, &normals[base + 2]),
                    ]
                }
                None => [face_normal; 3],
            };
            mesh.normals.push(FaceNormals {
                face: face_normal,
                corners,
            });
        }

        GeomObject {
            name,
            material_ref,
            mesh,
        }
    }
}

/// Build one document containing every given object
///
/// Multi-material objects appear as one geometry object per used material,
/// named with a `_chunk{NNN}` suffix. Any invalid object fails the whole
/// document; use [`build_object_documents`] for per-object fault isolation.
pub fn build_scene(objects: &[SourceObject], options: &ExportOptions) -> Result<Scene> {
    let mut ctx = ExportContext::new();
    ctx.collect_materials(objects);

    let mut scene = Scene::new();
    scene.info.filename = options.filename.clone();
    for object in objects {
        scene.objects.extend(ctx.convert_object(object, options)?);
    }
    scene.materials = ctx.materials;
    Ok(scene)
}

/// Build one document per material chunk of a single object
///
/// Every document carries the object's full material table, so chunk files
/// remain self-contained. The returned names carry the `_chunk{NNN}` suffix
/// when the object actually splits.
pub fn build_split_documents(
    object: &SourceObject,
    options: &ExportOptions,
) -> Result<Vec<(String, Scene)>> {
    let mut ctx = ExportContext::new();
    ctx.collect_materials(std::slice::from_ref(object));

    let chunks = ctx.convert_object(object, options)?;
    let mut out = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let mut scene = Scene::new();
        scene.info.filename = options.filename.clone();
        scene.materials = ctx.materials.clone();
        let name = chunk.name.clone();
        scene.objects.push(chunk);
        out.push((name, scene));
    }
    Ok(out)
}

/// Build one document per object, converting each independently
///
/// A failing object reports its error in place without aborting the rest of
/// the batch.
pub fn build_object_documents(
    objects: &[SourceObject],
    options: &ExportOptions,
) -> Vec<(String, Result<Scene>)> {
    objects
        .iter()
        .map(|object| {
            let scene = build_scene(std::slice::from_ref(object), options);
            (object.name.clone(), scene)
        })
        .collect()
}

fn validate_object(object: &SourceObject) -> Result<()> {
    if object.materials.is_empty() {
        return Err(Error::MissingMaterial(object.name.clone()));
    }
    let mesh = &object.mesh;
    for (index, polygon) in mesh.polygons.iter().enumerate() {
        if polygon.corners.len() != 3 {
            return Err(Error::NotTriangulated {
                object: object.name.clone(),
                polygon: index,
                corners: polygon.corners.len(),
            });
        }
        for &corner in &polygon.corners {
            if corner >= mesh.positions.len() {
                return Err(Error::VertexIndexOutOfRange {
                    object: object.name.clone(),
                    polygon: index,
                    index: corner,
                    vertex_count: mesh.positions.len(),
                });
            }
        }
    }

    let corner_count = mesh.corner_count();
    let short = |attribute: String, len: usize| Error::CornerDataTooShort {
        object: object.name.clone(),
        attribute,
        len,
        expected: corner_count,
    };
    for (channel, corners) in mesh.uv_channels.iter().enumerate() {
        if corners.len() < corner_count {
            return Err(short(format!("UV channel {}", channel), corners.len()));
        }
    }
    if let Some(colors) = &mesh.corner_colors
        && colors.len() < corner_count
    {
        return Err(short("corner colors".to_string(), colors.len()));
    }
    if let Some(normals) = &mesh.corner_normals
        && normals.len() < corner_count
    {
        return Err(short("corner normals".to_string(), normals.len()));
    }
    Ok(())
}

fn chunk_name(base: &str, index: usize) -> String {
    format!("{}_chunk{:03}", base, index)
}

/// Corner UVs are emitted sequentially: three fresh texture vertices per face
fn sequential_uv_channel(corners: &[UvCoord]) -> UvChannel {
    let faces = corners.len() / 3;
    UvChannel {
        tvertices: corners.to_vec(),
        tfaces: (0..faces).map(|f| [3 * f, 3 * f + 1, 3 * f + 2]).collect(),
    }
}

fn face_normal(vertices: &[Vertex], tri: &[usize; 3]) -> Normal {
    let a = vertices[tri[0]];
    let b = vertices[tri[1]];
    let c = vertices[tri[2]];
    let u = (b.x - a.x, b.y - a.y, b.z - a.z);
    let v = (c.x - a.x, c.y - a.y, c.z - a.z);
    Normal::new(
        u.1 * v.2 - u.2 * v.1,
        u.2 * v.0 - u.0 * v.2,
        u.0 * v.1 - u.1 * v.0,
    )
    .normalized()
}

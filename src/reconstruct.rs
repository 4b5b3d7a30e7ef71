//! Wire-side to source-side mesh reconstruction
//!
//! The inverse of the export pipeline: parsed [`GeomObject`]s become plain
//! triangle meshes with per-corner attributes resolved through their index
//! lists and sharp edges recovered from smoothing-group discontinuities.
//! Recoverable oddities (an out-of-range material reference, a channel whose
//! length disagrees with the face count) substitute a safe default, push an
//! [`ImportWarning`], and continue.

use std::collections::HashSet;

use log::warn;

use crate::error::ImportWarning;
use crate::model::{Color, EdgeKey, GeomObject, Normal, Scene, UvCoord, Vertex};
use crate::smoothing::derive_sharp_edges;

/// Knobs for an import job
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Uniform factor applied to parsed positions (inverse unit conversion)
    pub scale: f64,
    /// Carry custom corner normals over; when off, `corner_normals` is `None`
    pub import_normals: bool,
    /// Carry vertex colors over
    pub import_colors: bool,
    /// Recover sharp edges from smoothing groups; when off, the sharp set is
    /// empty
    pub import_smoothing: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            import_normals: true,
            import_colors: true,
            import_smoothing: true,
        }
    }
}

/// One geometry object brought back to source-side form
#[derive(Debug, Clone)]
pub struct ReconstructedMesh {
    /// Object name from `NODE_NAME`
    pub name: String,
    /// Vertex positions, scaled by [`ImportOptions::scale`]
    pub positions: Vec<Vertex>,
    /// Triangles as vertex-index triples in wire winding order
    pub triangles: Vec<[usize; 3]>,
    /// Resolved index into the scene's material table
    pub material_index: usize,
    /// UV channels, each flat with one entry per corner (`3 * face + slot`)
    pub uv_channels: Vec<Vec<UvCoord>>,
    /// Vertex colors, flat with one entry per corner
    pub corner_colors: Option<Vec<Color>>,
    /// Custom normals, flat with one entry per corner
    pub corner_normals: Option<Vec<Normal>>,
    /// Sharp edges recovered from smoothing-group discontinuities
    pub sharp_edges: HashSet<EdgeKey>,
}

/// Reconstruct every object of a parsed scene
///
/// Objects with empty geometry are dropped with an [`ImportWarning`], so the
/// returned list can be shorter than `scene.objects`.
pub fn reconstruct_scene(
    scene: &Scene,
    options: &ImportOptions,
) -> (Vec<ReconstructedMesh>, Vec<ImportWarning>) {
    let mut warnings = Vec::new();
    let meshes = scene
        .objects
        .iter()
        .filter_map(|object| reconstruct_object(scene, object, options, &mut warnings))
        .collect();
    (meshes, warnings)
}

/// Reconstruct one geometry object, or `None` when it carries no geometry
pub fn reconstruct_object(
    scene: &Scene,
    object: &GeomObject,
    options: &ImportOptions,
    warnings: &mut Vec<ImportWarning>,
) -> Option<ReconstructedMesh> {
    let mesh = &object.mesh;
    if mesh.vertices.is_empty() || mesh.faces.is_empty() {
        push_warning(
            warnings,
            ImportWarning::EmptyObject {
                object: object.name.clone(),
            },
        );
        return None;
    }

    let material_index = resolve_material_ref(scene, object, warnings);

    let positions = mesh
        .vertices
        .iter()
        .map(|v| Vertex::new(v.x * options.scale, v.y * options.scale, v.z * options.scale))
        .collect();
    let triangles: Vec<[usize; 3]> = mesh.faces.iter().map(|f| f.indices()).collect();
    let face_count = triangles.len();

    let mut uv_channels = Vec::new();
    for (channel_index, channel) in mesh.uv_channels.iter().enumerate() {
        if channel.tfaces.len() != face_count {
            push_warning(
                warnings,
                ImportWarning::UvChannelLengthMismatch {
                    object: object.name.clone(),
                    channel: channel_index,
                    faces: channel.tfaces.len(),
                    expected: face_count,
                },
            );
            continue;
        }
        // Resolving through the index triples flattens both the shared
        // (3DS Max) and the sequential layout to one UV per corner.
        let mut corners = Vec::with_capacity(face_count * 3);
        for tface in &channel.tfaces {
            for &index in tface {
                corners.push(
                    channel
                        .tvertices
                        .get(index)
                        .copied()
                        .unwrap_or(UvCoord::new(0.0, 0.0)),
                );
            }
        }
        uv_channels.push(corners);
    }

    let corner_colors = if options.import_colors && !mesh.cfaces.is_empty() {
        if mesh.cfaces.len() != face_count {
            push_warning(
                warnings,
                ImportWarning::ColorChannelLengthMismatch {
                    object: object.name.clone(),
                    faces: mesh.cfaces.len(),
                    expected: face_count,
                },
            );
            None
        } else {
            let mut corners = Vec::with_capacity(face_count * 3);
            for cface in &mesh.cfaces {
                for &index in cface {
                    corners.push(mesh.cvertices.get(index).copied().unwrap_or(Color::black()));
                }
            }
            Some(corners)
        }
    } else {
        None
    };

    let corner_normals = if options.import_normals && !mesh.normals.is_empty() {
        if mesh.normals.len() != face_count {
            push_warning(
                warnings,
                ImportWarning::NormalCountMismatch {
                    object: object.name.clone(),
                    normals: mesh.normals.len(),
                    expected: face_count,
                },
            );
            None
        } else {
            let mut corners = Vec::with_capacity(face_count * 3);
            for record in &mesh.normals {
                corners.extend_from_slice(&record.corners);
            }
            Some(corners)
        }
    } else {
        None
    };

    let sharp_edges = if options.import_smoothing {
        derive_sharp_edges(&triangles, &mesh.smoothing_groups())
    } else {
        HashSet::new()
    };

    Some(ReconstructedMesh {
        name: object.name.clone(),
        positions,
        triangles,
        material_index,
        uv_channels,
        corner_colors,
        corner_normals,
        sharp_edges,
    })
}

fn resolve_material_ref(
    scene: &Scene,
    object: &GeomObject,
    warnings: &mut Vec<ImportWarning>,
) -> usize {
    // An empty table makes even reference 0 resolve to nothing
    if object.material_ref >= scene.materials.len() {
        push_warning(
            warnings,
            ImportWarning::MaterialRefOutOfRange {
                object: object.name.clone(),
                material_ref: object.material_ref,
                table_len: scene.materials.len(),
            },
        );
        return 0;
    }
    object.material_ref
}

fn push_warning(warnings: &mut Vec<ImportWarning>, warning: ImportWarning) {
    warn!("{}", warning);
    warnings.push(warning);
}

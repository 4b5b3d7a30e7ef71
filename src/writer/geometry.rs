//! `GEOMOBJECT` block emission

use crate::model::{AseMesh, GeomObject, UvChannel};
use crate::smoothing::wire_group;

use super::block::{BlockWriter, ase_triple};

/// Write one `*GEOMOBJECT` block
pub(super) fn write_geomobject(w: &mut BlockWriter, object: &GeomObject) {
    w.block(format_args!("*GEOMOBJECT"), |w| {
        w.line(format_args!("*NODE_NAME \"{}\"", object.name));
        write_node_tm(w, &object.name);
        write_mesh(w, &object.mesh);
        w.raw_line("*PROP_MOTIONBLUR 0");
        w.raw_line("*PROP_CASTSHADOW 1");
        w.raw_line("*PROP_RECVSHADOW 1");
        w.line(format_args!("*MATERIAL_REF {}", object.material_ref));
    });
}

/// Identity `NODE_TM` block; all transform is baked into the vertex data
fn write_node_tm(w: &mut BlockWriter, name: &str) {
    w.block(format_args!("*NODE_TM"), |w| {
        w.line(format_args!("*NODE_NAME \"{}\"", name));
        w.raw_line("*INHERIT_POS 0 0 0");
        w.raw_line("*INHERIT_ROT 0 0 0");
        w.raw_line("*INHERIT_SCL 0 0 0");
        w.raw_line("*TM_ROW0 1.0000\t0.0000\t0.0000");
        w.raw_line("*TM_ROW1 0.0000\t1.0000\t0.0000");
        w.raw_line("*TM_ROW2 0.0000\t0.0000\t1.0000");
        w.raw_line("*TM_ROW3 0.0000\t0.0000\t0.0000");
        w.raw_line("*TM_POS 0.0000\t0.0000\t0.0000");
        w.raw_line("*TM_ROTAXIS 0.0000\t0.0000\t0.0000");
        w.raw_line("*TM_ROTANGLE 0.0000");
        w.raw_line("*TM_SCALE 1.0000\t1.0000\t1.0000");
        w.raw_line("*TM_SCALEAXIS 0.0000\t0.0000\t0.0000");
        w.raw_line("*TM_SCALEAXISANG 0.0000");
    });
}

fn write_mesh(w: &mut BlockWriter, mesh: &AseMesh) {
    w.block(format_args!("*MESH"), |w| {
        w.raw_line("*TIMEVALUE 0");
        w.line(format_args!("*MESH_NUMVERTEX {}", mesh.vertices.len()));
        w.line(format_args!("*MESH_NUMFACES {}", mesh.faces.len()));

        w.block(format_args!("*MESH_VERTEX_LIST"), |w| {
            for (index, v) in mesh.vertices.iter().enumerate() {
                w.line(format_args!(
                    "*MESH_VERTEX {}\t{}",
                    index,
                    ase_triple(v.x, v.y, v.z)
                ));
            }
        });

        w.block(format_args!("*MESH_FACE_LIST"), |w| {
            for (index, face) in mesh.faces.iter().enumerate() {
                // Column layout of the historical exporters; the smoothing
                // group and material id ride inline on the same record.
                w.line(format_args!(
                    "*MESH_FACE {}:    A: {:>5} B: {:>5} C: {:>5} AB: {:>4} BC: {:>4} CA: {:>4}\t *MESH_SMOOTHING {} \t*MESH_MTLID {}",
                    index,
                    face.a,
                    face.b,
                    face.c,
                    face.edge_ab as u8,
                    face.edge_bc as u8,
                    face.edge_ca as u8,
                    wire_group(face.smoothing_group),
                    face.material_id
                ));
            }
        });

        if let Some(primary) = mesh.uv_channels.first() {
            write_uv_lists(w, primary);
        }
        for (channel_index, channel) in mesh.uv_channels.iter().enumerate().skip(1) {
            w.block(
                format_args!("*MESH_MAPPINGCHANNEL {}", channel_index + 1),
                |w| write_uv_lists(w, channel),
            );
        }

        if !mesh.cvertices.is_empty() && !mesh.cfaces.is_empty() {
            w.line(format_args!("*MESH_NUMCVERTEX {}", mesh.cvertices.len()));
            w.block(format_args!("*MESH_CVERTLIST"), |w| {
                for (index, c) in mesh.cvertices.iter().enumerate() {
                    w.line(format_args!(
                        "*MESH_VERTCOL {}\t{}",
                        index,
                        ase_triple(c.r, c.g, c.b)
                    ));
                }
            });
            w.line(format_args!("*MESH_NUMCVFACES {}", mesh.cfaces.len()));
            w.block(format_args!("*MESH_CFACELIST"), |w| {
                for (index, cf) in mesh.cfaces.iter().enumerate() {
                    w.line(format_args!(
                        "*MESH_CFACE {}\t{}\t{}\t{}",
                        index, cf[0], cf[1], cf[2]
                    ));
                }
            });
        }

        w.block(format_args!("*MESH_NORMALS"), |w| {
            // zip drops normal records beyond the face count, which foreign
            // documents sometimes carry
            for (index, (face, normals)) in mesh.faces.iter().zip(&mesh.normals).enumerate() {
                w.line(format_args!(
                    "*MESH_FACENORMAL {}\t{}",
                    index,
                    ase_triple(normals.face.x, normals.face.y, normals.face.z)
                ));
                // Corner order matches face winding; indices repeat across
                // faces, the position in the block is what identifies a
                // corner normal.
                for (corner, vertex_index) in face.indices().into_iter().enumerate() {
                    let n = normals.corners[corner];
                    w.line(format_args!(
                        "\t*MESH_VERTEXNORMAL {}\t{}",
                        vertex_index,
                        ase_triple(n.x, n.y, n.z)
                    ));
                }
            }
        });
    });
}

fn write_uv_lists(w: &mut BlockWriter, channel: &UvChannel) {
    w.line(format_args!("*MESH_NUMTVERTEX {}", channel.tvertices.len()));
    w.block(format_args!("*MESH_TVERTLIST"), |w| {
        for (index, uv) in channel.tvertices.iter().enumerate() {
            w.line(format_args!(
                "*MESH_TVERT {}\t{}",
                index,
                ase_triple(uv.u, uv.v, 0.0)
            ));
        }
    });
    w.line(format_args!("*MESH_NUMTVFACES {}", channel.tfaces.len()));
    w.block(format_args!("*MESH_TFACELIST"), |w| {
        for (index, tf) in channel.tfaces.iter().enumerate() {
            w.line(format_args!(
                "*MESH_TFACE {}\t{}\t{}\t{}",
                index, tf[0], tf[1], tf[2]
            ));
        }
    });
}

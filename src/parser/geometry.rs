//! `GEOMOBJECT` and `MESH` block parsing

use crate::error::Result;
use crate::model::{AseMesh, Color, Face, FaceNormals, GeomObject, Normal, UvChannel, UvCoord, Vertex};

use super::material::parse_color;
use super::skip_unknown;
use super::tokenizer::{Tokenizer, parse_u32};

/// Parse a `*GEOMOBJECT { ... }` block, opening brace not yet consumed.
///
/// Transform blocks (`NODE_TM`, `TM_ANIMATION`, `MESH_ANIMATION`) are
/// deliberately ignored: exporters that follow the idTech 4 convention bake
/// all transform into the vertex data and write an identity node transform.
pub(super) fn parse_geomobject(tok: &mut Tokenizer<'_>) -> Result<GeomObject> {
    tok.expect_open("*GEOMOBJECT")?;
    let mut object = GeomObject::new("");

    loop {
        let token = tok.expect_token("*GEOMOBJECT")?;
        match token.text {
            "}" => break,
            "*NODE_NAME" => {
                object.name = tok.expect_token("*NODE_NAME")?.text.to_owned();
            }
            "*NODE_TM" | "*TM_ANIMATION" | "*MESH_ANIMATION" => tok.skip_block()?,
            "*MESH" => object.mesh = parse_mesh(tok)?,
            "*MATERIAL_REF" => {
                object.material_ref = tok.expect_usize("*MATERIAL_REF")?;
            }
            _ => skip_unknown(tok)?,
        }
    }
    Ok(object)
}

fn parse_mesh(tok: &mut Tokenizer<'_>) -> Result<AseMesh> {
    tok.expect_open("*MESH")?;
    let mut mesh = AseMesh::new();
    // Channel 0 lists appear directly in the MESH block; higher channels come
    // wrapped in MESH_MAPPINGCHANNEL blocks.
    let mut primary = UvChannel::default();

    loop {
        let token = tok.expect_token("*MESH")?;
        match token.text {
            "}" => break,
            "*TIMEVALUE" | "*MESH_NUMVERTEX" | "*MESH_NUMFACES" | "*MESH_NUMTVERTEX"
            | "*MESH_NUMTVFACES" | "*MESH_NUMCVERTEX" | "*MESH_NUMCVFACES" => {
                // Counts are informational; the lists speak for themselves.
                tok.expect_token(token.text)?;
            }
            "*MESH_VERTEX_LIST" => parse_vertex_list(tok, &mut mesh.vertices)?,
            "*MESH_FACE_LIST" => parse_face_list(tok, &mut mesh.faces)?,
            "*MESH_TVERTLIST" => parse_tvert_list(tok, &mut primary.tvertices)?,
            "*MESH_TFACELIST" => parse_index_triples(tok, "*MESH_TFACE", &mut primary.tfaces)?,
            "*MESH_MAPPINGCHANNEL" => {
                tok.expect_usize("*MESH_MAPPINGCHANNEL")?;
                mesh.uv_channels.push(parse_mapping_channel(tok)?);
            }
            "*MESH_CVERTLIST" => parse_cvert_list(tok, &mut mesh.cvertices)?,
            "*MESH_CFACELIST" => parse_index_triples(tok, "*MESH_CFACE", &mut mesh.cfaces)?,
            "*MESH_NORMALS" => parse_normals(tok, &mut mesh.normals)?,
            _ => skip_unknown(tok)?,
        }
    }

    if !primary.tvertices.is_empty() || !primary.tfaces.is_empty() {
        mesh.uv_channels.insert(0, primary);
    }
    Ok(mesh)
}

fn parse_vertex_list(tok: &mut Tokenizer<'_>, vertices: &mut Vec<Vertex>) -> Result<()> {
    tok.expect_open("*MESH_VERTEX_LIST")?;
    loop {
        let token = tok.expect_token("*MESH_VERTEX_LIST")?;
        match token.text {
            "}" => break,
            "*MESH_VERTEX" => {
                tok.expect_usize("*MESH_VERTEX")?;
                vertices.push(Vertex::new(
                    tok.expect_float("*MESH_VERTEX")?,
                    tok.expect_float("*MESH_VERTEX")?,
                    tok.expect_float("*MESH_VERTEX")?,
                ));
            }
            _ => skip_unknown(tok)?,
        }
    }
    Ok(())
}

fn parse_face_list(tok: &mut Tokenizer<'_>, faces: &mut Vec<Face>) -> Result<()> {
    tok.expect_open("*MESH_FACE_LIST")?;
    loop {
        let token = tok.expect_token("*MESH_FACE_LIST")?;
        match token.text {
            "}" => break,
            "*MESH_FACE" => faces.push(parse_face(tok)?),
            _ => skip_unknown(tok)?,
        }
    }
    Ok(())
}

/// Parse one face record. The layout is a run of `label: value` pairs with
/// the smoothing group and material id riding inline; everything after the
/// mandatory vertex fields is optional on real-world files.
fn parse_face(tok: &mut Tokenizer<'_>) -> Result<Face> {
    // face index, written with a trailing colon
    tok.expect_token("*MESH_FACE")?;
    let mut face = Face::new(0, 0, 0);

    loop {
        let mark = tok.checkpoint();
        let Some(token) = tok.next_token() else { break };
        match token.text {
            "A:" => face.a = tok.expect_usize("*MESH_FACE A")?,
            "B:" => face.b = tok.expect_usize("*MESH_FACE B")?,
            "C:" => face.c = tok.expect_usize("*MESH_FACE C")?,
            "AB:" => face.edge_ab = tok.expect_usize("*MESH_FACE AB")? != 0,
            "BC:" => face.edge_bc = tok.expect_usize("*MESH_FACE BC")? != 0,
            "CA:" => face.edge_ca = tok.expect_usize("*MESH_FACE CA")? != 0,
            "*MESH_SMOOTHING" => {
                face.smoothing_group = parse_smoothing_value(tok)?;
            }
            "*MESH_MTLID" => face.material_id = tok.expect_usize("*MESH_MTLID")?,
            _ => {
                tok.rewind(mark);
                break;
            }
        }
    }
    Ok(face)
}

/// The smoothing value may be missing entirely, or a comma-separated list of
/// group ids from which only the first matters to the sharp-edge derivation.
fn parse_smoothing_value(tok: &mut Tokenizer<'_>) -> Result<u32> {
    let mark = tok.checkpoint();
    let Some(token) = tok.next_token() else {
        return Ok(0);
    };
    if token.text.starts_with('*') || token.text == "}" {
        tok.rewind(mark);
        return Ok(0);
    }
    match token.text.split(',').next() {
        Some(first) if !first.is_empty() => {
            let mut sub = token;
            sub.text = first;
            parse_u32(&sub)
        }
        _ => Ok(0),
    }
}

fn parse_tvert_list(tok: &mut Tokenizer<'_>, tvertices: &mut Vec<UvCoord>) -> Result<()> {
    tok.expect_open("*MESH_TVERTLIST")?;
    loop {
        let token = tok.expect_token("*MESH_TVERTLIST")?;
        match token.text {
            "}" => break,
            "*MESH_TVERT" => {
                tok.expect_usize("*MESH_TVERT")?;
                let u = tok.expect_float("*MESH_TVERT")?;
                let v = tok.expect_float("*MESH_TVERT")?;
                tok.expect_float("*MESH_TVERT")?; // w, always discarded
                tvertices.push(UvCoord::new(u, v));
            }
            _ => skip_unknown(tok)?,
        }
    }
    Ok(())
}

fn parse_index_triples(
    tok: &mut Tokenizer<'_>,
    keyword: &str,
    triples: &mut Vec<[usize; 3]>,
) -> Result<()> {
    tok.expect_open(keyword)?;
    loop {
        let token = tok.expect_token(keyword)?;
        match token.text {
            "}" => break,
            text if text == keyword => {
                tok.expect_usize(keyword)?;
                triples.push([
                    tok.expect_usize(keyword)?,
                    tok.expect_usize(keyword)?,
                    tok.expect_usize(keyword)?,
                ]);
            }
            _ => skip_unknown(tok)?,
        }
    }
    Ok(())
}

fn parse_mapping_channel(tok: &mut Tokenizer<'_>) -> Result<UvChannel> {
    tok.expect_open("*MESH_MAPPINGCHANNEL")?;
    let mut channel = UvChannel::default();
    loop {
        let token = tok.expect_token("*MESH_MAPPINGCHANNEL")?;
        match token.text {
            "}" => break,
            "*MESH_NUMTVERTEX" | "*MESH_NUMTVFACES" => {
                tok.expect_token(token.text)?;
            }
            "*MESH_TVERTLIST" => parse_tvert_list(tok, &mut channel.tvertices)?,
            "*MESH_TFACELIST" => parse_index_triples(tok, "*MESH_TFACE", &mut channel.tfaces)?,
            _ => skip_unknown(tok)?,
        }
    }
    Ok(channel)
}

fn parse_cvert_list(tok: &mut Tokenizer<'_>, cvertices: &mut Vec<Color>) -> Result<()> {
    tok.expect_open("*MESH_CVERTLIST")?;
    loop {
        let token = tok.expect_token("*MESH_CVERTLIST")?;
        match token.text {
            "}" => break,
            "*MESH_VERTCOL" => {
                tok.expect_usize("*MESH_VERTCOL")?;
                cvertices.push(parse_color(tok, "*MESH_VERTCOL")?);
            }
            _ => skip_unknown(tok)?,
        }
    }
    Ok(())
}

/// Corner normals are positional: each `MESH_FACENORMAL` record owns the
/// following three `MESH_VERTEXNORMAL` lines in winding order. The vertex
/// index on those lines repeats across faces and is ignored.
fn parse_normals(tok: &mut Tokenizer<'_>, normals: &mut Vec<FaceNormals>) -> Result<()> {
    tok.expect_open("*MESH_NORMALS")?;
    let mut corner = 0usize;
    loop {
        let token = tok.expect_token("*MESH_NORMALS")?;
        match token.text {
            "}" => break,
            "*MESH_FACENORMAL" => {
                tok.expect_usize("*MESH_FACENORMAL")?;
                let face = Normal::new(
                    tok.expect_float("*MESH_FACENORMAL")?,
                    tok.expect_float("*MESH_FACENORMAL")?,
                    tok.expect_float("*MESH_FACENORMAL")?,
                );
                normals.push(FaceNormals {
                    face,
                    corners: [face; 3],
                });
                corner = 0;
            }
            "*MESH_VERTEXNORMAL" => {
                tok.expect_usize("*MESH_VERTEXNORMAL")?;
                let n = Normal::new(
                    tok.expect_float("*MESH_VERTEXNORMAL")?,
                    tok.expect_float("*MESH_VERTEXNORMAL")?,
                    tok.expect_float("*MESH_VERTEXNORMAL")?,
                );
                if let Some(last) = normals.last_mut()
                    && corner < 3
                {
                    last.corners[corner] = n;
                    corner += 1;
                }
            }
            _ => skip_unknown(tok)?,
        }
    }
    Ok(())
}

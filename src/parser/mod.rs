//! ASE document parsing
//!
//! The parser is deliberately permissive, matching how the historical
//! importers behaved: any keyword it does not recognize is skipped (with its
//! block, if it opens one), so files written by 3DS Max, by this crate, or by
//! other exporters all parse through the same path. The only structural
//! demand is that at least one `GEOMOBJECT` is present.

mod geometry;
mod material;
pub mod tokenizer;

use log::debug;

use crate::error::{Error, Result};
use crate::model::{GeomObject, Scene};

use tokenizer::Tokenizer;

/// Parse a complete ASE document into a [`Scene`].
///
/// Returns [`Error::EmptyScene`] when the text contains no geometry object.
pub fn parse_scene(source: &str) -> Result<Scene> {
    let mut tok = Tokenizer::new(source);
    let mut scene = Scene::new();

    while let Some(token) = tok.next_token() {
        match token.text {
            "*3DSMAX_ASCIIEXPORT" => {
                scene.info.format_version = tok
                    .expect_token("*3DSMAX_ASCIIEXPORT")?
                    .text
                    .parse()
                    .unwrap_or(200);
            }
            "*COMMENT" => {
                scene.info.comment = unquote(tok.rest_of_line()).to_owned();
            }
            "*SCENE" => parse_scene_block(&mut tok, &mut scene)?,
            "*MATERIAL_LIST" => {
                scene.materials = material::parse_material_list(&mut tok)?;
            }
            "*GEOMOBJECT" => {
                scene.objects.push(geometry::parse_geomobject(&mut tok)?);
            }
            "*GROUP" => parse_group(&mut tok, &mut scene.objects)?,
            _ => skip_unknown(&mut tok)?,
        }
    }

    if scene.objects.is_empty() {
        return Err(Error::EmptyScene);
    }
    debug!(
        "parsed scene: {} material(s), {} object(s)",
        scene.materials.len(),
        scene.objects.len()
    );
    Ok(scene)
}

fn parse_scene_block(tok: &mut Tokenizer<'_>, scene: &mut Scene) -> Result<()> {
    tok.expect_open("*SCENE")?;
    loop {
        let token = tok.expect_token("*SCENE")?;
        match token.text {
            "}" => break,
            "*SCENE_FILENAME" => {
                scene.info.filename = tok.expect_token("*SCENE_FILENAME")?.text.to_owned();
            }
            "*SCENE_FIRSTFRAME" => {
                scene.info.first_frame = tok.expect_i32("*SCENE_FIRSTFRAME")?;
            }
            "*SCENE_LASTFRAME" => {
                scene.info.last_frame = tok.expect_i32("*SCENE_LASTFRAME")?;
            }
            "*SCENE_FRAMESPEED" => {
                scene.info.frame_speed = tok.expect_i32("*SCENE_FRAMESPEED")?;
            }
            "*SCENE_TICKSPERFRAME" => {
                scene.info.ticks_per_frame = tok.expect_i32("*SCENE_TICKSPERFRAME")?;
            }
            _ => skip_unknown(tok)?,
        }
    }
    Ok(())
}

/// A `GROUP` block nests geometry objects (and possibly further groups).
/// Grouping itself carries no data the mesh pipeline cares about, so the
/// members are lifted into the flat object list.
fn parse_group(tok: &mut Tokenizer<'_>, objects: &mut Vec<GeomObject>) -> Result<()> {
    // group name
    tok.expect_token("*GROUP")?;
    tok.expect_open("*GROUP")?;
    loop {
        let token = tok.expect_token("*GROUP")?;
        match token.text {
            "}" => break,
            "*GEOMOBJECT" => objects.push(geometry::parse_geomobject(tok)?),
            "*GROUP" => parse_group(tok, objects)?,
            _ => skip_unknown(tok)?,
        }
    }
    Ok(())
}

/// Skip an unrecognized token's payload: if it opens a block, consume the
/// whole block; otherwise leave the following tokens for the caller's loop
/// to churn through one at a time.
pub(crate) fn skip_unknown(tok: &mut Tokenizer<'_>) -> Result<()> {
    let mark = tok.checkpoint();
    match tok.next_token() {
        Some(token) if token.text == "{" => {
            tok.rewind(mark);
            tok.skip_block()
        }
        Some(_) => {
            tok.rewind(mark);
            Ok(())
        }
        None => Ok(()),
    }
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "*3DSMAX_ASCIIEXPORT\t200\n\
        *COMMENT \"written by hand\"\n\
        *SCENE {\n\
        \t*SCENE_FILENAME \"box.blend\"\n\
        \t*SCENE_FIRSTFRAME 0\n\
        \t*SCENE_LASTFRAME 100\n\
        }\n\
        *GEOMOBJECT {\n\
        \t*NODE_NAME \"box\"\n\
        \t*MESH {\n\
        \t\t*MESH_VERTEX_LIST { *MESH_VERTEX 0\t0.0\t0.0\t0.0 }\n\
        \t\t*MESH_FACE_LIST { }\n\
        \t}\n\
        }\n";

    #[test]
    fn test_parse_minimal_document() {
        let scene = parse_scene(MINIMAL).unwrap();
        assert_eq!(scene.info.format_version, 200);
        assert_eq!(scene.info.comment, "written by hand");
        assert_eq!(scene.info.filename, "box.blend");
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.objects[0].name, "box");
    }

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(matches!(parse_scene(""), Err(Error::EmptyScene)));
        assert!(matches!(
            parse_scene("*3DSMAX_ASCIIEXPORT 200\n*SCENE { }"),
            Err(Error::EmptyScene)
        ));
    }

    #[test]
    fn test_foreign_text_parses_to_empty() {
        let result = parse_scene("this is not an ase file at all\n{ } { }");
        assert!(matches!(result, Err(Error::EmptyScene)));
    }

    #[test]
    fn test_group_members_are_lifted() {
        let text = "*GROUP \"furniture\" {\n\
            \t*GEOMOBJECT { *NODE_NAME \"chair\" }\n\
            \t*GROUP \"inner\" {\n\
            \t\t*GEOMOBJECT { *NODE_NAME \"leg\" }\n\
            \t}\n\
            }\n\
            *GEOMOBJECT { *NODE_NAME \"floor\" }\n";
        let scene = parse_scene(text).unwrap();
        let names: Vec<&str> = scene.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["chair", "leg", "floor"]);
    }

    #[test]
    fn test_unknown_blocks_skipped() {
        let text = "*LIGHTOBJECT {\n\
            \t*NODE_NAME \"lamp\"\n\
            \t*LIGHT_SETTINGS { *LIGHT_COLOR 1.0 1.0 1.0 }\n\
            }\n\
            *GEOMOBJECT { *NODE_NAME \"mesh\" }\n";
        let scene = parse_scene(text).unwrap();
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.objects[0].name, "mesh");
    }

    #[test]
    fn test_malformed_number_reports_offset() {
        let text = "*GEOMOBJECT {\n\
            \t*MESH {\n\
            \t\t*MESH_VERTEX_LIST { *MESH_VERTEX 0\tnot_a_number\t0.0\t0.0 }\n\
            \t}\n\
            }\n";
        let err = parse_scene(text).unwrap_err();
        match err {
            Error::MalformedNumber { token, .. } => assert_eq!(token, "not_a_number"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

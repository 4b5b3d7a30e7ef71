//! `MATERIAL_LIST` block parsing

use crate::error::{Error, Result};
use crate::model::{Color, Material, MaterialTable};

use super::skip_unknown;
use super::tokenizer::Tokenizer;

/// Parse a `*MATERIAL_LIST { ... }` block, opening brace not yet consumed.
///
/// `MATERIAL_COUNT` is informational; the table holds whatever `MATERIAL n`
/// sub-blocks actually appear, in file order. Sub-material blocks
/// (`SUBMATERIAL`) are skipped like any other unknown block.
pub(super) fn parse_material_list(tok: &mut Tokenizer<'_>) -> Result<MaterialTable> {
    tok.expect_open("*MATERIAL_LIST")?;
    let mut table = MaterialTable::new();

    loop {
        let token = tok.expect_token("*MATERIAL_LIST")?;
        match token.text {
            "}" => break,
            "*MATERIAL_COUNT" => {
                tok.expect_usize("*MATERIAL_COUNT")?;
            }
            "*MATERIAL" => {
                // index token, then the block
                tok.expect_usize("*MATERIAL")?;
                table.add(parse_material(tok)?);
            }
            _ => skip_unknown(tok)?,
        }
    }
    Ok(table)
}

/// True when the reader sits on a `{`, consuming it. Material sub-blocks
/// appear both braced and inline; the inline layout ends at the next
/// `*MATERIAL` or the enclosing `}`, which stays unconsumed for the caller.
fn open_if_braced(tok: &mut Tokenizer<'_>) -> bool {
    let mark = tok.checkpoint();
    match tok.next_token() {
        Some(token) if token.text == "{" => true,
        _ => {
            tok.rewind(mark);
            false
        }
    }
}

fn parse_material(tok: &mut Tokenizer<'_>) -> Result<Material> {
    let braced = open_if_braced(tok);
    let mut material = Material::new("");

    loop {
        let mark = tok.checkpoint();
        let Some(token) = tok.next_token() else {
            if braced {
                return Err(Error::unexpected_eof("*MATERIAL"));
            }
            break;
        };
        match token.text {
            "}" => {
                if !braced {
                    tok.rewind(mark);
                }
                break;
            }
            "*MATERIAL" if !braced => {
                tok.rewind(mark);
                break;
            }
            "*MATERIAL_NAME" => {
                material.name = tok.expect_token("*MATERIAL_NAME")?.text.to_owned();
            }
            "*MATERIAL_DIFFUSE" => material.diffuse = parse_color(tok, "*MATERIAL_DIFFUSE")?,
            "*MATERIAL_SPECULAR" => material.specular = parse_color(tok, "*MATERIAL_SPECULAR")?,
            "*MATERIAL_SHINE" => material.shine = tok.expect_float("*MATERIAL_SHINE")?,
            "*MATERIAL_SHINESTRENGTH" => {
                material.shine_strength = tok.expect_float("*MATERIAL_SHINESTRENGTH")?;
            }
            "*MATERIAL_TRANSPARENCY" => {
                material.transparency = tok.expect_float("*MATERIAL_TRANSPARENCY")?;
            }
            "*MATERIAL_SELFILLUM" => {
                material.self_illum = tok.expect_float("*MATERIAL_SELFILLUM")?;
            }
            "*MAP_DIFFUSE" => parse_map_diffuse(tok, &mut material)?,
            _ => skip_unknown(tok)?,
        }
    }

    // The bitmap path is the engine shader; fall back to the name so a
    // mapless material still resolves to something.
    if material.map_diffuse.bitmap.is_empty() || material.map_diffuse.bitmap == "None" {
        material.map_diffuse.bitmap = material.name.clone();
    }
    Ok(material)
}

fn parse_map_diffuse(tok: &mut Tokenizer<'_>, material: &mut Material) -> Result<()> {
    let braced = open_if_braced(tok);
    loop {
        let mark = tok.checkpoint();
        let Some(token) = tok.next_token() else {
            if braced {
                return Err(Error::unexpected_eof("*MAP_DIFFUSE"));
            }
            break;
        };
        match token.text {
            "}" => {
                if !braced {
                    tok.rewind(mark);
                }
                break;
            }
            "*BITMAP" => {
                material.map_diffuse.bitmap = tok.expect_token("*BITMAP")?.text.to_owned();
            }
            "*UVW_U_OFFSET" => material.map_diffuse.u_offset = tok.expect_float("*UVW_U_OFFSET")?,
            "*UVW_V_OFFSET" => material.map_diffuse.v_offset = tok.expect_float("*UVW_V_OFFSET")?,
            "*UVW_U_TILING" => material.map_diffuse.u_tiling = tok.expect_float("*UVW_U_TILING")?,
            "*UVW_V_TILING" => material.map_diffuse.v_tiling = tok.expect_float("*UVW_V_TILING")?,
            "*UVW_ANGLE" => material.map_diffuse.angle = tok.expect_float("*UVW_ANGLE")?,
            // An inline map has no closer; a material-level keyword marks
            // its end.
            _ if !braced && token.text.starts_with("*MATERIAL") => {
                tok.rewind(mark);
                break;
            }
            _ => skip_unknown(tok)?,
        }
    }
    Ok(())
}

pub(super) fn parse_color(tok: &mut Tokenizer<'_>, context: &str) -> Result<Color> {
    Ok(Color::new(
        tok.expect_float(context)?,
        tok.expect_float(context)?,
        tok.expect_float(context)?,
    ))
}

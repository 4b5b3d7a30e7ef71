//! Material list emission

use crate::model::{Material, MaterialTable};

use super::block::{BlockWriter, ase_float, ase_triple};

/// Write the `*MATERIAL_LIST` block
pub(super) fn write_material_list(w: &mut BlockWriter, table: &MaterialTable) {
    w.block(format_args!("*MATERIAL_LIST"), |w| {
        w.line(format_args!("*MATERIAL_COUNT {}", table.len()));
        for (index, material) in table.iter().enumerate() {
            write_material(w, index, material);
        }
    });
}

fn write_material(w: &mut BlockWriter, index: usize, mat: &Material) {
    w.block(format_args!("*MATERIAL {}", index), |w| {
        w.line(format_args!("*MATERIAL_NAME \"{}\"", mat.name));
        w.raw_line("*MATERIAL_CLASS \"Standard\"");
        w.line(format_args!(
            "*MATERIAL_AMBIENT {}",
            ase_triple(0.0, 0.0, 0.0)
        ));
        w.line(format_args!(
            "*MATERIAL_DIFFUSE {}",
            ase_triple(mat.diffuse.r, mat.diffuse.g, mat.diffuse.b)
        ));
        w.line(format_args!(
            "*MATERIAL_SPECULAR {}",
            ase_triple(mat.specular.r, mat.specular.g, mat.specular.b)
        ));
        w.line(format_args!("*MATERIAL_SHINE {}", ase_float(mat.shine)));
        w.line(format_args!(
            "*MATERIAL_SHINESTRENGTH {}",
            ase_float(mat.shine_strength)
        ));
        w.line(format_args!(
            "*MATERIAL_TRANSPARENCY {}",
            ase_float(mat.transparency)
        ));
        w.line(format_args!("*MATERIAL_WIRESIZE {}", ase_float(1.0)));
        w.raw_line("*MATERIAL_SHADING Phong");
        w.line(format_args!("*MATERIAL_XP_FALLOFF {}", ase_float(0.0)));
        w.line(format_args!(
            "*MATERIAL_SELFILLUM {}",
            ase_float(mat.self_illum)
        ));
        w.raw_line("*MATERIAL_FALLOFF In");
        w.raw_line("*MATERIAL_XP_TYPE Filter");
        write_map_diffuse(w, mat);
    });
}

fn write_map_diffuse(w: &mut BlockWriter, mat: &Material) {
    let map = &mat.map_diffuse;
    w.block(format_args!("*MAP_DIFFUSE"), |w| {
        w.line(format_args!("*MAP_NAME \"{}\"", mat.name));
        w.raw_line("*MAP_CLASS \"Bitmap\"");
        w.raw_line("*MAP_SUBNO 1");
        w.line(format_args!("*MAP_AMOUNT {}", ase_float(1.0)));
        w.line(format_args!("*BITMAP \"{}\"", map.bitmap));
        w.raw_line("*MAP_TYPE Screen");
        w.line(format_args!("*UVW_U_OFFSET {}", ase_float(map.u_offset)));
        w.line(format_args!("*UVW_V_OFFSET {}", ase_float(map.v_offset)));
        w.line(format_args!("*UVW_U_TILING {}", ase_float(map.u_tiling)));
        w.line(format_args!("*UVW_V_TILING {}", ase_float(map.v_tiling)));
        w.line(format_args!("*UVW_ANGLE {}", ase_float(map.angle)));
        w.line(format_args!("*UVW_BLUR {}", ase_float(1.0)));
        w.line(format_args!("*UVW_BLUR_OFFSET {}", ase_float(0.0)));
        w.line(format_args!("*UVW_NOUSE_AMT {}", ase_float(1.0)));
        w.line(format_args!("*UVW_NOISE_SIZE {}", ase_float(1.0)));
        w.raw_line("*UVW_NOISE_LEVEL 1");
        w.line(format_args!("*UVW_NOISE_PHASE {}", ase_float(0.0)));
        w.raw_line("*BITMAP_FILTER Pyramidal");
    });
}

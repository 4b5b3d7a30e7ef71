//! ASE scene serialization
//!
//! Produces the tab-indented, 4-decimal text layout that the idTech 4 asset
//! pipeline expects. Serialization is deterministic: the same [`Scene`] always
//! yields the same bytes.

mod block;
mod geometry;
mod material;

use block::BlockWriter;

use crate::model::Scene;

/// Serialize a whole scene into ASE text.
pub fn write_scene(scene: &Scene) -> String {
    let mut w = BlockWriter::new();
    let info = &scene.info;

    w.line(format_args!(
        "*3DSMAX_ASCIIEXPORT\t{}",
        info.format_version
    ));
    w.line(format_args!("*COMMENT \"{}\"", info.comment));

    w.block(format_args!("*SCENE"), |w| {
        w.line(format_args!("*SCENE_FILENAME \"{}\"", info.filename));
        w.line(format_args!("*SCENE_FIRSTFRAME {}", info.first_frame));
        w.line(format_args!("*SCENE_LASTFRAME {}", info.last_frame));
        w.line(format_args!("*SCENE_FRAMESPEED {}", info.frame_speed));
        w.line(format_args!("*SCENE_TICKSPERFRAME {}", info.ticks_per_frame));
        w.raw_line("*SCENE_BACKGROUND_STATIC 0.0000\t0.0000\t0.0000");
        w.raw_line("*SCENE_AMBIENT_STATIC 0.0000\t0.0000\t0.0000");
    });

    material::write_material_list(&mut w, &scene.materials);

    for object in &scene.objects {
        geometry::write_geomobject(&mut w, object);
    }

    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Material, SceneInfo};

    #[test]
    fn test_header_and_scene_block() {
        let mut scene = Scene::new();
        scene.info = SceneInfo::new();
        scene.info.filename = "exported.ase".to_string();
        let text = write_scene(&scene);
        assert!(text.contains("*SCENE_FILENAME \"exported.ase\""));

        assert!(text.starts_with("*3DSMAX_ASCIIEXPORT\t200\n"));
        assert!(text.contains("*SCENE {\n"));
        assert!(text.contains("*SCENE_FIRSTFRAME 0"));
        assert!(text.contains("*SCENE_LASTFRAME 100"));
        assert!(text.contains("*SCENE_FRAMESPEED 30"));
        assert!(text.contains("*SCENE_TICKSPERFRAME 160"));
        assert!(text.contains("*SCENE_AMBIENT_STATIC 0.0000\t0.0000\t0.0000"));
    }

    #[test]
    fn test_deterministic_output() {
        let mut scene = Scene::new();
        scene.materials.add(Material::new("textures/base_wall/metal"));
        scene.materials.add(Material::new("textures/base_trim/rust"));
        let first = write_scene(&scene);
        let second = write_scene(&scene);
        assert_eq!(first, second);
    }
}

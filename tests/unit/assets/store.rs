use std::io::Cursor;

use super::*;
use crate::foundation::core::Canvas;

fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, buf).unwrap();
}

fn scene_with(assets: Vec<(&str, AssetDesc)>) -> SceneDesc {
    SceneDesc {
        canvas: Canvas {
            width: 8,
            height: 8,
        },
        clear_rgba: None,
        assets: assets
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        roots: vec![],
    }
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("img\\x.png").unwrap(), "img/x.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn prepare_loads_images_and_fonts_from_root() {
    let dir = PathBuf::from("target").join("panelkit_store_prepare");
    std::fs::create_dir_all(&dir).unwrap();
    write_png(&dir.join("logo.png"), 6, 3);
    std::fs::write(dir.join("ui.ttf"), b"font bytes").unwrap();

    let desc = scene_with(vec![
        (
            "logo",
            AssetDesc::Image {
                source: "logo.png".to_string(),
            },
        ),
        (
            "ui",
            AssetDesc::Font {
                source: "./ui.ttf".to_string(),
                size_px: 18.0,
            },
        ),
    ]);
    let store = AssetStore::prepare(&desc, &dir).unwrap();
    assert_eq!(store.root(), dir.as_path());
    assert_eq!(store.image("logo").unwrap().natural_aspect_ratio().unwrap(), 2.0);
    let font = store.font("ui").unwrap();
    assert_eq!(font.size_px(), 18.0);
    assert_eq!(font.bytes(), b"font bytes");
    assert_eq!(font.name(), "ui");
}

#[test]
fn missing_files_and_unknown_keys_are_errors() {
    let desc = scene_with(vec![(
        "gone",
        AssetDesc::Image {
            source: "does/not/exist.png".to_string(),
        },
    )]);
    assert!(AssetStore::prepare(&desc, "target").is_err());

    let store = AssetStore::new(".");
    assert!(matches!(store.image("nope"), Err(PanelkitError::Asset(_))));
    assert!(matches!(store.font("nope"), Err(PanelkitError::Asset(_))));
}

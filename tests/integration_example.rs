// tests/integration_example.rs

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use tiled_infinite::{parse_config_args, ConfigArgs, Resources, TilesetImages};

fn res_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("res")
}

#[test]
fn config_drives_map_and_image_loading() -> anyhow::Result<()> {
    let mut config = parse_config_args(BufReader::new(File::open(res_dir().join("config.ini"))?))?;
    assert_eq!(config.resource_root(), PathBuf::from("tests/res"));
    assert_eq!(config.default_map(), Some("test_infinite_map.json"));

    // anchor the root so the test does not depend on the working directory
    config.set_value("resource", "path", res_dir().to_str().expect("utf8 path"));
    let resources = Resources::from_config(&config);

    let map = resources
        .load_default_map(&config)?
        .expect("default map configured");
    assert_eq!(map.tilesets.len(), 1);

    let mut images = TilesetImages::new();
    images.refresh(&resources, &map.tilesets)?;
    assert_eq!(
        images.get("test_tileset.json"),
        Some(res_dir().join("test_tileset.png").as_path())
    );

    // reloading the same map keeps the bank as is
    let reloaded = resources.load_map("test_infinite_map.json")?;
    assert_eq!(reloaded, map);
    let before = images.clone();
    images.refresh(&resources, &reloaded.tilesets)?;
    assert_eq!(images, before);

    images.refresh(&resources, &[])?;
    assert!(images.is_empty());
    Ok(())
}

#[test]
fn missing_config_file_gives_defaults() -> anyhow::Result<()> {
    let config = ConfigArgs::load(res_dir().join("does_not_exist.ini"))?;
    assert_eq!(config, ConfigArgs::default());
    assert_eq!(config.resource_root(), PathBuf::from("res"));
    Ok(())
}

#[test]
fn malformed_config_file_is_an_error() {
    let path = std::env::temp_dir().join(format!("tiled_bad_config_{}.ini", std::process::id()));
    std::fs::write(&path, "[resource]\npath\n").expect("write config");
    let err = ConfigArgs::load(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid config file: Error on line 2: invalid property"
    );
    std::fs::remove_file(&path).ok();
}

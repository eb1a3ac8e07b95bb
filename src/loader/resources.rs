//! Loading maps and tilesets from a resource directory.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;

use super::json_loader::{get_tiled_tileset_image_from_reader, load_tiled_json_from_reader};
use crate::config::ConfigArgs;
use crate::error::{Error, Result};
use crate::map::{Map, Tileset};

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::io(path, source))
}

/// Loads a Tiled map from a `.json` file.
pub fn load_map_file(path: impl AsRef<Path>) -> Result<Map> {
    let path = path.as_ref();
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(Error::invalid_argument(format!(
            "Map file must be a JSON file: {}",
            path.display()
        )));
    }

    let map = load_tiled_json_from_reader(open(path)?)?;
    info!(
        "Loaded map {} ({} layers, {} tilesets)",
        path.display(),
        map.layers.len(),
        map.tilesets.len()
    );
    Ok(map)
}

/// Directory that map names, tileset sources and tileset images are
/// resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    root: PathBuf,
}

impl Resources {
    /// Resources under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Resources { root: root.into() }
    }

    /// Resources under the config's resource root.
    pub fn from_config(config: &ConfigArgs) -> Self {
        Resources::new(config.resource_root())
    }

    /// The resource root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `relative` joined onto the resource root.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Loads the map `name` from the resource root.
    pub fn load_map(&self, name: &str) -> Result<Map> {
        load_map_file(self.resolve(name))
            .map_err(|e| e.with_prefix(&format!("Failed to load '{name}' Tiled map: ")))
    }

    /// Loads the map named by `[game] default_map`, `None` when unset.
    pub fn load_default_map(&self, config: &ConfigArgs) -> Result<Option<Map>> {
        config
            .default_map()
            .map(|name| self.load_map(name))
            .transpose()
    }

    /// Path of the image backing the tileset document at `source`.
    pub fn tileset_image_path(&self, source: &str) -> Result<PathBuf> {
        let tileset_path = self.resolve(source);
        let image = get_tiled_tileset_image_from_reader(open(&tileset_path)?).map_err(|e| {
            e.with_prefix(&format!(
                "Could not find image data in Tiled tileset '{}': ",
                tileset_path.display()
            ))
        })?;
        Ok(self.resolve(image))
    }
}

/// Image paths of the tilesets used by the current map, keyed by
/// [`Tileset::source`]. This is what a texture cache loads from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TilesetImages {
    images: BTreeMap<String, PathBuf>,
}

impl TilesetImages {
    /// An empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the bank in line with `tilesets`: unused entries are dropped,
    /// missing ones resolved, and entries still in use kept as they are.
    ///
    /// On failure the bank is left unchanged.
    pub fn refresh(&mut self, resources: &Resources, tilesets: &[Tileset]) -> Result<()> {
        let mut images = BTreeMap::new();
        for tileset in tilesets {
            if images.contains_key(&tileset.source) {
                continue;
            }
            let path = match self.images.get(&tileset.source) {
                Some(path) => path.clone(),
                None => resources.tileset_image_path(&tileset.source)?,
            };
            images.insert(tileset.source.clone(), path);
        }

        let dropped = self
            .images
            .keys()
            .filter(|source| !images.contains_key(*source))
            .count();
        info!(
            "Tileset images refreshed: {} in use, {dropped} dropped",
            images.len()
        );
        self.images = images;
        Ok(())
    }

    /// Image path for the tileset `source`.
    pub fn get(&self, source: &str) -> Option<&Path> {
        self.images.get(source).map(PathBuf::as_path)
    }

    /// Number of tilesets in the bank.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// `true` when no tileset is loaded.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// `(source, image path)` pairs, ordered by source.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.images
            .iter()
            .map(|(source, path)| (source.as_str(), path.as_path()))
    }
}

#![warn(missing_docs)]

//! Validating loader for Tiled infinite maps exported as JSON.
//!
//! [`load_tiled_json`] turns a map document into a [`Map`] whose tile layers
//! are stored as fixed-size chunks and whose object layers hold typed shapes.
//! [`get_tiled_tileset_image`] reads the image name out of an external
//! tileset document. [`Resources`] and [`TilesetImages`] do the same against
//! files under a resource root taken from a [`ConfigArgs`] file.

mod color;
mod config;
mod error;
mod loader {
    pub mod fields;
    pub mod json_loader;
    pub mod resources;
}
mod map;
mod object;
mod tile;

pub use color::Rgba32Color;
pub use config::{parse_config, parse_config_args, ConfigArgs, DEFAULT_RESOURCE_ROOT};
pub use error::{Error, ErrorKind, Result};
pub use loader::json_loader::{
    get_tiled_tileset_image, get_tiled_tileset_image_from_reader, load_tiled_json,
    load_tiled_json_from_reader,
};
pub use loader::resources::{load_map_file, Resources, TilesetImages};
pub use map::{Layer, LayerData, LayerKind, Map, ObjectData, TileData, Tileset};
pub use object::{
    HorizontalAlignment, Object, ObjectKind, ObjectKindData, TextData, VerticalAlignment,
};
pub use tile::{Tile, TileChunk, CHUNK_DIMENSIONS, CHUNK_TILE_COUNT, TILE_DIMENSIONS};

/// Typed field parsers used by the decoders, for callers reading extra
/// fields off the same JSON documents.
pub mod fields {
    pub use crate::loader::fields::*;
}

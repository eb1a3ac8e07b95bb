//! Decoder for Tiled's JSON export of infinite maps.
//!
//! The document is first read into a [`serde_json::Value`] tree, then checked
//! by [`sanitize_map`] and finally walked by the per-element decoders below.
//! Every decoder returns the first failure it meets; nothing partially decoded
//! ever escapes.

use std::io::Read;

use log::{debug, trace, warn};
use macroquad::math::{ivec2, IVec2};
use serde_json::Value as JsonValue;

use super::fields::*;
use crate::color::Rgba32Color;
use crate::error::{Error, Result};
use crate::map::{Layer, LayerData, Map, ObjectData, TileData, Tileset};
use crate::object::{HorizontalAlignment, Object, ObjectKindData, TextData, VerticalAlignment};
use crate::tile::{Tile, TileChunk, CHUNK_DIMENSIONS, CHUNK_TILE_COUNT, TILE_DIMENSIONS};

const MAP_ERROR_PREFIX: &str = "Map parse error: ";
const REQUIRED_RENDER_ORDER: &str = "right-down";
const MIN_TILED_VERSION: (u8, u8) = (1, 2);

/// `true` when `field` holds a number equal to `expected`.
fn number_field_equals(json: &JsonValue, field: &str, expected: u32) -> bool {
    json.get(field).and_then(JsonValue::as_f64) == Some(f64::from(expected))
}

fn parse_tile(tile: &JsonValue) -> Result<Tile> {
    tile.as_u64()
        .and_then(|id| u32::try_from(id).ok())
        .map(Tile::new)
        .ok_or_else(|| Error::invalid_argument("A tile was not a positive integer"))
}

fn parse_tile_chunk(chunk: &JsonValue) -> Result<TileChunk> {
    if !number_field_equals(chunk, "width", CHUNK_DIMENSIONS.x)
        || !number_field_equals(chunk, "height", CHUNK_DIMENSIONS.y)
    {
        return Err(Error::invalid_argument(format!(
            "Chunk had invalid dimensions, expected ({},{})",
            CHUNK_DIMENSIONS.x, CHUNK_DIMENSIONS.y
        )));
    }

    let coord = |field: &str| {
        chunk
            .get(field)
            .and_then(JsonValue::as_i64)
            .and_then(|v| i32::try_from(v).ok())
    };
    let (Some(x), Some(y)) = (coord("x"), coord("y")) else {
        return Err(Error::invalid_argument("Chunk had invalid 'x' and 'y' fields"));
    };

    let Some(JsonValue::Array(data)) = chunk.get("data") else {
        return Err(Error::invalid_argument("Chunk had invalid 'data' field"));
    };
    if data.len() != CHUNK_TILE_COUNT {
        return Err(Error::invalid_argument(format!(
            "Chunk had {} tiles, expected {CHUNK_TILE_COUNT}",
            data.len()
        )));
    }

    let tiles = data.iter().map(parse_tile).collect::<Result<Vec<_>>>()?;
    Ok(TileChunk {
        position: ivec2(x, y),
        tiles,
    })
}

fn parse_tile_layer_data(tile_layer: &JsonValue) -> Result<TileData> {
    let chunks = parse_range(tile_layer, "chunks", parse_tile_chunk)?;
    Ok(TileData { chunks })
}

fn parse_valign(valign: &str) -> VerticalAlignment {
    match valign {
        "top" => VerticalAlignment::Top,
        "center" => VerticalAlignment::Center,
        "bottom" => VerticalAlignment::Bottom,
        other => {
            warn!("Unknown text 'valign' {other:?}, using top");
            VerticalAlignment::Top
        }
    }
}

fn parse_halign(halign: &str) -> HorizontalAlignment {
    match halign {
        "left" => HorizontalAlignment::Left,
        "center" => HorizontalAlignment::Center,
        "right" => HorizontalAlignment::Right,
        "justify" => HorizontalAlignment::Justified,
        other => {
            warn!("Unknown text 'halign' {other:?}, using left");
            HorizontalAlignment::Left
        }
    }
}

// Defaults follow https://doc.mapeditor.org/en/stable/reference/json-map-format/#text
fn parse_object_text_data(text_field: &JsonValue) -> Result<TextData> {
    let defaults = TextData::default();
    let color = Rgba32Color::from_hex(&parse_string_default(text_field, "color", "#000000"))?;
    let point_size = parse_integer_default(text_field, "pixelsize", defaults.point_size.into());

    Ok(TextData {
        text: parse_string_default(text_field, "text", &defaults.text),
        color,
        font: parse_string_default(text_field, "fontfamily", &defaults.font),
        point_size: i32::try_from(point_size).unwrap_or(defaults.point_size),
        valign: parse_valign(&parse_string_default(text_field, "valign", "top")),
        halign: parse_halign(&parse_string_default(text_field, "halign", "left")),
        wrap: parse_boolean_default(text_field, "wrap", defaults.wrap),
        kerning: parse_boolean_default(text_field, "kerning", defaults.kerning),
        bold: parse_boolean_default(text_field, "bold", defaults.bold),
        italic: parse_boolean_default(text_field, "italic", defaults.italic),
        underline: parse_boolean_default(text_field, "underline", defaults.underline),
        strikethrough: parse_boolean_default(text_field, "strikethrough", defaults.strikethrough),
    })
}

fn parse_object_kind(json: &JsonValue) -> Result<ObjectKindData> {
    if json.get("point") == Some(&JsonValue::Bool(true)) {
        return Ok(ObjectKindData::Point);
    }
    match json.get("text") {
        Some(text @ (JsonValue::Object(_) | JsonValue::Array(_))) => {
            parse_object_text_data(text).map(ObjectKindData::Text)
        }
        // Ellipse, polygon, polyline and sprite objects are read as rectangles for now.
        _ => Ok(ObjectKindData::Rectangle),
    }
}

fn truncated_vector(json: &JsonValue, x_field: &str, y_field: &str) -> IVec2 {
    ivec2(
        parse_float_default(json, x_field, 0.0) as i32,
        parse_float_default(json, y_field, 0.0) as i32,
    )
}

fn parse_object(json: &JsonValue) -> Result<Object> {
    let id = u32::try_from(parse_integer(json, "id")?)
        .map_err(|_| Error::invalid_argument("Field 'id' was out of range"))?;

    Ok(Object {
        id,
        name: parse_string_default(json, "name", ""),
        r#type: parse_string_default(json, "type", ""),
        position: truncated_vector(json, "x", "y"),
        dimensions: truncated_vector(json, "width", "height"),
        rotation: parse_float_default(json, "rotation", 0.0),
        kind_data: parse_object_kind(json)?,
    })
}

fn parse_object_layer_data(object_layer: &JsonValue) -> Result<ObjectData> {
    let objects = parse_range(object_layer, "objects", parse_object)?;
    Ok(ObjectData { objects })
}

fn parse_layer(layer: &JsonValue) -> Result<Layer> {
    let invalid_layer = || Error::invalid_argument("Layer not a valid Layer object");
    if !layer.is_object() {
        return Err(invalid_layer());
    }
    let layer_type = layer.get("type").ok_or_else(invalid_layer)?;

    let id = parse_integer(layer, "id")
        .map_err(|_| Error::invalid_argument("Layer had invalid id"))?;

    let data = match layer_type.as_str() {
        Some("tilelayer") => LayerData::Tiles(parse_tile_layer_data(layer)?),
        Some("objectgroup") => LayerData::Objects(parse_object_layer_data(layer)?),
        Some(other) => {
            return Err(Error::invalid_argument(format!(
                "Layer type '{other}' invalid or not supported."
            )))
        }
        None => {
            return Err(Error::invalid_argument(format!(
                "Layer type '{layer_type}' invalid or not supported."
            )))
        }
    };

    trace!("Decoded {} layer {id}", data_kind_name(&data));
    Ok(Layer { id, data })
}

fn data_kind_name(data: &LayerData) -> &'static str {
    match data {
        LayerData::Tiles(_) => "tilelayer",
        LayerData::Objects(_) => "objectgroup",
    }
}

/// Reads the single-digit major and minor of an `x.y.z` version string.
fn parse_tiled_version(version: &str) -> Option<(u8, u8)> {
    match version.as_bytes() {
        [major, b'.', minor, b'.', _, ..] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Some((major - b'0', minor - b'0'))
        }
        _ => None,
    }
}

/// Checks the document-level assumptions the decoders rely on.
fn sanitize_map(json: &JsonValue) -> Result<()> {
    let version = json
        .get("tiledversion")
        .ok_or_else(|| Error::invalid_argument("Not a Tiled map"))?;
    let Some(version) = version.as_str() else {
        return Err(Error::invalid_argument(format!(
            "Tiled version invalid, was {version}"
        )));
    };
    let Some((major, minor)) = parse_tiled_version(version) else {
        return Err(Error::invalid_argument(format!(
            "Invalid Tiled version, expected 'x.y.z', was {version}"
        )));
    };
    if (major, minor) < MIN_TILED_VERSION {
        return Err(Error::invalid_argument(format!(
            "Invalid Tiled version, expected at least {}.{}, was {version}",
            MIN_TILED_VERSION.0, MIN_TILED_VERSION.1
        )));
    }

    if json.get("infinite") != Some(&JsonValue::Bool(true)) {
        return Err(Error::invalid_argument("Not an infinite map"));
    }

    if !number_field_equals(json, "tilewidth", TILE_DIMENSIONS.x)
        || !number_field_equals(json, "tileheight", TILE_DIMENSIONS.y)
    {
        return Err(Error::invalid_argument(format!(
            "Invalid 'tilewidth' or 'tileheight': expected ({}, {})",
            TILE_DIMENSIONS.x, TILE_DIMENSIONS.y
        )));
    }

    if json.get("renderorder").and_then(JsonValue::as_str) != Some(REQUIRED_RENDER_ORDER) {
        return Err(Error::invalid_argument(format!(
            "Expected '{REQUIRED_RENDER_ORDER}' in the 'renderorder' field"
        )));
    }

    Ok(())
}

fn parse_tileset(tileset: &JsonValue) -> Result<Tileset> {
    let source = tileset
        .get("source")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::invalid_argument("Invalid 'source' field in tileset"))?;

    let starting_id = tileset
        .get("firstgid")
        .and_then(JsonValue::as_f64)
        .filter(|gid| (0.0..=f64::from(u32::MAX)).contains(gid))
        .ok_or_else(|| Error::invalid_argument("Invalid 'firstgid' field in tileset"))?;

    Ok(Tileset {
        source: source.to_owned(),
        starting_id: starting_id as u32,
    })
}

fn parse_map(json: &JsonValue) -> Result<Map> {
    sanitize_map(json)?;

    let layers = parse_range(json, "layers", parse_layer)?;
    let mut tilesets = parse_range(json, "tilesets", parse_tileset)?;

    // gid lookup is a binary search over starting ids
    tilesets.sort_by_key(|ts| ts.starting_id);

    debug!(
        "Decoded Tiled map: {} layers, {} tilesets",
        layers.len(),
        tilesets.len()
    );
    Ok(Map { layers, tilesets })
}

fn not_json(_: serde_json::Error) -> Error {
    Error::invalid_argument("Input stream was not a valid JSON")
}

fn map_from_json(json: JsonValue) -> Result<Map> {
    parse_map(&json).map_err(|e| e.with_prefix(MAP_ERROR_PREFIX))
}

/// Decodes a Tiled infinite map from its JSON text.
///
/// Failures after the JSON syntax check carry a `"Map parse error: "` prefix.
pub fn load_tiled_json(map_data: &str) -> Result<Map> {
    let json: JsonValue = serde_json::from_str(map_data).map_err(not_json)?;
    map_from_json(json)
}

/// Same as [`load_tiled_json`], reading the document from `reader`.
pub fn load_tiled_json_from_reader(reader: impl Read) -> Result<Map> {
    let json: JsonValue = serde_json::from_reader(reader).map_err(not_json)?;
    map_from_json(json)
}

fn tileset_image_from_json(json: &JsonValue) -> Result<String> {
    if !number_field_equals(json, "tilewidth", TILE_DIMENSIONS.x) {
        return Err(Error::invalid_argument(format!(
            "Tileset had invalid tile width: expected {}",
            TILE_DIMENSIONS.x
        )));
    }
    if !number_field_equals(json, "tileheight", TILE_DIMENSIONS.y) {
        return Err(Error::invalid_argument(format!(
            "Tileset had invalid tile height: expected {}",
            TILE_DIMENSIONS.y
        )));
    }

    let image = json
        .get("image")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::invalid_argument("Invalid 'image' field"))?;
    debug!("Tileset image is {image:?}");
    Ok(image.to_owned())
}

/// Returns the image file backing a standalone Tiled tileset document.
pub fn get_tiled_tileset_image(tileset_data: &str) -> Result<String> {
    let json: JsonValue = serde_json::from_str(tileset_data).map_err(not_json)?;
    tileset_image_from_json(&json)
}

/// Same as [`get_tiled_tileset_image`], reading the document from `reader`.
pub fn get_tiled_tileset_image_from_reader(reader: impl Read) -> Result<String> {
    let json: JsonValue = serde_json::from_reader(reader).map_err(not_json)?;
    tileset_image_from_json(&json)
}

// tests/map_tests.rs

use macroquad::math::ivec2;
use serde_json::{json, Value};
use tiled_infinite::{
    get_tiled_tileset_image, load_tiled_json, ErrorKind, LayerData, Map, TileData, Tileset,
    CHUNK_TILE_COUNT,
};

fn chunk(x: i32, y: i32, gid: u32) -> Value {
    json!({ "width": 16, "height": 16, "x": x, "y": y, "data": vec![gid; CHUNK_TILE_COUNT] })
}

fn two_chunk_map() -> Value {
    json!({
        "tiledversion": "1.2.1",
        "infinite": true,
        "tilewidth": 32,
        "tileheight": 32,
        "renderorder": "right-down",
        "layers": [{ "type": "tilelayer", "id": 1, "chunks": [chunk(0, 0, 1), chunk(16, 0, 2)] }],
        "tilesets": [{ "source": "test_tileset.json", "firstgid": 1 }]
    })
}

#[test]
fn two_chunk_map_decodes() {
    let map = load_tiled_json(&two_chunk_map().to_string()).expect("valid map");

    assert_eq!(
        map.tilesets,
        [Tileset {
            source: "test_tileset.json".to_owned(),
            starting_id: 1
        }]
    );
    assert_eq!(map.layers.len(), 1);
    assert_eq!(map.layers[0].id, 1);
    let LayerData::Tiles(TileData { chunks }) = &map.layers[0].data else {
        panic!("expected a tile layer");
    };
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1].position, ivec2(16, 0));
    assert!(chunks[1].tiles.iter().all(|t| t.id == 2));
}

#[test]
fn decoding_twice_gives_equal_maps() {
    let text = two_chunk_map().to_string();
    let first: Map = load_tiled_json(&text).unwrap();
    let second: Map = load_tiled_json(&text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn finite_map_fails_before_layers_are_read() {
    let mut doc = two_chunk_map();
    doc["infinite"] = json!(false);
    doc["layers"] = json!([{ "type": "imagelayer", "id": 1 }]);
    doc["tilesets"] = json!("nope");

    let err = load_tiled_json(&doc.to_string()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let message = err.to_string();
    assert_eq!(message, "Map parse error: Not an infinite map");
    assert!(!message.contains("Layer"));
}

#[test]
fn old_tiled_version_is_rejected() {
    let mut doc = two_chunk_map();
    doc["tiledversion"] = json!("1.1.0");
    let err = load_tiled_json(&doc.to_string()).unwrap_err();
    assert!(err.to_string().contains("1.1.0"), "{err}");

    for version in ["1.2.0", "2.0.0"] {
        doc["tiledversion"] = json!(version);
        assert!(load_tiled_json(&doc.to_string()).is_ok(), "{version}");
    }

    for version in ["1.10.2", "10.2.0"] {
        doc["tiledversion"] = json!(version);
        let err = load_tiled_json(&doc.to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Map parse error: Invalid Tiled version, expected 'x.y.z', was {version}")
        );
    }
}

#[test]
fn no_partial_map_on_bad_tileset() {
    let mut doc = two_chunk_map();
    doc["tilesets"] = json!([{ "source": "a.json", "firstgid": 1 }, { "firstgid": 5 }]);
    let err = load_tiled_json(&doc.to_string()).unwrap_err();
    assert_eq!(err.to_string(), "Map parse error: Invalid 'source' field in tileset");

    let mut doc = two_chunk_map();
    doc.as_object_mut().unwrap().remove("layers");
    let err = load_tiled_json(&doc.to_string()).unwrap_err();
    assert_eq!(err.to_string(), "Map parse error: Expected 'layers' array field");
}

#[test]
fn layers_are_decoded_before_tilesets() {
    let mut doc = two_chunk_map();
    doc["layers"] = json!([{ "type": "imagelayer", "id": 1 }]);
    doc["tilesets"] = json!([{ "firstgid": 1 }]);
    let err = load_tiled_json(&doc.to_string()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Map parse error: Layer type 'imagelayer' invalid or not supported."
    );
}

#[test]
fn negative_layer_ids_are_kept() {
    let mut doc = two_chunk_map();
    doc["layers"] = json!([{ "type": "objectgroup", "id": -1, "objects": [] }]);
    let map = load_tiled_json(&doc.to_string()).unwrap();
    assert_eq!(map.layers[0].id, -1);
    assert_eq!(map.object_layers().map(|(id, _)| id).collect::<Vec<_>>(), [-1]);
}

#[test]
fn mixed_layers_keep_render_order() {
    let mut doc = two_chunk_map();
    doc["layers"] = json!([
        { "type": "objectgroup", "id": 7, "objects": [{ "id": 5, "point": true }] },
        { "type": "tilelayer", "id": 2, "chunks": [] },
        { "type": "objectgroup", "id": 3, "objects": [] }
    ]);
    let map = load_tiled_json(&doc.to_string()).unwrap();
    let ids: Vec<_> = map.layers.iter().map(|l| l.id).collect();
    assert_eq!(ids, [7, 2, 3]);
}

#[test]
fn standalone_tileset_image() {
    let ok = json!({ "tilewidth": 32, "tileheight": 32, "image": "test_tileset.png" });
    assert_eq!(get_tiled_tileset_image(&ok.to_string()).unwrap(), "test_tileset.png");

    let small = json!({ "tilewidth": 16, "tileheight": 32, "image": "test_tileset.png" });
    let err = get_tiled_tileset_image(&small.to_string()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(!err.to_string().starts_with("Map parse error"));
}

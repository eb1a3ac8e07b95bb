use crate::object::Object;
use crate::tile::TileChunk;

/// Reference to an external tileset file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tileset {
    /// Path of the tileset document, relative to the resource root. Also the
    /// key under which its texture is cached.
    pub source: String,
    /// First global tile id covered by this tileset.
    pub starting_id: u32,
}

/// Chunks of an infinite tile layer. Chunk order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileData {
    /// Populated chunks of the layer.
    pub chunks: Vec<TileChunk>,
}

/// Objects of an object layer, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectData {
    /// Objects of the layer.
    pub objects: Vec<Object>,
}

/// Payload of a [`Layer`].
#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    /// `"tilelayer"`.
    Tiles(TileData),
    /// `"objectgroup"`.
    Objects(ObjectData),
}

/// Fieldless tag of [`LayerData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// [`LayerData::Tiles`].
    Tile,
    /// [`LayerData::Objects`].
    Object,
}

/// One layer of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Unique within the map, not necessarily contiguous or positive.
    pub id: i64,
    /// Layer contents.
    pub data: LayerData,
}

impl Layer {
    /// Which kind of layer this is.
    pub fn kind(&self) -> LayerKind {
        match self.data {
            LayerData::Tiles(_) => LayerKind::Tile,
            LayerData::Objects(_) => LayerKind::Object,
        }
    }

    /// Tile payload, for tile layers.
    pub fn as_tiles(&self) -> Option<&TileData> {
        match &self.data {
            LayerData::Tiles(tiles) => Some(tiles),
            LayerData::Objects(_) => None,
        }
    }

    /// Object payload, for object layers.
    pub fn as_objects(&self) -> Option<&ObjectData> {
        match &self.data {
            LayerData::Objects(objects) => Some(objects),
            LayerData::Tiles(_) => None,
        }
    }
}

/// A decoded infinite map.
///
/// Layers are in render order, back to front. Tilesets are ordered by
/// ascending [`Tileset::starting_id`], as Tiled writes them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    /// Layers, back to front.
    pub layers: Vec<Layer>,
    /// Tileset references sorted by starting id.
    pub tilesets: Vec<Tileset>,
}

impl Map {
    /// Tileset owning global tile id `gid`: the last tileset whose
    /// `starting_id` is not above `gid`.
    ///
    /// Flip flags must already be stripped, see [`crate::Tile::gid`].
    pub fn tileset_for_gid(&self, gid: u32) -> Option<&Tileset> {
        let end = self.tilesets.partition_point(|ts| ts.starting_id <= gid);
        end.checked_sub(1).map(|idx| &self.tilesets[idx])
    }

    /// Tileset owning `gid` and the tile's index inside it. `None` for the
    /// empty tile and for ids below the first tileset.
    pub fn tile_source(&self, gid: u32) -> Option<(&Tileset, u32)> {
        if gid == 0 {
            return None;
        }
        self.tileset_for_gid(gid)
            .map(|ts| (ts, gid - ts.starting_id))
    }

    /// Tile layers with their ids, in render order.
    pub fn tile_layers(&self) -> impl Iterator<Item = (i64, &TileData)> {
        self.layers
            .iter()
            .filter_map(|layer| layer.as_tiles().map(|data| (layer.id, data)))
    }

    /// Object layers with their ids, in render order.
    pub fn object_layers(&self) -> impl Iterator<Item = (i64, &ObjectData)> {
        self.layers
            .iter()
            .filter_map(|layer| layer.as_objects().map(|data| (layer.id, data)))
    }
}

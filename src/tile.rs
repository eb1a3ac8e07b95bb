use macroquad::math::{ivec2, IVec2, UVec2};

/// Pixel size of one tile. Maps and tilesets with other tile sizes are rejected.
pub const TILE_DIMENSIONS: UVec2 = UVec2::new(32, 32);

/// Size of one chunk of an infinite tile layer, in tiles.
pub const CHUNK_DIMENSIONS: UVec2 = UVec2::new(16, 16);

/// Number of tiles stored in every [`TileChunk`].
pub const CHUNK_TILE_COUNT: usize = (CHUNK_DIMENSIONS.x * CHUNK_DIMENSIONS.y) as usize;

pub(crate) const FLIP_H: u32 = 0x8000_0000; // bit 31
pub(crate) const FLIP_V: u32 = 0x4000_0000; // bit 30
pub(crate) const FLIP_D: u32 = 0x2000_0000; // bit 29
pub(crate) const GID_MASK: u32 = 0x1FFF_FFFF;

/// A single cell of a tile layer, holding a global tile id as stored by Tiled.
///
/// Id `0` is the empty tile. The raw value may carry Tiled's flip flags in its
/// upper bits; use [`Tile::gid`] to get the id without them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile {
    /// Raw global id, flip flags included.
    pub id: u32,
}

impl Tile {
    /// Wraps a raw global id.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Tile { id }
    }

    /// Global id with the flip flags cleared.
    #[inline]
    pub fn gid(self) -> u32 {
        self.id & GID_MASK
    }

    /// `true` for the empty tile.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.gid() == 0
    }

    /// Horizontal flip flag.
    #[inline]
    pub fn flipped_horizontally(self) -> bool {
        (self.id & FLIP_H) != 0
    }

    /// Vertical flip flag.
    #[inline]
    pub fn flipped_vertically(self) -> bool {
        (self.id & FLIP_V) != 0
    }

    /// Anti-diagonal flip flag.
    #[inline]
    pub fn flipped_diagonally(self) -> bool {
        (self.id & FLIP_D) != 0
    }
}

/// A fixed-size block of tiles from an infinite tile layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileChunk {
    /// Position of the chunk's top-left tile, as written in the map file.
    pub position: IVec2,
    /// Row-major tiles, always [`CHUNK_TILE_COUNT`] long.
    pub tiles: Vec<Tile>,
}

impl TileChunk {
    /// Tile coordinates of the tile at `index` in [`TileChunk::tiles`].
    pub fn tile_coords(&self, index: usize) -> IVec2 {
        let width = CHUNK_DIMENSIONS.x as usize;
        self.position + ivec2((index % width) as i32, (index / width) as i32)
    }

    /// Iterates over the tiles together with their tile coordinates.
    pub fn tiles_with_coords(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, tile)| (self.tile_coords(index), *tile))
    }
}

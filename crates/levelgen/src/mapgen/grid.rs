//! Tile storage used while a level is being built, plus the lookup seam the validators read.

use crate::types::{Pos, TileKind};

/// Read access to a tile classification. Anything outside the board is a wall.
pub(crate) trait TileSource {
    fn tile_at(&self, pos: Pos) -> TileKind;

    fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_walkable()
    }
}

pub(crate) fn in_bounds(width: usize, height: usize, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![TileKind::Wall; width * height] }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    /// Out-of-bounds writes are ignored.
    pub(crate) fn set(&mut self, pos: Pos, tile: TileKind) {
        if !in_bounds(self.width, self.height, pos) {
            return;
        }
        let index = self.index(pos);
        self.tiles[index] = tile;
    }

    pub(crate) fn into_tiles(self) -> Vec<TileKind> {
        self.tiles
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

impl TileSource for TileGrid {
    fn tile_at(&self, pos: Pos) -> TileKind {
        if !in_bounds(self.width, self.height, pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }
}

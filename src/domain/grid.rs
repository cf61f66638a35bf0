/// The maze grid: a rectangular layer of tiles addressed by (row, col).
///
/// Walls never change after load. Pickup cells are cleared to floor
/// through `clear()` as the player consumes them; only the tick loop
/// mutates the grid.

use super::entity::Position;
use super::tile::Tile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Build a grid from tile rows. Rows are expected to share one length;
    /// the loader validates that before calling this.
    pub fn new(tiles: Vec<Vec<Tile>>) -> Self {
        let rows = tiles.len();
        let cols = tiles.first().map_or(0, Vec::len);
        Grid { tiles, rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Tile at `pos`. Out of bounds reads as wall.
    #[inline]
    pub fn tile_at(&self, pos: Position) -> Tile {
        self.tiles
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
            .unwrap_or(Tile::Wall)
    }

    #[inline]
    pub fn is_wall(&self, pos: Position) -> bool {
        self.tile_at(pos).is_wall()
    }

    /// Replace a consumed pickup with floor. Walls are left alone.
    pub fn clear(&mut self, pos: Position) {
        if let Some(tile) = self.tiles.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
            if !tile.is_wall() {
                *tile = Tile::Floor;
            }
        }
    }

    /// Iterate rows for rendering.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.iter().map(Vec::as_slice)
    }
}

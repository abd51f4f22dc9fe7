//! Room placement on a fixed 3x3 partition of the board.

use rand_chacha::rand_core::Rng;

use crate::types::TileKind;

use super::dice::roll_inclusive;
use super::grid::TileGrid;
use super::model::Room;

pub const GRID_COLUMNS: usize = 3;
pub const GRID_ROWS: usize = 3;
pub const ROOM_COUNT: usize = GRID_COLUMNS * GRID_ROWS;
pub const START_ROOM: usize = 0;
pub const EXIT_ROOM: usize = ROOM_COUNT - 1;

const MIN_ROOM_SIZE: usize = 4;
const CELL_MARGIN: usize = 2;

/// Carves one room per partition cell and returns them in row-major order.
pub(super) fn place_rooms<R: Rng + ?Sized>(rng: &mut R, grid: &mut TileGrid) -> Vec<Room> {
    let cell_width = grid.width() / GRID_COLUMNS;
    let cell_height = grid.height() / GRID_ROWS;

    let mut rooms = Vec::with_capacity(ROOM_COUNT);
    for row in 0..GRID_ROWS {
        for column in 0..GRID_COLUMNS {
            let (x, width) = room_span(rng, column * cell_width, cell_width);
            let (y, height) = room_span(rng, row * cell_height, cell_height);
            let room = Room { x, y, width, height };
            carve_room(grid, room);
            rooms.push(room);
        }
    }
    rooms
}

/// Picks a room extent along one axis of a cell, keeping `CELL_MARGIN` free cells on both
/// sides. Short cells shrink the room first; below five cells the trailing margin gives way,
/// then the leading one.
fn room_span<R: Rng + ?Sized>(rng: &mut R, cell_origin: usize, cell_len: usize) -> (usize, usize) {
    debug_assert!(cell_len > 0);
    let max_len = cell_len.saturating_sub(2 * CELL_MARGIN);
    let len = if max_len >= MIN_ROOM_SIZE {
        roll_inclusive(rng, MIN_ROOM_SIZE, max_len)
    } else {
        max_len.max(1)
    };
    let margin = CELL_MARGIN.min(cell_len - len);
    let slack = cell_len.saturating_sub(len + 2 * CELL_MARGIN);
    (cell_origin + margin + roll_inclusive(rng, 0, slack), len)
}

pub(super) fn carve_room(grid: &mut TileGrid, room: Room) {
    for pos in room.cells() {
        grid.set(pos, TileKind::Floor);
    }
}

//! L-shaped tunnels between grid-adjacent rooms, recorded per room pair.

use std::collections::BTreeMap;

use rand_chacha::rand_core::Rng;

use crate::types::{Pos, TileKind};

use super::dice::coin_flip;
use super::grid::TileGrid;
use super::layout::{GRID_COLUMNS, GRID_ROWS};
use super::model::Room;

/// Unordered pair of room indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(super) struct RoomPair {
    low: usize,
    high: usize,
}

impl RoomPair {
    pub(super) fn new(a: usize, b: usize) -> Self {
        Self { low: a.min(b), high: a.max(b) }
    }
}

/// Cells dug for each tunnel, ordered from the lower-index room's center to the other's.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct TunnelSegments {
    segments: BTreeMap<RoomPair, Vec<Pos>>,
}

impl TunnelSegments {
    pub(super) fn get(&self, pair: RoomPair) -> Option<&[Pos]> {
        self.segments.get(&pair).map(Vec::as_slice)
    }

    pub(super) fn record(&mut self, pair: RoomPair, cells: Vec<Pos>) {
        self.segments.insert(pair, cells);
    }

    pub(super) fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Room `i` links to its right neighbor and to the room below it, giving every
/// row/column neighbor pair a tunnel (12 for the 3x3 layout).
pub(super) fn connect_rooms<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &mut TileGrid,
    rooms: &[Room],
) -> TunnelSegments {
    let mut tunnels = TunnelSegments::default();
    for (index, room) in rooms.iter().enumerate() {
        let row = index / GRID_COLUMNS;
        let column = index % GRID_COLUMNS;

        let mut neighbors = Vec::with_capacity(2);
        if column + 1 < GRID_COLUMNS {
            neighbors.push(index + 1);
        }
        if row + 1 < GRID_ROWS {
            neighbors.push(index + GRID_COLUMNS);
        }

        for neighbor_index in neighbors {
            let Some(neighbor) = rooms.get(neighbor_index) else {
                continue;
            };
            let cells = dig_tunnel(rng, grid, room.center(), neighbor.center());
            tunnels.record(RoomPair::new(index, neighbor_index), cells);
        }
    }
    tunnels
}

pub(super) fn dig_tunnel<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &mut TileGrid,
    from: Pos,
    to: Pos,
) -> Vec<Pos> {
    let corner = if coin_flip(rng) {
        Pos { y: from.y, x: to.x }
    } else {
        Pos { y: to.y, x: from.x }
    };

    let mut cells = straight_run(from, corner);
    cells.extend(straight_run(corner, to).into_iter().skip(1));
    for &pos in &cells {
        grid.set(pos, TileKind::Floor);
    }
    cells
}

/// Inclusive cells from `from` to `to`, which must share a row or a column.
fn straight_run(from: Pos, to: Pos) -> Vec<Pos> {
    debug_assert!(from.x == to.x || from.y == to.y);
    let steps = from.x.abs_diff(to.x).max(from.y.abs_diff(to.y)) as i32;
    let step_x = (to.x - from.x).signum();
    let step_y = (to.y - from.y).signum();
    (0..=steps).map(|step| Pos { y: from.y + step * step_y, x: from.x + step * step_x }).collect()
}

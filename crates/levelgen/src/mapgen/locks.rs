//! Colored locked doors on the start-to-exit room path, with their keys dropped upstream.
//! Placement is optimistic; the keyed reachability search decides whether the locks stay.

use std::collections::VecDeque;

use log::{debug, warn};
use rand_chacha::rand_core::Rng;

use crate::types::{Door, ItemKind, KEY_PALETTE, Pos};

use super::corridors::{RoomPair, TunnelSegments};
use super::dice::pick;
use super::grid::TileGrid;
use super::layout::{GRID_COLUMNS, GRID_ROWS, ROOM_COUNT};
use super::model::{ItemSpawn, Placements, Room, is_free_cell};
use super::reachability::goal_reachable_with_keys;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum LockOutcome {
    NoCriticalPath,
    Placed(usize),
    Stripped(usize),
}

pub(super) struct LockContext<'a> {
    pub(super) grid: &'a TileGrid,
    pub(super) rooms: &'a [Room],
    pub(super) tunnels: &'a TunnelSegments,
    pub(super) placements: &'a mut Placements,
    pub(super) start_room: usize,
    pub(super) exit_room: usize,
    pub(super) start: Pos,
    pub(super) stairs: Pos,
    pub(super) max_doors: usize,
}

pub(super) fn place_locks<R: Rng + ?Sized>(
    rng: &mut R,
    context: &mut LockContext<'_>,
) -> LockOutcome {
    let Some(path) = critical_path(context.start_room, context.exit_room) else {
        return LockOutcome::NoCriticalPath;
    };

    let door_budget = context.max_doors.min(KEY_PALETTE.len());
    let mut colors = KEY_PALETTE.iter().copied();
    let mut placed = 0;
    for edge in gated_edges(path.len(), door_budget) {
        let near_room = path[edge];
        let far_room = path[edge + 1];
        let Some(cells) = context.tunnels.get(RoomPair::new(near_room, far_room)) else {
            continue;
        };
        let Some(&door_pos) = cells.get(1).or(cells.last()) else {
            continue;
        };
        if door_pos == context.start
            || door_pos == context.stairs
            || context.placements.is_occupied(door_pos)
        {
            debug!("skipping lock between rooms {near_room} and {far_room}: {door_pos:?} is taken");
            continue;
        }

        let Some(room) = context.rooms.get(near_room) else {
            continue;
        };
        let landmarks = [context.start, context.stairs];
        let key_cells: Vec<Pos> = room
            .cells()
            .filter(|&pos| {
                pos != door_pos && is_free_cell(context.grid, context.placements, landmarks, pos)
            })
            .collect();
        let Some(&key_pos) = pick(rng, &key_cells) else {
            debug!("skipping lock between rooms {near_room} and {far_room}: no room for a key");
            continue;
        };
        let Some(color) = colors.next() else {
            break;
        };

        context.placements.doors.push(Door { pos: door_pos, color });
        context.placements.items.push(ItemSpawn { kind: ItemKind::Key(color), pos: key_pos });
        placed += 1;
    }

    verify_or_strip(context.grid, context.placements, context.start, context.stairs, placed)
}

fn verify_or_strip(
    grid: &TileGrid,
    placements: &mut Placements,
    start: Pos,
    stairs: Pos,
    placed: usize,
) -> LockOutcome {
    if placed == 0 || goal_reachable_with_keys(grid, placements, start, stairs) {
        return LockOutcome::Placed(placed);
    }
    warn!("stairs unreachable with {placed} locked doors; removing every door and key");
    placements.strip_locks();
    LockOutcome::Stripped(placed)
}

/// Row/column neighbors in the fixed room partition, in ascending index order.
pub(super) fn adjacent_rooms(index: usize) -> Vec<usize> {
    let row = index / GRID_COLUMNS;
    let column = index % GRID_COLUMNS;
    let mut neighbors = Vec::with_capacity(4);
    if row > 0 {
        neighbors.push(index - GRID_COLUMNS);
    }
    if column > 0 {
        neighbors.push(index - 1);
    }
    if column + 1 < GRID_COLUMNS {
        neighbors.push(index + 1);
    }
    if row + 1 < GRID_ROWS {
        neighbors.push(index + GRID_COLUMNS);
    }
    neighbors
}

/// Shortest room-index path over the partition graph, both ends included.
pub(super) fn critical_path(from: usize, to: usize) -> Option<Vec<usize>> {
    if from >= ROOM_COUNT || to >= ROOM_COUNT {
        return None;
    }

    let mut parent: [Option<usize>; ROOM_COUNT] = [None; ROOM_COUNT];
    let mut visited = [false; ROOM_COUNT];
    let mut queue = VecDeque::from([from]);
    visited[from] = true;

    while let Some(current) = queue.pop_front() {
        if current == to {
            let mut path = vec![to];
            let mut cursor = to;
            while let Some(previous) = parent[cursor] {
                path.push(previous);
                cursor = previous;
            }
            path.reverse();
            return Some(path);
        }
        for next in adjacent_rooms(current) {
            if !visited[next] {
                visited[next] = true;
                parent[next] = Some(current);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Path edge indices to lock, spread at an even stride and never past the last edge.
pub(super) fn gated_edges(path_len: usize, door_budget: usize) -> Vec<usize> {
    let edge_count = path_len.saturating_sub(1);
    let door_count = door_budget.min(edge_count);
    if door_count == 0 {
        return Vec::new();
    }

    let stride = (edge_count / (door_count + 1)).max(1);
    let mut edges = Vec::with_capacity(door_count);
    for door_index in 0..door_count {
        let edge = (stride * (door_index + 1)).min(edge_count - 1);
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }
    edges
}

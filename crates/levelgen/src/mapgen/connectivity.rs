//! Plain flood-fill connectivity check over walkable tiles.

use std::collections::{BTreeSet, VecDeque};

use crate::types::Pos;

use super::grid::TileSource;
use super::model::Room;

pub(crate) fn flood_fill(tiles: &impl TileSource, start: Pos) -> BTreeSet<Pos> {
    let mut visited = BTreeSet::new();
    if !tiles.is_walkable(start) {
        return visited;
    }

    let mut queue = VecDeque::from([start]);
    visited.insert(start);
    while let Some(current) = queue.pop_front() {
        for neighbor in current.neighbors() {
            if tiles.is_walkable(neighbor) && visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited
}

/// True when every room center can be walked to from `start` without crossing a wall.
pub(crate) fn rooms_reachable_from(tiles: &impl TileSource, start: Pos, rooms: &[Room]) -> bool {
    if rooms.is_empty() {
        return false;
    }
    let visited = flood_fill(tiles, start);
    rooms.iter().all(|room| visited.contains(&room.center()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::grid::TileGrid;
    use crate::types::TileKind;

    fn carve(grid: &mut TileGrid, room: Room) {
        for pos in room.cells() {
            grid.set(pos, TileKind::Floor);
        }
    }

    #[test]
    fn flood_fill_stops_at_walls() {
        let mut grid = TileGrid::new(8, 3);
        let left = Room { x: 0, y: 0, width: 3, height: 3 };
        let right = Room { x: 5, y: 0, width: 3, height: 3 };
        carve(&mut grid, left);
        carve(&mut grid, right);

        let visited = flood_fill(&grid, left.center());
        assert_eq!(visited.len(), 9);
        assert!(!rooms_reachable_from(&grid, left.center(), &[left, right]));
    }

    #[test]
    fn corridor_joins_both_rooms_and_stairs_count_as_walkable() {
        let mut grid = TileGrid::new(8, 3);
        let left = Room { x: 0, y: 0, width: 3, height: 3 };
        let right = Room { x: 5, y: 0, width: 3, height: 3 };
        carve(&mut grid, left);
        carve(&mut grid, right);
        grid.set(Pos { y: 1, x: 3 }, TileKind::Floor);
        grid.set(Pos { y: 1, x: 4 }, TileKind::Floor);
        grid.set(right.center(), TileKind::Stairs);

        assert!(rooms_reachable_from(&grid, left.center(), &[left, right]));
    }

    #[test]
    fn start_inside_a_wall_reaches_nothing() {
        let grid = TileGrid::new(4, 4);
        assert!(flood_fill(&grid, Pos { y: 1, x: 1 }).is_empty());
    }

    #[test]
    fn repeated_checks_agree() {
        let mut grid = TileGrid::new(6, 6);
        let room = Room { x: 1, y: 1, width: 4, height: 4 };
        carve(&mut grid, room);

        let first = rooms_reachable_from(&grid, room.center(), &[room]);
        let second = rooms_reachable_from(&grid, room.center(), &[room]);
        assert!(first);
        assert_eq!(first, second);
    }
}

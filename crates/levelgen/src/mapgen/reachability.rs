//! Breadth-first search over (cell, held keys) states.
//! Doors block until a key of their color has been picked up somewhere along the way;
//! the same cell is expanded again whenever it is reached holding a different ring.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::types::{KeyColor, KeyRing, Pos};

use super::grid::TileSource;
use super::model::Placements;

pub(crate) fn goal_reachable_with_keys(
    tiles: &impl TileSource,
    placements: &Placements,
    start: Pos,
    goal: Pos,
) -> bool {
    if !tiles.is_walkable(start) {
        return false;
    }
    if start == goal {
        return true;
    }

    let locks: BTreeMap<Pos, KeyColor> =
        placements.doors.iter().map(|door| (door.pos, door.color)).collect();
    let mut keys_by_cell: BTreeMap<Pos, KeyRing> = BTreeMap::new();
    for (pos, color) in placements.keys() {
        let ring = keys_by_cell.entry(pos).or_default();
        *ring = ring.with(color);
    }
    let pick_up = |pos: Pos, ring: KeyRing| {
        keys_by_cell.get(&pos).map_or(ring, |found| ring.union(*found))
    };

    let initial = (start, pick_up(start, KeyRing::empty()));
    let mut seen = BTreeSet::from([initial]);
    let mut open = VecDeque::from([initial]);

    while let Some((pos, ring)) = open.pop_front() {
        for next in pos.neighbors() {
            if !tiles.is_walkable(next) {
                continue;
            }
            if locks.get(&next).is_some_and(|&color| !ring.holds(color)) {
                continue;
            }
            if next == goal {
                return true;
            }
            let state = (next, pick_up(next, ring));
            if seen.insert(state) {
                open.push_back(state);
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::grid::TileGrid;
    use crate::mapgen::model::ItemSpawn;
    use crate::types::{Door, ItemKind, TileKind};

    /// A single row: start at x=1, stairs at x=9, everything between is floor.
    fn corridor() -> TileGrid {
        let mut grid = TileGrid::new(11, 3);
        for x in 1..=8 {
            grid.set(Pos { y: 1, x }, TileKind::Floor);
        }
        grid.set(Pos { y: 1, x: 9 }, TileKind::Stairs);
        grid
    }

    fn door(x: i32, color: KeyColor) -> Door {
        Door { pos: Pos { y: 1, x }, color }
    }

    fn key(x: i32, color: KeyColor) -> ItemSpawn {
        ItemSpawn { kind: ItemKind::Key(color), pos: Pos { y: 1, x } }
    }

    const START: Pos = Pos { y: 1, x: 1 };
    const STAIRS: Pos = Pos { y: 1, x: 9 };

    #[test]
    fn open_corridor_is_solvable() {
        assert!(goal_reachable_with_keys(&corridor(), &Placements::default(), START, STAIRS));
    }

    #[test]
    fn door_without_key_blocks_the_only_route() {
        let placements =
            Placements { doors: vec![door(5, KeyColor::Red)], ..Placements::default() };
        assert!(!goal_reachable_with_keys(&corridor(), &placements, START, STAIRS));
    }

    #[test]
    fn key_picked_up_before_the_door_opens_it() {
        let placements = Placements {
            doors: vec![door(5, KeyColor::Red)],
            items: vec![key(3, KeyColor::Red)],
            ..Placements::default()
        };
        assert!(goal_reachable_with_keys(&corridor(), &placements, START, STAIRS));
    }

    #[test]
    fn key_lying_on_the_start_cell_counts() {
        let placements = Placements {
            doors: vec![door(5, KeyColor::Blue)],
            items: vec![key(1, KeyColor::Blue)],
            ..Placements::default()
        };
        assert!(goal_reachable_with_keys(&corridor(), &placements, START, STAIRS));
    }

    #[test]
    fn key_behind_its_own_door_is_unreachable() {
        let placements = Placements {
            doors: vec![door(5, KeyColor::Red)],
            items: vec![key(7, KeyColor::Red)],
            ..Placements::default()
        };
        assert!(!goal_reachable_with_keys(&corridor(), &placements, START, STAIRS));
    }

    #[test]
    fn wrong_color_does_not_open_a_door() {
        let placements = Placements {
            doors: vec![door(5, KeyColor::Red)],
            items: vec![key(3, KeyColor::Green)],
            ..Placements::default()
        };
        assert!(!goal_reachable_with_keys(&corridor(), &placements, START, STAIRS));
    }

    #[test]
    fn chained_doors_need_keys_in_order() {
        let placements = Placements {
            doors: vec![door(4, KeyColor::Red), door(7, KeyColor::Blue)],
            items: vec![key(2, KeyColor::Red), key(5, KeyColor::Blue)],
            ..Placements::default()
        };
        assert!(goal_reachable_with_keys(&corridor(), &placements, START, STAIRS));
    }

    #[test]
    fn detour_for_a_key_revisits_cells_with_a_larger_ring() {
        // Row 4: start(1) .. junction(3) .. red door(6) .. stairs(9).
        // The key sits at the end of a dead-end branch going up from the junction,
        // so the search must walk back through the junction holding the key.
        let mut grid = TileGrid::new(11, 6);
        for x in 1..=8 {
            grid.set(Pos { y: 4, x }, TileKind::Floor);
        }
        grid.set(Pos { y: 4, x: 9 }, TileKind::Stairs);
        for y in 1..4 {
            grid.set(Pos { y, x: 3 }, TileKind::Floor);
        }

        let start = Pos { y: 4, x: 1 };
        let stairs = Pos { y: 4, x: 9 };
        let placements = Placements {
            doors: vec![Door { pos: Pos { y: 4, x: 6 }, color: KeyColor::Red }],
            items: vec![ItemSpawn { kind: ItemKind::Key(KeyColor::Red), pos: Pos { y: 1, x: 3 } }],
            ..Placements::default()
        };

        assert!(goal_reachable_with_keys(&grid, &placements, start, stairs));

        let without_key = Placements { items: Vec::new(), ..placements };
        assert!(!goal_reachable_with_keys(&grid, &without_key, start, stairs));
    }
}

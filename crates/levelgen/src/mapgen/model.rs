//! Public data models for generated levels, rooms, and spawn slots.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Door, ItemKind, KeyColor, MonsterKind, Pos, TileKind};

use super::connectivity::rooms_reachable_from;
use super::grid::{TileSource, in_bounds};
use super::reachability::goal_reachable_with_keys;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Every cell of the rectangle in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Pos> {
        (self.y..self.y + self.height).flat_map(move |y| {
            (self.x..self.x + self.width).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }

    /// Cells one step in from every edge. Empty for rooms thinner than three cells.
    pub fn interior(self) -> impl Iterator<Item = Pos> {
        let rows = (self.y + 1)..(self.y + self.height).saturating_sub(1);
        let columns = (self.x + 1)..(self.x + self.width).saturating_sub(1);
        rows.flat_map(move |y| columns.clone().map(move |x| Pos { y: y as i32, x: x as i32 }))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub kind: ItemKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterSpawn {
    pub kind: MonsterKind,
    pub pos: Pos,
}

/// Doors plus the item and monster slots that later stages fill in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Placements {
    pub(crate) doors: Vec<Door>,
    pub(crate) items: Vec<ItemSpawn>,
    pub(crate) monsters: Vec<MonsterSpawn>,
}

impl Placements {
    pub(crate) fn door_at(&self, pos: Pos) -> Option<&Door> {
        self.doors.iter().find(|door| door.pos == pos)
    }

    pub(crate) fn item_at(&self, pos: Pos) -> Option<&ItemSpawn> {
        self.items.iter().find(|item| item.pos == pos)
    }

    pub(crate) fn is_occupied(&self, pos: Pos) -> bool {
        self.door_at(pos).is_some()
            || self.item_at(pos).is_some()
            || self.monsters.iter().any(|monster| monster.pos == pos)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = (Pos, KeyColor)> + '_ {
        self.items.iter().filter_map(|item| match item.kind {
            ItemKind::Key(color) => Some((item.pos, color)),
            _ => None,
        })
    }

    pub(crate) fn strip_locks(&mut self) {
        self.doors.clear();
        self.items.retain(|item| !matches!(item.kind, ItemKind::Key(_)));
    }
}

/// A cell spawners may use: plain floor that is not a landmark and holds nothing.
pub(crate) fn is_free_cell(
    tiles: &impl TileSource,
    placements: &Placements,
    landmarks: [Pos; 2],
    pos: Pos,
) -> bool {
    tiles.tile_at(pos) == TileKind::Floor
        && !landmarks.contains(&pos)
        && !placements.is_occupied(pos)
}

/// A fully validated level. Read-only once handed out by the generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    rooms: Vec<Room>,
    placements: Placements,
    start_point: Pos,
    stairs_down: Pos,
}

impl Level {
    pub(crate) fn from_parts(
        width: usize,
        height: usize,
        tiles: Vec<TileKind>,
        rooms: Vec<Room>,
        placements: Placements,
        start_point: Pos,
        stairs_down: Pos,
    ) -> Self {
        Self { width, height, tiles, rooms, placements, start_point, stairs_down }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile(&self, x: i32, y: i32) -> TileKind {
        self.tile_at(Pos { y, x })
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !in_bounds(self.width, self.height, pos) {
            return TileKind::Wall;
        }
        let index = (pos.y as usize) * self.width + (pos.x as usize);
        self.tiles.get(index).copied().unwrap_or(TileKind::Wall)
    }

    /// Rooms in generation order: the first is the start room, the last holds the stairs.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn doors(&self) -> &[Door] {
        &self.placements.doors
    }

    pub fn door_at(&self, pos: Pos) -> Option<&Door> {
        self.placements.door_at(pos)
    }

    pub fn items(&self) -> &[ItemSpawn] {
        &self.placements.items
    }

    pub fn monsters(&self) -> &[MonsterSpawn] {
        &self.placements.monsters
    }

    pub fn keys(&self) -> impl Iterator<Item = (Pos, KeyColor)> + '_ {
        self.placements.keys()
    }

    pub fn start_point(&self) -> Pos {
        self.start_point
    }

    pub fn stairs_down(&self) -> Pos {
        self.stairs_down
    }

    /// Plain flood fill from the start reaches every room center.
    pub fn is_connected(&self) -> bool {
        rooms_reachable_from(self, self.start_point, &self.rooms)
    }

    /// The stairs are reachable when doors only open for keys collected on the way.
    pub fn is_solvable(&self) -> bool {
        goal_reachable_with_keys(self, &self.placements, self.start_point, self.stairs_down)
    }

    pub fn is_spawn_safe(&self, pos: Pos) -> bool {
        is_free_cell(self, &self.placements, [self.start_point, self.stairs_down], pos)
    }

    /// Interior cells of a room where an external spawner may put something.
    pub fn spawn_safe_cells(&self, room_index: usize) -> Vec<Pos> {
        let Some(room) = self.rooms.get(room_index) else {
            return Vec::new();
        };
        room.interior().filter(|&pos| self.is_spawn_safe(pos)).collect()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
                TileKind::Stairs => 2,
            });
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend((value as u32).to_le_bytes());
            }
        }

        bytes.extend((self.placements.doors.len() as u32).to_le_bytes());
        for door in &self.placements.doors {
            push_pos(&mut bytes, door.pos);
            bytes.push(color_code(door.color));
        }

        bytes.extend((self.placements.items.len() as u32).to_le_bytes());
        for item in &self.placements.items {
            push_pos(&mut bytes, item.pos);
            bytes.push(match item.kind {
                ItemKind::Key(color) => 0x10 | color_code(color),
                ItemKind::Food => 1,
                ItemKind::Elixir => 2,
                ItemKind::Scroll => 3,
                ItemKind::Weapon => 4,
                ItemKind::Treasure => 5,
            });
        }

        bytes.extend((self.placements.monsters.len() as u32).to_le_bytes());
        for monster in &self.placements.monsters {
            push_pos(&mut bytes, monster.pos);
            bytes.push(match monster.kind {
                MonsterKind::Zombie => 0,
                MonsterKind::Vampire => 1,
                MonsterKind::Ghost => 2,
                MonsterKind::Ogre => 3,
                MonsterKind::Snake => 4,
            });
        }

        push_pos(&mut bytes, self.start_point);
        push_pos(&mut bytes, self.stairs_down);
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

impl TileSource for Level {
    fn tile_at(&self, pos: Pos) -> TileKind {
        Level::tile_at(self, pos)
    }
}

fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}

fn color_code(color: KeyColor) -> u8 {
    match color {
        KeyColor::Red => 0,
        KeyColor::Blue => 1,
        KeyColor::Green => 2,
    }
}

//! Monster and loot placement for the rooms after the start room, scaled by difficulty.

use rand_chacha::rand_core::Rng;

use crate::types::{ItemKind, MonsterKind, Pos};

use super::dice::{chance_per_mille, coin_flip, roll_inclusive};
use super::grid::TileGrid;
use super::layout::START_ROOM;
use super::model::{ItemSpawn, MonsterSpawn, Placements, Room, is_free_cell};

const MONSTER_KINDS: [MonsterKind; 5] = [
    MonsterKind::Zombie,
    MonsterKind::Vampire,
    MonsterKind::Ghost,
    MonsterKind::Ogre,
    MonsterKind::Snake,
];
const LOOT_KINDS: [ItemKind; 5] =
    [ItemKind::Food, ItemKind::Elixir, ItemKind::Scroll, ItemKind::Weapon, ItemKind::Treasure];

const MONSTER_PLACEMENT_TRIES: usize = 10;
const BASE_LOOT_CHANCE_PER_MILLE: u32 = 800;
const LOOT_CHANCE_DROP_PER_DIFFICULTY: u32 = 35;
const MIN_LOOT_CHANCE_PER_MILLE: u32 = 100;

pub(super) struct SpawnContext<'a> {
    pub(super) grid: &'a TileGrid,
    pub(super) rooms: &'a [Room],
    pub(super) placements: &'a mut Placements,
    pub(super) start: Pos,
    pub(super) stairs: Pos,
    pub(super) difficulty: u32,
}

impl SpawnContext<'_> {
    fn is_free(&self, pos: Pos) -> bool {
        is_free_cell(self.grid, self.placements, [self.start, self.stairs], pos)
    }
}

pub(super) fn base_monsters_per_room(difficulty: u32) -> usize {
    1 + (difficulty / 3) as usize
}

pub(super) fn loot_chance_per_mille(difficulty: u32) -> u32 {
    BASE_LOOT_CHANCE_PER_MILLE
        .saturating_sub(LOOT_CHANCE_DROP_PER_DIFFICULTY.saturating_mul(difficulty))
        .max(MIN_LOOT_CHANCE_PER_MILLE)
}

pub(super) fn spawn_monsters<R: Rng + ?Sized>(rng: &mut R, context: &mut SpawnContext<'_>) {
    let base_count = base_monsters_per_room(context.difficulty);
    for room in context.rooms.iter().skip(START_ROOM + 1) {
        let count = base_count + usize::from(coin_flip(rng));
        for _ in 0..count {
            let kind = MONSTER_KINDS[roll_inclusive(rng, 0, MONSTER_KINDS.len() - 1)];
            for _ in 0..MONSTER_PLACEMENT_TRIES {
                let Some(pos) = random_interior_cell(rng, *room) else {
                    break;
                };
                if context.is_free(pos) {
                    context.placements.monsters.push(MonsterSpawn { kind, pos });
                    break;
                }
            }
        }
    }
}

pub(super) fn spawn_loot<R: Rng + ?Sized>(rng: &mut R, context: &mut SpawnContext<'_>) {
    let chance = loot_chance_per_mille(context.difficulty);
    for room in context.rooms.iter().skip(START_ROOM + 1) {
        if !chance_per_mille(rng, chance) {
            continue;
        }
        let Some(pos) = random_interior_cell(rng, *room) else {
            continue;
        };
        if context.is_free(pos) {
            let kind = LOOT_KINDS[roll_inclusive(rng, 0, LOOT_KINDS.len() - 1)];
            context.placements.items.push(ItemSpawn { kind, pos });
        }
    }
}

fn random_interior_cell<R: Rng + ?Sized>(rng: &mut R, room: Room) -> Option<Pos> {
    if room.width < 3 || room.height < 3 {
        return None;
    }
    let x = roll_inclusive(rng, room.x + 1, room.right() - 1);
    let y = roll_inclusive(rng, room.y + 1, room.bottom() - 1);
    Some(Pos { y: y as i32, x: x as i32 })
}

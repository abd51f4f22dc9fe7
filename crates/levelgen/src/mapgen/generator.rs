//! Attempt loop that composes layout, corridors, validation, locks, and spawns into a level.

use log::{debug, info, warn};
use rand_chacha::rand_core::Rng;

use crate::config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_LOCKED_DOORS, GeneratorConfig};
use crate::error::GenerationError;
use crate::types::{Pos, TileKind};

use super::connectivity::rooms_reachable_from;
use super::corridors::{TunnelSegments, connect_rooms};
use super::grid::TileGrid;
use super::layout::{EXIT_ROOM, GRID_COLUMNS, GRID_ROWS, START_ROOM, place_rooms};
use super::locks::{LockContext, LockOutcome, place_locks};
use super::model::{Level, Placements, Room};
use super::spawns::{SpawnContext, spawn_loot, spawn_monsters};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapGenerator {
    width: usize,
    height: usize,
    max_attempts: u32,
    max_locked_doors: usize,
}

impl MapGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_locked_doors: DEFAULT_MAX_LOCKED_DOORS,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            max_attempts: config.max_attempts,
            max_locked_doors: config.max_locked_doors,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Builds a connected, solvable level. Each failed connectivity check discards the
    /// whole attempt; the lock stage never fails an attempt, it only strips its doors.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        difficulty: u32,
    ) -> Result<Level, GenerationError> {
        if self.width < GRID_COLUMNS || self.height < GRID_ROWS {
            return Err(GenerationError::BoardTooSmall { width: self.width, height: self.height });
        }
        if difficulty == 0 {
            return Err(GenerationError::ZeroDifficulty);
        }

        let level = run_attempts(self.max_attempts, |attempt| {
            let Some(draft) = LevelDraft::build(rng, self.width, self.height) else {
                debug!("attempt {attempt}: layout is missing its start or exit room, retrying");
                return None;
            };
            if !rooms_reachable_from(&draft.grid, draft.start, &draft.rooms) {
                debug!("attempt {attempt}: some room center is cut off from the start, retrying");
                return None;
            }
            debug!(
                "attempt {attempt}: {} rooms joined by {} tunnels",
                draft.rooms.len(),
                draft.tunnels.len()
            );
            Some(self.furnish(rng, draft, difficulty))
        })?;
        info!(
            "generated {}x{} level at difficulty {difficulty}: {} doors, {} items, {} monsters",
            self.width,
            self.height,
            level.doors().len(),
            level.items().len(),
            level.monsters().len()
        );
        Ok(level)
    }

    fn furnish<R: Rng + ?Sized>(&self, rng: &mut R, draft: LevelDraft, difficulty: u32) -> Level {
        let mut placements = Placements::default();

        let outcome = place_locks(
            rng,
            &mut LockContext {
                grid: &draft.grid,
                rooms: &draft.rooms,
                tunnels: &draft.tunnels,
                placements: &mut placements,
                start_room: START_ROOM,
                exit_room: EXIT_ROOM,
                start: draft.start,
                stairs: draft.stairs,
                max_doors: self.max_locked_doors,
            },
        );
        match outcome {
            LockOutcome::NoCriticalPath => debug!("no path between start and exit rooms"),
            LockOutcome::Placed(count) => debug!("placed {count} locked doors"),
            LockOutcome::Stripped(count) => debug!("stripped {count} locked doors"),
        }

        let mut spawn_context = SpawnContext {
            grid: &draft.grid,
            rooms: &draft.rooms,
            placements: &mut placements,
            start: draft.start,
            stairs: draft.stairs,
            difficulty,
        };
        spawn_monsters(rng, &mut spawn_context);
        spawn_loot(rng, &mut spawn_context);

        draft.finish(placements)
    }
}

/// Runs `attempt` until it yields a level. Center-to-center tunnels always join every
/// room, so with the stock stages the first attempt succeeds and the budget is a backstop.
fn run_attempts<T>(
    max_attempts: u32,
    mut attempt: impl FnMut(u32) -> Option<T>,
) -> Result<T, GenerationError> {
    for index in 1..=max_attempts {
        if let Some(built) = attempt(index) {
            return Ok(built);
        }
    }
    warn!("no connected layout within {max_attempts} attempts");
    Err(GenerationError::AttemptsExhausted { attempts: max_attempts })
}

/// Carved board plus the landmarks of one attempt, before anything is placed on it.
struct LevelDraft {
    grid: TileGrid,
    rooms: Vec<Room>,
    tunnels: TunnelSegments,
    start: Pos,
    stairs: Pos,
}

impl LevelDraft {
    fn build<R: Rng + ?Sized>(rng: &mut R, width: usize, height: usize) -> Option<Self> {
        let mut grid = TileGrid::new(width, height);
        let rooms = place_rooms(rng, &mut grid);
        let tunnels = connect_rooms(rng, &mut grid, &rooms);

        let start = rooms.get(START_ROOM)?.center();
        let stairs = rooms.get(EXIT_ROOM)?.center();
        grid.set(stairs, TileKind::Stairs);

        Some(Self { grid, rooms, tunnels, start, stairs })
    }

    fn finish(self, placements: Placements) -> Level {
        let width = self.grid.width();
        let height = self.grid.height();
        Level::from_parts(
            width,
            height,
            self.grid.into_tiles(),
            self.rooms,
            placements,
            self.start,
            self.stairs,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::error::ConfigError;
    use crate::mapgen::layout::ROOM_COUNT;

    fn generate(seed: u64, width: usize, height: usize, difficulty: u32) -> Level {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        MapGenerator::new(width, height)
            .generate(&mut rng, difficulty)
            .expect("board is large enough to generate")
    }

    #[test]
    fn standard_board_yields_connected_solvable_level() {
        let level = generate(42, 60, 20, 1);

        assert_eq!(level.rooms().len(), ROOM_COUNT);
        assert!(level.is_connected());
        assert!(level.is_solvable());
        assert_eq!(level.tile_at(level.stairs_down()), TileKind::Stairs);
        assert_eq!(level.tile_at(level.start_point()), TileKind::Floor);
        assert_eq!(level.start_point(), level.rooms()[START_ROOM].center());
        assert_eq!(level.stairs_down(), level.rooms()[EXIT_ROOM].center());
        for room in level.rooms() {
            assert!(room.right() < 60 && room.bottom() < 20, "{room:?}");
        }
    }

    #[test]
    fn every_door_has_one_key_of_a_distinct_color() {
        for seed in [1_u64, 7, 99, 2_024, 31_337] {
            let level = generate(seed, 80, 24, 3);
            assert!(level.doors().len() <= DEFAULT_MAX_LOCKED_DOORS);

            let door_colors: BTreeSet<_> = level.doors().iter().map(|door| door.color).collect();
            let key_colors: BTreeSet<_> = level.keys().map(|(_, color)| color).collect();
            assert_eq!(door_colors.len(), level.doors().len(), "seed={seed}");
            assert_eq!(door_colors, key_colors, "seed={seed}");
            assert!(level.is_solvable(), "seed={seed}");
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_level() {
        let first = generate(555, 48, 27, 4);
        let second = generate(555, 48, 27, 4);
        assert_eq!(first, second);
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_ne!(first.fingerprint(), generate(556, 48, 27, 4).fingerprint());
    }

    #[test]
    fn smallest_board_still_generates() {
        let level = generate(9, 3, 3, 1);
        assert!(level.is_connected());
        assert!(level.is_solvable());
        assert!(level.monsters().is_empty());
    }

    #[test]
    fn boards_below_three_cells_are_rejected_without_retrying() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = MapGenerator::new(2, 30).generate(&mut rng, 1);
        assert!(matches!(result, Err(GenerationError::BoardTooSmall { width: 2, height: 30 })));
    }

    #[test]
    fn exhausted_budget_reports_every_attempt() {
        let mut calls = Vec::new();
        let result: Result<(), _> = run_attempts(4, |attempt| {
            calls.push(attempt);
            None
        });
        assert!(matches!(result, Err(GenerationError::AttemptsExhausted { attempts: 4 })));
        assert_eq!(calls, vec![1, 2, 3, 4]);
    }

    #[test]
    fn attempts_stop_at_the_first_success() {
        let mut calls = 0;
        let result = run_attempts(10, |attempt| {
            calls += 1;
            (attempt == 3).then_some(attempt)
        });
        assert_eq!(result.ok(), Some(3));
        assert_eq!(calls, 3);
    }

    #[test]
    fn zero_difficulty_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = MapGenerator::new(60, 20).generate(&mut rng, 0);
        assert!(matches!(result, Err(GenerationError::ZeroDifficulty)));
    }

    #[test]
    fn from_config_applies_the_lock_budget() {
        let config = GeneratorConfig { max_locked_doors: 0, ..GeneratorConfig::default() };
        let generator = MapGenerator::from_config(&config).expect("default config is valid");
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let level = generator.generate(&mut rng, 2).expect("default board generates");
        assert!(level.doors().is_empty());
        assert_eq!(level.keys().count(), 0);
    }

    #[test]
    fn from_config_rejects_invalid_settings() {
        let config = GeneratorConfig { max_attempts: 0, ..GeneratorConfig::default() };
        let result = MapGenerator::from_config(&config);
        assert!(matches!(result, Err(GenerationError::InvalidConfig(ConfigError::ZeroAttempts))));
    }

    #[test]
    fn higher_difficulty_brings_more_monsters() {
        let calm: usize = (0..10).map(|seed| generate(seed, 80, 24, 1).monsters().len()).sum();
        let deadly: usize = (0..10).map(|seed| generate(seed, 80, 24, 12).monsters().len()).sum();
        assert!(deadly > calm, "calm={calm}, deadly={deadly}");
    }

    #[test]
    fn spawns_never_sit_on_landmarks_or_in_the_start_room() {
        for seed in [3_u64, 33, 333] {
            let level = generate(seed, 80, 24, 6);
            let landmarks = [level.start_point(), level.stairs_down()];
            for monster in level.monsters() {
                assert!(!landmarks.contains(&monster.pos));
                assert!(level.door_at(monster.pos).is_none());
                assert!(!level.rooms()[START_ROOM].contains(monster.pos));
            }
            for item in level.items() {
                assert!(!landmarks.contains(&item.pos));
                assert!(level.door_at(item.pos).is_none());
            }
        }
    }
}

//! Procedural level generation split into layout, validation, lock, and spawn stages.

pub mod model;

mod connectivity;
mod corridors;
mod dice;
mod generator;
mod grid;
mod layout;
mod locks;
mod reachability;
mod spawns;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::error::GenerationError;

pub use generator::MapGenerator;
pub use layout::{EXIT_ROOM, GRID_COLUMNS, GRID_ROWS, ROOM_COUNT, START_ROOM};
pub use model::{ItemSpawn, Level, MonsterSpawn, Room};

/// Seeds a ChaCha8 stream and runs a default-configured generator on it.
pub fn generate_level(
    seed: u64,
    width: usize,
    height: usize,
    difficulty: u32,
) -> Result<Level, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    MapGenerator::new(width, height).generate(&mut rng, difficulty)
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::MapGenerator;

    #[test]
    fn generate_level_matches_map_generator_output() {
        let seed = 123_u64;

        let from_helper = super::generate_level(seed, 60, 20, 2).expect("helper generates");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let from_generator =
            MapGenerator::new(60, 20).generate(&mut rng, 2).expect("generator generates");

        assert_eq!(from_helper, from_generator);
    }
}

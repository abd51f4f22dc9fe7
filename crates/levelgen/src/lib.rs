pub mod config;
pub mod error;
pub mod mapgen;
pub mod types;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerationError};
pub use mapgen::{ItemSpawn, Level, MapGenerator, MonsterSpawn, Room, generate_level};
pub use types::*;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use levelgen::{GeneratorConfig, Level, MapGenerator};
use log::info;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the level's random stream
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Board width in cells, overriding the config file
    #[arg(long)]
    width: Option<usize>,
    /// Board height in cells, overriding the config file
    #[arg(long)]
    height: Option<usize>,
    #[arg(short, long, default_value_t = 1)]
    difficulty: u32,
    /// Path to a generator config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the whole level as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    GeneratorConfig::from_json_str(&raw)
        .with_context(|| format!("Invalid generator config in {}", path.display()))
}

fn print_summary(level: &Level, seed: u64) {
    println!("Level {}x{} (seed {seed})", level.width(), level.height());
    println!("Start: {:?}", level.start_point());
    println!("Stairs: {:?}", level.stairs_down());
    println!("Rooms: {}", level.rooms().len());
    for door in level.doors() {
        println!("Door: {:?} at {:?}", door.color, door.pos);
    }
    for (pos, color) in level.keys() {
        println!("Key: {color:?} at {pos:?}");
    }
    println!("Items: {}", level.items().len());
    println!("Monsters: {}", level.monsters().len());
    println!("Fingerprint: {:016x}", level.fingerprint());
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let generator = MapGenerator::from_config(&config).context("Invalid generator settings")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    info!("generating {}x{} level from seed {}", config.width, config.height, args.seed);
    let level = generator
        .generate(&mut rng, args.difficulty)
        .with_context(|| format!("Level generation failed for seed {}", args.seed))?;

    if args.json {
        let json = serde_json::to_string_pretty(&level)
            .with_context(|| "Failed to serialize level JSON")?;
        println!("{json}");
    } else {
        print_summary(&level, args.seed);
    }

    Ok(())
}

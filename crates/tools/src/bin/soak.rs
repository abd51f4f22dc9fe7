use std::collections::BTreeSet;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use levelgen::{Level, MapGenerator, Pos, TileKind};
use log::info;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    count: u32,
}

fn roll(rng: &mut ChaCha8Rng, min: usize, max: usize) -> usize {
    min + (rng.next_u64() as usize % (max - min + 1))
}

fn check_invariants(level: &Level, level_seed: u64) -> Result<()> {
    ensure!(level.is_connected(), "room cut off from the start (seed {level_seed})");
    ensure!(level.is_solvable(), "stairs unreachable with placed keys (seed {level_seed})");
    ensure!(
        level.tile_at(level.stairs_down()) == TileKind::Stairs,
        "stairs tile missing (seed {level_seed})"
    );
    for room in level.rooms() {
        ensure!(
            room.right() < level.width() && room.bottom() < level.height(),
            "room {room:?} leaves the board (seed {level_seed})"
        );
    }

    let mut taken: BTreeSet<Pos> = BTreeSet::from([level.start_point(), level.stairs_down()]);
    let placed = level
        .doors()
        .iter()
        .map(|door| door.pos)
        .chain(level.items().iter().map(|item| item.pos))
        .chain(level.monsters().iter().map(|monster| monster.pos));
    for pos in placed {
        ensure!(taken.insert(pos), "two placements share {pos:?} (seed {level_seed})");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Soaking {} levels from seed {}...", args.count, args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut doors_placed = 0;
    for index in 0..args.count {
        let level_seed = rng.next_u64();
        let width = roll(&mut rng, 3, 160);
        let height = roll(&mut rng, 3, 60);
        let difficulty = roll(&mut rng, 1, 20) as u32;

        let mut level_rng = ChaCha8Rng::seed_from_u64(level_seed);
        let level = MapGenerator::new(width, height)
            .generate(&mut level_rng, difficulty)
            .with_context(|| {
                format!("level {index} ({width}x{height}, seed {level_seed}) failed to generate")
            })?;
        check_invariants(&level, level_seed)?;
        doors_placed += level.doors().len();
        info!("level {index}: {width}x{height} fingerprint {:016x}", level.fingerprint());
    }

    println!("All {} levels held their invariants ({doors_placed} locked doors).", args.count);
    Ok(())
}

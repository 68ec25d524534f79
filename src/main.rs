//! Grid Blast headless demo
//!
//! Builds a seeded map, drops bombs on it and runs the simulation with a
//! synthetic frame clock, logging events and printing the map after each tick.
//!
//! Usage: `grid-blast [settings.json] [seed]`

use std::path::Path;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use grid_blast::Settings;
use grid_blast::sim::{BombOptions, GridPos, SimEvent, Simulation, TileGrid, TileKind, TileMap};

const MAP_ROWS: i32 = 11;
const MAP_COLUMNS: i32 = 15;
/// Synthetic frame time (~30 fps)
const FRAME: Duration = Duration::from_millis(33);
const DEMO_TICKS: u64 = 12;

/// Classic bomber layout: solid border and pillars, breakable walls sprinkled between
fn build_map(rng: &mut Pcg32) -> TileMap {
    let mut map = TileMap::new(MAP_ROWS, MAP_COLUMNS);
    for row in 0..MAP_ROWS {
        for column in 0..MAP_COLUMNS {
            let border = row == 0 || column == 0 || row == MAP_ROWS - 1 || column == MAP_COLUMNS - 1;
            let pillar = row % 2 == 0 && column % 2 == 0;
            let kind = if border || pillar {
                TileKind::SolidWall
            } else if rng.random_range(0..100) < 40 {
                TileKind::BreakableWall
            } else {
                TileKind::Open
            };
            map.set_tile(GridPos::new(row, column), kind);
        }
    }
    map
}

fn random_open_cell(rng: &mut Pcg32, map: &TileMap) -> Option<GridPos> {
    (0..64)
        .map(|_| {
            GridPos::new(
                rng.random_range(1..MAP_ROWS - 1),
                rng.random_range(1..MAP_COLUMNS - 1),
            )
        })
        .find(|&pos| map.tile_at(pos) == Some(TileKind::Open))
}

fn render(sim: &Simulation, map: &TileMap) -> String {
    let mut out = String::new();
    for row in 0..map.rows() {
        for column in 0..map.columns() {
            let pos = GridPos::new(row, column);
            let ch = if sim.cell_view(map, pos).bomb_here {
                'B'
            } else if sim.is_explosion_near(map, pos) {
                '*'
            } else {
                match map.tile(pos) {
                    TileKind::Open => '.',
                    TileKind::SolidWall => '#',
                    TileKind::BreakableWall => '+',
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn main() {
    env_logger::init();
    log::info!("Grid Blast demo starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42u64);
    log::info!(
        "Seed {} tick={}ms policy={}",
        seed,
        settings.tick_length_ms,
        settings.tick_policy.as_str()
    );

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut map = build_map(&mut rng);
    let mut sim = Simulation::new(&settings);

    let t0 = Instant::now();
    let mut now = t0;
    sim.frame_at(now, &mut map);

    let mut bombs_placed = 0u32;
    while sim.game_time() < DEMO_TICKS {
        now += FRAME;

        // The "player" tries to drop a bomb every frame; the core refuses
        // while one is still live.
        if let Some(pos) = random_open_cell(&mut rng, &map) {
            let options = BombOptions {
                player_owned: true,
                radius: rng.random_range(1..=3),
                ..sim.default_options
            };
            sim.place_bomb(pos, options);
        }
        if sim.clock.tick_just_crossed() && rng.random_bool(0.3) {
            if let Some(pos) = random_open_cell(&mut rng, &map) {
                let options = BombOptions {
                    wall_penetrating: true,
                    ..sim.default_options
                };
                sim.place_bomb(pos, options);
            }
        }

        if sim.frame_at(now, &mut map) == 0 {
            continue;
        }

        for event in sim.drain_events() {
            match event {
                SimEvent::PlayerBombPlaced { .. } => bombs_placed += 1,
                SimEvent::WallBroken { pos } => {
                    log::debug!("Wall broken at ({}, {})", pos.row, pos.column)
                }
                other => log::debug!("{:?}", other),
            }
        }
        println!("t={}s", sim.game_time());
        println!("{}", render(&sim, &map));
    }

    println!(
        "Player bombs placed: {} | breakable walls left: {}",
        bombs_placed,
        map.count(TileKind::BreakableWall)
    );
}

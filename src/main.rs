use clap::Parser;
use dronearena::arena::Arena;
use dronearena::game::Game;
use dronearena::{config, logging};
use dronearena::weapons::WeaponTable;
use log::{LevelFilter, error, info};
use std::collections::HashMap;
use std::process;
use std::time::{Duration, Instant};

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level file: lines of tile-code digits (0 floor, 1 bedrock,
    /// 2 player spawn, 3 wall, 4/5/6 weapon spawns). Omit for the
    /// built-in demo level.
    #[arg(long)]
    level: Option<String>,

    /// Number of AI agents to add (1 to 4).
    #[arg(long, default_value_t = 4)]
    agents: usize,

    /// Score needed to win the match.
    #[arg(long, default_value_t = config::DEFAULT_WIN_SCORE)]
    win_score: i32,

    /// Maximum number of simulation steps before giving up.
    #[arg(long, default_value_t = 200_000)]
    max_steps: u64,

    /// Pace the simulation at 60 steps per second instead of running
    /// as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// RNG seed for a reproducible match.
    #[arg(long)]
    seed: Option<u64>,

    /// Debug filter to specify log topics (e.g., "move,ballistics,ai,respawn,arena")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

// The original test layout: bordered 64x56 room, a destructible block in
// the middle, four corner spawns and three weapon spawns.
fn demo_level() -> Vec<Vec<u8>> {
    let (width, height) = (64, 56);
    let mut codes = vec![vec![0u8; width]; height];
    for y in 0..height {
        for x in 0..width {
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                codes[y][x] = 1;
            }
        }
    }
    for y in 20..40 {
        for x in 20..40 {
            codes[y][x] = 3;
        }
    }
    for (x, y) in [(2, 2), (58, 2), (2, 50), (58, 50)] {
        codes[y][x] = 2;
    }
    codes[50][31] = 4; // Machine gun
    codes[19][9] = 5; // Laser
    codes[21][49] = 6; // Rocket launcher
    codes
}

fn load_level(path: &str) -> Result<Vec<Vec<u8>>, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.trim()
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or_else(|| format!("invalid tile character '{}'", c))
                })
                .collect()
        })
        .collect()
}

fn main() {
    let args = Args::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    if let Err(e) = logging::init_logger(log_level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Drone Arena...");

    if args.agents == 0 || args.agents > 4 {
        error!("Error: between 1 and 4 agents required.");
        process::exit(1);
    }

    let codes = match &args.level {
        Some(path) => match load_level(path) {
            Ok(codes) => codes,
            Err(e) => {
                error!("Error loading level {}: {}", path, e);
                process::exit(1);
            }
        },
        None => demo_level(),
    };
    let arena = match Arena::from_tile_codes(&codes) {
        Ok(arena) => arena,
        Err(e) => {
            error!("Error building arena: {}", e);
            process::exit(1);
        }
    };

    let game = Game::with_seed(
        arena,
        WeaponTable::standard(),
        args.win_score,
        args.seed.unwrap_or_else(rand::random),
    );
    let mut game = match game {
        Ok(game) => game,
        Err(e) => {
            error!("Error creating match: {}", e);
            process::exit(1);
        }
    };
    for _ in 0..args.agents {
        game.add_agent(true);
    }

    // Headless fixed-step loop; the rendering collaborator would read the
    // query surface between steps.
    let dt = 1.0 / 60.0;
    let step_budget = Duration::from_secs_f64(dt);
    let no_intents = HashMap::new();
    let mut steps: u64 = 0;

    while steps < args.max_steps {
        let started = Instant::now();
        game.step(&no_intents, dt);
        steps += 1;

        if let Some(ranking) = game.check_endgame() {
            info!("Match over after {:.1} sim-seconds:", game.time());
            for (place, entry) in ranking.iter().enumerate() {
                info!("  {}. agent {} with {} points", place + 1, entry.id, entry.score);
            }
            return;
        }

        if args.realtime {
            let used = started.elapsed();
            if used < step_budget {
                std::thread::sleep(step_budget - used);
            }
        }
    }
    info!(
        "No winner within {} steps ({:.1} sim-seconds).",
        steps,
        game.time()
    );
}

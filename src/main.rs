//! Cube Runner headless entry point
//!
//! Runs a seeded session on autopilot at a fixed 60 Hz step and logs how the
//! runs go. Usage: `cube-runner [seed] [seconds] [config.json]`.

use cube_runner::consts::MAX_FRAME_DT;
use cube_runner::{Session, SimConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = match args.first() {
        Some(s) => match s.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("Invalid seed {:?}: {}", s, e);
                std::process::exit(2);
            }
        },
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(12345),
    };
    let seconds = match args.get(1) {
        Some(s) => match s.parse::<f32>() {
            Ok(secs) if secs > 0.0 => secs,
            _ => {
                log::error!("Invalid duration {:?}", s);
                std::process::exit(2);
            }
        },
        None => 60.0,
    };
    let config = match args.get(2) {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };

    let mut session = match Session::with_config(seed, config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    session.set_autopilot(true);

    log::info!("Cube Runner (headless) running {}s with seed {}", seconds, seed);

    let dt = (1.0f32 / 60.0).min(MAX_FRAME_DT);
    let total_ticks = (seconds / dt).ceil() as u64;
    let mut runs = 1;

    for t in 1..=total_ticks {
        session.update(dt);

        if session.is_game_over() {
            log::info!(
                "Run {} ended ({:?}) with score {}",
                runs,
                session.game_over_cause(),
                session.score()
            );
            session.reset();
            session.set_autopilot(true);
            runs += 1;
        }

        if t % 300 == 0 {
            let pos = session.player().position;
            log::info!(
                "t={:.0}s score={} tiles={} obstacles={} player=({:.1}, {:.1})",
                t as f32 * dt,
                session.score(),
                session.tiles().len(),
                session.active_obstacles().count(),
                pos.x,
                pos.z
            );
        }
    }

    println!("Seed {}: {} run(s), current score {}", seed, runs, session.score());
    for (i, run) in session.leaderboard().records().iter().enumerate() {
        println!(
            "  #{:<2} {:>5}  {:>6.1}s  {:?}",
            i + 1,
            run.score,
            run.elapsed,
            run.cause
        );
    }
}

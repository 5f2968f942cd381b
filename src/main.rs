//! Ricochet Arena headless runner
//!
//! Loads a map and tuning, plays a scripted match at the fixed timestep and
//! prints the final standings as JSON.
//!
//! Usage: `ricochet-arena [--map FILE] [--tuning FILE] [--ticks N]`

use std::path::PathBuf;

use clap::Parser;
use ricochet_arena::sim::{GameEvent, GamePhase, KeyBindings, KeyCode, Session};
use ricochet_arena::{ArenaError, TileMap, Tuning};

/// Default match length (one minute of simulated time)
const DEFAULT_TICKS: u64 = 60 * 60;

#[derive(Parser)]
#[command(name = "ricochet-arena")]
#[command(about = "Play a scripted Ricochet Arena match and print the standings")]
struct Options {
    /// Tile map JSON file (defaults to the built-in arena)
    #[arg(long)]
    map: Option<PathBuf>,
    /// Tuning JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Ticks to simulate before stopping
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,
}

/// Key presses/releases for tick `t` of the demo match
fn scripted_input(t: u64) -> Vec<(KeyCode, bool)> {
    let phase = t % 240;
    let mut keys = Vec::new();
    match phase {
        0 => keys.extend([(KeyCode::D, true), (KeyCode::J, true)]),
        40 => keys.extend([(KeyCode::W, true), (KeyCode::K, true)]),
        60 => keys.extend([(KeyCode::C, true), (KeyCode::N, true)]),
        90 => keys.extend([(KeyCode::D, false), (KeyCode::A, true), (KeyCode::LSHIFT, true)]),
        120 => keys.extend([(KeyCode::W, false), (KeyCode::S, true), (KeyCode::C, true)]),
        150 => keys.extend([(KeyCode::J, false), (KeyCode::L, true), (KeyCode::RSHIFT, true)]),
        180 => keys.extend([(KeyCode::N, true), (KeyCode::C, true)]),
        239 => {
            for key in [KeyCode::A, KeyCode::S, KeyCode::K, KeyCode::L] {
                keys.push((key, false));
            }
        }
        _ => {}
    }
    keys
}

fn run(options: Options) -> Result<(), ArenaError> {
    let tiles = match &options.map {
        Some(path) => TileMap::load(path)?,
        None => TileMap::builtin(),
    };
    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let arena = tiles.build()?;
    let mut session = Session::start(
        arena,
        tuning,
        &[KeyBindings::PLAYER_ONE, KeyBindings::PLAYER_TWO],
    )?;

    for t in 0..options.ticks {
        for (key, pressed) in scripted_input(t) {
            if pressed {
                session.key_down(key);
            } else {
                session.key_up(key);
            }
        }
        session.tick();

        for event in session.drain_events() {
            match event {
                GameEvent::Died { .. }
                | GameEvent::Eliminated { .. }
                | GameEvent::GameOver { .. } => log::info!("tick {t}: {event:?}"),
                _ => log::debug!("tick {t}: {event:?}"),
            }
        }

        if session.phase() == GamePhase::GameOver {
            break;
        }
    }

    let summary = session.end();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();

    if let Err(e) = run(options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Options::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults_and_flags() {
        let options = Options::try_parse_from(["ricochet-arena"]).unwrap();
        assert!(options.map.is_none());
        assert!(options.tuning.is_none());
        assert_eq!(options.ticks, DEFAULT_TICKS);

        let options = Options::try_parse_from([
            "ricochet-arena",
            "--map",
            "arena.json",
            "--ticks",
            "120",
        ])
        .unwrap();
        assert_eq!(options.map, Some(PathBuf::from("arena.json")));
        assert_eq!(options.ticks, 120);

        assert!(Options::try_parse_from(["ricochet-arena", "--ticks", "soon"]).is_err());
        assert!(Options::try_parse_from(["ricochet-arena", "--speed", "3"]).is_err());
    }
}

//! Knightcrawl - Entry Point
//!
//! Runs a short scripted session on the built-in map. There is no renderer
//! or input layer here; the transcript ends up in the log and on stdout.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

use knightcrawl::combat::Spell;
use knightcrawl::config::GameConfig;
use knightcrawl::constants::DATA_DIR;
use knightcrawl::data::DataManager;
use knightcrawl::ecs::Position;
use knightcrawl::game::{Game, GameState, MoveOutcome};
use knightcrawl::progression::exp_to_next_level;
use knightcrawl::world::Map;

/// Player steps taken by the scripted session
const SCRIPT: &[(i32, i32)] = &[(1, 0), (1, 0), (1, 1), (1, 0), (1, 0), (0, 1), (1, 0), (1, 0)];

/// Explored part of the map; unexplored tiles are blank
fn print_explored(game: &Game) {
    let map = game.map();
    let player = game.player_position();
    for y in 0..map.height {
        let row: String = (0..map.width)
            .map(|x| match map.get_tile(x, y) {
                _ if player == Some(Position::new(x, y)) => '@',
                Some(tile) if tile.seen => tile.glyph(),
                _ => ' ',
            })
            .collect();
        println!("{}", row.trim_end());
    }
}

fn init_logging() {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    // Log to a file when possible, stderr otherwise
    match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("knightcrawl.log")
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Could not open knightcrawl.log ({}), logging to stderr", e),
    }
    builder.init();
}

fn main() -> Result<()> {
    init_logging();
    log::info!("Starting Knightcrawl v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load_or_default(Path::new(DATA_DIR));
    let data = DataManager::new(&config.data_dir);
    let mut game = Game::new(Map::test_map(), data, config);

    let player = game
        .spawn_player("knight", Position::new(2, 2))
        .context("spawning the player")?;
    game.give_item(player, "red potion")?;
    let sword = game.give_item(player, "sword")?;
    game.toggle_equip(sword)?;

    game.spawn_enemy("slime", Position::new(6, 3), 1)?;
    game.spawn_enemy("goblin", Position::new(12, 4), 1)?;
    game.spawn_enemy("skeleton", Position::new(15, 7), 2)?;
    game.spawn_item("shield", Position::new(5, 4))?;
    game.spawn_item("chest", Position::new(17, 7))?;

    game.player_cast(&Spell::fireball(), Position::new(6, 3))?;

    for &(dx, dy) in SCRIPT {
        if !game.is_playing() {
            break;
        }
        match game.player_move(dx, dy)? {
            MoveOutcome::Moved(pos) => log::info!("Player moved to ({}, {})", pos.x, pos.y),
            MoveOutcome::Attacked(hit) => log::info!("Player hit {} for {}", hit.target_name, hit.damage.dealt),
            MoveOutcome::Blocked => log::info!("Player bumped into something"),
        }
        if game.is_playing() {
            game.pick_up_here(player)?;
        }
    }

    for message in game.messages().iter() {
        println!("[turn {:>3}] {}", message.turn, message.text);
    }

    match game.state() {
        GameState::Playing => println!("Session ended after {} turns", game.turn()),
        GameState::Victory => println!("Victory on turn {}", game.turn()),
        GameState::GameOver { cause } => println!("Game over: {}", cause),
    }
    if let Ok(stat) = game.creature(player).map(|c| c.stat) {
        println!(
            "knight: level {} ({} exp, {} to next), hp {}/{}, mp {}/{}",
            stat.level,
            stat.exp,
            exp_to_next_level(stat.exp),
            stat.hp,
            stat.max_hp,
            stat.mp,
            stat.max_mp
        );
    }
    print_explored(&game);

    log::info!("Knightcrawl shut down cleanly");
    Ok(())
}

//! End-to-end turns through the public `Game` API.

use knightcrawl::combat::{CastOutcome, Spell};
use knightcrawl::data::DataManager;
use knightcrawl::ecs::{Faction, Position};
use knightcrawl::game::{Game, GameState, MessageCategory, MoveOutcome, UseOutcome};
use knightcrawl::items::{EquipOutcome, EquipSlot, PickupOutcome};
use knightcrawl::world::Map;
use knightcrawl::GameConfig;

fn arena() -> Map {
    Map::from_rows(&[
        "############",
        "#..........#",
        "#..........#",
        "#....#.....#",
        "#..........#",
        "############",
    ])
}

fn new_game() -> Game {
    let config = GameConfig {
        rng_seed: Some(42),
        ..GameConfig::default()
    };
    Game::new(arena(), DataManager::defaults(), config)
}

#[test]
fn bump_attack_kills_and_awards_exp() {
    let mut game = new_game();
    let player = game.spawn_player("knight", Position::new(1, 1)).unwrap();
    let slime = game
        .spawn_creature("slime", Position::new(2, 1), Some(Faction::Enemy), 1, None)
        .unwrap();

    // slime: 8 hp, 1 defense; knight hits for 5
    let MoveOutcome::Attacked(first) = game.player_move(1, 0).unwrap() else {
        panic!("expected an attack");
    };
    assert_eq!(first.damage.dealt, 4);
    assert!(!first.died());

    let MoveOutcome::Attacked(second) = game.player_move(1, 0).unwrap() else {
        panic!("expected an attack");
    };
    assert!(second.died());
    assert_eq!(second.exp_gained, 20);
    assert!(!game.world().contains(slime));
    assert!(game.roster().members(Faction::Enemy).is_empty());

    let knight = game.creature(player).unwrap();
    assert_eq!(knight.stat.exp, 20);
    assert_eq!(knight.stat.level, 1);

    // The tile is free now
    assert_eq!(
        game.player_move(1, 0).unwrap(),
        MoveOutcome::Moved(Position::new(2, 1))
    );
}

#[test]
fn worn_sword_adds_to_bump_damage() {
    let mut game = new_game();
    let player = game.spawn_player("knight", Position::new(1, 1)).unwrap();
    let sword = game.give_item(player, "sword").unwrap();
    assert_eq!(
        game.toggle_equip(sword).unwrap(),
        EquipOutcome::Equipped(EquipSlot::Weapon)
    );
    let skeleton = game
        .spawn_creature("skeleton", Position::new(1, 2), Some(Faction::Enemy), 1, None)
        .unwrap();

    let MoveOutcome::Attacked(hit) = game.player_move(0, 1).unwrap() else {
        panic!("expected an attack");
    };
    // strength 5 + sword 3 - defense 3
    assert_eq!(hit.damage.dealt, 5);
    assert_eq!(game.creature(skeleton).unwrap().stat.hp, 5);

    assert_eq!(
        game.toggle_equip(sword).unwrap(),
        EquipOutcome::Unequipped(EquipSlot::Weapon)
    );
    assert_eq!(game.inventory(player).unwrap(), vec![sword]);
}

#[test]
fn beam_along_traced_line_hits_every_enemy() {
    let mut game = new_game();
    let player = game.spawn_player("knight", Position::new(1, 4)).unwrap();
    let near = game
        .spawn_creature("goblin", Position::new(3, 4), Some(Faction::Enemy), 1, None)
        .unwrap();
    let far = game
        .spawn_creature("goblin", Position::new(7, 4), Some(Faction::Enemy), 1, None)
        .unwrap();

    let outcome = game
        .cast(player, &Spell::lightning(), Position::new(10, 4))
        .unwrap();
    let CastOutcome::Cast { path, hits, .. } = outcome else {
        panic!("expected a cast");
    };
    assert_eq!(path.len(), 10);
    assert_eq!(hits.len(), 2);
    // wizardry 3 + base 3 - goblin defense 2
    assert_eq!(game.creature(near).unwrap().stat.hp, 10);
    assert_eq!(game.creature(far).unwrap().stat.hp, 10);
    assert_eq!(game.creature(player).unwrap().stat.mp, 5);
    assert!(game
        .messages()
        .iter()
        .any(|m| m.category == MessageCategory::Magic && m.text.contains("casts lightning")));
}

#[test]
fn bolt_is_stopped_by_pillar() {
    let mut game = new_game();
    let player = game.spawn_player("knight", Position::new(3, 3)).unwrap();
    let goblin = game
        .spawn_creature("goblin", Position::new(7, 3), Some(Faction::Enemy), 1, None)
        .unwrap();

    let outcome = game.cast(player, &Spell::fireball(), Position::new(7, 3)).unwrap();
    let CastOutcome::Cast { path, hits, .. } = outcome else {
        panic!("expected a cast");
    };
    assert_eq!(path, vec![Position::new(3, 3), Position::new(4, 3)]);
    assert!(hits.is_empty());
    assert_eq!(game.creature(goblin).unwrap().stat.hp, 14);
}

#[test]
fn chasing_enemy_reaches_and_hurts_player() {
    let mut game = new_game();
    let player = game.spawn_player("knight", Position::new(1, 1)).unwrap();
    game.spawn_enemy("goblin", Position::new(4, 1), 1).unwrap();

    for _ in 0..3 {
        game.player_wait().unwrap();
    }
    let knight = game.creature(player).unwrap();
    assert!(knight.stat.hp < knight.stat.max_hp);
    assert!(game.messages().contains("goblin hits knight"));
}

#[test]
fn pickup_use_and_victory() {
    let mut game = new_game();
    let player = game.spawn_player("knight", Position::new(1, 1)).unwrap();
    game.spawn_item("chest", Position::new(2, 1)).unwrap();

    game.player_move(1, 0).unwrap();
    assert_eq!(game.pick_up_here(player).unwrap(), Some(PickupOutcome::PickedUp));
    let chest = game.inventory(player).unwrap()[0];

    assert!(matches!(game.use_item(chest).unwrap(), UseOutcome::Used(_)));
    assert_eq!(game.state(), &GameState::Victory);
    // No more turns once the game is over
    assert_eq!(game.player_move(1, 0).unwrap(), MoveOutcome::Blocked);
}

#[test]
fn regeneration_every_tenth_turn() {
    let mut game = new_game();
    let player = game.spawn_player("knight", Position::new(1, 1)).unwrap();
    game.take_damage(player, 7).unwrap();
    let hurt = game.creature(player).unwrap().stat.hp;
    assert_eq!(hurt, 25);

    for turn in 1..=20u64 {
        game.player_wait().unwrap();
        let expected = hurt + (turn / 10) as i32;
        assert_eq!(game.creature(player).unwrap().stat.hp, expected, "turn {}", turn);
    }
}

#[test]
fn explored_tiles_stay_seen() {
    let mut game = new_game();
    game.spawn_player("knight", Position::new(1, 1)).unwrap();
    let fogged_before = game.map().fog().len();
    for _ in 0..6 {
        game.player_move(1, 0).unwrap();
    }
    assert!(game.map().fog().len() < fogged_before);

    let start = game.map().get_tile(1, 1).unwrap();
    assert!(start.seen && !start.seeing);
    let here = game.map().get_tile(7, 1).unwrap();
    assert!(here.seen && here.seeing);
}

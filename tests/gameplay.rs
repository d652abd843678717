use std::time::Duration;

use wrapsnake::app::{apply_action, Flow};
use wrapsnake::game::{
    Coordinates, Direction, FixedInterval, GameConfig, GameLoop, Mode, Scheduler, TickOutcome,
};
use wrapsnake::input::InputDecoder;
use wrapsnake::render::{draw_frame, TerminalSurface, GAME_OVER};

fn new_game(config: &GameConfig) -> GameLoop<FixedInterval> {
    GameLoop::new(config, FixedInterval::new(Duration::from_millis(70))).unwrap()
}

fn feed(game: &mut GameLoop<FixedInterval>, bytes: &[u8]) -> Vec<Flow> {
    let mut decoder = InputDecoder::new();
    for &byte in bytes {
        decoder.push(byte);
    }
    std::iter::from_fn(|| decoder.next_action())
        .map(|action| apply_action(&mut *game, action))
        .collect()
}

#[test]
fn one_tick_then_eat_on_default_grid() {
    let config = GameConfig::default().with_seed(42);
    let mut game = new_game(&config);
    game.start();

    let start = game.state().head();
    game.state_mut().place_food(Coordinates::new(600, 600));
    assert_eq!(game.tick(), TickOutcome::Moved);
    assert_eq!(game.state().head(), Coordinates::new(start.x + 30, start.y));
    assert_eq!(game.state().length(), 3);

    let ahead = Coordinates::new(start.x + 60, start.y);
    game.state_mut().place_food(ahead);
    assert_eq!(game.tick(), TickOutcome::Ate);
    assert_eq!(game.state().length(), 4);
    assert_eq!(game.state().score(), 1);
}

#[test]
fn head_moves_exactly_one_cell_every_tick() {
    let config = GameConfig::new(600, 600, 30).with_seed(9);
    let mut game = new_game(&config);
    game.start();
    game.state_mut().place_food(Coordinates::new(-300, -300));

    // a square path that never touches the body or an edge
    let turns = [Direction::Down, Direction::Right, Direction::Up, Direction::Left];
    for direction in turns {
        game.steer(direction);
        for _ in 0..4 {
            let before = game.state().head();
            assert_eq!(game.tick(), TickOutcome::Moved);
            let (dx, dy) = direction.delta();
            assert_eq!(
                game.state().head(),
                Coordinates::new(before.x + dx * 30, before.y + dy * 30)
            );
        }
    }
    assert_eq!(game.state().head(), Coordinates::new(60, 0));
    assert_eq!(game.mode(), Mode::Playing);
}

#[test]
fn full_lap_wraps_back_to_start() {
    let config = GameConfig::new(600, 600, 30).with_seed(9);
    let mut game = new_game(&config);
    game.start();
    game.state_mut().place_food(Coordinates::new(-300, -300));

    let start = game.state().head();
    for _ in 0..20 {
        assert_ne!(game.tick(), TickOutcome::Collided);
    }
    assert_eq!(game.state().head(), start);
}

#[test]
fn reversal_is_accepted_and_fatal() {
    let config = GameConfig::new(600, 600, 30).with_seed(1);
    let mut game = new_game(&config);
    feed(&mut game, b"\n");
    game.state_mut().place_food(Coordinates::new(-300, -300));

    feed(&mut game, b"\x1b[D");
    assert_eq!(game.tick(), TickOutcome::Collided);
    assert_eq!(game.mode(), Mode::GameOver);
    assert!(!game.scheduler().is_running());
}

#[test]
fn keyboard_session_through_all_modes() {
    let config = GameConfig::new(600, 600, 30).with_seed(2);
    let mut game = new_game(&config);

    assert_eq!(feed(&mut game, b"rm"), vec![Flow::Unchanged, Flow::Unchanged]);
    assert_eq!(feed(&mut game, b"\n"), vec![Flow::Redraw]);
    assert_eq!(game.mode(), Mode::Playing);

    game.state_mut().place_food(Coordinates::new(90, 0));
    game.tick();
    game.state_mut().place_food(Coordinates::new(-300, -300));
    feed(&mut game, b"\x1b[D");
    game.tick();
    assert_eq!(game.mode(), Mode::GameOver);
    assert_eq!(game.state().score(), 1);

    let mut surface = TerminalSurface::new(30, 20, 20);
    draw_frame(&mut surface, &game);
    let frame = surface.render_to_string();
    assert!(frame.contains(GAME_OVER));
    assert!(frame.contains("Score: 1"));

    assert_eq!(feed(&mut game, b"r"), vec![Flow::Redraw]);
    assert_eq!(game.mode(), Mode::Playing);
    assert_eq!(game.state().score(), 0);
    assert_eq!(game.state().length(), 3);
    assert_eq!(game.state().direction(), Direction::Right);
    assert!(game.scheduler().is_running());

    game.state_mut().place_food(Coordinates::new(-300, -300));
    feed(&mut game, b"\x1b[D");
    game.tick();
    assert_eq!(feed(&mut game, b"m"), vec![Flow::Redraw]);
    assert_eq!(game.mode(), Mode::MainMenu);
    assert_eq!(game.best_score(), 1);
    assert_eq!(feed(&mut game, b"q"), vec![Flow::Quit]);
}

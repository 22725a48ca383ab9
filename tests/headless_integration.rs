use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use kubik::config::GameConfig;
use kubik::game::Game;
use kubik::problem::FixedSource;
use kubik::runtime::{DrillEvent, Runner, TestEventSource};

fn key(c: char) -> DrillEvent {
    DrillEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn enter() -> DrillEvent {
    DrillEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

fn test_config(total: usize) -> GameConfig {
    GameConfig {
        multiplier: 4,
        animation_ms: 200,
        wrong_answer_ms: 200,
        total_problems: total,
    }
}

/// Tick the game until input is live again (a human waits out the pause and
/// hint animation; the test does it with explicit ticks).
fn settle(game: &mut Game) {
    for _ in 0..100u32 {
        if game.input_enabled() || game.is_complete() {
            return;
        }
        game.on_tick();
    }
    panic!("game never settled back to an answerable state");
}

// Headless integration using the internal runtime + Game without a TTY.
// Verifies that a full drill completes via Runner/TestEventSource.
#[test]
fn headless_drill_completes() {
    let mut game = Game::new(test_config(2), Box::new(FixedSource::new(4, vec![5, 3])));

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let runner = Runner::with_interval(es, Duration::from_millis(5));

    // Answers for operands 5 and 3 with multiplier 4
    for ev in [key('2'), key('0'), enter(), key('1'), key('2'), enter()] {
        tx.send(ev).unwrap();
    }

    // Drive a tiny event loop until complete (or bounded steps)
    for _ in 0..200u32 {
        match runner.next_event(&game) {
            DrillEvent::Tick => game.on_tick(),
            DrillEvent::Resize => {}
            DrillEvent::Key(key_event) => {
                settle(&mut game);
                match key_event.code {
                    KeyCode::Enter => {
                        if game.check_enabled() {
                            game.check();
                        }
                    }
                    KeyCode::Char(c) => game.handle_char(c),
                    _ => {}
                }
            }
        }
        if game.is_complete() {
            break;
        }
    }

    assert!(game.is_complete(), "drill should have completed");
    assert_eq!(game.session().solved_count(), 2);
    assert!(game.session().entries().iter().all(|e| e.answered));
}

#[test]
fn headless_wrong_answer_recovers() {
    let mut game = Game::new(test_config(1), Box::new(FixedSource::new(4, vec![5])));

    game.handle_char('2');
    game.handle_char('1');
    game.check();
    assert!(!game.input_enabled());

    // Let the wrong-answer flash clear via ticks; the runner surfaces them
    // because the flash timer is pending
    let (_tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let runner = Runner::with_interval(es, Duration::from_millis(1));
    for _ in 0..10u32 {
        if let DrillEvent::Tick = runner.next_event(&game) {
            game.on_tick();
        }
        if game.input_enabled() {
            break;
        }
    }

    assert!(game.input_enabled(), "flash should clear after its timer");
    assert_eq!(game.input(), "");
    assert_eq!(game.session().solved_count(), 0);

    game.handle_char('2');
    game.handle_char('0');
    game.check();
    assert_eq!(game.session().solved_count(), 1);
}

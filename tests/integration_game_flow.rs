// Scenario coverage for the drill state machine, exercised through the
// public Game API with a scripted problem source.

use assert_matches::assert_matches;

use kubik::config::GameConfig;
use kubik::game::{Game, Phase, Visual, CORRECT_PAUSE_MS};
use kubik::problem::{FixedSource, Problem};
use kubik::TICK_RATE_MS;

fn config() -> GameConfig {
    GameConfig {
        multiplier: 4,
        animation_ms: 500,
        wrong_answer_ms: 1000,
        total_problems: 3,
    }
}

fn tick_ms(game: &mut Game, ms: u64) {
    for _ in 0..ms.div_ceil(TICK_RATE_MS) {
        game.on_tick();
    }
}

fn type_answer(game: &mut Game, text: &str) {
    for c in text.chars() {
        game.handle_char(c);
    }
}

#[test]
fn scenario_quota_three_multiplier_four() {
    let mut game = Game::new(config(), Box::new(FixedSource::new(4, vec![5, 2, 9])));

    // Generated problem with operand 5 is 4 × 5 = 20
    let entry = game.session().current().unwrap();
    assert_eq!(entry.problem, Problem::new(4, 5));
    assert_eq!(entry.problem.answer, 20);

    // "20" solves it: answered, counted, not yet complete
    type_answer(&mut game, "20");
    game.check();
    assert!(game.session().current().unwrap().answered);
    assert_eq!(game.session().solved_count(), 1);
    assert!(!game.session().is_complete());
    assert_matches!(game.phase(), Phase::CorrectPause);
}

#[test]
fn scenario_wrong_answer_leaves_entry_unanswered() {
    let mut game = Game::new(config(), Box::new(FixedSource::new(4, vec![5])));
    let id = game.session().current_id().unwrap();

    // "21" is wrong: entry stays unanswered, wrong state applied
    type_answer(&mut game, "21");
    game.check();
    assert!(!game.session().current().unwrap().answered);
    assert_eq!(game.session().solved_count(), 0);
    assert_matches!(game.entry_visual(id), Visual::Wrong);

    // ...and cleared again after wrong_answer_ms
    tick_ms(&mut game, 1000);
    assert_matches!(game.entry_visual(id), Visual::Neutral);
    assert_matches!(game.phase(), Phase::Answering);
    assert_eq!(game.session().solved_count(), 0);
    assert_eq!(game.input(), "");
}

#[test]
fn scenario_completion_on_exact_quota() {
    let mut game = Game::new(config(), Box::new(FixedSource::new(4, vec![1, 2, 3])));

    for answer in ["4", "8", "12"] {
        assert_matches!(game.phase(), Phase::Answering);
        type_answer(&mut game, answer);
        game.check();
        assert_matches!(game.phase(), Phase::CorrectPause);
        tick_ms(&mut game, CORRECT_PAUSE_MS);
        if !game.is_complete() {
            // Non-first problems play the hint before input opens
            assert_matches!(game.phase(), Phase::Hint);
            tick_ms(&mut game, 500);
        }
    }

    // The quota was hit exactly on the last answer: banner, no fourth problem
    assert_matches!(game.phase(), Phase::Complete);
    assert_eq!(game.session().entries().len(), 3);
    assert_eq!(game.session().solved_count(), 3);
}

#[test]
fn scenario_near_miss_text_never_matches() {
    // "3.5"-style input must never match, even when numerically close
    let mut game = Game::new(
        GameConfig {
            multiplier: 4,
            animation_ms: 500,
            wrong_answer_ms: 1000,
            total_problems: 1,
        },
        Box::new(FixedSource::new(4, vec![1])),
    );
    // answer is 4; "4.0" parses as no whole number and is wrong
    type_answer(&mut game, "4.0");
    assert!(!game.check_enabled());
    game.check();
    assert_matches!(game.phase(), Phase::WrongFlash);
    assert_eq!(game.session().solved_count(), 0);
}

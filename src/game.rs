use crate::config::GameConfig;
use crate::problem::ProblemSource;
use crate::session::{EntryId, Session};
use crate::TICK_RATE_MS;

/// Pause after a correct answer before moving on, matching the short beat
/// the learner needs to see the green state.
pub const CORRECT_PAUSE_MS: u64 = 500;

/// Lifecycle of the current problem. `Hint` plays the cube animation,
/// `Answering` accepts input, `WrongFlash` shows the red state until its
/// timer clears it, `CorrectPause` is the short beat before the next
/// problem or the completion banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hint,
    Answering,
    WrongFlash,
    CorrectPause,
    Complete,
}

/// Visual treatment of one problem row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    Neutral,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    HintDone,
    WrongReset,
    Advance,
}

/// A scheduled phase transition. Keyed by the entry it was started for so a
/// stale timer can never touch a later row.
#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    entry: EntryId,
    kind: TimerKind,
    remaining_ms: u64,
}

/// The drill itself: session state plus the per-problem state machine.
/// All mutation happens synchronously from the event loop; timers are
/// advanced by `on_tick`.
pub struct Game {
    config: GameConfig,
    session: Session,
    source: Box<dyn ProblemSource>,
    phase: Phase,
    input: String,
    check_enabled: bool,
    timer: Option<PendingTimer>,
}

impl Game {
    pub fn new(config: GameConfig, source: Box<dyn ProblemSource>) -> Self {
        let session = Session::new(config.total_problems);
        let mut game = Self {
            config,
            session,
            source,
            phase: Phase::Answering,
            input: String::new(),
            check_enabled: false,
            timer: None,
        };
        game.next_problem();
        game
    }

    /// Start over with the same config and source.
    pub fn reset(&mut self) {
        self.session.reset();
        self.input.clear();
        self.check_enabled = false;
        self.timer = None;
        self.next_problem();
    }

    /// Register the next problem and kick off its hint animation. The very
    /// first problem of a session skips the animation and is answerable
    /// immediately.
    fn next_problem(&mut self) {
        let problem = self.source.next_problem();
        let id = self.session.add_problem(problem);
        self.input.clear();
        self.check_enabled = false;

        if self.session.entries().len() == 1 {
            self.phase = Phase::Answering;
            self.timer = None;
        } else {
            self.phase = Phase::Hint;
            self.timer = Some(PendingTimer {
                entry: id,
                kind: TimerKind::HintDone,
                remaining_ms: self.config.animation_ms,
            });
        }
    }

    fn is_valid_answer(text: &str) -> bool {
        text.trim().parse::<u64>().is_ok()
    }

    /// Recompute the check-action flag from the raw buffer. Always from
    /// scratch, never cached.
    fn refresh_check_action(&mut self) {
        self.check_enabled = Self::is_valid_answer(&self.input);
    }

    pub fn handle_char(&mut self, c: char) {
        if self.phase != Phase::Answering {
            return;
        }
        self.input.push(c);
        self.refresh_check_action();
    }

    pub fn backspace(&mut self) {
        if self.phase != Phase::Answering {
            return;
        }
        self.input.pop();
        self.refresh_check_action();
    }

    /// Compare the raw buffer against the current problem. Anything that is
    /// not a whole number is wrong, however close it reads. No-op when no
    /// problem is active or input is not live.
    pub fn check(&mut self) {
        let Some(entry) = self.session.current() else {
            return;
        };
        if self.phase != Phase::Answering {
            return;
        }
        let id = entry.id;
        let answer = entry.problem.answer;

        match self.input.trim().parse::<u64>() {
            Ok(given) if given == answer => {
                self.session.record_solved(id);
                self.check_enabled = false;
                self.phase = Phase::CorrectPause;
                self.timer = Some(PendingTimer {
                    entry: id,
                    kind: TimerKind::Advance,
                    remaining_ms: CORRECT_PAUSE_MS,
                });
            }
            _ => {
                self.check_enabled = false;
                self.phase = Phase::WrongFlash;
                self.timer = Some(PendingTimer {
                    entry: id,
                    kind: TimerKind::WrongReset,
                    remaining_ms: self.config.wrong_answer_ms,
                });
            }
        }
    }

    /// Advance the pending timer by one UI tick and apply its transition
    /// when it expires.
    pub fn on_tick(&mut self) {
        let Some(mut timer) = self.timer.take() else {
            return;
        };
        timer.remaining_ms = timer.remaining_ms.saturating_sub(TICK_RATE_MS);
        if timer.remaining_ms > 0 {
            self.timer = Some(timer);
            return;
        }

        // A timer started for a row that is no longer current is stale
        if self.session.current_id() != Some(timer.entry) {
            return;
        }

        match timer.kind {
            TimerKind::HintDone => {
                self.phase = Phase::Answering;
            }
            TimerKind::WrongReset => {
                self.input.clear();
                self.check_enabled = false;
                self.phase = Phase::Answering;
            }
            TimerKind::Advance => {
                if self.session.is_complete() {
                    self.phase = Phase::Complete;
                } else {
                    self.next_problem();
                }
            }
        }
    }

    /// 0.0..=1.0 progress of the hint animation; 1.0 outside `Hint`.
    pub fn hint_progress(&self) -> f64 {
        match (self.phase, self.timer) {
            (Phase::Hint, Some(timer)) if self.config.animation_ms > 0 => {
                1.0 - timer.remaining_ms as f64 / self.config.animation_ms as f64
            }
            _ => 1.0,
        }
    }

    pub fn entry_visual(&self, id: EntryId) -> Visual {
        if let Some(entry) = self.session.entries().iter().find(|e| e.id == id) {
            if entry.answered {
                return Visual::Correct;
            }
            if self.session.current_id() == Some(id) && self.phase == Phase::WrongFlash {
                return Visual::Wrong;
            }
        }
        Visual::Neutral
    }

    pub fn input_enabled(&self) -> bool {
        self.phase == Phase::Answering
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn is_animating(&self) -> bool {
        self.timer.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn check_enabled(&self) -> bool {
        self.check_enabled
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

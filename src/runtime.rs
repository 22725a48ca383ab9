use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::game::Game;
use crate::TICK_RATE_MS;

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum DrillEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait DrillEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<DrillEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(DrillEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(DrillEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DrillEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<DrillEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<DrillEvent>) -> Self {
        Self { rx }
    }
}

impl DrillEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Paces the event loop for one drill. Game timers count in steps of
/// `TICK_RATE_MS`, so the runner waits in the same cadence and decides,
/// from the game's state, whether a quiet interval matters.
pub struct Runner<E: DrillEventSource> {
    event_source: E,
    tick: Duration,
}

impl<E: DrillEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self::with_interval(event_source, Duration::from_millis(TICK_RATE_MS))
    }

    /// Custom wait interval, for tests that cannot sit through real ticks.
    pub fn with_interval(event_source: E, tick: Duration) -> Self {
        Self {
            event_source,
            tick,
        }
    }

    /// Block for the next event worth acting on. Terminal events pass
    /// through; a quiet interval surfaces as `Tick` only while the game has
    /// a timer in flight, so an idle drill blocks on input instead of
    /// redrawing a static screen.
    pub fn next_event(&self, game: &Game) -> DrillEvent {
        loop {
            match self.event_source.recv_timeout(self.tick) {
                Ok(ev) => return ev,
                Err(RecvTimeoutError::Disconnected) => return DrillEvent::Tick,
                Err(RecvTimeoutError::Timeout) => {
                    if game.is_animating() {
                        return DrillEvent::Tick;
                    }
                }
            }
        }
    }
}

// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod game;
pub mod problem;
pub mod runtime;
pub mod session;
pub mod ui;

/// UI tick interval; all game timers are advanced in these steps.
pub const TICK_RATE_MS: u64 = 100;

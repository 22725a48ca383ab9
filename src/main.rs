use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use kubik::{
    config::{ConfigStore, FileConfigStore, GameConfig},
    game::Game,
    problem::RandomSource,
    runtime::{CrosstermEventSource, DrillEvent, Runner},
};

/// Upper bound for the shared multiplier; the hint strip draws one cube per
/// unit, so anything past this is unreadable anyway.
const MAX_MULTIPLIER: u32 = 100;

/// terminal multiplication drill with animated cube hints
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal multiplication drill: solve a fixed quota of problems with one shared multiplier, with instant feedback and a cube hint animated for every new problem."
)]
pub struct Cli {
    /// multiplier shared by every problem
    #[clap(short = 'm', long)]
    multiplier: Option<u32>,

    /// number of problems to finish a game
    #[clap(short = 'n', long)]
    problems: Option<usize>,

    /// hint animation duration in milliseconds
    #[clap(long)]
    animation_ms: Option<u64>,

    /// how long the wrong-answer state stays up, in milliseconds
    #[clap(long)]
    wrong_ms: Option<u64>,
}

impl Cli {
    /// Overlay the flags that were given onto the stored config.
    fn apply(&self, mut cfg: GameConfig) -> GameConfig {
        if let Some(m) = self.multiplier {
            cfg.multiplier = m;
        }
        if let Some(n) = self.problems {
            cfg.total_problems = n;
        }
        if let Some(ms) = self.animation_ms {
            cfg.animation_ms = ms;
        }
        if let Some(ms) = self.wrong_ms {
            cfg.wrong_answer_ms = ms;
        }
        cfg
    }
}

/// Sanity-check the merged config (flags plus stored file) before play.
fn validate_config(cfg: &GameConfig) -> Result<(), String> {
    if cfg.multiplier == 0 || cfg.total_problems == 0 {
        return Err("multiplier and problem count must be at least 1".into());
    }
    if cfg.multiplier > MAX_MULTIPLIER {
        return Err(format!("multiplier must be at most {}", MAX_MULTIPLIER));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = cli.apply(FileConfigStore::new().load());
    if let Err(msg) = validate_config(&config) {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, msg).exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let source = RandomSource::new(config.multiplier);
    let mut game = Game::new(config, Box::new(source));
    let res = run(&mut terminal, &mut game);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());

    terminal.draw(|f| f.render_widget(&*game, f.area()))?;

    loop {
        // Ticks only arrive while a timer-driven transition is in flight,
        // so every event is worth a redraw
        match runner.next_event(&*game) {
            DrillEvent::Tick => {
                game.on_tick();
                terminal.draw(|f| f.render_widget(&*game, f.area()))?;
            }
            DrillEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*game, f.area()))?;
            }
            DrillEvent::Key(key) => {
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break;
                    }
                    KeyCode::Enter => {
                        if game.check_enabled() {
                            game.check();
                        }
                    }
                    KeyCode::Backspace => game.backspace(),
                    KeyCode::Char('r') if game.is_complete() => game.reset(),
                    KeyCode::Char(c) => game.handle_char(c),
                    _ => {}
                }
                terminal.draw(|f| f.render_widget(&*game, f.area()))?;
            }
        }
    }

    Ok(())
}

use std::{
    fs::File,
    io::{self, stdout, Stdout},
    path::Path,
    sync::Mutex,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use arena_tetris::{
    app::App, clock::FrameClock, config::Cli, game::Game, input::map_key, ui,
};

const FRAME_MS: u64 = 16;

type Term = Terminal<CrosstermBackend<Stdout>>;

fn init_logging(path: &Path, level: tracing::Level) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level())?;
    }

    let config = cli.game_config();
    info!(?config, "starting");
    let game = Game::new(&config);
    let mut app = App::new(game, cli.show_grid(), Box::new(FrameClock::new()));

    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    let result = run(&mut terminal, &mut app);

    // Always try to restore terminal state.
    restore_terminal().context("failed to restore terminal")?;
    result
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn run(terminal: &mut Term, app: &mut App) -> Result<()> {
    let frame = Duration::from_millis(FRAME_MS);

    loop {
        if app.take_redraw() {
            terminal.draw(|f| ui::render(f, app))?;
        }

        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = map_key(key) {
                        app.handle(action);
                    }
                }
                Event::Resize(_, _) => app.request_redraw(),
                _ => {}
            }
        }

        if app.should_quit() {
            info!(score = app.game.score(), "quit");
            return Ok(());
        }

        app.frame();
    }
}

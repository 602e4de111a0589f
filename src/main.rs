// netbubbles - live network connections as 3D bubbles in the terminal

mod app;
mod net;
mod scene;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::event::{handle_key_event, handle_mouse_event};
use app::{config, AppState, FeedConfig};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use net::feed::{FeedHandle, FeedPoller, HttpFeed};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_logging()?;

    let feed_config = FeedConfig::from_env();
    let source = HttpFeed::new(&feed_config.base_url, feed_config.timeout);
    tracing::info!(url = source.url(), "Starting netbubbles");
    let feed = FeedPoller::spawn(source, feed_config.poll_interval)
        .context("failed to start connection feed worker")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let mut app = AppState::new(&feed_config.base_url);
    let res = run_app(&mut terminal, &mut app, &feed);

    // Teardown: stop polling before releasing the terminal
    feed.shutdown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }
    Ok(())
}

/// Log to the file named by NETBUBBLES_LOG; stdout belongs to the TUI.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(config::LOG_FILE_ENV) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("cannot create log file {}", path.to_string_lossy()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    feed: &FeedHandle,
) -> Result<()> {
    loop {
        for event in feed.drain() {
            app.apply_feed_event(event);
        }
        app.on_tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if !app.running {
            return Ok(());
        }

        if event::poll(config::FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    handle_key_event(app, key.code);
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                _ => {}
            }
        }
    }
}

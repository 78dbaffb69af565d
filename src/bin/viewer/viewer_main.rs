//! Player main loop that can be called from strata.rs
//!
//! Terminal input is read on a plain thread and forwarded into the same
//! channel the typing timer delivers to, so the loop below is the only place
//! that mutates the app.
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io;
use std::thread;
use std::time::Duration;
use strata::playback::Player;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::app::{App, AppEvent};
use super::ui;

/// How often the input thread checks whether the player is gone
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the interactive player until the user quits
///
/// Playback starts immediately when `autoplay` is set.
pub async fn run_player(player: Player, autoplay: bool) -> io::Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let input = spawn_input_reader(tx.clone());
    let mut app = App::new(player, tx);

    // Setup terminal
    let raw_mode = RawModeGuard::enable()?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    if autoplay {
        app.play();
    }

    let result = run_app(&mut terminal, &mut app, rx).await;

    // Restore terminal
    raw_mode.restore()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    // run_app consumed the receiver, so the input thread sees a closed channel.
    if input.join().is_err() {
        tracing::warn!("input thread panicked");
    }

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut rx: UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    terminal.draw(|frame| ui::render(frame, app))?;

    while let Some(event) = rx.recv().await {
        let changed = match event {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Tick(ticket) => app.on_timer(ticket),
            // The next draw() picks up the new dimensions
            AppEvent::Resize => true,
        };

        if app.should_quit {
            break;
        }
        if changed {
            terminal.draw(|frame| ui::render(frame, app))?;
        }
    }
    Ok(())
}

/// Leaves raw mode when dropped, so a failed setup step cannot strand the
/// terminal in it
struct RawModeGuard<R: FnMut() -> io::Result<()>> {
    restore: Option<R>,
}

impl RawModeGuard<fn() -> io::Result<()>> {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard::new(disable_raw_mode as fn() -> io::Result<()>))
    }
}

impl<R: FnMut() -> io::Result<()>> RawModeGuard<R> {
    fn new(restore: R) -> Self {
        RawModeGuard {
            restore: Some(restore),
        }
    }

    /// Restore now, reporting the error instead of dropping it
    fn restore(mut self) -> io::Result<()> {
        match self.restore.take() {
            Some(mut restore) => restore(),
            None => Ok(()),
        }
    }
}

impl<R: FnMut() -> io::Result<()>> Drop for RawModeGuard<R> {
    fn drop(&mut self) {
        if let Some(mut restore) = self.restore.take() {
            if let Err(err) = restore() {
                tracing::warn!(%err, "leaving raw mode failed");
            }
        }
    }
}

/// Forward key presses and resizes into the event channel
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(err) => {
                    tracing::warn!(%err, "polling terminal input failed");
                    break;
                }
            }
            let forwarded = match event::read() {
                // Windows reports releases too; only presses are commands.
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(AppEvent::Key(key))
                }
                Ok(Event::Resize(_, _)) => tx.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::warn!(%err, "reading terminal input failed");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        }
    })
}

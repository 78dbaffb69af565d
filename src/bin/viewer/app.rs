//! Main application state and event handling
//!
//! The App struct brings together:
//! - Player (which layer is active, how much is typed, play state, speed)
//! - Revealer (tokens for the current frame, with the baseline memoized)
//! - TypingTimer (the one pending tick)
//! - Key handling for the playback commands

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strata::playback::{Player, Tick, TimerTicket, TypingTimer};
use strata::reveal::{RevealedToken, Revealer};
use tokio::sync::mpsc::UnboundedSender;

/// Everything the event loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick(TimerTicket),
}

/// The main application
pub struct App {
    pub player: Player,

    revealer: Revealer,

    timer: TypingTimer,

    /// Where timer firings are delivered
    events: UnboundedSender<AppEvent>,

    /// Tokens for the current state, recomputed after every change
    tokens: Vec<RevealedToken>,

    /// Last command error, shown in the info panel
    pub status: Option<String>,

    pub should_quit: bool,
}

impl App {
    pub fn new(player: Player, events: UnboundedSender<AppEvent>) -> Self {
        let mut app = App {
            player,
            revealer: Revealer::new(),
            timer: TypingTimer::new(),
            events,
            tokens: Vec::new(),
            status: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    pub fn tokens(&self) -> &[RevealedToken] {
        &self.tokens
    }

    #[cfg(test)]
    pub fn is_timer_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Start playback, as if space was pressed while paused
    pub fn play(&mut self) {
        self.player.play();
        self.reschedule();
        self.refresh();
    }

    /// Handle a keyboard event
    ///
    /// Returns whether the state changed (needed for re-rendering)
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.status = None;
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                self.quit();
                return true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit();
                return true;
            }
            KeyCode::Char(' ') => self.player.toggle(),
            KeyCode::Char('r') => self.player.reset(),
            KeyCode::Char('n') | KeyCode::Right => self.player.next(),
            KeyCode::Char('p') | KeyCode::Left => self.player.previous(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.player.faster(),
            KeyCode::Char('-') => self.player.slower(),
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                if let Err(err) = self.player.jump_to(index) {
                    self.status = Some(err.to_string());
                    return true;
                }
            }
            _ => return false,
        }
        self.reschedule();
        self.refresh();
        true
    }

    /// Handle a timer firing
    ///
    /// Firings from a timer that has since been restarted or cancelled are
    /// dropped, so they never touch the state of another layer or cursor.
    pub fn on_timer(&mut self, ticket: TimerTicket) -> bool {
        if !self.timer.is_current(ticket) {
            tracing::trace!(?ticket, "dropping stale tick");
            return false;
        }
        match self.player.tick() {
            Tick::Idle => {
                self.timer.cancel();
                false
            }
            Tick::Typed | Tick::Advanced | Tick::Finished => {
                self.reschedule();
                self.refresh();
                true
            }
        }
    }

    /// Cancel the pending tick and, while playing, start the next one
    fn reschedule(&mut self) {
        if self.player.is_playing() {
            self.timer
                .restart(self.player.next_delay(), self.events.clone(), AppEvent::Tick);
        } else {
            self.timer.cancel();
        }
    }

    fn refresh(&mut self) {
        self.tokens = self.player.frame(&mut self.revealer);
    }

    fn quit(&mut self) {
        self.timer.cancel();
        self.should_quit = true;
    }
}

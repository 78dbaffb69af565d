//! Player state machine
//!
//! The player owns the state the playback commands act on: which layer is
//! active, how much of it is typed, whether playback runs, and how fast. Timer
//! firings call [Player::tick], which advances the cursor by exactly one
//! character, or moves to the next layer once the current one is complete.
//! Cursor values are never skipped while playing.
//!
//! Completed layers form the baseline. Each contributes its code followed by a
//! newline (unless the code already ends with one).

use super::script::{DemoScript, Layer, ScriptError};
use super::{MAX_SPEED_MS, MIN_SPEED_MS, SPEED_STEP_MS};
use crate::highlight::Language;
use crate::reveal::{RevealedToken, Revealer};
use std::fmt;
use std::time::Duration;

/// Result of one timer firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Paused, nothing changed
    Idle,
    /// One more character of the current layer is visible
    Typed,
    /// The previous layer joined the baseline and the next one started
    Advanced,
    /// The last layer is complete and playback stopped
    Finished,
}

/// Errors from playback commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    LayerOutOfRange { index: usize, len: usize },
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::LayerOutOfRange { index, len } => {
                write!(f, "Layer {} out of range (script has {} layers)", index, len)
            }
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Playback state over a validated demo script
#[derive(Debug, Clone)]
pub struct Player {
    layers: Vec<Layer>,
    current: usize,
    cursor: usize,
    playing: bool,
    speed_ms: u64,
}

impl Player {
    /// Create a paused player at the start of the script
    ///
    /// The script is validated again, since one built by hand or deserialized
    /// directly may never have been checked.
    pub fn new(script: DemoScript) -> Result<Self, ScriptError> {
        script.validate()?;
        Ok(Player {
            layers: script.layers,
            current: 0,
            cursor: 0,
            playing: false,
            speed_ms: script.speed_ms,
        })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_layer(&self) -> &Layer {
        // A validated script has at least one layer and `current` stays in range.
        &self.layers[self.current]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Code of all completed layers
    pub fn baseline(&self) -> String {
        let mut baseline = String::new();
        for layer in &self.layers[..self.current] {
            baseline.push_str(&layer.code);
            if !layer.code.ends_with('\n') {
                baseline.push('\n');
            }
        }
        baseline
    }

    /// Code of the layer being typed
    pub fn fragment(&self) -> &str {
        &self.current_layer().code
    }

    pub fn language(&self) -> Language {
        self.current_layer().family()
    }

    fn fragment_len(&self) -> usize {
        self.current_layer().char_len()
    }

    fn is_last_layer(&self) -> bool {
        self.current + 1 == self.layers.len()
    }

    pub fn is_layer_complete(&self) -> bool {
        self.cursor >= self.fragment_len()
    }

    pub fn is_finished(&self) -> bool {
        self.is_last_layer() && self.is_layer_complete()
    }

    /// Characters visible so far, across all layers
    pub fn typed_chars(&self) -> usize {
        let done: usize = self.layers[..self.current].iter().map(Layer::char_len).sum();
        done + self.cursor
    }

    pub fn total_chars(&self) -> usize {
        self.layers.iter().map(Layer::char_len).sum()
    }

    /// Fraction of the current layer typed, in `0.0..=1.0`
    pub fn layer_progress(&self) -> f64 {
        let len = self.fragment_len();
        if len == 0 {
            1.0
        } else {
            self.cursor as f64 / len as f64
        }
    }

    /// Start or resume playback; a finished script starts over
    pub fn play(&mut self) {
        if self.is_finished() {
            self.current = 0;
            self.cursor = 0;
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Back to the first layer, nothing typed, paused
    pub fn reset(&mut self) {
        self.current = 0;
        self.cursor = 0;
        self.playing = false;
    }

    /// Skip to the start of the next layer; on the last layer, complete it
    pub fn next(&mut self) {
        if self.is_last_layer() {
            self.cursor = self.fragment_len();
        } else {
            self.current += 1;
            self.cursor = 0;
        }
        tracing::debug!(layer = self.current, "skipped forward");
    }

    /// Restart at the previous layer (or the first one)
    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
        self.cursor = 0;
        tracing::debug!(layer = self.current, "skipped back");
    }

    /// Start typing the layer at `index`; earlier layers become the baseline
    pub fn jump_to(&mut self, index: usize) -> Result<(), PlaybackError> {
        if index >= self.layers.len() {
            return Err(PlaybackError::LayerOutOfRange {
                index,
                len: self.layers.len(),
            });
        }
        self.current = index;
        self.cursor = 0;
        tracing::debug!(layer = index, "jumped to layer");
        Ok(())
    }

    /// Set milliseconds per character, clamped to the allowed range
    pub fn set_speed(&mut self, ms: u64) {
        self.speed_ms = ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS);
    }

    pub fn faster(&mut self) {
        self.set_speed(self.speed_ms.saturating_sub(SPEED_STEP_MS));
    }

    pub fn slower(&mut self) {
        self.set_speed(self.speed_ms + SPEED_STEP_MS);
    }

    /// Apply one timer firing
    pub fn tick(&mut self) -> Tick {
        if !self.playing {
            return Tick::Idle;
        }
        if !self.is_layer_complete() {
            self.cursor += 1;
            return Tick::Typed;
        }
        if self.is_last_layer() {
            self.playing = false;
            tracing::debug!("script finished");
            return Tick::Finished;
        }
        self.current += 1;
        self.cursor = 0;
        tracing::debug!(layer = self.current, id = %self.current_layer().id, "next layer");
        Tick::Advanced
    }

    /// How long the timer should wait before the next [tick](Player::tick)
    ///
    /// The typing speed while characters remain, the layer's pause once it is
    /// fully typed.
    pub fn next_delay(&self) -> Duration {
        if self.is_layer_complete() {
            self.current_layer().delay
        } else {
            self.speed()
        }
    }

    /// Tokens to draw for the current state
    pub fn frame(&self, revealer: &mut Revealer) -> Vec<RevealedToken> {
        revealer.reveal(&self.baseline(), self.fragment(), self.language(), self.cursor)
    }
}

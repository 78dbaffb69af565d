//! Driver side of the player
//!
//! The core ([crate::highlight], [crate::reveal]) is pure. Everything stateful
//! lives here:
//!
//! - [script]: the demo script (ordered layers plus typing speed), loaded from
//!   YAML. The built-in script is embedded from `defaults/demo.default.yaml`.
//! - [player]: the state machine the playback commands act on. It owns the
//!   active layer and cursor and hands `(baseline, fragment, cursor)` to the
//!   reveal engine.
//! - [timer]: the one pending tick. Restarting it cancels the previous one.

pub mod player;
pub mod script;
pub mod timer;

pub use player::{PlaybackError, Player, Tick};
pub use script::{DemoScript, Layer, ScriptError};
pub use timer::{TimerTicket, TypingTimer};

/// Fastest allowed typing speed, in milliseconds per character
pub const MIN_SPEED_MS: u64 = 5;
/// Slowest allowed typing speed, in milliseconds per character
pub const MAX_SPEED_MS: u64 = 500;
/// Amount `faster`/`slower` change the speed by
pub const SPEED_STEP_MS: u64 = 5;

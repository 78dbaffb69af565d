//! # strata
//!
//! Core of a layered code typing player. Source text is revealed one layer at a
//! time, character by character, with syntax colouring that stays stable while a
//! token is only partially typed.
//!
//! The crate is split in three parts:
//!
//! - [highlight]: a small rule-ordered tokenizer for a scripting (C-like) family
//!   and a markup (tag) family. Tokens always cover the source exactly.
//! - [reveal]: clips a token stream to a typing cursor and flags the token that
//!   is currently being typed.
//! - [playback]: the driver side. Demo scripts, the player state machine, and
//!   the single-owner typing timer.

pub mod highlight;
pub mod playback;
pub mod reveal;

pub use highlight::{tokenize, Language, Token, TokenKind};
pub use reveal::{reveal, RevealedToken};

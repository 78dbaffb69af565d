//! Demo scripts: the ordered layers a player types out
//!
//! A script is a YAML document:
//!
//! ```text
//! speed_ms: 35
//! layers:
//!   - id: imports
//!     language: typescript
//!     description: Pull in the pieces.
//!     delay_ms: 1200
//!     code: |
//!       import { x } from "./x";
//! ```
//!
//! `speed_ms` and `delay_ms` are optional. [DemoScript::builtin] returns the
//! script embedded from `defaults/demo.default.yaml`.

use super::{MAX_SPEED_MS, MIN_SPEED_MS};
use crate::highlight::Language;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_SCRIPT: &str = include_str!("../../defaults/demo.default.yaml");

const DEFAULT_SPEED_MS: u64 = 35;
const DEFAULT_LAYER_DELAY_MS: u64 = 1200;

/// One unit of source text, revealed as a whole
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Layer {
    pub id: String,
    pub code: String,
    /// Declared language name, resolved with [Language::from_name]
    pub language: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Pause after the layer is fully typed
    #[serde(
        rename = "delay_ms",
        default = "default_layer_delay",
        deserialize_with = "deserialize_millis"
    )]
    pub delay: Duration,
}

impl Layer {
    pub fn new(id: impl Into<String>, code: impl Into<String>, language: impl Into<String>) -> Self {
        Layer {
            id: id.into(),
            code: code.into(),
            language: language.into(),
            description: None,
            delay: default_layer_delay(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn family(&self) -> Language {
        Language::from_name(&self.language)
    }

    pub fn char_len(&self) -> usize {
        self.code.chars().count()
    }
}

fn default_layer_delay() -> Duration {
    Duration::from_millis(DEFAULT_LAYER_DELAY_MS)
}

fn default_speed() -> u64 {
    DEFAULT_SPEED_MS
}

fn deserialize_millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// An ordered list of layers and the typing speed to play them at
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoScript {
    /// Delay between typed characters, in milliseconds
    #[serde(default = "default_speed")]
    pub speed_ms: u64,
    pub layers: Vec<Layer>,
}

impl DemoScript {
    /// Build a script in code, validating it like a loaded one
    pub fn new(speed_ms: u64, layers: Vec<Layer>) -> Result<Self, ScriptError> {
        let script = DemoScript { speed_ms, layers };
        script.validate()?;
        Ok(script)
    }

    /// The script embedded in the binary
    pub fn builtin() -> Result<Self, ScriptError> {
        Self::from_yaml_str(DEFAULT_SCRIPT)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ScriptError> {
        let script: DemoScript = serde_yaml::from_str(source)?;
        script.validate()?;
        tracing::debug!(
            layers = script.layers.len(),
            speed_ms = script.speed_ms,
            "loaded demo script"
        );
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    /// Load `path` when given, the built-in script otherwise
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ScriptError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Check the script can be played: at least one layer, unique non-empty
    /// ids, speed within range
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.layers.is_empty() {
            return Err(ScriptError::Empty);
        }
        if !(MIN_SPEED_MS..=MAX_SPEED_MS).contains(&self.speed_ms) {
            return Err(ScriptError::SpeedOutOfRange(self.speed_ms));
        }
        let mut seen = HashSet::new();
        for (index, layer) in self.layers.iter().enumerate() {
            if layer.id.trim().is_empty() {
                return Err(ScriptError::EmptyLayerId(index));
            }
            if !seen.insert(layer.id.as_str()) {
                return Err(ScriptError::DuplicateLayer(layer.id.clone()));
            }
        }
        Ok(())
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }
}

/// Errors raised while loading or validating a demo script
#[derive(Debug)]
pub enum ScriptError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_yaml::Error),
    Empty,
    EmptyLayerId(usize),
    DuplicateLayer(String),
    SpeedOutOfRange(u64),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io { path, source } => {
                write!(f, "Cannot read script {}: {}", path.display(), source)
            }
            ScriptError::Parse(err) => write!(f, "Invalid script: {}", err),
            ScriptError::Empty => write!(f, "Script has no layers"),
            ScriptError::EmptyLayerId(index) => write!(f, "Layer {} has an empty id", index),
            ScriptError::DuplicateLayer(id) => write!(f, "Duplicate layer id: {}", id),
            ScriptError::SpeedOutOfRange(ms) => write!(
                f,
                "Typing speed {}ms is outside {}..={}ms",
                ms, MIN_SPEED_MS, MAX_SPEED_MS
            ),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io { source, .. } => Some(source),
            ScriptError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for ScriptError {
    fn from(err: serde_yaml::Error) -> Self {
        ScriptError::Parse(err)
    }
}

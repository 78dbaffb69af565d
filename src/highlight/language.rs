//! Language families and the tokenizer trait

use super::markup::MarkupTokenizer;
use super::script::ScriptTokenizer;
use super::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that turns source text into a covering token sequence
///
/// Implementations must be lossless: the concatenated token values equal the
/// input. They must never fail; unrecognised input degrades to `text`.
pub trait Tokenizer {
    fn tokenize(&self, source: &str) -> Vec<Token>;
}

/// Language family a layer is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C-like scripting syntax (JavaScript, TypeScript)
    Script,
    /// Tag syntax (HTML, XML)
    Markup,
    /// Unknown family, tokenized as a single `text` token
    #[default]
    Plain,
}

static SCRIPT_TOKENIZER: ScriptTokenizer = ScriptTokenizer;
static MARKUP_TOKENIZER: MarkupTokenizer = MarkupTokenizer;
static PLAIN_TOKENIZER: PlainTokenizer = PlainTokenizer;

impl Language {
    /// Resolve a language name, case-insensitively
    ///
    /// Never fails: names that belong to neither family resolve to `Plain`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" | "jsx" | "mjs" | "cjs" | "typescript" | "ts" | "tsx" => {
                Language::Script
            }
            "html" | "htm" | "xml" | "svg" | "xhtml" => Language::Markup,
            _ => Language::Plain,
        }
    }

    /// Resolve a language from a file extension, `None` when there is none
    pub fn from_extension(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Language::from_name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::Script => "script",
            Language::Markup => "markup",
            Language::Plain => "plain",
        }
    }

    pub fn tokenizer(self) -> &'static dyn Tokenizer {
        match self {
            Language::Script => &SCRIPT_TOKENIZER,
            Language::Markup => &MARKUP_TOKENIZER,
            Language::Plain => &PLAIN_TOKENIZER,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tokenizer for the unknown family: one `text` token, or nothing for empty input
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&self, source: &str) -> Vec<Token> {
        if source.is_empty() {
            return Vec::new();
        }
        vec![Token::new(TokenKind::Text, source)]
    }
}

//! Token types shared by the tokenizers and the reveal engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical category of a token
///
/// `Function` covers both function identifiers and markup tag names, and
/// `Variable` is reserved for well-known globals (`console`, `Math`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Keyword,
    String,
    Comment,
    Function,
    Number,
    Operator,
    Variable,
    Tag,
    Attribute,
    Text,
}

impl TokenKind {
    /// Lowercase category name, as used in dumps and JSON output
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Function => "function",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Variable => "variable",
            TokenKind::Tag => "tag",
            TokenKind::Attribute => "attribute",
            TokenKind::Text => "text",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, contiguous piece of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Token {
            kind,
            value: value.into(),
        }
    }

    /// Length of the value in characters (the unit the reveal cursor counts in)
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.value)
    }
}

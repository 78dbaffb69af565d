//! Tokenizer for tag syntax
//!
//! Text outside tags is emitted as one `text` token per run. A tag is the span
//! from a `<` to the first `>` after it; a `<` with no `>` anywhere after it is
//! literal text. Inside a tag:
//!
//! ```text
//! <div class="a" hidden>
//! ^ ^^^ ^^^^^=^^^ ^^^^^^^
//! | |   |    | |  |     |
//! | |   |    | |  text  tag
//! | |   |    | string
//! | |   |    operator
//! | |   attribute
//! | function
//! tag
//! ```
//!
//! Whitespace and anything that is not a `name="value"` pair between the tag
//! name and the closing bracket is emitted as `text`.

use super::language::Tokenizer;
use super::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(=)("[^"]*"|'[^']*')"#).unwrap()
});

/// Tokenizer for the markup family
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupTokenizer;

impl Tokenizer for MarkupTokenizer {
    fn tokenize(&self, source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut text_start = 0;
        let mut pos = 0;

        while let Some(open) = source[pos..].find('<').map(|i| pos + i) {
            // No '>' after this '<' means none after any later '<' either.
            let Some(close) = source[open + 1..].find('>').map(|i| open + 1 + i) else {
                break;
            };

            push_text(&mut tokens, &source[text_start..open]);
            push_tag(&mut tokens, &source[open + 1..close]);

            pos = close + 1;
            text_start = pos;
        }

        push_text(&mut tokens, &source[text_start..]);
        tokens
    }
}

fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if !text.is_empty() {
        tokens.push(Token::new(TokenKind::Text, text));
    }
}

/// Emit the tokens of one tag; `inner` is the content between `<` and `>`
fn push_tag(tokens: &mut Vec<Token>, inner: &str) {
    tokens.push(Token::new(TokenKind::Tag, "<"));

    let name_end = inner.find(char::is_whitespace).unwrap_or(inner.len());
    let (name, rest) = inner.split_at(name_end);
    if !name.is_empty() {
        tokens.push(Token::new(TokenKind::Function, name));
    }

    let mut last = 0;
    for caps in ATTRIBUTE_REGEX.captures_iter(rest) {
        let (Some(whole), Some(attr), Some(eq), Some(value)) =
            (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };
        push_text(tokens, &rest[last..whole.start()]);
        tokens.push(Token::new(TokenKind::Attribute, attr.as_str()));
        tokens.push(Token::new(TokenKind::Operator, eq.as_str()));
        tokens.push(Token::new(TokenKind::String, value.as_str()));
        last = whole.end();
    }
    push_text(tokens, &rest[last..]);

    tokens.push(Token::new(TokenKind::Tag, ">"));
}

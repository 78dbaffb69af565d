//! Incremental reveal of a token stream
//!
//! The reveal engine answers one question per tick: given the text that is
//! already shown (the baseline), the text being typed (the fragment) and how
//! many characters of the fragment have been typed (the cursor), which tokens
//! should be drawn and how much of each?
//!
//! Baseline and fragment are tokenized independently. Baseline tokens are always
//! shown in full. Each fragment token spans `[start, end)` in characters of the
//! fragment and is:
//!
//!     hidden       when cursor <= start  (value is empty)
//!     shown        when cursor >= end
//!     in progress  otherwise             (value is the typed prefix)
//!
//! So at most one token is in progress, and the visible text is always
//! `baseline + fragment[..cursor]`.
//!
//! Cursors past the end of the fragment are clamped.

use crate::highlight::{tokenize, Language, Token, TokenKind};
use serde::Serialize;

/// Which input a revealed token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Baseline,
    Fragment,
}

/// A token clipped to the typing cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedToken {
    pub kind: TokenKind,
    /// Visible part of the token; empty while the token is hidden
    pub value: String,
    pub origin: Origin,
    /// True for the single fragment token the cursor is inside of
    pub in_progress: bool,
}

impl RevealedToken {
    fn shown(token: Token, origin: Origin) -> Self {
        RevealedToken {
            kind: token.kind,
            value: token.value,
            origin,
            in_progress: false,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.value.is_empty()
    }
}

/// Reveal `fragment` up to `cursor` characters after `baseline`
///
/// Both inputs are tokenized with the scripting family.
pub fn reveal(baseline: &str, fragment: &str, cursor: usize) -> Vec<RevealedToken> {
    reveal_as(baseline, fragment, Language::Script, cursor)
}

/// Like [reveal], but tokenizing the fragment with its own language family
///
/// The baseline is committed code and is always tokenized as a script.
pub fn reveal_as(
    baseline: &str,
    fragment: &str,
    language: Language,
    cursor: usize,
) -> Vec<RevealedToken> {
    let mut out: Vec<RevealedToken> = tokenize(baseline, Language::Script)
        .into_iter()
        .map(|token| RevealedToken::shown(token, Origin::Baseline))
        .collect();
    clip_fragment(tokenize(fragment, language), cursor, &mut out);
    out
}

/// Concatenate the visible values of revealed tokens
pub fn visible_text(tokens: &[RevealedToken]) -> String {
    tokens.iter().map(|token| token.value.as_str()).collect()
}

/// Clamp a cursor to `[0, len]`, logging when it was out of range
fn clamp_cursor(cursor: usize, len: usize) -> usize {
    if cursor > len {
        tracing::warn!(cursor, len, "reveal cursor past end of fragment, clamping");
        len
    } else {
        cursor
    }
}

fn clip_fragment(fragment_tokens: Vec<Token>, cursor: usize, out: &mut Vec<RevealedToken>) {
    let total: usize = fragment_tokens.iter().map(Token::char_len).sum();
    let cursor = clamp_cursor(cursor, total);

    let mut start = 0;
    for token in fragment_tokens {
        let len = token.char_len();
        let end = start + len;

        let revealed = if cursor <= start {
            RevealedToken {
                kind: token.kind,
                value: String::new(),
                origin: Origin::Fragment,
                in_progress: false,
            }
        } else if cursor >= end {
            RevealedToken::shown(token, Origin::Fragment)
        } else {
            RevealedToken {
                kind: token.kind,
                value: token.value.chars().take(cursor - start).collect(),
                origin: Origin::Fragment,
                in_progress: true,
            }
        };

        out.push(revealed);
        start = end;
    }
}

/// Reveal engine with a memoized baseline
///
/// The baseline only changes when a layer completes, while the fragment is
/// re-clipped on every tick. This keeps the tokenization of the last baseline
/// and reuses it while the baseline text is unchanged.
#[derive(Debug, Default)]
pub struct Revealer {
    baseline: Option<(String, Vec<Token>)>,
}

impl Revealer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reveal(
        &mut self,
        baseline: &str,
        fragment: &str,
        language: Language,
        cursor: usize,
    ) -> Vec<RevealedToken> {
        let mut out: Vec<RevealedToken> = self
            .baseline_tokens(baseline)
            .iter()
            .cloned()
            .map(|token| RevealedToken::shown(token, Origin::Baseline))
            .collect();
        clip_fragment(tokenize(fragment, language), cursor, &mut out);
        out
    }

    fn baseline_tokens(&mut self, baseline: &str) -> &[Token] {
        let stale = !matches!(&self.baseline, Some((text, _)) if text == baseline);
        if stale {
            tracing::debug!(len = baseline.len(), "tokenizing new baseline");
            self.baseline = Some((baseline.to_string(), tokenize(baseline, Language::Script)));
        }
        match &self.baseline {
            Some((_, tokens)) => tokens,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment_values(tokens: &[RevealedToken]) -> Vec<(&str, bool)> {
        tokens
            .iter()
            .filter(|t| t.origin == Origin::Fragment)
            .map(|t| (t.value.as_str(), t.in_progress))
            .collect()
    }

    #[test]
    fn test_reveal_at_token_boundary() {
        let tokens = reveal("const x=1;", "let y=2;", 4);

        assert_eq!(visible_text(&tokens), "const x=1;let ");
        let baseline: Vec<&str> = tokens
            .iter()
            .filter(|t| t.origin == Origin::Baseline)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(baseline, vec!["const", " ", "x", "=", "1", ";"]);
        assert_eq!(
            fragment_values(&tokens),
            vec![
                ("let", false),
                (" ", false),
                ("", false),
                ("", false),
                ("", false),
                ("", false),
            ]
        );
    }

    #[test]
    fn test_reveal_inside_token_marks_in_progress() {
        let tokens = reveal("", "const", 2);
        assert_eq!(fragment_values(&tokens), vec![("co", true)]);
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
    }

    #[test]
    fn test_reveal_zero_and_full() {
        let hidden = reveal("a", "b + c", 0);
        assert_eq!(visible_text(&hidden), "a");
        assert!(hidden
            .iter()
            .filter(|t| t.origin == Origin::Fragment)
            .all(RevealedToken::is_hidden));

        let full = reveal("a", "b + c", 5);
        assert_eq!(visible_text(&full), "ab + c");
        assert!(full.iter().all(|t| !t.in_progress));
    }

    #[test]
    fn test_cursor_past_end_is_clamped() {
        let tokens = reveal("", "let", 99);
        assert_eq!(visible_text(&tokens), "let");
        assert!(!tokens[0].in_progress);
    }

    #[test]
    fn test_empty_fragment_is_baseline_only() {
        let tokens = reveal("let a;", "", 0);
        let expected: Vec<RevealedToken> = tokenize("let a;", Language::Script)
            .into_iter()
            .map(|t| RevealedToken::shown(t, Origin::Baseline))
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_cursor_counts_characters() {
        let tokens = reveal("", "'héllo'", 3);
        assert_eq!(visible_text(&tokens), "'hé");
        assert!(tokens[0].in_progress);
    }

    #[test]
    fn test_markup_fragment_after_script_baseline() {
        let tokens = reveal_as("const a = 1;\n", "<p>", Language::Markup, 2);
        assert_eq!(visible_text(&tokens), "const a = 1;\n<p");
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Tag);
        assert!(last.is_hidden());
    }

    #[test]
    fn test_revealer_matches_free_function() {
        let mut revealer = Revealer::new();
        for cursor in 0..=8 {
            assert_eq!(
                revealer.reveal("const x=1;", "let y=2;", Language::Script, cursor),
                reveal("const x=1;", "let y=2;", cursor)
            );
        }
        // Baseline change invalidates the memo.
        assert_eq!(
            visible_text(&revealer.reveal("var z;", "", Language::Script, 0)),
            "var z;"
        );
    }
}

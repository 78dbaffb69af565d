//! Syntax tokenization for display
//!
//!     Tokens here are a display concern: each one is a classified, contiguous
//!     substring of the source. No parsing happens, and no input is ever rejected.
//!     Whatever the tokenizer cannot classify falls back to `text`.
//!
//! Families
//!
//!     Script:
//!         C-like scripting syntax. An ordered list of regex rules is tried at each
//!         scan position and the first rule that matches wins. See [script].
//!
//!     Markup:
//!         Tag syntax. `<...>` spans are split into brackets, tag name, attribute
//!         names, values and the text between them. See [markup].
//!
//!     Plain:
//!         Anything else. The whole source becomes a single `text` token.
//!
//! Coverage
//!
//!     For every source string and family, concatenating the token values gives
//!     back the source exactly. [detokenize] does that concatenation.

pub mod language;
pub mod markup;
pub mod script;
pub mod token;

pub use language::{Language, PlainTokenizer, Tokenizer};
pub use markup::MarkupTokenizer;
pub use script::ScriptTokenizer;
pub use token::{Token, TokenKind};

/// Tokenize `source` with the tokenizer of the given language family
pub fn tokenize(source: &str, language: Language) -> Vec<Token> {
    language.tokenizer().tokenize(source)
}

/// Tokenize `source` for a language given by name (`"typescript"`, `"html"`, ...)
///
/// Unknown names fall back to the plain family.
pub fn tokenize_named(source: &str, language: &str) -> Vec<Token> {
    tokenize(source, Language::from_name(language))
}

/// Concatenate token values back into source text
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.value.as_str()).collect()
}

/// Render tokens one per line, as `kind "value"`
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&token.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_has_no_tokens() {
        assert!(tokenize("", Language::Script).is_empty());
        assert!(tokenize("", Language::Markup).is_empty());
        assert!(tokenize("", Language::Plain).is_empty());
    }

    #[test]
    fn test_named_language_dispatch() {
        let tokens = tokenize_named("let a", "TypeScript");
        assert_eq!(tokens[0], Token::new(TokenKind::Keyword, "let"));

        let tokens = tokenize_named("let a", "cobol");
        assert_eq!(tokens, vec![Token::new(TokenKind::Text, "let a")]);
    }

    #[test]
    fn test_detokenize_round_trip() {
        let source = "function f() { return 1; } // done";
        assert_eq!(detokenize(&tokenize(source, Language::Script)), source);
    }

    #[test]
    fn test_format_tokens() {
        let tokens = tokenize("x = 1", Language::Script);
        assert_eq!(
            format_tokens(&tokens),
            "text \"x\"\ntext \" \"\noperator \"=\"\ntext \" \"\nnumber \"1\"\n"
        );
    }
}

//! Rule-ordered tokenizer for C-like scripting syntax
//!
//! At every scan position the rules below are tried in order, each anchored at
//! the position, and the first match wins:
//!
//! 1. line comment `// ...` (up to, not including, the newline)
//! 2. block comment `/* ... */` (to the end of input when unterminated)
//! 3. reserved keyword
//! 4. well-known global identifier
//! 5. quoted string (`"`, `'` or `` ` ``, escapes honoured)
//! 6. decimal integer
//! 7. single-character operator or punctuation
//!
//! When nothing matches, one fallback unit is consumed as `text`. At a word
//! character the unit is the whole identifier, so keywords are never found in
//! the middle of a word. Adjacent fallback units merge into one `text` token as
//! long as they are both whitespace or both non-whitespace.

use super::language::Tokenizer;
use super::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Reserved words classified as `keyword`
pub const KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "import", "export",
    "default", "from", "class", "extends", "new", "this", "async", "await", "try", "catch",
    "throw",
];

/// Well-known globals classified as `variable`
pub const GLOBALS: &[&str] = &[
    "console", "window", "document", "Math", "Array", "Object", "String", "Number", "Boolean",
];

/// Characters classified as `operator`
pub const OPERATORS: &str = "=+-*/%<>!&|?:;,{}()[]";

/// Characters that open a string literal
const QUOTES: &str = "\"'`";

/// A single anchored pattern and the kind it produces
struct Rule {
    kind: TokenKind,
    regex: Regex,
}

impl Rule {
    fn new(kind: TokenKind, pattern: &str) -> Self {
        // Patterns are fixed at compile time; a bad one is a programming error.
        let regex = Regex::new(&format!("^(?:{})", pattern))
            .unwrap_or_else(|e| panic!("invalid {} rule pattern: {}", kind, e));
        Rule { kind, regex }
    }

    fn words(kind: TokenKind, words: &[&str]) -> Self {
        let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
        Rule::new(kind, &format!(r"(?:{})\b", alternatives.join("|")))
    }

    /// Length in bytes of the match at the start of `rest`, if any
    fn match_len(&self, rest: &str) -> Option<usize> {
        self.regex
            .find(rest)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

/// Rules in priority order, highest first
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(TokenKind::Comment, r"//[^\n]*"),
        Rule::new(TokenKind::Comment, r"(?s)/\*.*?(?:\*/|\z)"),
        Rule::words(TokenKind::Keyword, KEYWORDS),
        Rule::words(TokenKind::Variable, GLOBALS),
        Rule::new(
            TokenKind::String,
            r#"(?s)"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|`(?:[^`\\]|\\.)*`"#,
        ),
        Rule::new(TokenKind::Number, r"[0-9]+\b"),
        Rule::new(TokenKind::Operator, &format!("[{}]", regex::escape(OPERATORS))),
    ]
});

/// Tokenizer for the scripting family
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptTokenizer;

impl Tokenizer for ScriptTokenizer {
    fn tokenize(&self, source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut fallback = FallbackRun::default();
        // Once a quote finds no closer, no later quote of the same kind can
        // either, so the string rule is not retried for it.
        let mut open_quotes: Vec<char> = Vec::new();
        let mut pos = 0;

        while pos < source.len() {
            let rest = &source[pos..];
            let quote = rest.chars().next().filter(|c| QUOTES.contains(*c));
            let skip_strings = quote.is_some_and(|q| open_quotes.contains(&q));

            if let Some((kind, len)) = match_rules(rest, skip_strings) {
                fallback.flush_into(&mut tokens);
                tokens.push(Token::new(kind, &rest[..len]));
                pos += len;
                continue;
            }

            if let Some(q) = quote {
                if !open_quotes.contains(&q) {
                    open_quotes.push(q);
                }
            }
            let len = fallback_unit_len(rest);
            fallback.push(&rest[..len], &mut tokens);
            pos += len;
        }

        fallback.flush_into(&mut tokens);
        tokens
    }
}

fn match_rules(rest: &str, skip_strings: bool) -> Option<(TokenKind, usize)> {
    RULES
        .iter()
        .filter(|rule| !(skip_strings && rule.kind == TokenKind::String))
        .find_map(|rule| rule.match_len(rest).map(|len| (rule.kind, len)))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Byte length of the next fallback unit: a whole identifier, or one character
fn fallback_unit_len(rest: &str) -> usize {
    let mut chars = rest.char_indices();
    let Some((_, first)) = chars.next() else {
        return 0;
    };
    if !is_word_char(first) {
        return first.len_utf8();
    }
    chars
        .find(|&(_, c)| !is_word_char(c))
        .map(|(idx, _)| idx)
        .unwrap_or(rest.len())
}

/// Accumulates unclassified text until a rule matches or the class changes
#[derive(Debug, Default)]
struct FallbackRun {
    text: String,
    whitespace: bool,
}

impl FallbackRun {
    fn push(&mut self, unit: &str, tokens: &mut Vec<Token>) {
        let whitespace = unit.chars().all(char::is_whitespace);
        if !self.text.is_empty() && whitespace != self.whitespace {
            self.flush_into(tokens);
        }
        self.whitespace = whitespace;
        self.text.push_str(unit);
    }

    fn flush_into(&mut self, tokens: &mut Vec<Token>) {
        if !self.text.is_empty() {
            tokens.push(Token::new(TokenKind::Text, std::mem::take(&mut self.text)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(TokenKind, String)> {
        ScriptTokenizer
            .tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect()
    }

    fn tok(kind: TokenKind, value: &str) -> (TokenKind, String) {
        (kind, value.to_string())
    }

    #[test]
    fn test_declaration() {
        use TokenKind::*;
        assert_eq!(
            lex("const x = 5;"),
            vec![
                tok(Keyword, "const"),
                tok(Text, " "),
                tok(Text, "x"),
                tok(Text, " "),
                tok(Operator, "="),
                tok(Text, " "),
                tok(Number, "5"),
                tok(Operator, ";"),
            ]
        );
    }

    #[test]
    fn test_line_comment_stops_at_newline() {
        use TokenKind::*;
        assert_eq!(
            lex("// hi\nx"),
            vec![tok(Comment, "// hi"), tok(Text, "\n"), tok(Text, "x")]
        );
    }

    #[test]
    fn test_comments_win_over_operators() {
        use TokenKind::*;
        assert_eq!(
            lex("a /* b */ / c"),
            vec![
                tok(Text, "a"),
                tok(Text, " "),
                tok(Comment, "/* b */"),
                tok(Text, " "),
                tok(Operator, "/"),
                tok(Text, " "),
                tok(Text, "c"),
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        assert_eq!(
            lex("x /* open\nstill"),
            vec![
                tok(TokenKind::Text, "x"),
                tok(TokenKind::Text, " "),
                tok(TokenKind::Comment, "/* open\nstill"),
            ]
        );
    }

    #[test]
    fn test_block_comment_is_non_greedy() {
        let tokens = lex("/* a */ b /* c */");
        assert_eq!(tokens[0], tok(TokenKind::Comment, "/* a */"));
        assert_eq!(tokens[4], tok(TokenKind::Comment, "/* c */"));
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        use TokenKind::*;
        assert_eq!(lex("constant"), vec![tok(Text, "constant")]);
        assert_eq!(lex("xlet"), vec![tok(Text, "xlet")]);
        assert_eq!(lex("returns"), vec![tok(Text, "returns")]);
        assert_eq!(
            lex("return;"),
            vec![tok(Keyword, "return"), tok(Operator, ";")]
        );
    }

    #[test]
    fn test_globals() {
        use TokenKind::*;
        assert_eq!(
            lex("console.log(Math)"),
            vec![
                tok(Variable, "console"),
                tok(Text, ".log"),
                tok(Operator, "("),
                tok(Variable, "Math"),
                tok(Operator, ")"),
            ]
        );
    }

    #[test]
    fn test_strings_with_escaped_delimiters() {
        use TokenKind::*;
        assert_eq!(lex(r#""a\"b""#), vec![tok(String, r#""a\"b""#)]);
        assert_eq!(lex(r"'it\'s'"), vec![tok(String, r"'it\'s'")]);
        assert_eq!(lex("`x ${y}`"), vec![tok(String, "`x ${y}`")]);
    }

    #[test]
    fn test_strings_do_not_swallow_keywords_outside() {
        use TokenKind::*;
        assert_eq!(
            lex("'a' + 'b'"),
            vec![
                tok(String, "'a'"),
                tok(Text, " "),
                tok(Operator, "+"),
                tok(Text, " "),
                tok(String, "'b'"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_falls_back_to_text() {
        use TokenKind::*;
        assert_eq!(
            lex("'abc"),
            vec![tok(Text, "'abc")]
        );
        assert_eq!(
            lex("\"x\\"),
            vec![tok(Text, "\"x\\")]
        );
    }

    #[test]
    fn test_open_quote_does_not_block_other_quote_kinds() {
        use TokenKind::*;
        assert_eq!(
            lex("'x \"y\" 'z"),
            vec![
                tok(Text, "'x"),
                tok(Text, " "),
                tok(String, "\"y\""),
                tok(Text, " "),
                tok(Text, "'z"),
            ]
        );
    }

    #[test]
    fn test_many_unmatched_quotes_are_one_text_token() {
        // Every quote is escaped, so none of them ever closes
        let source = r"\'".repeat(20_000);
        let tokens = ScriptTokenizer.tokenize(&source);
        assert_eq!(tokens, vec![Token::new(TokenKind::Text, source.clone())]);
    }

    #[test]
    fn test_numbers_are_word_bounded() {
        use TokenKind::*;
        assert_eq!(lex("42"), vec![tok(Number, "42")]);
        assert_eq!(lex("4px"), vec![tok(Text, "4px")]);
        assert_eq!(lex("x1"), vec![tok(Text, "x1")]);
        assert_eq!(
            lex("3.14"),
            vec![tok(Number, "3"), tok(Text, "."), tok(Number, "14")]
        );
    }

    #[test]
    fn test_all_operators() {
        for c in OPERATORS.chars() {
            let source = c.to_string();
            // A lone '/' is not a comment; it must classify as an operator.
            assert_eq!(lex(&source), vec![(TokenKind::Operator, source.clone())]);
        }
    }

    #[test]
    fn test_fallback_runs_merge_by_class() {
        use TokenKind::*;
        assert_eq!(
            lex("a.b  @c"),
            vec![tok(Text, "a.b"), tok(Text, "  "), tok(Text, "@c")]
        );
    }

    #[test]
    fn test_non_ascii_text() {
        use TokenKind::*;
        assert_eq!(
            lex("let é = 'ü';"),
            vec![
                tok(Keyword, "let"),
                tok(Text, " "),
                tok(Text, "é"),
                tok(Text, " "),
                tok(Operator, "="),
                tok(Text, " "),
                tok(String, "'ü'"),
                tok(Operator, ";"),
            ]
        );
    }
}

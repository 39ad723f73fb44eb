//! Escaped-source grammar.
//!
//! Decoding runs in three fixed passes:
//!
//! 1. Lex: every run of four quotes becomes a [`Token::Quad`] placeholder,
//!    matched left to right without overlap. The placeholder is a token, not
//!    text, so it cannot collide with anything in the cell.
//! 2. Variant rule over the remaining characters (`@` -> `"`, or `""` -> `"`).
//!    A `""` pair never spans a `Quad`.
//! 3. Render: each `Quad` becomes two literal quotes.
//!
//! The doubled variant then strips one leading and one trailing quote.

use crate::QuoteError;

const QUOTE: char = '"';
const SENTINEL: char = '@';
const QUAD: [char; 4] = [QUOTE; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Quad,
    Char(char),
}

fn lex(escaped: &str) -> Vec<Token> {
    let chars: Vec<char> = escaped.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i..].starts_with(&QUAD) {
            tokens.push(Token::Quad);
            i += QUAD.len();
        } else {
            tokens.push(Token::Char(chars[i]));
            i += 1;
        }
    }
    tokens
}

fn render(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.len());
    for t in tokens {
        match t {
            Token::Quad => {
                out.push(QUOTE);
                out.push(QUOTE);
            }
            Token::Char(c) => out.push(*c),
        }
    }
    out
}

/// Decode a sentinel-escaped cell (TradeStation convention).
///
/// `""""` -> `""`, then every `@` -> `"`. Other quotes pass through.
pub fn decode_sentinel(escaped: &str) -> String {
    let tokens: Vec<Token> = lex(escaped)
        .into_iter()
        .map(|t| match t {
            Token::Char(SENTINEL) => Token::Char(QUOTE),
            other => other,
        })
        .collect();
    render(&tokens)
}

/// Decode a doubled-quote cell (TradingView convention).
///
/// `""""` -> `""`, then `""` -> `"`, then one wrapper quote is removed from
/// each end if present.
pub fn decode_doubled(escaped: &str) -> String {
    let lexed = lex(escaped);
    let mut tokens = Vec::with_capacity(lexed.len());
    let mut i = 0;
    while i < lexed.len() {
        if lexed[i] == Token::Char(QUOTE) && lexed.get(i + 1) == Some(&Token::Char(QUOTE)) {
            tokens.push(Token::Char(QUOTE));
            i += 2;
        } else {
            tokens.push(lexed[i]);
            i += 1;
        }
    }
    strip_wrapper(render(&tokens))
}

fn strip_wrapper(mut s: String) -> String {
    if s.starts_with(QUOTE) {
        s.remove(0);
    }
    if s.ends_with(QUOTE) {
        s.pop();
    }
    s
}

/// Inverse of [`decode_sentinel`].
///
/// Each pair of quotes in a run becomes `""""`; an odd quote left over
/// becomes `@`. Raw text containing `@` is rejected.
pub fn encode_sentinel(raw: &str) -> Result<String, QuoteError> {
    if let Some(offset) = raw.find(SENTINEL) {
        return Err(QuoteError::SentinelInRaw { offset });
    }

    let mut out = String::with_capacity(raw.len() + 8);
    let mut run = 0usize;
    for c in raw.chars() {
        if c == QUOTE {
            run += 1;
            continue;
        }
        flush_sentinel_run(&mut out, run);
        run = 0;
        out.push(c);
    }
    flush_sentinel_run(&mut out, run);
    Ok(out)
}

fn flush_sentinel_run(out: &mut String, run: usize) {
    for _ in 0..run / 2 {
        out.extend(QUAD);
    }
    if run % 2 == 1 {
        out.push(SENTINEL);
    }
}

/// Inverse of the doubled decoding body: every quote is doubled.
///
/// No wrapper is added. Decoding strips a leading/trailing quote, so only raw
/// text that neither starts nor ends with a quote survives a body round trip.
pub fn encode_doubled(raw: &str) -> String {
    raw.replace(QUOTE, "\"\"")
}

/// [`encode_doubled`] plus one wrapper quote on each end: the form a sheet
/// formula produces. Round-trips through [`decode_doubled`] for all text
/// except a non-empty run made only of quotes.
pub fn wrap_doubled(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() * 2 + 2);
    out.push(QUOTE);
    out.push_str(&encode_doubled(raw));
    out.push(QUOTE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_is_left_to_right_non_overlapping() {
        assert_eq!(lex("\"\"\"\"\""), vec![Token::Quad, Token::Char('"')]);
        assert_eq!(
            lex("a\"\"\"\"\"\"\"\"b"),
            vec![Token::Char('a'), Token::Quad, Token::Quad, Token::Char('b')]
        );
        assert_eq!(lex("\"\"\""), vec![Token::Char('"'); 3]);
    }

    #[test]
    fn sentinel_basic() {
        assert_eq!(decode_sentinel("Print(@hello@);"), r#"Print("hello");"#);
        assert_eq!(decode_sentinel(r#"x = """";"#), r#"x = "";"#);
        // lone quotes are not part of the convention and pass through
        assert_eq!(decode_sentinel(r#"a"b"#), r#"a"b"#);
    }

    #[test]
    fn quad_resolves_before_sentinel() {
        // the two quotes rendered from a quad must not be re-read later
        assert_eq!(decode_sentinel("@\"\"\"\""), "\"\"\"");
        assert_eq!(decode_sentinel("\"\"\"\"@"), "\"\"\"");
        assert_eq!(decode_sentinel("@\"\"\"\"\""), "\"\"\"\"");
    }

    #[test]
    fn doubled_basic() {
        assert_eq!(decode_doubled(r#""plot(close, title=""c"")""#), r#"plot(close, title="c")"#);
        // wrapper + quad + wrapper
        assert_eq!(decode_doubled("\"s = \"\"\"\"\""), "s = \"\"");
    }

    #[test]
    fn doubled_pairs_do_not_span_quads() {
        // six quotes: quad + pair -> three quotes
        assert_eq!(decode_doubled("x\"\"\"\"\"\"x"), "x\"\"\"x");
        // three quotes: pair + single -> two quotes
        assert_eq!(decode_doubled("x\"\"\"x"), "x\"\"x");
    }

    #[test]
    fn wrapper_strip_is_single_char_each_side() {
        assert_eq!(decode_doubled(r#""abc""#), "abc");
        assert_eq!(decode_doubled("abc"), "abc");
        assert_eq!(decode_doubled("\""), "");
        assert_eq!(decode_doubled(""), "");
    }

    #[test]
    fn encode_sentinel_runs() {
        assert_eq!(encode_sentinel("").unwrap(), "");
        assert_eq!(encode_sentinel("\"").unwrap(), "@");
        assert_eq!(encode_sentinel("\"\"").unwrap(), "\"\"\"\"");
        assert_eq!(encode_sentinel("\"\"\"").unwrap(), "\"\"\"\"@");
        assert_eq!(encode_sentinel("a\"\"\"\"b").unwrap(), "a\"\"\"\"\"\"\"\"b");
    }

    #[test]
    fn encode_sentinel_rejects_at() {
        assert_eq!(
            encode_sentinel("//@version=6"),
            Err(QuoteError::SentinelInRaw { offset: 2 })
        );
    }

    #[test]
    fn encode_doubled_body() {
        assert_eq!(encode_doubled(r#"a "b" c"#), r#"a ""b"" c"#);
        assert_eq!(wrap_doubled("x"), r#""x""#);
    }
}

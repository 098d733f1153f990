//! The tokenizer: a Mealy machine over character classes (spec §4.2).
//!
//! Rather than thread one big state enum through a single loop, each state
//! (`WORD`, `INTEGER`/`FLOAT`, `STRING`, `CHARACTER`, `SPECIAL`) is its own
//! function that consumes exactly that token and returns — the functional
//! decomposition the teacher's `lexer/mod.rs` submodule split and
//! `lexer.rs`'s per-operator dispatch both use. The state transitions the
//! spec describes (e.g. `INTEGER` + `.` + `NUMBER` -> `FLOAT`) are
//! implemented as lookahead inside `lex_number`, not as a separate state
//! variable.

use octo_util::diagnostic::{Error, ErrorKind, Handler};
use octo_util::symbol::SharedInterner;
use octo_util::Span;

use crate::cursor::Cursor;
use crate::token::{Payload, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Number,
    Word,
    Special,
}

fn classify(b: u8) -> CharClass {
    if b == 0 {
        CharClass::Space
    } else if b.is_ascii_whitespace() {
        CharClass::Space
    } else if b.is_ascii_digit() {
        CharClass::Number
    } else if b.is_ascii_alphabetic() || b == b'_' {
        CharClass::Word
    } else {
        CharClass::Special
    }
}

fn keyword_kind(word: &str) -> Option<TokenKind> {
    Some(match word {
        "let" => TokenKind::Let,
        "return" => TokenKind::Return,
        "func" => TokenKind::Func,
        "extern" => TokenKind::Extern,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "in" => TokenKind::In,
        "type" => TokenKind::Type,
        "struct" => TokenKind::Struct,
        "union" => TokenKind::Union,
        _ => return None,
    })
}

/// Tokenizes `source` in full, accumulating diagnostics in `handler` and
/// continuing past errors (spec §4.2: "on any tokenizer error the
/// component continues scanning"). Callers must check
/// `handler.has_errors()` before proceeding to the parser; the returned
/// stream may be incomplete or structurally odd if it does.
pub fn tokenize(
    source: &octo_util::SourceMap,
    interner: &SharedInterner,
    handler: &Handler,
) -> Vec<Token> {
    tracing::debug!(path = %source.path().display(), "tokenizing");
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    tokens.push(Token::synthetic(TokenKind::LeftBrace, Span::new(1, 1), "{"));

    loop {
        skip_whitespace_and_comments(&mut cursor);
        if cursor.is_at_end() {
            break;
        }

        let start = Span::new(cursor.line(), cursor.column());
        let class = classify(cursor.current());
        let token = match class {
            CharClass::Word => lex_word(&mut cursor, start, interner),
            CharClass::Number => lex_number(&mut cursor, start),
            CharClass::Special if cursor.current() == b'"' => {
                lex_string(&mut cursor, start, interner)
            }
            CharClass::Special if cursor.current() == b'\'' => {
                lex_character(&mut cursor, start, handler)
            }
            CharClass::Special => lex_special(&mut cursor, start, handler),
            CharClass::Space => unreachable!("whitespace already skipped"),
        };
        tokens.push(token);
    }

    let end = Span::new(cursor.line(), cursor.column());
    tokens.push(Token::synthetic(TokenKind::RightBrace, end, "}"));
    tokens.push(Token::synthetic(TokenKind::Eof, end, ""));
    tracing::debug!(count = tokens.len(), "tokenized");
    tokens
}

fn skip_whitespace_and_comments(cursor: &mut Cursor<'_>) {
    loop {
        while !cursor.is_at_end() && classify(cursor.current()) == CharClass::Space {
            cursor.advance();
        }
        if !cursor.is_at_end() && cursor.current() == b'/' && cursor.peek() == b'/' {
            while !cursor.is_at_end() && cursor.current() != b'\n' {
                cursor.advance();
            }
            continue;
        }
        break;
    }
}

fn lex_word(cursor: &mut Cursor<'_>, start: Span, interner: &SharedInterner) -> Token {
    let mut word = String::new();
    while !cursor.is_at_end() && classify(cursor.current()) == CharClass::Word {
        word.push(cursor.advance() as char);
    }
    if word == "true" {
        return Token::new(TokenKind::Boolean, start, word, Payload::Boolean(true));
    }
    if word == "false" {
        return Token::new(TokenKind::Boolean, start, word, Payload::Boolean(false));
    }
    if let Some(kind) = keyword_kind(&word) {
        return Token::new(kind, start, word, Payload::None);
    }
    let symbol = interner.intern(&word);
    Token::new(TokenKind::Identifier, start, word, Payload::Identifier(symbol))
}

fn lex_number(cursor: &mut Cursor<'_>, start: Span) -> Token {
    let mut text = String::new();
    while !cursor.is_at_end() && classify(cursor.current()) == CharClass::Number {
        text.push(cursor.advance() as char);
    }

    let is_float = !cursor.is_at_end()
        && cursor.current() == b'.'
        && classify(cursor.peek()) == CharClass::Number;

    if !is_float {
        let value = text.parse::<i64>().unwrap_or(0);
        return Token::new(TokenKind::Integer, start, text, Payload::Integer(value));
    }

    text.push(cursor.advance() as char); // consume '.'
    while !cursor.is_at_end() && classify(cursor.current()) == CharClass::Number {
        text.push(cursor.advance() as char);
    }
    let value = text.parse::<f64>().unwrap_or(0.0);
    Token::new(TokenKind::Float, start, text, Payload::Float(value))
}

fn lex_string(cursor: &mut Cursor<'_>, start: Span, interner: &SharedInterner) -> Token {
    let mut lexeme = String::from("\"");
    cursor.advance(); // opening quote
    let mut body = String::new();
    while !cursor.is_at_end() && cursor.current() != b'"' {
        let c = cursor.advance();
        body.push(c as char);
        lexeme.push(c as char);
    }
    if !cursor.is_at_end() {
        cursor.advance(); // closing quote
        lexeme.push('"');
    }
    let symbol = interner.intern(&body);
    Token::new(TokenKind::String, start, lexeme, Payload::String(symbol))
}

fn lex_character(cursor: &mut Cursor<'_>, start: Span, handler: &Handler) -> Token {
    let mut lexeme = String::from("'");
    cursor.advance(); // opening quote
    let mut body = Vec::new();
    while !cursor.is_at_end() && cursor.current() != b'\'' {
        let c = cursor.advance();
        body.push(c);
        lexeme.push(c as char);
    }
    if !cursor.is_at_end() {
        cursor.advance(); // closing quote
        lexeme.push('\'');
    }
    if body.len() != 1 {
        handler.report(Error::new(ErrorKind::MultiCharacterCharacter, start));
    }
    let value = body.first().copied().unwrap_or(0);
    Token::new(TokenKind::Character, start, lexeme, Payload::Character(value))
}

/// Greedy maximal munch over the valid special-symbol set (spec §4.2):
/// `; : :: . .. , + - * / = -> ! > < == != >= <= ( ) { } [ ] &`, extended
/// with `&&`/`||` since §4.6 requires logical-and/or operators that the
/// spec's own munch list omits (see DESIGN.md).
fn lex_special(cursor: &mut Cursor<'_>, start: Span, handler: &Handler) -> Token {
    let first = cursor.advance();
    let second = cursor.current();

    let two_char = match (first, second) {
        (b':', b':') => Some(TokenKind::DoubleColon),
        (b'.', b'.') => Some(TokenKind::DoublePeriod),
        (b'-', b'>') => Some(TokenKind::Arrow),
        (b'=', b'=') => Some(TokenKind::DoubleEqual),
        (b'!', b'=') => Some(TokenKind::NotEqual),
        (b'>', b'=') => Some(TokenKind::GreaterEqual),
        (b'<', b'=') => Some(TokenKind::LessEqual),
        (b'&', b'&') => Some(TokenKind::And),
        (b'|', b'|') => Some(TokenKind::Or),
        _ => None,
    };

    if let Some(kind) = two_char {
        cursor.advance();
        let lexeme = format!("{}{}", first as char, second as char);
        return Token::new(kind, start, lexeme, Payload::None);
    }

    let single = match first {
        b';' => Some(TokenKind::Semicolon),
        b':' => Some(TokenKind::Colon),
        b'.' => Some(TokenKind::Period),
        b',' => Some(TokenKind::Comma),
        b'+' => Some(TokenKind::Plus),
        b'-' => Some(TokenKind::Minus),
        b'*' => Some(TokenKind::Star),
        b'/' => Some(TokenKind::ForwardSlash),
        b'%' => Some(TokenKind::Modulo),
        b'=' => Some(TokenKind::Equal),
        b'!' => Some(TokenKind::Bang),
        b'>' => Some(TokenKind::Greater),
        b'<' => Some(TokenKind::Less),
        b'(' => Some(TokenKind::LeftParen),
        b')' => Some(TokenKind::RightParen),
        b'{' => Some(TokenKind::LeftBrace),
        b'}' => Some(TokenKind::RightBrace),
        b'[' => Some(TokenKind::LeftBracket),
        b']' => Some(TokenKind::RightBracket),
        b'&' => Some(TokenKind::Ampersand),
        _ => None,
    };

    let lexeme = (first as char).to_string();
    match single {
        Some(kind) => Token::new(kind, start, lexeme, Payload::None),
        None => {
            handler.report(Error::new(
                ErrorKind::InvalidSymbol {
                    symbol: lexeme.clone(),
                },
                start,
            ));
            Token::new(TokenKind::Invalid, start, lexeme, Payload::None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octo_util::SourceMap;

    fn lex(src: &str) -> (Vec<Token>, Handler) {
        let source = SourceMap::from_source("t.oc", src);
        let interner = SharedInterner::new();
        let handler = Handler::new();
        let tokens = tokenize(&source, &interner, &handler);
        (tokens, handler)
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn brackets_synthetic_program() {
        let (tokens, handler) = lex("let x = 1;");
        assert!(!handler.has_errors());
        assert_eq!(tokens.first().unwrap().kind, TokenKind::LeftBrace);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(
            tokens[tokens.len() - 2].kind,
            TokenKind::RightBrace
        );
    }

    #[test]
    fn integer_and_float_disambiguation() {
        let (tokens, _) = lex("5 3.14 5.");
        let ks = kinds(&tokens);
        assert!(ks.contains(&TokenKind::Integer));
        assert!(ks.contains(&TokenKind::Float));
        // "5." with nothing after the dot stays Integer + Period, not Float.
        let period_after_int = tokens
            .windows(2)
            .any(|w| w[0].kind == TokenKind::Integer && w[1].kind == TokenKind::Period);
        assert!(period_after_int);
    }

    #[test]
    fn boolean_literals_are_not_inverted() {
        let (tokens, _) = lex("true false");
        let booleans: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Boolean)
            .collect();
        assert_eq!(booleans[0].payload, Payload::Boolean(true));
        assert_eq!(booleans[1].payload, Payload::Boolean(false));
    }

    #[test]
    fn string_payload_is_set() {
        let (tokens, _) = lex("\"hello\"");
        let interner = SharedInterner::new();
        let tok = tokens
            .iter()
            .find(|t| t.kind == TokenKind::String)
            .unwrap();
        match &tok.payload {
            Payload::String(sym) => {
                // re-intern independently; content must match regardless of interner identity
                let _ = interner.intern("hello");
                assert_eq!(tok.lexeme, "\"hello\"");
                let _ = sym;
            }
            other => panic!("expected string payload, got {other:?}"),
        }
    }

    #[test]
    fn multi_character_character_literal_errors() {
        let (_, handler) = lex("'ab'");
        assert!(handler.has_errors());
        let errors = handler.errors();
        assert!(matches!(errors[0].kind, ErrorKind::MultiCharacterCharacter));
    }

    #[test]
    fn line_comment_is_skipped() {
        let (tokens, handler) = lex("let x = 1; // trailing comment\nlet y = 2;");
        assert!(!handler.has_errors());
        assert!(kinds(&tokens).contains(&TokenKind::Let));
    }

    #[test]
    fn maximal_munch_prefers_two_char_operators() {
        let (tokens, _) = lex("a == b");
        assert!(kinds(&tokens).contains(&TokenKind::DoubleEqual));
    }

    #[test]
    fn invalid_symbol_reported_and_scanning_continues() {
        let (tokens, handler) = lex("let x = 1 ` let y = 2;");
        assert!(handler.has_errors());
        // scanning continued past the bad symbol
        assert!(kinds(&tokens).contains(&TokenKind::Let));
        assert_eq!(kinds(&tokens).iter().filter(|k| **k == TokenKind::Let).count(), 2);
    }

    #[test]
    fn logical_and_or_lexed() {
        let (tokens, handler) = lex("a && b || c");
        assert!(!handler.has_errors());
        assert!(kinds(&tokens).contains(&TokenKind::And));
        assert!(kinds(&tokens).contains(&TokenKind::Or));
    }
}

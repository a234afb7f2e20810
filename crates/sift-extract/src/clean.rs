//! Collapsing raw token streams into minimal simplified HTML.
//!
//! A stream is cut into units at [`Token::UnitBreak`], each unit into lines
//! at [`Token::LineBreak`], and each line is cleaned on its own: whitespace
//! runs collapse to one space, leading and trailing whitespace goes, and tags
//! that end up wrapping nothing are dropped. Lines and units are then joined
//! again, with a delimiter only between two non-empty neighbours.

use crate::token::Token;

/// Clean a token sequence.
///
/// The result never starts or ends with a delimiter or whitespace, never
/// holds two adjacent delimiters, and contains no open tag immediately
/// followed by its own close tag. Cleaning is idempotent.
#[must_use]
pub fn clean(tokens: Vec<Token>) -> Vec<Token> {
    // Each pass only removes tokens or normalizes whitespace, so this ends.
    let mut current = tokens;
    loop {
        let next = clean_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn clean_once(tokens: &[Token]) -> Vec<Token> {
    let tokens = strip(tokens.to_vec(), strip_field_start);
    let units = tokens
        .split(|token| matches!(token, Token::UnitBreak))
        .map(clean_unit);
    join_non_empty(units, &Token::UnitBreak)
}

fn clean_unit(unit: &[Token]) -> Vec<Token> {
    let lines = unit
        .split(|token| matches!(token, Token::LineBreak))
        .map(clean_line);
    join_non_empty(lines, &Token::LineBreak)
}

fn clean_line(line: &[Token]) -> Vec<Token> {
    let parts = line.split(Token::is_space).map(<[Token]>::to_vec);
    let line = join_non_empty(parts, &Token::space());
    let line = strip(line, strip_line_start);
    drop_empty_tags(line)
}

/// Apply a start-stripping pass to both ends of a sequence.
fn strip(tokens: Vec<Token>, strip_start: fn(Vec<Token>) -> Vec<Token>) -> Vec<Token> {
    let mut tokens = strip_start(tokens);
    tokens.reverse();
    let mut tokens = strip_start(tokens);
    tokens.reverse();
    tokens
}

/// Drop delimiters and whitespace that precede the first piece of text.
/// Tags before the first text are kept.
fn strip_field_start(tokens: Vec<Token>) -> Vec<Token> {
    let mut found_text = false;
    tokens
        .into_iter()
        .filter(|token| {
            found_text |= token.is_content();
            found_text || !(token.is_delimiter() || token.is_space())
        })
        .collect()
}

/// Drop whitespace text that precedes the first piece of text in a line.
fn strip_line_start(tokens: Vec<Token>) -> Vec<Token> {
    let mut found_text = false;
    tokens
        .into_iter()
        .filter(|token| {
            found_text |= token.is_content();
            found_text || !token.is_space()
        })
        .collect()
}

/// Remove every open/close pair with nothing in between, innermost first.
fn drop_empty_tags(line: Vec<Token>) -> Vec<Token> {
    let mut stack: Vec<Token> = Vec::with_capacity(line.len());
    for token in line {
        if let Token::Close(name) = &token
            && matches!(stack.last(), Some(Token::Open { name: open, .. }) if open == name)
        {
            stack.pop();
            continue;
        }
        stack.push(token);
    }
    stack
}

/// Concatenate the non-empty parts, with `delimiter` between neighbours.
fn join_non_empty<I>(parts: I, delimiter: &Token) -> Vec<Token>
where
    I: IntoIterator<Item = Vec<Token>>,
{
    let mut joined = Vec::new();
    for part in parts {
        if part.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push(delimiter.clone());
        }
        joined.extend(part);
    }
    joined
}

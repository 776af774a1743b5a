//! Indexed, mutable token sequence
//!
//! Inserting or removing tokens shifts every index at or after the edit
//! point. Code holding indices past an insertion must treat them as stale,
//! which is why fixers walk their blocks from the highest index down.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::token::{Token, TokenKind};

/// Outcome of [`TokenStream::ensure_whitespace_at_index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitespaceEdit {
    /// The stream already satisfied the request
    Unchanged,
    /// An existing whitespace token got new content; no index moved
    Replaced,
    /// A whitespace token was inserted; later indices moved up by one
    Inserted,
}

/// The token sequence of one source unit
///
/// Kind presence is tracked incrementally so [`is_kind_found`](Self::is_kind_found)
/// and [`is_any_kind_found`](Self::is_any_kind_found) are O(1) pre-filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Token>", into = "Vec<Token>")]
pub struct TokenStream {
    tokens: Vec<Token>,
    kind_counts: HashMap<TokenKind, usize>,
    generation: u64,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut kind_counts = HashMap::new();
        for token in &tokens {
            *kind_counts.entry(token.kind).or_insert(0) += 1;
        }

        Self {
            tokens,
            kind_counts,
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Bounds-checked lookup
    pub fn token_at(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn kind_at(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn is_kind_found(&self, kind: TokenKind) -> bool {
        self.kind_counts.get(&kind).copied().unwrap_or(0) > 0
    }

    pub fn is_any_kind_found(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|&kind| self.is_kind_found(kind))
    }

    pub fn is_all_kinds_found(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().all(|&kind| self.is_kind_found(kind))
    }

    /// Mutation counter, bumped by every insert, replace and removal
    ///
    /// Comparing the value before and after a pass tells whether the pass
    /// touched the stream.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Insert tokens so the first of them lands at `index`
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert_at(&mut self, index: usize, tokens: impl IntoIterator<Item = Token>) {
        let tokens: Vec<Token> = tokens.into_iter().collect();
        if tokens.is_empty() {
            return;
        }

        for token in &tokens {
            self.count_added(token.kind);
        }
        self.tokens.splice(index..index, tokens);
        self.generation += 1;
    }

    /// Replace the token at `index`, returning the previous one
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set_at(&mut self, index: usize, token: Token) -> Token {
        self.count_added(token.kind);
        let previous = std::mem::replace(&mut self.tokens[index], token);
        self.count_removed(previous.kind);
        self.generation += 1;
        previous
    }

    /// Remove the token at `index`, shifting later tokens down
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Token {
        let removed = self.tokens.remove(index);
        self.count_removed(removed.kind);
        self.generation += 1;
        removed
    }

    /// Make sure whitespace `whitespace` sits at `index`
    ///
    /// If the token at `index` is whitespace it is rewritten to `whitespace`,
    /// unless it already equals it or already holds a line break while
    /// `whitespace` is itself a line break. Otherwise a whitespace token is
    /// inserted at `index + offset` (`offset` is 0 to insert before the token,
    /// 1 to insert after it). Out of range indices are left alone.
    ///
    /// Applying the same call twice leaves the stream as after the first.
    pub fn ensure_whitespace_at_index(
        &mut self,
        index: usize,
        offset: usize,
        whitespace: &str,
    ) -> WhitespaceEdit {
        let Some(token) = self.tokens.get(index) else {
            return WhitespaceEdit::Unchanged;
        };

        if token.is_whitespace() {
            let wants_newline = whitespace.contains('\n') || whitespace.contains('\r');
            if token.content == whitespace || (wants_newline && token.contains_newline()) {
                return WhitespaceEdit::Unchanged;
            }

            self.tokens[index].content = whitespace.to_string();
            self.generation += 1;
            return WhitespaceEdit::Replaced;
        }

        let at = index + offset;
        if at > self.tokens.len() {
            return WhitespaceEdit::Unchanged;
        }

        self.insert_at(at, [Token::whitespace(whitespace)]);
        WhitespaceEdit::Inserted
    }

    /// Index of the first non-whitespace, non-comment token after `index`
    pub fn next_meaningful(&self, index: usize) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| self.tokens[i].is_meaningful())
    }

    /// Index of the last non-whitespace, non-comment token before `index`
    pub fn prev_meaningful(&self, index: usize) -> Option<usize> {
        (0..index.min(self.tokens.len()))
            .rev()
            .find(|&i| self.tokens[i].is_meaningful())
    }

    /// Index of the next token of `kind` after `index`
    pub fn next_of_kind(&self, index: usize, kind: TokenKind) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| self.tokens[i].kind == kind)
    }

    /// 1-based line on which the token at `index` starts
    pub fn line_of(&self, index: usize) -> usize {
        let end = index.min(self.tokens.len());
        1 + self.tokens[..end]
            .iter()
            .map(|t| t.content.matches('\n').count())
            .sum::<usize>()
    }

    /// 1-based column, in characters, at which the token at `index` starts
    pub fn column_of(&self, index: usize) -> usize {
        let end = index.min(self.tokens.len());
        let mut column = 1;
        for token in self.tokens[..end].iter().rev() {
            match token.content.rfind('\n') {
                Some(newline) => return column + token.content[newline + 1..].chars().count(),
                None => column += token.content.chars().count(),
            }
        }
        column
    }

    /// Source text of the stream
    pub fn code(&self) -> String {
        self.tokens.iter().map(|t| t.content.as_str()).collect()
    }

    fn count_added(&mut self, kind: TokenKind) {
        *self.kind_counts.entry(kind).or_insert(0) += 1;
    }

    fn count_removed(&mut self, kind: TokenKind) {
        if let Some(count) = self.kind_counts.get_mut(&kind) {
            *count = count.saturating_sub(1);
        }
    }
}

/// Streams compare by their tokens only
impl PartialEq for TokenStream {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for TokenStream {}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl From<TokenStream> for Vec<Token> {
    fn from(stream: TokenStream) -> Self {
        stream.tokens
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(&token.content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind::*;

    fn stream(parts: &[(TokenKind, &str)]) -> TokenStream {
        parts.iter().map(|&(k, c)| Token::new(k, c)).collect()
    }

    #[test]
    fn test_token_at_is_bounds_checked() {
        let s = stream(&[(OpenBracket, "["), (CloseBracket, "]")]);
        assert_eq!(s.token_at(1).map(|t| t.kind), Some(CloseBracket));
        assert!(s.token_at(2).is_none());
    }

    #[test]
    fn test_kind_presence_follows_mutation() {
        let mut s = stream(&[(Variable, "$a"), (Semicolon, ";")]);
        assert!(!s.is_kind_found(DoubleArrow));

        s.insert_at(1, [Token::new(DoubleArrow, "=>")]);
        assert!(s.is_kind_found(DoubleArrow));
        assert!(s.is_any_kind_found(&[Comma, DoubleArrow]));

        s.remove_at(1);
        assert!(!s.is_kind_found(DoubleArrow));

        s.set_at(0, Token::new(Number, "1"));
        assert!(!s.is_kind_found(Variable));
        assert!(s.is_all_kinds_found(&[Number, Semicolon]));
    }

    #[test]
    fn test_insert_shifts_later_indices() {
        let mut s = stream(&[(OpenBracket, "["), (Number, "1"), (CloseBracket, "]")]);
        s.insert_at(1, [Token::whitespace("\n")]);

        assert_eq!(s.len(), 4);
        assert_eq!(s[2].kind, Number);
        assert_eq!(s[3].kind, CloseBracket);
    }

    #[test]
    fn test_ensure_whitespace_inserts_before_token() {
        let mut s = stream(&[(OpenBracket, "["), (Number, "1"), (CloseBracket, "]")]);

        let edit = s.ensure_whitespace_at_index(1, 0, "\n");
        assert_eq!(edit, WhitespaceEdit::Inserted);
        assert_eq!(s.code(), "[\n1]");
    }

    #[test]
    fn test_ensure_whitespace_inserts_after_token() {
        let mut s = stream(&[(OpenBracket, "["), (Number, "1"), (CloseBracket, "]")]);

        let edit = s.ensure_whitespace_at_index(1, 1, "\n");
        assert_eq!(edit, WhitespaceEdit::Inserted);
        assert_eq!(s.code(), "[1\n]");
    }

    #[test]
    fn test_ensure_whitespace_replaces_plain_whitespace() {
        let mut s = stream(&[(OpenBracket, "["), (Whitespace, " "), (Number, "1")]);

        let edit = s.ensure_whitespace_at_index(1, 0, "\n");
        assert_eq!(edit, WhitespaceEdit::Replaced);
        assert_eq!(s.len(), 3);
        assert_eq!(s.code(), "[\n1");
    }

    #[test]
    fn test_ensure_whitespace_keeps_existing_line_break() {
        let mut s = stream(&[(OpenBracket, "["), (Whitespace, "\n    "), (Number, "1")]);
        let before = s.generation();

        assert_eq!(s.ensure_whitespace_at_index(1, 0, "\n"), WhitespaceEdit::Unchanged);
        assert_eq!(s.generation(), before);
        assert_eq!(s.code(), "[\n    1");
    }

    #[test]
    fn test_ensure_whitespace_is_idempotent() {
        let mut once = stream(&[(OpenBracket, "["), (Number, "1"), (CloseBracket, "]")]);
        once.ensure_whitespace_at_index(1, 0, "\n");

        let mut twice = once.clone();
        // index 1 now holds the inserted whitespace
        twice.ensure_whitespace_at_index(1, 0, "\n");

        assert_eq!(once, twice);
    }

    #[test]
    fn test_ensure_whitespace_out_of_range_is_noop() {
        let mut s = stream(&[(Number, "1")]);
        assert_eq!(s.ensure_whitespace_at_index(5, 0, "\n"), WhitespaceEdit::Unchanged);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_meaningful_navigation() {
        let s = stream(&[
            (OpenBracket, "["),
            (Whitespace, " "),
            (Comment, "/* x */"),
            (Number, "1"),
            (CloseBracket, "]"),
        ]);

        assert_eq!(s.next_meaningful(0), Some(3));
        assert_eq!(s.prev_meaningful(3), Some(0));
        assert_eq!(s.prev_meaningful(0), None);
        assert_eq!(s.next_meaningful(4), None);
    }

    #[test]
    fn test_line_of() {
        let s = stream(&[
            (OpenTag, "<?php\n"),
            (Variable, "$a"),
            (Whitespace, "\n\n"),
            (Variable, "$b"),
        ]);

        assert_eq!(s.line_of(0), 1);
        assert_eq!(s.line_of(1), 2);
        assert_eq!(s.line_of(3), 4);
        assert_eq!(s.column_of(1), 1);
        assert_eq!(s.column_of(2), 3);
        assert_eq!(s.column_of(3), 1);
    }

    #[test]
    fn test_generation_counts_mutations() {
        let mut s = stream(&[(Number, "1")]);
        assert_eq!(s.generation(), 0);
        s.insert_at(0, [Token::whitespace(" ")]);
        s.set_at(0, Token::whitespace("\n"));
        assert_eq!(s.generation(), 2);
    }

    #[test]
    fn test_serde_as_token_array() {
        let s = stream(&[(Variable, "$a"), (Semicolon, ";")]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"VARIABLE","content":"$a"},{"kind":"SEMICOLON","content":";"}]"#
        );

        let back: TokenStream = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert!(back.is_kind_found(Semicolon));
    }
}

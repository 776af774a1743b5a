//! Lexical tokens as produced by the upstream tokenizer

use serde::{Deserialize, Serialize};

/// Kind of a lexical token
///
/// Only the kinds the fixers and rules reason about are distinguished;
/// every other reserved word is a `Keyword` and every other operator an
/// `Operator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    OpenTag,
    CloseTag,
    InlineHtml,
    Whitespace,
    Comment,
    DocComment,
    Variable,
    Identifier,
    Number,
    String,

    // Brackets
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    /// `{$` inside an interpolated string, closed by `}`
    CurlyOpen,
    /// `${` inside an interpolated string, closed by `}`
    DollarOpenCurlyBraces,

    // Punctuation
    Comma,
    Semicolon,
    Colon,
    DoubleColon,
    Question,
    DoubleArrow,
    ObjectOperator,
    NullsafeObjectOperator,
    Ampersand,

    // Boolean operators
    BooleanAnd,
    BooleanOr,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    Coalesce,
    Operator,

    // Keywords with structural meaning
    Array,
    Function,
    Fn,
    Use,
    New,
    Namespace,
    Class,
    Interface,
    Trait,
    Enum,
    Abstract,
    If,
    Elseif,
    Else,
    Switch,
    Case,
    Default,
    Match,
    For,
    Foreach,
    While,
    Do,
    Try,
    Catch,
    Finally,
    Return,
    Break,
    Continue,
    Goto,
    Keyword,

    Other,
}

impl TokenKind {
    /// Opening brackets of any family
    pub const OPENERS: &'static [TokenKind] = &[
        TokenKind::OpenBracket,
        TokenKind::OpenParen,
        TokenKind::OpenBrace,
        TokenKind::CurlyOpen,
        TokenKind::DollarOpenCurlyBraces,
    ];

    /// Closing brackets of any family
    pub const CLOSERS: &'static [TokenKind] = &[
        TokenKind::CloseBracket,
        TokenKind::CloseParen,
        TokenKind::CloseBrace,
    ];

    pub fn is_opener(self) -> bool {
        Self::OPENERS.contains(&self)
    }

    pub fn is_closer(self) -> bool {
        Self::CLOSERS.contains(&self)
    }

    /// The closer kind that terminates a block opened by `self`
    pub fn matching_closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::OpenBracket => Some(TokenKind::CloseBracket),
            TokenKind::OpenParen => Some(TokenKind::CloseParen),
            TokenKind::OpenBrace | TokenKind::CurlyOpen | TokenKind::DollarOpenCurlyBraces => {
                Some(TokenKind::CloseBrace)
            }
            _ => None,
        }
    }

    /// `&&`, `||`, `and`, `or`, `xor`
    pub fn is_boolean_operator(self) -> bool {
        matches!(
            self,
            TokenKind::BooleanAnd
                | TokenKind::BooleanOr
                | TokenKind::LogicalAnd
                | TokenKind::LogicalOr
                | TokenKind::LogicalXor
        )
    }
}

/// A single lexical token: kind plus raw text
///
/// Its position is implicit, the index it occupies in a [`TokenStream`](crate::TokenStream).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub content: String,
}

impl Token {
    pub fn new(kind: TokenKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn whitespace(content: impl Into<String>) -> Self {
        Self::new(TokenKind::Whitespace, content)
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_any_kind(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::Comment | TokenKind::DocComment)
    }

    /// Anything but whitespace and comments
    pub fn is_meaningful(&self) -> bool {
        !self.is_whitespace() && !self.is_comment()
    }

    /// Whether the raw text holds a line break (`\n` or a lone `\r`)
    pub fn contains_newline(&self) -> bool {
        self.content.contains('\n') || self.content.contains('\r')
    }

    /// Whitespace token holding at least one line break
    pub fn is_newline_whitespace(&self) -> bool {
        self.is_whitespace() && self.contains_newline()
    }
}

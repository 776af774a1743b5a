//! Snippet lexer for tests
//!
//! Turns PHP-like source into a [`TokenStream`] good enough to exercise
//! fixers and rules. It is not a tokenizer: heredocs, interpolation and
//! casts are out of its reach.

use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

const OPERATORS: &[(&str, TokenKind)] = &[
    ("?->", TokenKind::NullsafeObjectOperator),
    ("??=", TokenKind::Operator),
    ("===", TokenKind::Operator),
    ("!==", TokenKind::Operator),
    ("<=>", TokenKind::Operator),
    ("...", TokenKind::Operator),
    ("=>", TokenKind::DoubleArrow),
    ("&&", TokenKind::BooleanAnd),
    ("||", TokenKind::BooleanOr),
    ("??", TokenKind::Coalesce),
    ("->", TokenKind::ObjectOperator),
    ("::", TokenKind::DoubleColon),
    ("==", TokenKind::Operator),
    ("!=", TokenKind::Operator),
    ("<=", TokenKind::Operator),
    (">=", TokenKind::Operator),
    ("++", TokenKind::Operator),
    ("--", TokenKind::Operator),
    ("+=", TokenKind::Operator),
    ("-=", TokenKind::Operator),
    ("*=", TokenKind::Operator),
    ("/=", TokenKind::Operator),
    (".=", TokenKind::Operator),
    ("?>", TokenKind::CloseTag),
];

/// Lex `source` into a token stream
pub fn lex(source: &str) -> TokenStream {
    let mut tokens = Vec::new();
    let mut rest = source;

    if let Some(tag) = rest.find("<?php") {
        if tag > 0 {
            tokens.push(Token::new(TokenKind::InlineHtml, &rest[..tag]));
        }
        let mut tag_len = "<?php".len();
        if let Some(c) = rest[tag + tag_len..].chars().next().filter(|c| c.is_whitespace()) {
            tag_len += c.len_utf8();
        }
        tokens.push(Token::new(TokenKind::OpenTag, &rest[tag..tag + tag_len]));
        rest = &rest[tag + tag_len..];
    } else {
        if !rest.is_empty() {
            tokens.push(Token::new(TokenKind::InlineHtml, rest));
        }
        return TokenStream::new(tokens);
    }

    while let Some(c) = rest.chars().next() {
        let (kind, len) = next_token(rest, c);
        tokens.push(Token::new(kind, &rest[..len]));
        rest = &rest[len..];
    }

    TokenStream::new(tokens)
}

fn next_token(rest: &str, c: char) -> (TokenKind, usize) {
    if c.is_whitespace() {
        return (TokenKind::Whitespace, take_while(rest, char::is_whitespace));
    }
    if rest.starts_with("/**") {
        return (TokenKind::DocComment, block_comment_len(rest));
    }
    if rest.starts_with("/*") {
        return (TokenKind::Comment, block_comment_len(rest));
    }
    if rest.starts_with("//") || c == '#' {
        return (TokenKind::Comment, rest.find('\n').unwrap_or(rest.len()));
    }
    if c == '$' && rest[1..].chars().next().is_some_and(is_ident_char) {
        return (TokenKind::Variable, 1 + take_while(&rest[1..], is_ident_char));
    }
    if c == '\'' || c == '"' {
        return (TokenKind::String, string_len(rest, c));
    }
    if c.is_ascii_digit() {
        return (
            TokenKind::Number,
            take_while(rest, |c| c.is_ascii_alphanumeric() || c == '.' || c == '_'),
        );
    }
    if is_ident_char(c) {
        let len = take_while(rest, is_ident_char);
        return (keyword_kind(&rest[..len]), len);
    }
    for (op, kind) in OPERATORS {
        if rest.starts_with(op) {
            return (*kind, op.len());
        }
    }

    let kind = match c {
        '[' => TokenKind::OpenBracket,
        ']' => TokenKind::CloseBracket,
        '(' => TokenKind::OpenParen,
        ')' => TokenKind::CloseParen,
        '{' => TokenKind::OpenBrace,
        '}' => TokenKind::CloseBrace,
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        ':' => TokenKind::Colon,
        '?' => TokenKind::Question,
        '&' => TokenKind::Ampersand,
        _ => TokenKind::Operator,
    };
    (kind, c.len_utf8())
}

fn keyword_kind(word: &str) -> TokenKind {
    match word.to_ascii_lowercase().as_str() {
        "array" => TokenKind::Array,
        "function" => TokenKind::Function,
        "fn" => TokenKind::Fn,
        "use" => TokenKind::Use,
        "new" => TokenKind::New,
        "namespace" => TokenKind::Namespace,
        "class" => TokenKind::Class,
        "interface" => TokenKind::Interface,
        "trait" => TokenKind::Trait,
        "enum" => TokenKind::Enum,
        "abstract" => TokenKind::Abstract,
        "if" => TokenKind::If,
        "elseif" => TokenKind::Elseif,
        "else" => TokenKind::Else,
        "switch" => TokenKind::Switch,
        "case" => TokenKind::Case,
        "default" => TokenKind::Default,
        "match" => TokenKind::Match,
        "for" => TokenKind::For,
        "foreach" => TokenKind::Foreach,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "try" => TokenKind::Try,
        "catch" => TokenKind::Catch,
        "finally" => TokenKind::Finally,
        "return" => TokenKind::Return,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "goto" => TokenKind::Goto,
        "and" => TokenKind::LogicalAnd,
        "or" => TokenKind::LogicalOr,
        "xor" => TokenKind::LogicalXor,
        "public" | "protected" | "private" | "static" | "final" | "readonly" | "const"
        | "echo" | "print" | "extends" | "implements" | "instanceof" | "insteadof" | "as"
        | "throw" | "yield" | "global" | "var" | "declare" | "include" | "include_once"
        | "require" | "require_once" | "clone" | "endif" | "endforeach" | "endfor"
        | "endwhile" | "endswitch" => TokenKind::Keyword,
        _ => TokenKind::Identifier,
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\\' || !c.is_ascii()
}

fn take_while(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn block_comment_len(s: &str) -> usize {
    s[2..].find("*/").map(|i| i + 4).unwrap_or(s.len())
}

fn string_len(s: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return i + 1;
        }
    }
    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_round_trips_source() {
        let source = "<?php\n$items = [1 => 'Hey', \"b\" => $x?->y ?? 2]; // done\n";
        assert_eq!(lex(source).code(), source);
    }

    #[test]
    fn test_open_tag_takes_one_whitespace() {
        let stream = lex("<?php\n\n$a;");
        assert_eq!(stream[0].content, "<?php\n");
        assert_eq!(stream[1].kind, Whitespace);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            kinds("<?php $a = [1 => 'x'];"),
            vec![
                OpenTag, Variable, Whitespace, Operator, Whitespace, OpenBracket, Number,
                Whitespace, DoubleArrow, Whitespace, String, CloseBracket, Semicolon,
            ]
        );
    }

    #[test]
    fn test_keywords_and_boolean_operators() {
        assert_eq!(
            kinds("<?php if ($a && $b or $c) {}"),
            vec![
                OpenTag, If, Whitespace, OpenParen, Variable, Whitespace, BooleanAnd,
                Whitespace, Variable, Whitespace, LogicalOr, Whitespace, Variable, CloseParen,
                Whitespace, OpenBrace, CloseBrace,
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("<?php /** doc */ /* c */ # hash\n"),
            vec![OpenTag, DocComment, Whitespace, Comment, Whitespace, Comment, Whitespace]
        );
    }
}

//! Cognitive complexity of a function-like body
//!
//! One pass over the body tokens. Structural constructs cost one point plus
//! the nesting level they sit at, flow breaks and boolean operator sequences
//! cost one point flat:
//!
//! | construct                                                   | points        |
//! |-------------------------------------------------------------|---------------|
//! | `if`, ternary `?`, `switch`, `for`, `foreach`, `while`, `do`, `catch` | 1 + nesting |
//! | `elseif`, `else if`, `else`, `goto`, `break N`, `continue N` | 1            |
//! | `return` inside a structural body                           | 1             |
//! | start of a boolean operator sequence, change of operator    | 1             |
//!
//! Bodies of the structural constructs, closures and arrow functions raise
//! the nesting level; `try` and `finally` do not.

use std::ops::Range;

use tokenfix_core::{BlockFinder, TokenKind, TokenStream};

use super::function_like::closure_body;

/// One scored token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Increment {
    /// Index of the token that scored
    pub index: usize,
    pub points: u32,
    /// Nesting level the token was found at
    pub nesting: u32,
}

/// Score of one body with the increments it is made of
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexityScore {
    pub total: u32,
    pub increments: Vec<Increment>,
}

/// Score the tokens in `body`
pub fn cognitive_complexity(stream: &TokenStream, blocks: &BlockFinder, body: Range<usize>) -> ComplexityScore {
    let mut walker = Walker {
        stream,
        blocks,
        limit: body.end,
        frames: Vec::new(),
        operators: vec![None],
        do_bodies: Vec::new(),
        else_if: None,
        score: ComplexityScore::default(),
    };

    for index in body {
        walker.visit(index);
    }

    walker.score
}

/// A body that raises the nesting level until `end`
struct Frame {
    end: usize,
    closure: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BooleanOperator {
    And,
    Or,
    Xor,
}

impl BooleanOperator {
    fn of(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::BooleanAnd | TokenKind::LogicalAnd => Some(Self::And),
            TokenKind::BooleanOr | TokenKind::LogicalOr => Some(Self::Or),
            TokenKind::LogicalXor => Some(Self::Xor),
            _ => None,
        }
    }
}

struct Walker<'a> {
    stream: &'a TokenStream,
    blocks: &'a BlockFinder,
    limit: usize,
    frames: Vec<Frame>,
    /// Last boolean operator of the current sequence, one entry per open block
    operators: Vec<Option<BooleanOperator>>,
    /// Closing braces of `do` bodies, whose `while` is not a loop of its own
    do_bodies: Vec<usize>,
    /// `if` already paid for by the `else` before it
    else_if: Option<usize>,
    score: ComplexityScore,
}

impl Walker<'_> {
    fn visit(&mut self, index: usize) {
        while self.frames.last().is_some_and(|frame| frame.end <= index) {
            self.frames.pop();
        }

        let kind = self.stream[index].kind;
        match kind {
            TokenKind::If if self.else_if == Some(index) => {
                self.else_if = None;
                self.enter_body(index);
            }
            TokenKind::If | TokenKind::Switch | TokenKind::For | TokenKind::Foreach | TokenKind::Catch => {
                self.nested(index);
                self.enter_body(index);
            }
            TokenKind::Do => {
                self.nested(index);
                if let Some(end) = self.enter_body(index) {
                    self.do_bodies.push(end);
                }
            }
            TokenKind::While => {
                let closes_do = self
                    .stream
                    .prev_meaningful(index)
                    .is_some_and(|prev| self.do_bodies.contains(&prev));
                if !closes_do {
                    self.nested(index);
                    self.enter_body(index);
                }
            }
            TokenKind::Elseif => {
                self.flat(index);
                self.enter_body(index);
            }
            TokenKind::Else => {
                self.flat(index);
                match self.stream.next_meaningful(index) {
                    Some(next) if self.stream[next].is_kind(TokenKind::If) => self.else_if = Some(next),
                    _ => {
                        self.enter_body(index);
                    }
                }
            }
            TokenKind::Question if self.is_ternary(index) => self.nested(index),
            TokenKind::Goto => self.flat(index),
            TokenKind::Break | TokenKind::Continue => {
                let has_level = self
                    .stream
                    .next_meaningful(index)
                    .is_some_and(|next| self.stream[next].is_kind(TokenKind::Number));
                if has_level {
                    self.flat(index);
                }
            }
            TokenKind::Return => {
                if self.frames.last().is_some_and(|frame| !frame.closure) {
                    self.flat(index);
                }
            }
            TokenKind::Function | TokenKind::Fn => {
                if let Some(body) = closure_body(self.stream, self.blocks, index) {
                    self.frames.push(Frame {
                        end: body.end,
                        closure: true,
                    });
                }
            }
            _ => {
                if let Some(operator) = BooleanOperator::of(kind) {
                    self.boolean_operator(index, operator);
                }
            }
        }

        if kind.is_opener() {
            self.operators.push(None);
        } else if kind.is_closer() {
            if self.operators.len() > 1 {
                self.operators.pop();
            }
        } else if matches!(kind, TokenKind::Semicolon | TokenKind::Comma) {
            if let Some(last) = self.operators.last_mut() {
                *last = None;
            }
        }
    }

    fn nesting(&self) -> u32 {
        self.frames.len() as u32
    }

    fn nested(&mut self, index: usize) {
        let nesting = self.nesting();
        self.add(index, 1 + nesting, nesting);
    }

    fn flat(&mut self, index: usize) {
        let nesting = self.nesting();
        self.add(index, 1, nesting);
    }

    fn add(&mut self, index: usize, points: u32, nesting: u32) {
        self.score.total += points;
        self.score.increments.push(Increment { index, points, nesting });
    }

    fn boolean_operator(&mut self, index: usize, operator: BooleanOperator) {
        let continues = self.operators.last().copied().flatten() == Some(operator);
        if !continues {
            self.flat(index);
            if let Some(last) = self.operators.last_mut() {
                *last = Some(operator);
            }
        }
    }

    /// Push a frame for the body of the construct at `keyword`
    ///
    /// Returns where the body ends: its closing brace, or the `;` ending a
    /// single statement body. Alternative syntax bodies are treated as a
    /// single statement.
    fn enter_body(&mut self, keyword: usize) -> Option<usize> {
        let end = self.body_end(keyword)?;
        self.frames.push(Frame { end, closure: false });
        Some(end)
    }

    fn body_end(&self, keyword: usize) -> Option<usize> {
        let mut next = self.stream.next_meaningful(keyword)?;
        let has_condition = matches!(
            self.stream[keyword].kind,
            TokenKind::If
                | TokenKind::Elseif
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Foreach
                | TokenKind::Switch
                | TokenKind::Catch
        );
        if has_condition && self.stream[next].is_kind(TokenKind::OpenParen) {
            let condition = self.blocks.starting_at(next)?;
            next = self.stream.next_meaningful(condition.end)?;
        }
        if next >= self.limit {
            return None;
        }

        match self.stream[next].kind {
            TokenKind::OpenBrace => Some(self.blocks.starting_at(next)?.end),
            TokenKind::Colon => Some(self.statement_end(next + 1)),
            _ => Some(self.statement_end(next)),
        }
    }

    /// Index of the `;` ending the statement that starts at `from`
    fn statement_end(&self, from: usize) -> usize {
        let mut index = from;
        while index < self.limit {
            let kind = self.stream[index].kind;
            if kind == TokenKind::Semicolon {
                return index;
            }
            index = match self.blocks.starting_at(index) {
                Some(block) if kind.is_opener() => block.end + 1,
                _ => index + 1,
            };
        }
        self.limit
    }

    /// `?` of a ternary, not of a nullable type
    fn is_ternary(&self, index: usize) -> bool {
        self.stream.prev_meaningful(index).is_some_and(|prev| {
            matches!(
                self.stream[prev].kind,
                TokenKind::Variable
                    | TokenKind::Identifier
                    | TokenKind::Number
                    | TokenKind::String
                    | TokenKind::CloseParen
                    | TokenKind::CloseBracket
                    | TokenKind::CloseBrace
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use tokenfix_core::fixture::lex;

    use super::*;
    use crate::rules::function_like::Symbols;

    /// Score of the first function-like in `source`
    fn score(source: &str) -> u32 {
        detailed(source).total
    }

    fn detailed(source: &str) -> ComplexityScore {
        let stream = lex(source);
        let blocks = BlockFinder::scan(&stream).unwrap();
        let symbols = Symbols::collect(&stream, &blocks);
        cognitive_complexity(&stream, &blocks, symbols.functions[0].body.clone())
    }

    #[test]
    fn test_empty_function() {
        assert_eq!(score("<?php function f() {}"), 0);
    }

    #[test]
    fn test_nested_loops_in_try_and_catch() {
        let source = "<?php
function run()
{
    try {
        if (true) {
            for ($i = 0; $i < 10; $i++) {
                while (true) {
                }
            }
        }
    } catch (\\Exception | \\Exception $e) {
        if (true) {
        }
    }
}";
        let score = detailed(source);
        let points: Vec<u32> = score.increments.iter().map(|i| i.points).collect();
        assert_eq!(points, vec![1, 2, 3, 1, 2]);
        assert_eq!(score.total, 9);
    }

    #[test]
    fn test_nested_if_with_mixed_boolean_operators() {
        assert_eq!(
            score("<?php function f($a, $b, $c) { if ($a) { if ($b && $c || $a) { } } }"),
            5
        );
    }

    #[test]
    fn test_boolean_sequences() {
        assert_eq!(score("<?php function f($a, $b, $c) { return $a && $b && $c; }"), 1);
        assert_eq!(score("<?php function f($a, $b, $c) { return $a && ($b || $c); }"), 2);
        assert_eq!(score("<?php function f($a, $b) { $x = $a and $b; $y = $a and $b; }"), 2);
        assert_eq!(score("<?php function f($a, $b) { return $a ?? $b; }"), 0);
    }

    #[test]
    fn test_else_branches_are_flat() {
        let source = "<?php function f($a) {
            if ($a > 1) { $x = 1; } elseif ($a > 0) { $x = 2; } else if ($a < 0) { $x = 3; } else { $x = 4; }
        }";
        assert_eq!(score(source), 4);
    }

    #[test]
    fn test_else_body_is_nested() {
        assert_eq!(score("<?php function f($a) { if ($a) { } else { if ($a) { } } }"), 4);
    }

    #[test]
    fn test_switch_and_ternary() {
        let source = "<?php function f($a) {
            switch ($a) {
                case 1:
                    return $a > 0 ? 'x' : 'y';
                default:
                    return null;
            }
        }";
        // switch 1, ternary 1 + 1, two returns inside the switch body 1 + 1
        assert_eq!(score(source), 5);
    }

    #[test]
    fn test_nullable_types_are_not_ternaries() {
        assert_eq!(score("<?php function f(?int $a): ?int { $g = function (?string $s): ?string { return $s; }; return $a; }"), 0);
    }

    #[test]
    fn test_closures_nest_without_increment() {
        let source = "<?php function f($items) {
            return array_map(function ($item) {
                if ($item) {
                    return 1;
                }
                return 0;
            }, $items);
        }";
        // if at nesting 1, the return inside it is early
        let score = detailed(source);
        assert_eq!(score.total, 3);
        assert_eq!(score.increments[0].nesting, 1);
    }

    #[test]
    fn test_arrow_function_nests() {
        assert_eq!(score("<?php function f($xs) { return array_map(fn($x) => $x ? 1 : 2, $xs); }"), 2);
    }

    #[test]
    fn test_do_while_counts_once() {
        assert_eq!(score("<?php function f($a) { do { $a--; } while ($a > 0); }"), 1);
    }

    #[test]
    fn test_single_statement_bodies_nest() {
        assert_eq!(score("<?php function f($a) { foreach ($a as $b) if ($b) $c = 1; if ($a) { } }"), 4);
    }

    #[test]
    fn test_flow_breaks() {
        let source = "<?php function f($a) {
            while ($a) {
                foreach ($a as $b) {
                    continue 2;
                }
                break;
            }
            goto end;
        }";
        // while 1, foreach 2, continue 2 is 1, plain break is free, goto 1
        assert_eq!(score(source), 5);
    }

    #[test]
    fn test_top_level_return_is_free() {
        assert_eq!(score("<?php function f($a) { $b = 1; return $b; }"), 0);
    }
}

//! Locating matched opener/closer pairs in a token stream
//!
//! All bracket families are matched in one linear pass with a single stack,
//! so an opener is only ever paired with a closer of its own family.

use thiserror::Error;

use crate::stream::TokenStream;
use crate::token::TokenKind;

/// Errors raised for malformed (unbalanced) token streams
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("`{content}` at token {index} is never closed")]
    UnclosedBlock { index: usize, content: String },

    #[error("unexpected `{content}` at token {index}, no block is open")]
    UnexpectedCloser { index: usize, content: String },

    #[error("`{closer}` at token {closer_index} cannot close `{opener}` opened at token {opener_index}")]
    MismatchedCloser {
        opener_index: usize,
        opener: String,
        closer_index: usize,
        closer: String,
    },

    #[error("token {0} does not open a block")]
    NotABlockOpener(usize),

    #[error("token {0} does not close a block")]
    NotABlockCloser(usize),
}

/// Syntactic role of a bracket pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// `[1, 2]`
    ShortArray,
    /// `array(1, 2)`
    LongArray,
    /// `$items[0]`
    Index,
    /// `function foo($a, $b)`
    ParameterList,
    /// `foo($a, $b)`, `new Foo($a)`
    ArgumentList,
    /// Conditions, grouping, closure `use (...)`
    Parenthesis,
    /// `{ ... }` including `{$` and `${` in strings
    CurlyBrace,
}

impl BlockType {
    /// Array literal blocks, short and long syntax
    pub const ARRAYS: &'static [BlockType] = &[BlockType::ShortArray, BlockType::LongArray];

    pub fn is_array(self) -> bool {
        Self::ARRAYS.contains(&self)
    }
}

/// One matched block: indices of its opener and closer
///
/// `start < end` always holds, and the two tokens form a properly nested pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    pub block_type: BlockType,
    pub start: usize,
    pub end: usize,
}

impl BlockInfo {
    pub fn new(block_type: BlockType, start: usize, end: usize) -> Self {
        debug_assert!(start < end);
        Self {
            block_type,
            start,
            end,
        }
    }

    /// Whether `index` lies strictly between opener and closer
    pub fn contains(&self, index: usize) -> bool {
        index > self.start && index < self.end
    }

    /// Token indices between opener and closer
    pub fn inner(&self) -> std::ops::Range<usize> {
        self.start + 1..self.end
    }
}

/// Classify the opener at `index`, `None` if it is not an opener
pub fn block_type_at(stream: &TokenStream, index: usize) -> Option<BlockType> {
    let kind = stream.kind_at(index)?;
    let prev = |i: usize| stream.prev_meaningful(i).map(|p| (p, stream[p].kind));

    match kind {
        TokenKind::OpenBracket => match prev(index) {
            Some((
                _,
                TokenKind::Variable
                | TokenKind::Identifier
                | TokenKind::String
                | TokenKind::CloseBracket
                | TokenKind::CloseParen,
            )) => Some(BlockType::Index),
            _ => Some(BlockType::ShortArray),
        },
        TokenKind::OpenParen => match prev(index) {
            Some((_, TokenKind::Array)) => Some(BlockType::LongArray),
            Some((_, TokenKind::Function | TokenKind::Fn)) => Some(BlockType::ParameterList),
            Some((p, TokenKind::Ampersand)) if follows_function_keyword(stream, p) => {
                Some(BlockType::ParameterList)
            }
            Some((p, TokenKind::Identifier)) => {
                if follows_function_keyword(stream, p) {
                    Some(BlockType::ParameterList)
                } else {
                    Some(BlockType::ArgumentList)
                }
            }
            Some((
                _,
                TokenKind::Variable
                | TokenKind::CloseParen
                | TokenKind::CloseBracket
                | TokenKind::Keyword
                | TokenKind::Class,
            )) => Some(BlockType::ArgumentList),
            _ => Some(BlockType::Parenthesis),
        },
        TokenKind::OpenBrace | TokenKind::CurlyOpen | TokenKind::DollarOpenCurlyBraces => {
            Some(BlockType::CurlyBrace)
        }
        _ => None,
    }
}

/// `function name`, `function &name`, `function &`, `fn &`
fn follows_function_keyword(stream: &TokenStream, index: usize) -> bool {
    let Some(prev) = stream.prev_meaningful(index) else {
        return false;
    };

    match stream[prev].kind {
        TokenKind::Function | TokenKind::Fn => true,
        TokenKind::Ampersand => stream
            .prev_meaningful(prev)
            .is_some_and(|p| matches!(stream[p].kind, TokenKind::Function)),
        _ => false,
    }
}

/// Index of the closer matching the opener at `start`
pub fn find_block_end(stream: &TokenStream, start: usize) -> Result<usize, BlockError> {
    let opener = stream
        .kind_at(start)
        .filter(|k| k.is_opener())
        .ok_or(BlockError::NotABlockOpener(start))?;

    let mut expected = vec![(start, opener)];
    for index in start + 1..stream.len() {
        let kind = stream[index].kind;
        if kind.is_opener() {
            expected.push((index, kind));
        } else if kind.is_closer() {
            let (open_index, open_kind) = expected
                .pop()
                .ok_or_else(|| unexpected_closer(stream, index))?;
            if open_kind.matching_closer() != Some(kind) {
                return Err(mismatched(stream, open_index, index));
            }
            if expected.is_empty() {
                return Ok(index);
            }
        }
    }

    Err(unclosed(stream, start))
}

/// Re-match the opener at `start` against the current stream
pub fn block_at(stream: &TokenStream, start: usize) -> Result<BlockInfo, BlockError> {
    let block_type = block_type_at(stream, start).ok_or(BlockError::NotABlockOpener(start))?;
    let end = find_block_end(stream, start)?;
    Ok(BlockInfo::new(block_type, start, end))
}

/// Index of the opener matching the closer at `end`
pub fn find_block_start(stream: &TokenStream, end: usize) -> Result<usize, BlockError> {
    let closer = stream
        .kind_at(end)
        .filter(|k| k.is_closer())
        .ok_or(BlockError::NotABlockCloser(end))?;

    let mut expected = vec![(end, closer)];
    for index in (0..end).rev() {
        let kind = stream[index].kind;
        if kind.is_closer() {
            expected.push((index, kind));
        } else if let Some(closes_with) = kind.matching_closer() {
            let (close_index, close_kind) =
                expected.pop().ok_or_else(|| unclosed(stream, index))?;
            if closes_with != close_kind {
                return Err(mismatched(stream, index, close_index));
            }
            if expected.is_empty() {
                return Ok(index);
            }
        }
    }

    Err(unexpected_closer(stream, end))
}

/// Every block of a stream, discovered in one pass
///
/// Blocks are kept in document order of their openers: an outer block comes
/// before the blocks nested in it.
#[derive(Debug, Clone, Default)]
pub struct BlockFinder {
    blocks: Vec<BlockInfo>,
}

impl BlockFinder {
    /// Match all openers and closers of the stream
    pub fn scan(stream: &TokenStream) -> Result<Self, BlockError> {
        let mut open: Vec<(usize, BlockType, TokenKind)> = Vec::new();
        let mut blocks = Vec::new();

        for (index, token) in stream.iter().enumerate() {
            if let Some(closer) = token.kind.matching_closer() {
                let block_type = block_type_at(stream, index).unwrap_or(BlockType::Parenthesis);
                open.push((index, block_type, closer));
            } else if token.kind.is_closer() {
                match open.pop() {
                    Some((start, block_type, closer)) if closer == token.kind => {
                        blocks.push(BlockInfo::new(block_type, start, index));
                    }
                    Some((start, _, _)) => return Err(mismatched(stream, start, index)),
                    None => return Err(unexpected_closer(stream, index)),
                }
            }
        }

        if let Some(&(start, _, _)) = open.first() {
            return Err(unclosed(stream, start));
        }

        // closers complete inner-first; callers want opener order
        blocks.sort_unstable_by_key(|b| b.start);
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[BlockInfo] {
        &self.blocks
    }

    /// Blocks of the given types in document order
    ///
    /// Reverse the iterator to walk from the last opener to the first, which
    /// keeps not-yet-visited indices valid while the stream is edited.
    pub fn of_types<'a>(
        &'a self,
        types: &'a [BlockType],
    ) -> impl DoubleEndedIterator<Item = BlockInfo> + 'a {
        self.blocks
            .iter()
            .filter(move |b| types.contains(&b.block_type))
            .copied()
    }

    pub fn starting_at(&self, start: usize) -> Option<BlockInfo> {
        self.blocks
            .binary_search_by_key(&start, |b| b.start)
            .ok()
            .map(|i| self.blocks[i])
    }

    /// Innermost block whose opener and closer enclose `index`
    pub fn enclosing(&self, index: usize) -> Option<BlockInfo> {
        self.blocks
            .iter()
            .filter(|b| b.contains(index))
            .max_by_key(|b| b.start)
            .copied()
    }

    /// Nesting depth of `index`: how many blocks enclose it
    pub fn depth_of(&self, index: usize) -> usize {
        self.blocks.iter().filter(|b| b.contains(index)).count()
    }
}

/// Scan a stream that upstream guarantees to be balanced
///
/// # Panics
/// Panics on an unbalanced stream; that is a tokenizer defect, never
/// something to paper over.
pub fn expect_balanced(stream: &TokenStream) -> BlockFinder {
    match BlockFinder::scan(stream) {
        Ok(finder) => finder,
        Err(err) => panic!("malformed token stream: {err}"),
    }
}

/// Blocks of `types` in document order
///
/// # Panics
/// Panics on an unbalanced stream, see [`expect_balanced`].
pub fn find_blocks(stream: &TokenStream, types: &[BlockType]) -> Vec<BlockInfo> {
    expect_balanced(stream).of_types(types).collect()
}

fn unclosed(stream: &TokenStream, index: usize) -> BlockError {
    BlockError::UnclosedBlock {
        index,
        content: stream[index].content.clone(),
    }
}

fn unexpected_closer(stream: &TokenStream, index: usize) -> BlockError {
    BlockError::UnexpectedCloser {
        index,
        content: stream[index].content.clone(),
    }
}

fn mismatched(stream: &TokenStream, opener_index: usize, closer_index: usize) -> BlockError {
    BlockError::MismatchedCloser {
        opener_index,
        opener: stream[opener_index].content.clone(),
        closer_index,
        closer: stream[closer_index].content.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::lex;

    fn start_of(stream: &TokenStream, content: &str, nth: usize) -> usize {
        stream
            .iter()
            .enumerate()
            .filter(|(_, t)| t.content == content)
            .map(|(i, _)| i)
            .nth(nth)
            .unwrap()
    }

    #[test]
    fn test_classifies_short_array_and_index() {
        let stream = lex("<?php $a = [1, 2]; $b = $a[0];");
        let finder = BlockFinder::scan(&stream).unwrap();
        let types: Vec<_> = finder.blocks().iter().map(|b| b.block_type).collect();

        assert_eq!(types, vec![BlockType::ShortArray, BlockType::Index]);
    }

    #[test]
    fn test_classifies_parenthesis_roles() {
        let stream = lex("<?php function foo($a) { bar(array(1)); if ($a) {} }");
        let finder = BlockFinder::scan(&stream).unwrap();
        let types: Vec<_> = finder.blocks().iter().map(|b| b.block_type).collect();

        assert_eq!(
            types,
            vec![
                BlockType::ParameterList,
                BlockType::CurlyBrace,
                BlockType::ArgumentList,
                BlockType::LongArray,
                BlockType::Parenthesis,
                BlockType::CurlyBrace,
            ]
        );
    }

    #[test]
    fn test_closure_and_by_ref_parameter_lists() {
        let stream = lex("<?php $f = function &($x) use ($y) {}; fn($z) => $z;");
        let finder = BlockFinder::scan(&stream).unwrap();
        let params: Vec<_> = finder.of_types(&[BlockType::ParameterList]).collect();

        assert_eq!(params.len(), 2);
        assert_eq!(stream[params[0].start + 1].content, "$x");
        assert_eq!(stream[params[1].start + 1].content, "$z");
    }

    #[test]
    fn test_nested_blocks_in_document_order() {
        let stream = lex("<?php [[1, 2], [3, 4]];");
        let blocks = find_blocks(&stream, BlockType::ARRAYS);

        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].start < blocks[1].start && blocks[1].start < blocks[2].start);
        assert!(blocks[0].contains(blocks[1].start) && blocks[0].contains(blocks[2].end));
        assert!(blocks[1].end < blocks[2].start);
    }

    #[test]
    fn test_matching_agrees_with_stack_verification() {
        let stream = lex("<?php foo([1, [2, (3)], {4}], $x[array(5)]);");
        let finder = BlockFinder::scan(&stream).unwrap();

        let mut stack = Vec::new();
        let mut expected = Vec::new();
        for (i, t) in stream.iter().enumerate() {
            if t.kind.is_opener() {
                stack.push(i);
            } else if t.kind.is_closer() {
                expected.push((stack.pop().unwrap(), i));
            }
        }
        expected.sort();

        let found: Vec<_> = finder.blocks().iter().map(|b| (b.start, b.end)).collect();
        assert_eq!(found, expected);
        for &(start, end) in &found {
            assert_eq!(find_block_end(&stream, start).unwrap(), end);
            assert_eq!(find_block_start(&stream, end).unwrap(), start);
        }
    }

    #[test]
    fn test_empty_block() {
        let stream = lex("<?php $a = [ ];");
        let blocks = find_blocks(&stream, &[BlockType::ShortArray]);

        assert_eq!(blocks.len(), 1);
        assert_eq!(stream.next_meaningful(blocks[0].start), Some(blocks[0].end));
    }

    #[test]
    fn test_does_not_match_across_families() {
        let stream = lex("<?php [1, (2];");
        let err = BlockFinder::scan(&stream).unwrap_err();
        assert!(matches!(err, BlockError::MismatchedCloser { .. }));

        let start = start_of(&stream, "[", 0);
        assert!(matches!(
            find_block_end(&stream, start),
            Err(BlockError::MismatchedCloser { .. })
        ));
    }

    #[test]
    fn test_unclosed_and_unexpected() {
        let unclosed = lex("<?php $a = [1, 2;");
        assert!(matches!(
            BlockFinder::scan(&unclosed),
            Err(BlockError::UnclosedBlock { .. })
        ));

        let stray = lex("<?php $a = 1];");
        assert!(matches!(
            BlockFinder::scan(&stray),
            Err(BlockError::UnexpectedCloser { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "malformed token stream")]
    fn test_expect_balanced_panics() {
        expect_balanced(&lex("<?php foo(;"));
    }

    #[test]
    fn test_not_an_opener() {
        let stream = lex("<?php $a;");
        assert_eq!(find_block_end(&stream, 1), Err(BlockError::NotABlockOpener(1)));
        assert_eq!(find_block_start(&stream, 1), Err(BlockError::NotABlockCloser(1)));
    }

    #[test]
    fn test_block_at_rematches_after_insertion() {
        let mut stream = lex("<?php [1, [2]];");
        let outer = start_of(&stream, "[", 0);
        let before = block_at(&stream, outer).unwrap();

        let two = start_of(&stream, "2", 0);
        stream.insert_at(two, [crate::Token::whitespace("\n")]);

        let after = block_at(&stream, outer).unwrap();
        assert_eq!(after.block_type, BlockType::ShortArray);
        assert_eq!(after.end, before.end + 1);
    }

    #[test]
    fn test_enclosing_and_depth() {
        let stream = lex("<?php [1, [2]];");
        let finder = BlockFinder::scan(&stream).unwrap();
        let two = start_of(&stream, "2", 0);
        let inner = finder.enclosing(two).unwrap();

        assert_eq!(stream[inner.start].content, "[");
        assert_eq!(finder.depth_of(two), 2);
        assert_eq!(finder.starting_at(inner.start), Some(inner));
    }
}

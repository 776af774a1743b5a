//! Classifying the contents of a block
//!
//! Everything here looks at the block's own level only: tokens inside a
//! nested block (an inner array, a call's argument list) are invisible to
//! the questions asked about the outer block.

use crate::block::BlockInfo;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Tokens directly inside `block`, skipping the contents of nested blocks
///
/// A nested block's opener is yielded (it starts an element of this block),
/// everything up to and including its closer is not.
pub fn top_level_tokens<'a>(
    stream: &'a TokenStream,
    block: BlockInfo,
) -> impl Iterator<Item = (usize, &'a Token)> + 'a {
    let mut depth = 0usize;
    block.inner().filter_map(move |index| {
        let token = &stream[index];
        let at_top = depth == 0;
        if token.kind.is_opener() {
            depth += 1;
        } else if token.kind.is_closer() {
            depth = depth.saturating_sub(1);
        }
        at_top.then_some((index, token))
    })
}

/// Number of comma separated elements at the top level of `block`
///
/// A trailing comma does not start another element and a block holding only
/// whitespace and comments has none.
pub fn item_count(stream: &TokenStream, block: BlockInfo) -> usize {
    let mut count = 0;
    let mut has_content = false;

    for (_, token) in top_level_tokens(stream, block) {
        if token.is_kind(TokenKind::Comma) {
            if has_content {
                count += 1;
            }
            has_content = false;
        } else if token.is_meaningful() {
            has_content = true;
        }
    }

    if has_content {
        count += 1;
    }
    count
}

/// True when no element of `block` carries an explicit key
///
/// Only a top-level `=>` counts; keys of nested arrays and the `=>` of an
/// arrow function element do not.
pub fn is_indexed_list(stream: &TokenStream, block: BlockInfo) -> bool {
    let mut in_arrow_function = false;

    for (_, token) in top_level_tokens(stream, block) {
        match token.kind {
            TokenKind::Comma => in_arrow_function = false,
            TokenKind::Fn => in_arrow_function = true,
            TokenKind::DoubleArrow if !in_arrow_function => return false,
            _ => {}
        }
    }

    true
}

/// Top-level commas of `block`, including a trailing one
pub fn comma_indices(stream: &TokenStream, block: BlockInfo) -> Vec<usize> {
    top_level_tokens(stream, block)
        .filter(|(_, t)| t.is_kind(TokenKind::Comma))
        .map(|(i, _)| i)
        .collect()
}

/// Top-level commas that are followed by another element
pub fn separator_indices(stream: &TokenStream, block: BlockInfo) -> Vec<usize> {
    comma_indices(stream, block)
        .into_iter()
        .filter(|&comma| {
            stream
                .next_meaningful(comma)
                .is_some_and(|next| next < block.end)
        })
        .collect()
}

/// Whether the last element is followed by a comma
pub fn has_trailing_comma(stream: &TokenStream, block: BlockInfo) -> bool {
    stream
        .prev_meaningful(block.end)
        .is_some_and(|prev| prev > block.start && stream[prev].is_kind(TokenKind::Comma))
}

/// Whether any whitespace inside `block` breaks the line
pub fn is_multiline(stream: &TokenStream, block: BlockInfo) -> bool {
    block
        .inner()
        .any(|index| stream[index].is_newline_whitespace())
}

/// Whether the opener is directly followed by another opener of the same
/// kind or by `array`, as in `[[1, 2], [3, 4]]` or `array(array(1))`
pub fn is_followed_by_opener(stream: &TokenStream, block: BlockInfo) -> bool {
    let opener = stream[block.start].kind;
    stream.next_meaningful(block.start).is_some_and(|next| {
        next < block.end && stream[next].is_any_kind(&[opener, TokenKind::Array])
    })
}

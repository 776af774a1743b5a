//! tokenfix-core: Token stream abstractions for style fixing and analysis
//!
//! This crate provides:
//! - `Token`, `TokenKind`: lexical units as handed over by the tokenizer
//! - `TokenStream`: indexed, mutable token sequence with O(1) kind presence checks
//! - `BlockFinder`: matched opener/closer pairs (arrays, parameter and argument lists)
//! - `analyzer`: item counting and indexed-list classification of a block
//! - `RuleDefinition`: bad/good samples every fixer and rule documents itself with

pub mod analyzer;
mod block;
mod definition;
mod stream;
mod token;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

pub use block::{
    block_at, block_type_at, expect_balanced, find_block_end, find_block_start, find_blocks, BlockError,
    BlockFinder, BlockInfo, BlockType,
};
pub use definition::RuleDefinition;
pub use stream::{TokenStream, WhitespaceEdit};
pub use token::{Token, TokenKind};

//! Fixer implementations over token streams
//!
//! Every fixer mutates a [`TokenStream`] in place. Fixers only ever insert or
//! replace whitespace tokens, so a stream stays balanced through a full run.

mod newliner;
mod registry;
pub mod arrays;
pub mod functions;
pub mod whitespace;

pub use registry::{FixerInfo, FixerRegistry};

use thiserror::Error;
use tokenfix_core::{block_at, expect_balanced, BlockInfo, BlockType, RuleDefinition, TokenStream};

use crate::config::{IndentStyle, LineEnding, WhitespaceConfig};

/// Errors raised while scheduling fixers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixerError {
    #[error("unknown fixer `{0}`")]
    UnknownFixer(String),

    #[error("fixers {0:?} must each run before another, no order satisfies them")]
    PriorityCycle(Vec<String>),
}

/// Configuration passed to fixers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixerConfig {
    /// Indentation style
    pub indent: IndentStyle,
    /// Line ending style
    pub line_ending: LineEnding,
}

impl FixerConfig {
    /// Text of one line ending
    pub fn line_ending(&self) -> &'static str {
        self.line_ending.as_str()
    }
}

impl From<&WhitespaceConfig> for FixerConfig {
    fn from(ws: &WhitespaceConfig) -> Self {
        Self {
            indent: ws.indent,
            line_ending: ws.line_ending,
        }
    }
}

/// A formatting fixer applied to a token stream
pub trait Fixer: Send + Sync {
    /// Unique name, used in configuration and reports
    fn name(&self) -> &'static str;

    /// Bad and good sample for documentation
    fn definition(&self) -> RuleDefinition;

    /// Human-readable description
    fn description(&self) -> &'static str {
        self.definition().description
    }

    /// Execution priority (higher = runs first)
    ///
    /// Only breaks ties between fixers that [`Fixer::runs_before`] leaves
    /// unordered.
    fn priority(&self) -> i32;

    /// Names of fixers that must not run before this one
    fn runs_before(&self) -> &'static [&'static str] {
        &[]
    }

    /// Cheap pre-filter: false means `fix` would certainly change nothing
    fn is_candidate(&self, stream: &TokenStream) -> bool;

    /// Rewrite the stream in place
    fn fix(&self, stream: &mut TokenStream, config: &FixerConfig);
}

/// Visit every block of `types`, last opener first
///
/// Each block is re-matched right before `visit` sees it, so edits made
/// inside a nested block never leave the enclosing block with a stale end.
pub(crate) fn for_each_block_from_end(
    stream: &mut TokenStream,
    types: &[BlockType],
    mut visit: impl FnMut(&mut TokenStream, BlockInfo),
) {
    let starts: Vec<usize> = expect_balanced(stream)
        .of_types(types)
        .map(|block| block.start)
        .collect();

    for start in starts.into_iter().rev() {
        let block = match block_at(stream, start) {
            Ok(block) => block,
            Err(err) => panic!("malformed token stream: {err}"),
        };
        visit(stream, block);
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use tokenfix_core::fixture::lex;

    use super::*;

    /// Lex `source`, run `fixer` once and return the resulting code
    pub fn fix_with(fixer: &dyn Fixer, source: &str, config: &FixerConfig) -> String {
        let mut stream = lex(source);
        if fixer.is_candidate(&stream) {
            fixer.fix(&mut stream, config);
        }
        stream.code()
    }

    pub fn fix(fixer: &dyn Fixer, source: &str) -> String {
        fix_with(fixer, source, &FixerConfig::default())
    }

    /// Run `fixer` twice and check the second run is a no-op
    pub fn assert_idempotent(fixer: &dyn Fixer, source: &str) {
        let once = fix(fixer, source);
        let twice = fix(fixer, &once);
        assert_eq!(once, twice, "{} is not idempotent on {source:?}", fixer.name());
    }
}

#[cfg(test)]
mod tests {
    use tokenfix_core::fixture::lex;

    use super::*;

    #[test]
    fn test_config_from_whitespace() {
        let ws = WhitespaceConfig::new(IndentStyle::Tabs, LineEnding::CrLf);
        let config = FixerConfig::from(&ws);
        assert_eq!(config.indent, IndentStyle::Tabs);
        assert_eq!(config.line_ending(), "\r\n");
    }

    #[test]
    fn test_blocks_visited_last_first_with_fresh_ends() {
        let mut stream = lex("<?php [1, [2, [3]]];");
        let mut seen = Vec::new();

        for_each_block_from_end(&mut stream, BlockType::ARRAYS, |stream, block| {
            seen.push(block.start);
            stream.insert_at(block.start + 1, [tokenfix_core::Token::whitespace("\n")]);
            assert!(stream[block.end + 1].is_kind(tokenfix_core::TokenKind::CloseBracket));
        });

        assert!(seen.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(seen.len(), 3);
    }
}

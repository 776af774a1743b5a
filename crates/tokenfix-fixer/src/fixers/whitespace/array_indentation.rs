//! Array indentation fixer
//!
//! Ensures multiline arrays have consistent indentation.

use tokenfix_core::analyzer::top_level_tokens;
use tokenfix_core::{find_blocks, BlockInfo, BlockType, RuleDefinition, Token, TokenKind, TokenStream};

use crate::fixers::newliner::line_indent;
use crate::fixers::{Fixer, FixerConfig};

/// Indents the items of a multiline array one level deeper than the line of
/// its opener, and the closer at that line's level
pub struct ArrayIndentationFixer;

impl ArrayIndentationFixer {
    fn fix_block(&self, stream: &mut TokenStream, block: BlockInfo, config: &FixerConfig) {
        let line_breaks: Vec<usize> = top_level_tokens(stream, block)
            .filter(|(_, token)| token.is_newline_whitespace())
            .map(|(index, _)| index)
            .collect();
        if line_breaks.is_empty() {
            return;
        }

        let base = line_indent(stream, block.start);
        let item = format!("{base}{}", config.indent.unit());

        for index in line_breaks {
            let indent = if index + 1 == block.end { &base } else { &item };
            let lines = stream[index].content.matches('\n').count();
            let expected = format!("{}{indent}", config.line_ending().repeat(lines));

            if stream[index].content != expected {
                stream.set_at(index, Token::whitespace(expected));
            }
        }
    }
}

impl Fixer for ArrayIndentationFixer {
    fn name(&self) -> &'static str {
        "array_indentation"
    }

    fn definition(&self) -> RuleDefinition {
        RuleDefinition::new(
            "Each element of a multiline array must be indented exactly once",
            "$items = [\n10,\n      20\n  ];\n",
            "$items = [\n    10,\n    20\n];\n",
        )
    }

    fn priority(&self) -> i32 {
        29
    }

    fn is_candidate(&self, stream: &TokenStream) -> bool {
        stream.is_any_kind_found(&[TokenKind::OpenBracket, TokenKind::Array])
            && stream.is_kind_found(TokenKind::Whitespace)
    }

    fn fix(&self, stream: &mut TokenStream, config: &FixerConfig) {
        // whitespace is only replaced, so one scan stays valid; outer arrays
        // come first and set the base of the arrays nested in them
        for block in find_blocks(stream, BlockType::ARRAYS) {
            self.fix_block(stream, block, config);
        }
    }
}

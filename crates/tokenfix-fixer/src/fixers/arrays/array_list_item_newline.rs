//! Each item of a keyed array on its own line

use tokenfix_core::analyzer::{is_indexed_list, item_count};
use tokenfix_core::{BlockType, RuleDefinition, TokenKind, TokenStream};

use crate::fixers::newliner::explode_block;
use crate::fixers::{for_each_block_from_end, Fixer, FixerConfig};

/// Breaks a keyed array with more than one item into one item per line
pub struct ArrayListItemNewlineFixer;

impl Fixer for ArrayListItemNewlineFixer {
    fn name(&self) -> &'static str {
        "array_list_item_newline"
    }

    fn definition(&self) -> RuleDefinition {
        RuleDefinition::new(
            "Keyed array items must each be on their own line",
            "$value = ['simple' => 1, 'easy' => 2];\n",
            "$value = [\n    'simple' => 1,\n    'easy' => 2\n];\n",
        )
    }

    fn priority(&self) -> i32 {
        34
    }

    fn runs_before(&self) -> &'static [&'static str] {
        &["array_indentation"]
    }

    fn is_candidate(&self, stream: &TokenStream) -> bool {
        stream.is_any_kind_found(&[TokenKind::OpenBracket, TokenKind::Array])
            && stream.is_kind_found(TokenKind::DoubleArrow)
    }

    fn fix(&self, stream: &mut TokenStream, config: &FixerConfig) {
        let line_ending = config.line_ending();
        for_each_block_from_end(stream, BlockType::ARRAYS, |stream, block| {
            if item_count(stream, block) < 2 || is_indexed_list(stream, block) {
                return;
            }
            explode_block(stream, block, line_ending, line_ending);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixers::test_utils::{assert_idempotent, fix};

    #[test]
    fn test_keyed_array_is_exploded() {
        assert_eq!(
            fix(&ArrayListItemNewlineFixer, "<?php $value = ['simple' => 1, 'easy' => 2];"),
            "<?php $value = [\n'simple' => 1,\n'easy' => 2\n];"
        );
    }

    #[test]
    fn test_single_item_unchanged() {
        let source = "<?php $items = [1 => 'Hey'];";
        assert_eq!(fix(&ArrayListItemNewlineFixer, source), source);
    }

    #[test]
    fn test_indexed_array_unchanged() {
        let source = "<?php $items = [10, 20]; $map = ['a' => 1];";
        assert_eq!(fix(&ArrayListItemNewlineFixer, source), source);
    }

    #[test]
    fn test_commas_of_nested_calls_are_not_split() {
        assert_eq!(
            fix(&ArrayListItemNewlineFixer, "<?php $v = ['a' => foo(1, 2), 'b' => 3,];"),
            "<?php $v = [\n'a' => foo(1, 2),\n'b' => 3,\n];"
        );
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&ArrayListItemNewlineFixer, "<?php $v = ['a' => ['x' => 1, 'y' => 2], 'b' => 3];");
    }
}

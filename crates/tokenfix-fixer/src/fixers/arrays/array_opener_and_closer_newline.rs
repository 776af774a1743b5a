//! Indexed array opener and closer on their own lines

use tokenfix_core::analyzer::{is_followed_by_opener, is_indexed_list, item_count};
use tokenfix_core::{BlockInfo, BlockType, RuleDefinition, TokenKind, TokenStream};

use crate::fixers::newliner::{ensure_newline_after, ensure_newline_before};
use crate::fixers::{for_each_block_from_end, Fixer, FixerConfig};

/// Puts the opener and closer of a non-empty indexed array on their own lines
///
/// Keyed arrays are left to `array_list_item_newline`, and an array whose
/// first element is itself an array is skipped so the inner one decides.
pub struct ArrayOpenerAndCloserNewlineFixer;

impl ArrayOpenerAndCloserNewlineFixer {
    fn fix_block(&self, stream: &mut TokenStream, block: BlockInfo, line_ending: &str) {
        if is_followed_by_opener(stream, block) {
            return;
        }
        if item_count(stream, block) == 0 {
            return;
        }
        if !is_indexed_list(stream, block) {
            return;
        }

        // closer first, the opener's index does not move
        ensure_newline_before(stream, block.end, line_ending);
        ensure_newline_after(stream, block.start, line_ending);
    }
}

impl Fixer for ArrayOpenerAndCloserNewlineFixer {
    fn name(&self) -> &'static str {
        "array_opener_and_closer_newline"
    }

    fn definition(&self) -> RuleDefinition {
        RuleDefinition::new(
            "Indexed array opener and closer must be on their own lines",
            "$items = [1 => 'Hey'];\n$values = [10, 20];\n",
            "$items = [1 => 'Hey'];\n$values = [\n    10, 20\n];\n",
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
    }

    fn fix(&self, stream: &mut TokenStream, config: &FixerConfig) {
        let line_ending = config.line_ending();
        for_each_block_from_end(stream, BlockType::ARRAYS, |stream, block| {
            self.fix_block(stream, block, line_ending);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineEnding;
    use crate::fixers::test_utils::{assert_idempotent, fix, fix_with};

    #[test]
    fn test_indexed_array_is_broken() {
        assert_eq!(
            fix(&ArrayOpenerAndCloserNewlineFixer, "<?php $items = [10, 20];"),
            "<?php $items = [\n10, 20\n];"
        );
    }

    #[test]
    fn test_keyed_array_unchanged() {
        let source = "<?php $items = [1 => 'Hey'];";
        assert_eq!(fix(&ArrayOpenerAndCloserNewlineFixer, source), source);
    }

    #[test]
    fn test_empty_array_unchanged() {
        let source = "<?php $items = [ ]; $other = array();";
        assert_eq!(fix(&ArrayOpenerAndCloserNewlineFixer, source), source);
    }

    #[test]
    fn test_stacked_opener_defers_to_inner_arrays() {
        assert_eq!(
            fix(&ArrayOpenerAndCloserNewlineFixer, "<?php $items = [[1, 2], [3, 4]];"),
            "<?php $items = [[\n1, 2\n], [\n3, 4\n]];"
        );
    }

    #[test]
    fn test_nested_arrays_keep_outer_end() {
        assert_eq!(
            fix(&ArrayOpenerAndCloserNewlineFixer, "<?php $items = [1, [2, 3]];"),
            "<?php $items = [\n1, [\n2, 3\n]\n];"
        );
    }

    #[test]
    fn test_long_array_syntax() {
        assert_eq!(
            fix(&ArrayOpenerAndCloserNewlineFixer, "<?php $items = array(10, 20);"),
            "<?php $items = array(\n10, 20\n);"
        );
    }

    #[test]
    fn test_index_access_is_not_an_array() {
        let source = "<?php $a = $items[0];";
        assert_eq!(fix(&ArrayOpenerAndCloserNewlineFixer, source), source);
    }

    #[test]
    fn test_inner_whitespace_is_replaced() {
        assert_eq!(
            fix(&ArrayOpenerAndCloserNewlineFixer, "<?php $items = [ 10, 20 ];"),
            "<?php $items = [\n10, 20\n];"
        );
    }

    #[test]
    fn test_crlf_line_ending() {
        let config = FixerConfig {
            line_ending: LineEnding::CrLf,
            ..FixerConfig::default()
        };
        assert_eq!(
            fix_with(&ArrayOpenerAndCloserNewlineFixer, "<?php $items = [10, 20];", &config),
            "<?php $items = [\r\n10, 20\r\n];"
        );
    }

    #[test]
    fn test_idempotent() {
        assert_idempotent(&ArrayOpenerAndCloserNewlineFixer, "<?php $items = [10, 20];");
        assert_idempotent(&ArrayOpenerAndCloserNewlineFixer, "<?php $a = [[1, 2], [3, [4]]];");
        assert_idempotent(&ArrayOpenerAndCloserNewlineFixer, "<?php $a = [fn($x) => $x, 2];");
    }

    #[test]
    fn test_not_candidate_without_arrays() {
        let stream = tokenfix_core::fixture::lex("<?php foo(1, 2);");
        assert!(!ArrayOpenerAndCloserNewlineFixer.is_candidate(&stream));
    }
}

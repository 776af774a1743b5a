//! Line-breaking helpers shared by the block fixers

use tokenfix_core::analyzer::separator_indices;
use tokenfix_core::{BlockInfo, TokenStream};

/// Make sure the token before `index` is a line break
///
/// An existing line-breaking whitespace token is kept as it is, other
/// whitespace is replaced and anything else gets `whitespace` inserted after it.
pub(crate) fn ensure_newline_before(stream: &mut TokenStream, index: usize, whitespace: &str) {
    let Some(prev) = index.checked_sub(1) else {
        return;
    };
    stream.ensure_whitespace_at_index(prev, 1, whitespace);
}

/// Make sure the token after `index` is a line break
pub(crate) fn ensure_newline_after(stream: &mut TokenStream, index: usize, whitespace: &str) {
    stream.ensure_whitespace_at_index(index + 1, 0, whitespace);
}

/// Break the closer, every separating comma and then the opener of `block`
///
/// Edits go from the end of the block towards its start so the indices
/// still to be visited never move.
pub(crate) fn explode_block(
    stream: &mut TokenStream,
    block: BlockInfo,
    item_whitespace: &str,
    closer_whitespace: &str,
) {
    let separators = separator_indices(stream, block);

    ensure_newline_before(stream, block.end, closer_whitespace);
    for comma in separators.into_iter().rev() {
        ensure_newline_after(stream, comma, item_whitespace);
    }
    ensure_newline_after(stream, block.start, item_whitespace);
}

/// Leading whitespace of the line the token at `index` sits on
pub(crate) fn line_indent(stream: &TokenStream, index: usize) -> String {
    let mut line = String::new();

    for token in stream.tokens()[..index.min(stream.len())].iter().rev() {
        match token.content.rfind('\n') {
            Some(newline) => {
                line.insert_str(0, &token.content[newline + 1..]);
                break;
            }
            None => line.insert_str(0, &token.content),
        }
    }

    line.chars().take_while(|c| *c == ' ' || *c == '\t').collect()
}

#[cfg(test)]
mod tests {
    use tokenfix_core::fixture::lex;
    use tokenfix_core::{find_blocks, BlockType};

    use super::*;

    #[test]
    fn test_line_indent() {
        let stream = lex("<?php\nclass A\n{\n    public function __construct($a) {}\n}");
        let paren = stream.iter().position(|t| t.content == "(").unwrap();
        assert_eq!(line_indent(&stream, paren), "    ");

        let stream = lex("<?php $a = [1];");
        assert_eq!(line_indent(&stream, 5), "");
    }

    #[test]
    fn test_explode_block() {
        let mut stream = lex("<?php ['a' => 1, 'b' => 2,];");
        let block = find_blocks(&stream, BlockType::ARRAYS)[0];

        explode_block(&mut stream, block, "\n", "\n");
        assert_eq!(stream.code(), "<?php [\n'a' => 1,\n'b' => 2,\n];");
    }

    #[test]
    fn test_existing_line_breaks_are_kept() {
        let mut stream = lex("<?php [\n\n  1, 2\n];");
        let block = find_blocks(&stream, BlockType::ARRAYS)[0];

        ensure_newline_before(&mut stream, block.end, "\n");
        ensure_newline_after(&mut stream, block.start, "\n");
        assert_eq!(stream.code(), "<?php [\n\n  1, 2\n];");
    }
}

//! Constructor parameters on standalone lines

use tokenfix_core::analyzer::item_count;
use tokenfix_core::{BlockInfo, BlockType, RuleDefinition, TokenKind, TokenStream};

use crate::fixers::newliner::{explode_block, line_indent};
use crate::fixers::{for_each_block_from_end, Fixer, FixerConfig};

const CONSTRUCTOR: &str = "__construct";

/// Puts every constructor parameter on its own line
///
/// Parameters are indented one level deeper than the line holding
/// `__construct`, the closing parenthesis is aligned with that line.
pub struct StandaloneLineConstructorParamFixer;

fn is_constructor_parameters(stream: &TokenStream, block: BlockInfo) -> bool {
    stream
        .prev_meaningful(block.start)
        .map(|name| &stream[name])
        .is_some_and(|name| {
            name.is_kind(TokenKind::Identifier) && name.content.eq_ignore_ascii_case(CONSTRUCTOR)
        })
}

impl Fixer for StandaloneLineConstructorParamFixer {
    fn name(&self) -> &'static str {
        "standalone_line_constructor_param"
    }

    fn definition(&self) -> RuleDefinition {
        RuleDefinition::new(
            "Constructor parameters must each be on a standalone line",
            "final class Person\n{\n    public function __construct(int $age, string $name)\n    {\n    }\n}\n",
            "final class Person\n{\n    public function __construct(\n        int $age,\n        string $name\n    )\n    {\n    }\n}\n",
        )
    }

    fn priority(&self) -> i32 {
        30
    }

    fn is_candidate(&self, stream: &TokenStream) -> bool {
        stream.is_kind_found(TokenKind::Function)
            && stream
                .iter()
                .any(|t| t.is_kind(TokenKind::Identifier) && t.content.eq_ignore_ascii_case(CONSTRUCTOR))
    }

    fn fix(&self, stream: &mut TokenStream, config: &FixerConfig) {
        let line_ending = config.line_ending();
        let unit = config.indent.unit();

        for_each_block_from_end(stream, &[BlockType::ParameterList], |stream, block| {
            if !is_constructor_parameters(stream, block) || item_count(stream, block) == 0 {
                return;
            }

            let base = line_indent(stream, block.start);
            let item = format!("{line_ending}{base}{unit}");
            let closer = format!("{line_ending}{base}");
            explode_block(stream, block, &item, &closer);
        });
    }
}

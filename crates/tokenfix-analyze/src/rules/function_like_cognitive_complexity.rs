//! Cognitive complexity of functions, methods and closures

use tokenfix_core::RuleDefinition;

use super::cognitive_complexity::cognitive_complexity;
use super::{Rule, RuleContext};
use crate::issue::Issue;
use crate::logging;

/// Reports function-likes whose cognitive complexity exceeds
/// `max_function_complexity`
pub struct FunctionLikeCognitiveComplexityRule;

impl Rule for FunctionLikeCognitiveComplexityRule {
    fn id(&self) -> &'static str {
        "function_like_cognitive_complexity"
    }

    fn definition(&self) -> RuleDefinition {
        RuleDefinition::new(
            "Cognitive complexity of a function or method must stay under the threshold",
            r#"function run($items)
{
    foreach ($items as $item) {
        if ($item->isValid()) {
            if ($item->isNew() && !$item->isLocked() || $item->isForced()) {
                $item->save();
            }
        }
    }
}"#,
            r#"function run($items)
{
    foreach ($items as $item) {
        if (shouldSave($item)) {
            $item->save();
        }
    }
}"#,
        )
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let threshold = ctx.config.max_function_complexity;
        let mut issues = Vec::new();

        for function in &ctx.symbols.functions {
            let score = cognitive_complexity(ctx.stream, ctx.blocks, function.body.clone()).total;
            logging::log_complexity(&function.name, score, threshold);
            if score <= threshold {
                continue;
            }

            issues.push(
                Issue::error(
                    self.id(),
                    format!(
                        "Cognitive complexity for \"{}\" is {}, keep it under {}",
                        function.name, score, threshold
                    ),
                    ctx.file_path.to_path_buf(),
                    ctx.stream.line_of(function.keyword),
                    ctx.stream.column_of(function.keyword),
                )
                .with_identifier("complexity.functionLike")
                .with_tip("Extract nested blocks into well named functions"),
            );
        }

        issues
    }
}

//! Cognitive complexity of classes, summed over their methods

use tokenfix_core::RuleDefinition;

use super::cognitive_complexity::cognitive_complexity;
use super::{Rule, RuleContext};
use crate::issue::Issue;
use crate::logging;

/// Reports class-likes whose methods add up to more than
/// `max_class_complexity`
pub struct ClassLikeCognitiveComplexityRule;

impl Rule for ClassLikeCognitiveComplexityRule {
    fn id(&self) -> &'static str {
        "class_like_cognitive_complexity"
    }

    fn definition(&self) -> RuleDefinition {
        RuleDefinition::new(
            "Cognitive complexity of a class, the sum over its methods, must stay under the threshold",
            r#"class Importer
{
    public function import($rows)
    {
        foreach ($rows as $row) {
            if ($row->isValid() && !$row->isDuplicate()) {
                $this->store($row);
            } else {
                $this->reject($row);
            }
        }
    }

    public function store($row)
    {
        if ($row->exists() || $row->isLocked()) {
            return;
        }
    }
}"#,
            r#"class Importer
{
    public function import($rows)
    {
        array_map([$this, 'importRow'], $rows);
    }
}"#,
        )
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let threshold = ctx.config.max_class_complexity;
        let mut issues = Vec::new();

        for (index, class) in ctx.symbols.classes.iter().enumerate() {
            let score: u32 = ctx
                .symbols
                .methods_of(index)
                .map(|method| cognitive_complexity(ctx.stream, ctx.blocks, method.body.clone()).total)
                .sum();
            logging::log_complexity(&class.name, score, threshold);
            if score <= threshold {
                continue;
            }

            issues.push(
                Issue::error(
                    self.id(),
                    format!(
                        "Cognitive complexity for \"{}\" class is {}, keep it under {}",
                        class.name, score, threshold
                    ),
                    ctx.file_path.to_path_buf(),
                    ctx.stream.line_of(class.keyword),
                    ctx.stream.column_of(class.keyword),
                )
                .with_identifier("complexity.classLike")
                .with_tip("Split the class into smaller collaborators"),
            );
        }

        issues
    }
}

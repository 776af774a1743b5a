//! Table output format (default, human-readable)

use std::collections::BTreeMap;

use super::Formatter;
use crate::issue::{Issue, IssueCollection, Severity};

pub struct TableFormatter;

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl Formatter for TableFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        if issues.is_empty() {
            return " [OK] No errors\n".to_string();
        }

        let mut files: BTreeMap<String, Vec<&Issue>> = BTreeMap::new();
        for issue in issues.issues() {
            files.entry(issue.file.display().to_string()).or_default().push(issue);
        }

        let mut output = String::new();
        for (file_path, file_issues) in &files {
            output.push_str(&format!("\n -- {} --\n\n", file_path));

            for issue in file_issues {
                let marker = match issue.severity {
                    Severity::Error => "ERROR",
                    Severity::Warning => "WARNING",
                };
                output.push_str(&format!(
                    " {} Line {}:{}: {}\n",
                    marker, issue.line, issue.column, issue.message
                ));

                if let Some(identifier) = &issue.identifier {
                    output.push_str(&format!("       Identifier: {}\n", identifier));
                }
                if let Some(tip) = &issue.tip {
                    output.push_str(&format!("       Tip: {}\n", tip));
                }
            }
        }

        let errors = issues.error_count();
        output.push_str(&format!("\n [ERROR] Found {} error{}\n", errors, plural(errors)));

        let warnings = issues.warning_count();
        if warnings > 0 {
            output.push_str(&format!(" [WARNING] Found {} warning{}\n", warnings, plural(warnings)));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_table_format_empty() {
        let output = TableFormatter.format(&IssueCollection::new());
        assert_eq!(output, " [OK] No errors\n");
    }

    #[test]
    fn test_table_format_with_errors() {
        let mut issues = IssueCollection::new();
        issues.add(
            Issue::error("rule", "Too complex", PathBuf::from("src/a.tokens.json"), 10, 5)
                .with_identifier("complexity.functionLike")
                .with_tip("Split it"),
        );
        issues.add(Issue::warning("rule", "Close", PathBuf::from("src/a.tokens.json"), 12, 1));

        let output = TableFormatter.format(&issues);

        assert!(output.contains(" -- src/a.tokens.json --"));
        assert!(output.contains(" ERROR Line 10:5: Too complex"));
        assert!(output.contains("Identifier: complexity.functionLike"));
        assert!(output.contains("Tip: Split it"));
        assert!(output.contains("[ERROR] Found 1 error\n"));
        assert!(output.contains("[WARNING] Found 1 warning\n"));
    }
}

//! JSON output format

use std::collections::BTreeMap;

use serde::Serialize;

use super::Formatter;
use crate::issue::{Issue, IssueCollection, Severity};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    totals: Totals,
    files: BTreeMap<String, FileErrors<'a>>,
}

#[derive(Serialize)]
struct Totals {
    errors: usize,
    warnings: usize,
    file_errors: usize,
}

#[derive(Serialize)]
struct FileErrors<'a> {
    errors: usize,
    messages: Vec<FileMessage<'a>>,
}

#[derive(Serialize)]
struct FileMessage<'a> {
    message: &'a str,
    line: usize,
    column: usize,
    severity: Severity,
    rule: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tip: Option<&'a str>,
}

impl<'a> From<&'a Issue> for FileMessage<'a> {
    fn from(issue: &'a Issue) -> Self {
        Self {
            message: &issue.message,
            line: issue.line,
            column: issue.column,
            severity: issue.severity,
            rule: &issue.check_id,
            identifier: issue.identifier.as_deref(),
            tip: issue.tip.as_deref(),
        }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        let mut files: BTreeMap<String, FileErrors> = BTreeMap::new();

        for issue in issues.issues() {
            let entry = files
                .entry(issue.file.display().to_string())
                .or_insert_with(|| FileErrors {
                    errors: 0,
                    messages: Vec::new(),
                });
            if issue.severity == Severity::Error {
                entry.errors += 1;
            }
            entry.messages.push(FileMessage::from(issue));
        }

        let output = JsonOutput {
            totals: Totals {
                errors: issues.error_count(),
                warnings: issues.warning_count(),
                file_errors: files.len(),
            },
            files,
        };

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_json_format() {
        let mut issues = IssueCollection::new();
        issues.add(
            Issue::error(
                "function_like_cognitive_complexity",
                "Cognitive complexity for \"run\" is 9, keep it under 8",
                PathBuf::from("src/run.tokens.json"),
                2,
                1,
            )
            .with_identifier("complexity.functionLike"),
        );

        let value: serde_json::Value = serde_json::from_str(&JsonFormatter.format(&issues)).unwrap();

        assert_eq!(value["totals"]["errors"], 1);
        assert_eq!(value["totals"]["file_errors"], 1);
        let message = &value["files"]["src/run.tokens.json"]["messages"][0];
        assert_eq!(message["line"], 2);
        assert_eq!(message["severity"], "error");
        assert_eq!(message["identifier"], "complexity.functionLike");
        assert!(message.get("tip").is_none());
    }
}

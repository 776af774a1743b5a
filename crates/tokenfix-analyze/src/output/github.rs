//! GitHub Actions annotations output format

use super::Formatter;
use crate::issue::IssueCollection;

pub struct GithubFormatter;

impl Formatter for GithubFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        let mut output = String::new();

        for issue in issues.issues() {
            // ::error file={name},line={line},col={col},title={title}::{message}
            output.push_str(&format!(
                "::{} file={},line={},col={}",
                issue.severity,
                issue.file.display(),
                issue.line,
                issue.column,
            ));
            if let Some(identifier) = &issue.identifier {
                output.push_str(&format!(",title={}", escape_property(identifier)));
            }
            output.push_str(&format!("::{}\n", escape_message(&issue.message)));
        }

        output
    }
}

/// Escape special characters for GitHub Actions annotations
fn escape_message(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Property values additionally escape the property separators
fn escape_property(value: &str) -> String {
    escape_message(value).replace(':', "%3A").replace(',', "%2C")
}

//! Output formatting for fix runs
//!
//! Supports text (colored terminal), JSON and unified diff output.

use std::path::Path;
use std::str::FromStr;

use colored::*;
use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Diff,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "diff" => Ok(OutputFormat::Diff),
            _ => anyhow::bail!("Invalid output format '{}'. Valid options: text, json, diff", s),
        }
    }
}

/// Result of processing a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixers: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    pub fn success(path: &Path, fixers: Vec<&'static str>) -> Self {
        Self {
            path: path.display().to_string(),
            fixers,
            error: None,
        }
    }

    pub fn error(path: &Path, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            fixers: Vec::new(),
            error: Some(error),
        }
    }
}

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub files_processed: usize,
    pub files_with_changes: usize,
    pub errors: usize,
}

/// Full JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub version: String,
    pub summary: Summary,
    pub files: Vec<FileResult>,
}

/// Reporter for accumulating and outputting results
pub struct Reporter {
    format: OutputFormat,
    verbose: bool,
    results: Vec<FileResult>,
    summary: Summary,
}

impl Reporter {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            verbose,
            results: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Report a file with changes in check mode, showing what would change
    pub fn report_check(&mut self, path: &Path, fixers: Vec<&'static str>, old_source: &str, new_source: &str) {
        self.summary.files_processed += 1;
        self.summary.files_with_changes += 1;

        match self.format {
            OutputFormat::Text => {
                println!("{}", path.display().to_string().bold());
                print_diff(old_source, new_source);
                println!();
                for fixer in &fixers {
                    println!("  {} {}", "->".green(), fixer);
                }
                println!();
            }
            OutputFormat::Diff => print_unified_diff(path, old_source, new_source),
            // written out in finish()
            OutputFormat::Json => {}
        }

        self.results.push(FileResult::success(path, fixers));
    }

    /// Report a file after applying fixes
    pub fn report_fix(&mut self, path: &Path, fixers: Vec<&'static str>) {
        self.summary.files_processed += 1;
        self.summary.files_with_changes += 1;

        if self.format == OutputFormat::Text {
            println!("{}", path.display().to_string().bold());
            println!("  {} Fixed by {}", "OK".green(), fixers.join(", "));
            println!();
        }

        self.results.push(FileResult::success(path, fixers));
    }

    /// Report a file that needed no changes
    pub fn report_unchanged(&mut self, path: &Path) {
        self.summary.files_processed += 1;
        if self.verbose && self.format == OutputFormat::Text {
            println!("{}: No changes needed", path.display());
        }
        self.results.push(FileResult::success(path, vec![]));
    }

    /// Report an error processing a file
    pub fn report_error(&mut self, path: &Path, error: &str) {
        self.summary.files_processed += 1;
        self.summary.errors += 1;

        if self.format != OutputFormat::Json {
            eprintln!("{}: {} - {}", "Error".red(), path.display(), error);
        }

        self.results.push(FileResult::error(path, error.to_string()));
    }

    /// Print final summary/output
    pub fn finish(self, check_mode: bool) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => {
                println!();
                println!("{}", "Summary".bold().underline());
                println!("  Files processed: {}", self.summary.files_processed);
                println!("  Files with changes: {}", self.summary.files_with_changes);
                if self.summary.errors > 0 {
                    println!("  Errors: {}", self.summary.errors);
                }

                if check_mode && self.summary.files_with_changes > 0 {
                    println!();
                    println!("{}", "Run without --check to apply changes".yellow());
                }
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    summary: self.summary,
                    files: self.results,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            // patch-compatible output has no summary
            OutputFormat::Diff => {}
        }
        Ok(())
    }

    /// Get summary for exit code determination
    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Print the changed lines between old and new content
fn print_diff(old: &str, new: &str) {
    for line in diff::lines(old, new) {
        match line {
            diff::Result::Left(l) => println!("  {}", format!("- {}", l).red()),
            diff::Result::Right(r) => println!("  {}", format!("+ {}", r).green()),
            diff::Result::Both(_, _) => {}
        }
    }
}

/// Print unified diff format (standard diff -u compatible)
fn print_unified_diff(path: &Path, old: &str, new: &str) {
    print!("{}", unified_diff(path, old, new));
}

fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    use similar::{ChangeTag, TextDiff};

    let diff = TextDiff::from_lines(old, new);
    let path_str = path.display().to_string();
    let mut out = format!("--- a/{}\n+++ b/{}\n", path_str, path_str);

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        out.push_str(&format!("{}\n", hunk.header()));
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            out.push_str(&format!("{}{}", sign, change));
            if change.missing_newline() {
                out.push('\n');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("diff".parse::<OutputFormat>().unwrap(), OutputFormat::Diff);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_json_serialization() {
        let output = JsonOutput {
            version: "0.1.0".to_string(),
            summary: Summary {
                files_processed: 2,
                files_with_changes: 1,
                errors: 1,
            },
            files: vec![
                FileResult::success(Path::new("a.tokens.json"), vec!["array_opener_and_closer_newline"]),
                FileResult::error(Path::new("b.tokens.json"), "Malformed token stream".to_string()),
            ],
        };

        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"files_processed\":2"));
        assert!(json.contains("\"fixers\":[\"array_opener_and_closer_newline\"]"));
        assert!(json.contains("\"error\":\"Malformed token stream\""));
        assert!(!json.contains("\"fixers\":[]"));
    }

    #[test]
    fn test_unified_diff() {
        let diff = unified_diff(
            Path::new("a.tokens.json"),
            "<?php\n$items = [10, 20];\n",
            "<?php\n$items = [\n    10, 20\n];\n",
        );

        assert!(diff.starts_with("--- a/a.tokens.json\n+++ b/a.tokens.json\n@@ "));
        assert!(diff.contains("-$items = [10, 20];\n"));
        assert!(diff.contains("+$items = [\n+    10, 20\n+];\n"));
    }

    #[test]
    fn test_reporter_counts() {
        let mut reporter = Reporter::new(OutputFormat::Json, false);
        reporter.report_unchanged(Path::new("a.tokens.json"));
        reporter.report_fix(Path::new("b.tokens.json"), vec!["array_indentation"]);
        reporter.report_error(Path::new("c.tokens.json"), "unreadable");

        let summary = reporter.summary();
        assert_eq!(summary.files_processed, 3);
        assert_eq!(summary.files_with_changes, 1);
        assert_eq!(summary.errors, 1);
    }
}

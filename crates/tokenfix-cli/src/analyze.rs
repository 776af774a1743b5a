//! Analysis subcommand

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use colored::*;
use tokenfix_analyze::output::{format_issues, OutputFormat};
use tokenfix_analyze::{AnalyzeConfig, Analyzer, IssueCollection};

/// Arguments for the analyze subcommand
pub struct AnalyzeArgs {
    /// Paths to analyze
    pub paths: Vec<PathBuf>,
    /// Output format: raw, json, table, github
    pub error_format: Option<String>,
    /// Overrides `max_function_complexity`
    pub max_function_complexity: Option<u32>,
    /// Overrides `max_class_complexity`
    pub max_class_complexity: Option<u32>,
    pub verbose: bool,
}

/// Run the analyze subcommand
pub fn run_analyze(args: AnalyzeArgs, mut config: AnalyzeConfig) -> Result<ExitCode> {
    if let Some(max) = args.max_function_complexity {
        config.max_function_complexity = max;
    }
    if let Some(max) = args.max_class_complexity {
        config.max_class_complexity = max;
    }

    let format: OutputFormat = match &args.error_format {
        Some(format) => format.parse().map_err(anyhow::Error::msg)?,
        None => OutputFormat::default(),
    };

    if args.verbose {
        println!(
            "{}: function {}, class {}",
            "Thresholds".bold(),
            config.max_function_complexity,
            config.max_class_complexity
        );
        println!(
            "{}: {}",
            "Analyzing".bold(),
            args.paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
        );
        println!();
    }

    let analyzer = Analyzer::new(config);
    let paths: Vec<_> = args.paths.iter().map(|p| p.as_path()).collect();
    let issues = analyzer.analyze_paths(&paths)?;

    print!("{}", format_issues(&issues, format));

    Ok(ExitCode::from(exit_status(&issues)))
}

/// 1 when a file could not be analyzed, 2 when rules reported issues
fn exit_status(issues: &IssueCollection) -> u8 {
    let failed = issues
        .issues()
        .iter()
        .any(|i| i.check_id == tokenfix_analyze::ANALYZE_ERROR);

    if failed {
        1
    } else if !issues.is_empty() {
        2
    } else {
        0
    }
}

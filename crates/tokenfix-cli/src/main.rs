//! tokenfix CLI - token stream fixers and cognitive complexity analysis
//!
//! Input files are token dumps: JSON arrays of `{kind, content}` objects
//! named `*.tokens.json`, as written by an upstream tokenizer.
//!
//! Available fixers:
//! - array_opener_and_closer_newline: Put indexed array openers and closers on their own lines
//! - array_list_item_newline: Put every item of a keyed array on its own line
//! - standalone_line_constructor_param: Put every constructor parameter on its own line
//! - array_indentation: Indent multiline arrays one level deeper than their opener line

mod analyze;
mod config;
mod output;
mod process;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use rayon::prelude::*;
use tokenfix_analyze::rules::RuleRegistry;
use tokenfix_analyze::{dump, logging};
use tokenfix_fixer::{FixerConfig, FixerRegistry};

use analyze::AnalyzeArgs;
use config::Config;
use output::{OutputFormat, Reporter};
use process::{process_file, write_file, ProcessResult};

#[derive(Parser)]
#[command(name = "tokenfix")]
#[command(version)]
#[command(about = "Formatting fixers and cognitive complexity analysis over token streams")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to config file (default: auto-detect .tokenfix.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true, conflicts_with = "config")]
    no_config: bool,

    /// Show verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Write a debug log (default: /tmp/tokenfix-<timestamp>.log)
    #[arg(long, global = true, value_name = "FILE", num_args = 0..=1)]
    debug_log: Option<Option<PathBuf>>,
}

#[derive(Subcommand)]
enum Command {
    /// Run fixers over token dumps
    Fix(FixArgs),
    /// Report functions and classes that are too complex
    Analyze(AnalyzeCommand),
    /// List available fixers and rules
    List,
}

#[derive(Args)]
struct FixArgs {
    /// Token dumps or directories holding them
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Show what would change without writing files
    #[arg(long, visible_alias = "dry-run", short = 'n')]
    check: bool,

    /// Fixers to run (can be specified multiple times). Overrides config file.
    #[arg(long, short = 'f', value_name = "FIXER")]
    fixer: Vec<String>,

    /// Preset to run: arrays, standard
    #[arg(long, value_name = "PRESET", conflicts_with = "fixer")]
    preset: Option<String>,

    /// Output format: text, json, diff
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,
}

#[derive(Args)]
struct AnalyzeCommand {
    /// Token dumps or directories holding them
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format: raw, json, table, github
    #[arg(long, value_name = "FORMAT")]
    error_format: Option<String>,

    /// Highest cognitive complexity a function may have
    #[arg(long, value_name = "N")]
    max_function_complexity: Option<u32>,

    /// Highest summed cognitive complexity a class may have
    #[arg(long, value_name = "N")]
    max_class_complexity: Option<u32>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(log_path) = &cli.debug_log {
        match logging::init_logger(log_path.as_deref()) {
            Ok(path) if cli.verbose => println!("{}: Debug log writing to {}", "Debug".bold(), path.display()),
            Ok(_) => {}
            Err(e) => eprintln!("{}: Failed to initialize debug log: {}", "Warning".yellow(), e),
        }
    }

    let (config, config_path) = Config::resolve(cli.config.as_deref(), cli.no_config)?;
    if let Some(path) = &config_path {
        logging::log_config_load(path);
        if cli.verbose {
            eprintln!("{}: {}", "Using config".bold(), path.display());
        }
    }

    match cli.command {
        Command::Fix(args) => run_fix(args, &config, cli.verbose),
        Command::Analyze(args) => {
            let analyze_config = config.analyze_config();
            logging::log_config_summary(
                &[],
                analyze_config.max_function_complexity,
                analyze_config.max_class_complexity,
                analyze_config.exclude.len(),
                analyze_config.ignore_errors.len(),
            );
            analyze::run_analyze(
                AnalyzeArgs {
                    paths: args.paths,
                    error_format: args.error_format,
                    max_function_complexity: args.max_function_complexity,
                    max_class_complexity: args.max_class_complexity,
                    verbose: cli.verbose,
                },
                analyze_config,
            )
        }
        Command::List => {
            list();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn list() {
    println!("{}", "Available fixers (in execution order):".bold());
    for info in FixerRegistry::new().list() {
        println!("  {} - {}", info.name.green(), info.description);
        if !info.runs_before.is_empty() {
            println!("      priority {}, runs before {}", info.priority, info.runs_before.join(", "));
        }
    }

    println!();
    println!("{}", "Available rules:".bold());
    for rule in RuleRegistry::with_builtin_rules().all_rules() {
        println!("  {} - {}", rule.id().green(), rule.description());
    }
}

fn run_fix(args: FixArgs, config: &Config, verbose: bool) -> Result<ExitCode> {
    let registry = FixerRegistry::new();
    let all_fixers: Vec<&str> = registry.list().iter().map(|info| info.name).collect();

    let enabled = config.effective_fixers(&all_fixers, &args.fixer, args.preset.as_deref())?;
    if enabled.is_empty() {
        bail!("No fixers enabled");
    }
    let enabled: Vec<&str> = enabled.iter().map(String::as_str).collect();
    // unknown names and ordering cycles surface before any file is read
    let scheduled: Vec<&str> = registry.schedule(&enabled)?.iter().map(|f| f.name()).collect();

    let format = if args.json {
        OutputFormat::Json
    } else {
        match args.format.as_deref().or(config.output.format.as_deref()) {
            Some(format) => format.parse()?,
            None => OutputFormat::Text,
        }
    };
    let check_mode = args.check;

    logging::log_config_summary(
        &scheduled,
        config.analyze.max_function_complexity,
        config.analyze.max_class_complexity,
        config.paths.exclude.len(),
        config.analyze.ignore_errors.len(),
    );

    if verbose && format == OutputFormat::Text {
        println!("{}: {}", "Mode".bold(), if check_mode { "check" } else { "fix" });
        println!("{}: {}", "Fixers".bold(), scheduled.join(", "));
        println!();
    }

    for path in args.paths.iter().filter(|p| !p.exists()) {
        if format == OutputFormat::Text {
            eprintln!("{}: Path does not exist: {}", "Warning".yellow(), path.display());
        }
    }

    let paths: Vec<&Path> = args.paths.iter().map(|p| p.as_path()).collect();
    let files = dump::collect_token_dumps(&paths, |path| config.should_exclude(path));
    let fixer_config = FixerConfig::from(&config.whitespace);

    let results: Vec<Result<ProcessResult>> = files
        .par_iter()
        .map(|path| process_file(path, &registry, &scheduled, &fixer_config))
        .collect();

    let mut reporter = Reporter::new(format, verbose);
    for (path, result) in files.iter().zip(results) {
        report_result(path, result, check_mode, &mut reporter)?;
    }

    let summary = reporter.summary();
    let exit_code = if summary.errors > 0 {
        ExitCode::from(1)
    } else if check_mode && summary.files_with_changes > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    };

    reporter.finish(check_mode)?;
    Ok(exit_code)
}

/// Report a file result and write the fixed dump outside check mode
fn report_result(path: &Path, result: Result<ProcessResult>, check_mode: bool, reporter: &mut Reporter) -> Result<()> {
    match result {
        Ok(ProcessResult {
            applied,
            old_source,
            new_source,
            new_dump: Some(new_dump),
        }) => {
            if check_mode {
                reporter.report_check(path, applied, &old_source, &new_source);
            } else {
                write_file(path, &new_dump)?;
                reporter.report_fix(path, applied);
            }
        }
        Ok(_) => reporter.report_unchanged(path),
        Err(e) => reporter.report_error(path, &format!("{:#}", e)),
    }
    Ok(())
}

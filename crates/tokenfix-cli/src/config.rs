//! Configuration file support for tokenfix
//!
//! Loads `.tokenfix.toml` from current directory or parent directories.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tokenfix_analyze::AnalyzeConfig;
use tokenfix_fixer::config::Preset;
use tokenfix_fixer::WhitespaceConfig;

/// Name of the configuration file
pub const CONFIG_FILE: &str = ".tokenfix.toml";

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fixer: FixerSection,
    pub whitespace: WhitespaceConfig,
    pub analyze: AnalyzeConfig,
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FixerSection {
    /// Preset to use (arrays, standard)
    pub preset: Option<String>,
    /// If set, only these fixers will run (overrides preset)
    pub enabled: Option<Vec<String>>,
    /// Fixers to exclude (applied after enabled/preset)
    pub disabled: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Glob patterns to exclude from processing
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format of `fix`: "text", "json" or "diff"
    pub format: Option<String>,
}

impl Config {
    /// Load config from `.tokenfix.toml` searching from current directory upward
    pub fn load() -> Result<Option<(Config, PathBuf)>> {
        Self::load_from(std::env::current_dir()?)
    }

    /// Load config searching from the given directory upward
    pub fn load_from(start_dir: PathBuf) -> Result<Option<(Config, PathBuf)>> {
        let mut current = Some(start_dir.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Self::load_path(&config_path)?;
                return Ok(Some((config, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Load config from a specific path
    pub fn load_path(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Resolve `--config`/`--no-config` into a configuration and where it came from
    pub fn resolve(explicit: Option<&Path>, no_config: bool) -> Result<(Config, Option<PathBuf>)> {
        if no_config {
            return Ok((Config::default(), None));
        }
        if let Some(path) = explicit {
            return Ok((Self::load_path(path)?, Some(path.to_path_buf())));
        }
        Ok(match Self::load()? {
            Some((config, path)) => (config, Some(path)),
            None => (Config::default(), None),
        })
    }

    /// Compute the fixers to run, in registry order
    ///
    /// Fixers named on the command line win, then a preset given on the
    /// command line, then the `[fixer]` section. Disabled fixers are
    /// removed last.
    pub fn effective_fixers(
        &self,
        all_fixers: &[&str],
        cli_fixers: &[String],
        cli_preset: Option<&str>,
    ) -> Result<Vec<String>> {
        let mut fixers: Vec<String> = if !cli_fixers.is_empty() {
            cli_fixers.to_vec()
        } else if let Some(preset) = cli_preset.or(self.fixer.preset.as_deref()) {
            match Preset::from_str(preset) {
                Some(preset) => preset.fixers().iter().map(|s| s.to_string()).collect(),
                None => bail!("Unknown preset '{}'. Available presets: arrays, standard", preset),
            }
        } else if let Some(enabled) = &self.fixer.enabled {
            enabled.clone()
        } else {
            all_fixers.iter().map(|s| s.to_string()).collect()
        };

        if cli_fixers.is_empty() {
            fixers.retain(|f| !self.fixer.disabled.contains(f));
        }
        fixers.dedup();
        Ok(fixers)
    }

    /// Analysis settings with the `[paths]` excludes folded in
    pub fn analyze_config(&self) -> AnalyzeConfig {
        let mut config = self.analyze.clone();
        for pattern in &self.paths.exclude {
            if !config.exclude.contains(pattern) {
                config.exclude.push(pattern.clone());
            }
        }
        config
    }

    /// Check if a path should be excluded based on config patterns
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.paths.exclude {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
                if let Some(file_name) = path.file_name() {
                    if glob_pattern.matches(&file_name.to_string_lossy()) {
                        return true;
                    }
                }
            }

            if pattern.ends_with('/') {
                let dir_pattern = pattern.trim_end_matches('/');
                if path_str.contains(&format!("/{}/", dir_pattern))
                    || path_str.starts_with(&format!("{}/", dir_pattern))
                {
                    return true;
                }
            }
        }

        false
    }
}

//! tokenfix-fixer: token-stream formatting fixers
//!
//! Fixers rewrite the whitespace of a [`TokenStream`](tokenfix_core::TokenStream)
//! in place; the registry orders them so that every fixer runs before those
//! it declares in `runs_before`.
//!
//! # Example
//!
//! ```ignore
//! use tokenfix_fixer::{FixerConfig, FixerRegistry, WhitespaceConfig};
//!
//! let registry = FixerRegistry::new();
//! let config = FixerConfig::from(&WhitespaceConfig::default());
//! let applied = registry.fix_preset(&mut stream, "standard", &config)?;
//! ```

pub mod config;
pub mod fixers;

pub use config::{IndentStyle, LineEnding, Preset, WhitespaceConfig};
pub use fixers::{Fixer, FixerConfig, FixerError, FixerInfo, FixerRegistry};

//! Configuration for the fixers
//!
//! Whitespace settings are injected at construction of a run and turned into
//! a [`FixerConfig`](crate::FixerConfig); presets name groups of fixers.

mod presets;
mod whitespace;

pub use presets::{get_preset_fixers, Preset, ARRAY_FIXERS, STANDARD_FIXERS};
pub use whitespace::{IndentStyle, LineEnding, WhitespaceConfig};

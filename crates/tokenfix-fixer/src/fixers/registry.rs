//! Fixer registry for managing available fixers
//!
//! The registry collects all available fixers and provides methods
//! to look them up by name and apply them in a dependency-respecting order.

use std::collections::HashMap;
use std::sync::Arc;

use tokenfix_core::TokenStream;

use super::arrays::{ArrayListItemNewlineFixer, ArrayOpenerAndCloserNewlineFixer};
use super::functions::StandaloneLineConstructorParamFixer;
use super::whitespace::ArrayIndentationFixer;
use super::{Fixer, FixerConfig, FixerError};

/// Information about a registered fixer
#[derive(Debug, Clone)]
pub struct FixerInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub priority: i32,
    pub runs_before: &'static [&'static str],
}

/// Registry of all available fixers
pub struct FixerRegistry {
    fixers: Vec<Arc<dyn Fixer>>,
    by_name: HashMap<&'static str, usize>,
}

impl FixerRegistry {
    /// Create a new registry with all built-in fixers
    pub fn new() -> Self {
        let mut registry = Self::empty();

        // Register array fixers
        registry.register(Arc::new(ArrayOpenerAndCloserNewlineFixer));
        registry.register(Arc::new(ArrayListItemNewlineFixer));

        // Register function fixers
        registry.register(Arc::new(StandaloneLineConstructorParamFixer));

        // Register whitespace fixers
        registry.register(Arc::new(ArrayIndentationFixer));

        registry
    }

    /// Create a registry without any fixers
    pub fn empty() -> Self {
        Self {
            fixers: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a fixer, replacing one of the same name
    pub fn register(&mut self, fixer: Arc<dyn Fixer>) {
        match self.by_name.get(fixer.name()) {
            Some(&idx) => self.fixers[idx] = fixer,
            None => {
                self.by_name.insert(fixer.name(), self.fixers.len());
                self.fixers.push(fixer);
            }
        }
    }

    /// Get a fixer by its name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Fixer>> {
        self.by_name.get(name).map(|&idx| &self.fixers[idx])
    }

    /// Get all fixers in registration order
    pub fn all(&self) -> &[Arc<dyn Fixer>] {
        &self.fixers
    }

    /// Get information about all fixers, in execution order
    pub fn list(&self) -> Vec<FixerInfo> {
        let names: Vec<&str> = self.fixers.iter().map(|f| f.name()).collect();
        let ordered = self.schedule(&names).unwrap_or_else(|_| self.fixers.iter().collect());

        ordered
            .into_iter()
            .map(|f| FixerInfo {
                name: f.name(),
                description: f.description(),
                priority: f.priority(),
                runs_before: f.runs_before(),
            })
            .collect()
    }

    /// Order the named fixers for execution
    ///
    /// A fixer always runs before every fixer its `runs_before` names.
    /// Among fixers that are free to run, the highest priority goes first,
    /// then the alphabetically smallest name.
    pub fn schedule(&self, fixer_names: &[&str]) -> Result<Vec<&Arc<dyn Fixer>>, FixerError> {
        let mut selected: Vec<&Arc<dyn Fixer>> = Vec::with_capacity(fixer_names.len());
        for name in fixer_names {
            let fixer = self
                .get(name)
                .ok_or_else(|| FixerError::UnknownFixer(name.to_string()))?;
            if !selected.iter().any(|f| f.name() == fixer.name()) {
                selected.push(fixer);
            }
        }

        let count = selected.len();
        let mut waiting_on: Vec<usize> = selected
            .iter()
            .map(|f| {
                selected
                    .iter()
                    .filter(|g| g.runs_before().contains(&f.name()))
                    .count()
            })
            .collect();
        let mut scheduled = vec![false; count];
        let mut order = Vec::with_capacity(count);

        while order.len() < count {
            let next = (0..count)
                .filter(|&i| !scheduled[i] && waiting_on[i] == 0)
                .min_by(|&a, &b| {
                    selected[b]
                        .priority()
                        .cmp(&selected[a].priority())
                        .then_with(|| selected[a].name().cmp(selected[b].name()))
                });

            let Some(next) = next else {
                let stuck = (0..count)
                    .filter(|&i| !scheduled[i])
                    .map(|i| selected[i].name().to_string())
                    .collect();
                return Err(FixerError::PriorityCycle(stuck));
            };

            scheduled[next] = true;
            for later in 0..count {
                if !scheduled[later] && selected[next].runs_before().contains(&selected[later].name()) {
                    waiting_on[later] -= 1;
                }
            }
            order.push(selected[next]);
        }

        Ok(order)
    }

    /// Run the named fixers over `stream`
    ///
    /// Fixers run one after another on the same stream, each seeing the
    /// edits of those before it. Returns the names of the fixers that
    /// changed the stream.
    pub fn fix(
        &self,
        stream: &mut TokenStream,
        fixer_names: &[&str],
        config: &FixerConfig,
    ) -> Result<Vec<&'static str>, FixerError> {
        let mut applied = Vec::new();

        for fixer in self.schedule(fixer_names)? {
            if !fixer.is_candidate(stream) {
                continue;
            }

            let before = stream.generation();
            fixer.fix(stream, config);
            if stream.generation() != before {
                applied.push(fixer.name());
            }
        }

        Ok(applied)
    }

    /// Run all fixers
    pub fn fix_all(&self, stream: &mut TokenStream, config: &FixerConfig) -> Result<Vec<&'static str>, FixerError> {
        let names: Vec<&str> = self.fixers.iter().map(|f| f.name()).collect();
        self.fix(stream, &names, config)
    }

    /// Run the fixers of a preset
    pub fn fix_preset(
        &self,
        stream: &mut TokenStream,
        preset: &str,
        config: &FixerConfig,
    ) -> Result<Vec<&'static str>, FixerError> {
        let names = crate::config::get_preset_fixers(preset);
        self.fix(stream, names, config)
    }

    /// Number of registered fixers
    pub fn len(&self) -> usize {
        self.fixers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.fixers.is_empty()
    }
}

impl Default for FixerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

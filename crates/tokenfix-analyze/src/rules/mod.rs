//! Analysis rules over token streams

pub mod class_like_cognitive_complexity;
pub mod cognitive_complexity;
pub mod function_like;
pub mod function_like_cognitive_complexity;

pub use class_like_cognitive_complexity::ClassLikeCognitiveComplexityRule;
pub use function_like_cognitive_complexity::FunctionLikeCognitiveComplexityRule;

use std::path::Path;

use tokenfix_core::{BlockFinder, RuleDefinition, TokenStream};

use crate::config::AnalyzeConfig;
use crate::issue::Issue;
use function_like::Symbols;

/// Context provided to rules during analysis
pub struct RuleContext<'a> {
    /// The file being analyzed
    pub file_path: &'a Path,
    pub stream: &'a TokenStream,
    /// Blocks of the whole stream, scanned once per file
    pub blocks: &'a BlockFinder,
    /// Function-likes and class-likes declared in the file
    pub symbols: &'a Symbols,
    pub config: &'a AnalyzeConfig,
}

/// Trait for analysis rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule (e.g., "function_like_cognitive_complexity")
    fn id(&self) -> &'static str;

    /// Bad and good sample for documentation
    fn definition(&self) -> RuleDefinition;

    /// Human-readable description
    fn description(&self) -> &'static str {
        self.definition().description
    }

    /// Run the rule and return any issues found
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Issue>;
}

/// Registry of all available rules
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in rules
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(FunctionLikeCognitiveComplexityRule));
        registry.register(Box::new(ClassLikeCognitiveComplexityRule));
        registry
    }

    /// Register a rule, replacing any rule with the same id
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.retain(|r| r.id() != rule.id());
        self.rules.push(rule);
    }

    /// Get all registered rules
    pub fn all_rules(&self) -> Vec<&dyn Rule> {
        self.rules.iter().map(|r| r.as_ref()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.id() == id).map(|r| r.as_ref())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules() {
        let registry = RuleRegistry::with_builtin_rules();
        assert_eq!(
            registry.ids(),
            vec!["function_like_cognitive_complexity", "class_like_cognitive_complexity"]
        );
        assert!(registry.get("class_like_cognitive_complexity").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = RuleRegistry::with_builtin_rules();
        registry.register(Box::new(FunctionLikeCognitiveComplexityRule));
        assert_eq!(registry.all_rules().len(), 2);
        assert_eq!(registry.ids()[1], "function_like_cognitive_complexity");
    }

    #[test]
    fn test_every_rule_documents_itself() {
        for rule in RuleRegistry::with_builtin_rules().all_rules() {
            let definition = rule.definition();
            assert!(!rule.description().is_empty());
            assert_ne!(definition.bad_sample, definition.good_sample);
        }
    }
}

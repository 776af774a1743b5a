//! Documentation contract shared by fixers and rules

/// Human-readable definition of a fixer or rule
///
/// Every fixer and rule carries exactly one canonical "bad" sample and one
/// canonical "good" sample; documentation generators render both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDefinition {
    pub description: &'static str,
    pub bad_sample: &'static str,
    pub good_sample: &'static str,
}

impl RuleDefinition {
    pub const fn new(
        description: &'static str,
        bad_sample: &'static str,
        good_sample: &'static str,
    ) -> Self {
        Self {
            description,
            bad_sample,
            good_sample,
        }
    }
}

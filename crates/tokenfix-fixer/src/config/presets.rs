//! Fixer presets
//!
//! Maps preset names to the fixers they enable.

/// Available presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Arrays,
    Standard,
}

impl Preset {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_start_matches('@').to_lowercase().as_str() {
            "arrays" | "array" => Some(Preset::Arrays),
            "standard" | "all" => Some(Preset::Standard),
            _ => None,
        }
    }

    pub fn fixers(self) -> &'static [&'static str] {
        match self {
            Preset::Arrays => ARRAY_FIXERS,
            Preset::Standard => STANDARD_FIXERS,
        }
    }
}

/// Get the fixer names of a preset, empty for unknown presets
pub fn get_preset_fixers(preset_name: &str) -> &'static [&'static str] {
    Preset::from_str(preset_name)
        .map(Preset::fixers)
        .unwrap_or(&[])
}

/// Array layout fixers
pub const ARRAY_FIXERS: &[&str] = &[
    "array_opener_and_closer_newline",
    "array_list_item_newline",
    "array_indentation",
];

/// Every built-in fixer
pub const STANDARD_FIXERS: &[&str] = &[
    "array_opener_and_closer_newline",
    "array_list_item_newline",
    "standalone_line_constructor_param",
    "array_indentation",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_str() {
        assert_eq!(Preset::from_str("arrays"), Some(Preset::Arrays));
        assert_eq!(Preset::from_str("@Arrays"), Some(Preset::Arrays));
        assert_eq!(Preset::from_str("standard"), Some(Preset::Standard));
        assert_eq!(Preset::from_str("all"), Some(Preset::Standard));
        assert_eq!(Preset::from_str("psr12"), None);
    }

    #[test]
    fn test_get_preset_fixers() {
        assert!(get_preset_fixers("arrays").contains(&"array_indentation"));
        assert!(!get_preset_fixers("arrays").contains(&"standalone_line_constructor_param"));
        assert!(get_preset_fixers("unknown").is_empty());
    }

    #[test]
    fn test_standard_is_superset_of_arrays() {
        for name in ARRAY_FIXERS {
            assert!(STANDARD_FIXERS.contains(name), "{} missing from standard", name);
        }
    }
}

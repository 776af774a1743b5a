//! Whitespace fixers

mod array_indentation;

pub use array_indentation::ArrayIndentationFixer;

//! Function declaration fixers

mod standalone_line_constructor_param;

pub use standalone_line_constructor_param::StandaloneLineConstructorParamFixer;

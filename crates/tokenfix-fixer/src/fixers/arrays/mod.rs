//! Array literal fixers

mod array_list_item_newline;
mod array_opener_and_closer_newline;

pub use array_list_item_newline::ArrayListItemNewlineFixer;
pub use array_opener_and_closer_newline::ArrayOpenerAndCloserNewlineFixer;

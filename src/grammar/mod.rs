pub mod first_follow;
pub mod grammar;
pub mod ll1_table;
pub mod parse;
pub mod pretty_print;
pub use grammar::Grammar;
pub use ll1_table::Ll1Table;

pub const EPSILON: &str = "epsilon";
pub const END_MARK: &str = "$";

// Interning order fixed by Grammar::new.
pub const EPSILON_IDX: usize = 0;
pub const END_MARK_IDX: usize = 1;

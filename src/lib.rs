//! Generate crossword fills by treating each slot as a variable in a constraint satisfaction
//! problem: node consistency, then arc consistency (AC-3), then heuristic backtracking search.

pub mod arc_consistency;
pub mod assignment;
pub mod backtracking_search;
pub mod crossword;
pub mod domain;
pub mod ordering;
pub mod render;
pub mod word_list;

mod error;

pub use assignment::{is_complete, is_consistent, Assignment, Choice};
pub use backtracking_search::{find_fill, solve, FillSuccess, SolveOptions, Statistics};
pub use crossword::{Crossword, Direction, Variable};
pub use error::Error;
pub use render::{render_grid, render_image};
pub use word_list::WordList;

/// The expected maximum number of slots appearing in a grid.
pub const MAX_SLOT_COUNT: usize = 256;

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

pub type Result<T> = std::result::Result<T, Error>;

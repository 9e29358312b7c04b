#![warn(missing_docs)]

//! # `tagchain`
//!
//! Rules and state for a linking puzzle: a set of named tiles, each carrying descriptive tags,
//! must be joined pairwise into one simple chain. Two tiles may only be linked if they share a tag
//! (on [`Hard`](Difficulty::Hard), exactly one real tag), no tile may have more than two links,
//! and the finished chain has exactly two ends.
//!
//! Begin with a [`Puzzle`], either from the handcrafted [`Catalog`], a [`PuzzleBuilder`], or one of the
//! [`generator`] functions, and turn it into a [`Board`]. Player actions map to [`Board::link`] and [`Board::unlink`];
//! [`Board::check_chain`] decides whether the puzzle is solved and [`Board::give_hint`] suggests the next link
//! of the reference solution.
//!
//! ```
//! use tagchain::{Board, Catalog, Difficulty};
//!
//! let catalog = Catalog::handcrafted();
//! let mut board = Board::new(catalog.select_by_index(0).clone());
//!
//! assert!(board.link("Dog", "Bone", Difficulty::Easy).is_ok());
//! assert_eq!(board.link("Dog", "Cat", Difficulty::Easy).unwrap_err().reason(), "no shared tag");
//!
//! board.auto_solve();
//! assert!(board.check_chain().is_ok());
//! ```
//!
//! # Internals
//! A board is an undirected graph with one node per tile and one edge per link.
//! Every rule is enforced when a link is placed; the chain check re-derives the path shape from the graph
//! every time it is asked: link count first, then isolated tiles, then degrees, then a walk from one end.
//!
//! Tag visibility ([`view`]) and the optional browser bindings are thin layers over the board and
//! hold no rules of their own.

pub use board::{Board, Linked, DEFAULT_MAX_DEGREE};
pub use builder::{BuilderInvalidReason, Puzzle, PuzzleBuilder};
pub use catalog::Catalog;
pub use difficulty::Difficulty;
pub use error::{ChainDefect, LinkError};
pub use hint::Hint;
pub use link::Link;
pub use tile::{is_decoy, Tile, DECOY_PREFIX};

pub(crate) mod board;
mod tests;
pub(crate) mod builder;
pub(crate) mod catalog;
pub(crate) mod difficulty;
pub mod error;
pub mod generator;
pub(crate) mod hint;
pub(crate) mod link;
pub(crate) mod tile;
pub mod view;
#[cfg(feature = "wasm")]
pub mod wasm;

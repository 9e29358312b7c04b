use std::fmt::{Display, Formatter};

use log::info;

use crate::board::Board;
use crate::link::Link;

/// A suggestion drawn from the reference solution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Hint {
    /// The first reference link, in sorted order, which is not on the board.
    TryLinking(Link),
    /// Every reference link is already on the board.
    NoHints,
}

impl Display for Hint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Hint::TryLinking(link) => write!(f, "try linking {link}"),
            Hint::NoHints => write!(f, "no hints available"),
        }
    }
}

impl Board {
    /// Suggest the next missing link of the reference solution.
    ///
    /// This is a lookup, not a solver: links the player placed elsewhere are not taken into account,
    /// so following a hint may still require undoing other links.
    pub fn give_hint(&self) -> Hint {
        match self.reference.iter().find(|link| !self.is_linked(link.first(), link.second())) {
            Some(link) => Hint::TryLinking(link.clone()),
            None => Hint::NoHints,
        }
    }

    /// Replace every link with the reference solution. The links are trusted, not re-checked.
    pub fn auto_solve(&mut self) {
        info!("filling in {} reference links", self.reference.len());
        let reference = self.reference.clone();
        self.replace_links(&reference);
    }

    /// Number of links in the reference solution.
    pub fn reference_len(&self) -> usize {
        self.reference.len()
    }
}

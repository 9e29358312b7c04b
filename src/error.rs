//! Reasons an action on a [`Board`](crate::Board) can be refused.
//!
//! Each message starts with a short reason key (also available through `reason()`),
//! followed by details for the player.

use thiserror::Error;

use crate::link::Link;

/// Reasons a link could not be made, removed, or a tile could not be queried.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LinkError {
    /// A name which is not in the tile registry.
    #[error("unknown tile: {name}")]
    UnknownTile {
        /// The name as given.
        name: String,
    },
    /// Both ends of the link are the same tile.
    #[error("self-link: {name} cannot be linked to itself")]
    SelfLink {
        /// The tile in question.
        name: String,
    },
    /// The link is already present.
    #[error("already connected: {0}")]
    AlreadyConnected(Link),
    /// One end already has the maximum number of links.
    #[error("degree exceeded: {tile} already has the maximum of {max_degree} links")]
    DegreeExceeded {
        /// The first endpoint found to be full.
        tile: String,
        /// The board's configured maximum.
        max_degree: usize,
    },
    /// The two tiles have nothing in common.
    #[error("no shared tag: {0} have no tag in common")]
    NoSharedTag(Link),
    /// In Hard mode, the tiles share zero or several real tags.
    #[error("must share exactly one tag: {link} share {shared}")]
    NotExactlyOneSharedTag {
        /// The rejected link.
        link: Link,
        /// How many real tags the tiles share.
        shared: usize,
    },
    /// Removal of a link which is not on the board.
    #[error("no such link: {0}")]
    NoSuchLink(Link),
}

impl LinkError {
    /// Short key identifying the kind of refusal, e.g. `"degree exceeded"`.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnknownTile { .. } => "unknown tile",
            Self::SelfLink { .. } => "self-link",
            Self::AlreadyConnected(_) => "already connected",
            Self::DegreeExceeded { .. } => "degree exceeded",
            Self::NoSharedTag(_) => "no shared tag",
            Self::NotExactlyOneSharedTag { .. } => "must share exactly one tag",
            Self::NoSuchLink(_) => "no such link",
        }
    }
}

/// The first structural condition a board failed while being checked for a complete chain.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ChainDefect {
    /// A chain over `n` tiles needs exactly `n - 1` links.
    #[error("incomplete: {links} links placed, a chain needs {needed}")]
    Incomplete {
        /// Links currently on the board.
        links: usize,
        /// Links a chain over every tile needs.
        needed: usize,
    },
    /// A tile with no links at all.
    #[error("isolated tile: {name} has no links")]
    IsolatedTile {
        /// The first isolated tile in registry order.
        name: String,
    },
    /// Link counts do not describe a path: two ends of degree 1 and everything else degree 2.
    #[error("not a simple path shape: {ends} tiles have one link, {middles} have two")]
    NotAPath {
        /// Tiles with exactly one link.
        ends: usize,
        /// Tiles with exactly two links.
        middles: usize,
    },
    /// Walking from one end does not reach every tile.
    #[error("disconnected: {reached} of {total} tiles reachable from {start}")]
    Disconnected {
        /// The end the walk started from.
        start: String,
        /// Tiles visited.
        reached: usize,
        /// Tiles on the board.
        total: usize,
    },
}

impl ChainDefect {
    /// Short key identifying the failing stage, e.g. `"isolated tile"`.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Incomplete { .. } => "incomplete",
            Self::IsolatedTile { .. } => "isolated tile",
            Self::NotAPath { .. } => "not a simple path shape",
            Self::Disconnected { .. } => "disconnected",
        }
    }
}

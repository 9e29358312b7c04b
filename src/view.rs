//! How much of a tile the player gets to see.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::board::Board;
use crate::difficulty::Difficulty;
use crate::tile::Tile;

/// What the player may see of a tile's tags.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TagView<'a> {
    /// Tags are always visible at this difficulty.
    Shown(Vec<&'a str>),
    /// Tags were hidden but the player inspected this tile.
    Revealed(Vec<&'a str>),
    /// Tags are hidden until the tile is inspected.
    Hidden,
}

impl TagView<'_> {
    /// The visible tags, sorted; empty when hidden.
    pub fn tags(&self) -> &[&str] {
        match self {
            TagView::Shown(tags) | TagView::Revealed(tags) => tags.as_slice(),
            TagView::Hidden => &[],
        }
    }

    /// Whether the tags are withheld from the player.
    pub fn is_hidden(&self) -> bool {
        matches!(self, TagView::Hidden)
    }
}

impl Display for TagView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TagView::Shown(tags) => write!(f, "{}", tags.iter().join(", ")),
            TagView::Revealed(tags) => write!(f, "{} (revealed)", tags.iter().join(", ")),
            TagView::Hidden => write!(f, "hidden (inspect to reveal)"),
        }
    }
}

/// The tags of `tile` as the player sees them at `difficulty`, given the names of tiles they have inspected.
pub fn visible_tags<'a>(tile: &'a Tile, difficulty: Difficulty, revealed: &HashSet<String>) -> TagView<'a> {
    if !difficulty.hides_tags() {
        TagView::Shown(tile.tags().collect())
    } else if revealed.contains(tile.name()) {
        TagView::Revealed(tile.tags().collect())
    } else {
        TagView::Hidden
    }
}

/// The board as the player sees it: one row per tile with its visible tags, then the current links.
///
/// Unlike the board's own `Display`, tags hidden at `difficulty` stay hidden.
pub fn board_table(board: &Board, difficulty: Difficulty, revealed: &HashSet<String>) -> String {
    let rows = board.tiles()
        .map(|tile| format!("{:<10} {}", tile.name(), visible_tags(tile, difficulty, revealed)));
    let links = board.links()
        .into_iter()
        .map(|link| format!("  {link}"));
    rows.chain(links).join("\n")
}

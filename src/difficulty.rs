use strum::{Display, EnumString, VariantArray};

/// How strict linking is and how much of the puzzle the player gets to see.
///
/// Easy and Medium link on any shared tag; Hard needs exactly one shared real tag.
/// Medium and Hard also hide tags until a tile is inspected and carry decoy tags.
#[derive(Copy, Clone, Debug, Default, Display, EnumString, VariantArray, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    /// Any shared tag links; all tags are shown.
    #[default]
    Easy,
    /// Any shared tag links; tags are hidden and every tile has one decoy.
    Medium,
    /// Exactly one shared real tag links; tags are hidden and every tile has two decoys.
    Hard,
}

impl Difficulty {
    /// Decoy tags added to every tile when generating a puzzle at this difficulty.
    pub fn decoys_per_tile(&self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }

    /// Whether a link needs exactly one shared tag, counting only real tags, rather than at least one.
    pub fn requires_single_real_tag(&self) -> bool {
        matches!(self, Self::Hard)
    }

    /// Whether tags stay hidden from the player until the tile is revealed.
    pub fn hides_tags(&self) -> bool {
        !matches!(self, Self::Easy)
    }
}

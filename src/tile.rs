use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

/// Tags starting with this prefix are decoys: noise that never takes part in the intended chain.
pub const DECOY_PREFIX: &str = "decoy:";

/// Whether `tag` is a decoy tag, see [`DECOY_PREFIX`].
#[inline]
pub fn is_decoy(tag: &str) -> bool {
    tag.starts_with(DECOY_PREFIX)
}

/// A named tile carrying a set of descriptive tags.
///
/// Tiles are immutable once built. Tags are kept sorted so that anything displaying them is deterministic.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tile {
    name: String,
    tags: BTreeSet<String>,
}

impl Tile {
    /// Construct a tile. Repeated tags collapse into one.
    pub fn new<N, I, T>(name: N, tags: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// The unique name of this tile.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All tags, decoys included, in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Tags which are not decoys, in sorted order.
    pub fn real_tags(&self) -> impl Iterator<Item = &str> {
        self.tags().filter(|tag| !is_decoy(tag))
    }

    /// Whether this tile carries `tag`, decoy or not.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Number of tags, decoys included.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Tags found on both `self` and `other`, optionally leaving out decoys.
    pub fn shared_tags<'a>(&'a self, other: &'a Tile, real_only: bool) -> BTreeSet<&'a str> {
        self.tags.intersection(&other.tags)
            .map(String::as_str)
            .filter(|tag| !real_only || !is_decoy(tag))
            .collect()
    }

    /// A copy of this tile with `extra` tags added; `self` is left untouched.
    pub(crate) fn with_extra_tags<I: IntoIterator<Item = String>>(&self, extra: I) -> Self {
        let mut tags = self.tags.clone();
        tags.extend(extra);
        Self {
            name: self.name.clone(),
            tags,
        }
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.tags.iter().join(", "))
    }
}

use std::collections::{BTreeSet, HashSet};

use itertools::Itertools;
use rand::Rng;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::error::ChainDefect;
use crate::generator;
use crate::link::Link;
use crate::tile::Tile;

/// Reasons a builder may become invalid while building.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// Two tiles were given the same name.
    #[error("duplicate tile: {name}")]
    DuplicateTile {
        /// The repeated name.
        name: String,
    },
    /// A reference link names a tile which has not been added.
    #[error("unknown tile in reference solution: {name}")]
    UnknownTile {
        /// The missing name.
        name: String,
    },
    /// A reference link joins a tile to itself.
    #[error("self-link in reference solution: {name}")]
    SelfLink {
        /// The tile in question.
        name: String,
    },
    /// A subset was requested which is empty or larger than the puzzle.
    #[error("cannot sample {requested} of {available} tiles")]
    SubsetSize {
        /// Tiles asked for.
        requested: usize,
        /// Tiles in the puzzle at the time.
        available: usize,
    },
    /// The reference solution is not itself a complete chain.
    #[error("reference solution is not a chain: {0}")]
    ReferenceNotAChain(ChainDefect),
    /// A catalog needs at least one puzzle.
    #[error("catalog has no puzzles")]
    EmptyCatalog,
}

/// Tiles together with the reference solution the puzzle was designed around.
///
/// Turn one into a playable [`Board`] with [`Board::new`] or [`Puzzle::into_board`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Puzzle {
    pub(crate) title: Option<String>,
    pub(crate) tiles: Vec<Tile>,
    pub(crate) reference: BTreeSet<Link>,
    pub(crate) partial_reference: bool,
}

impl Puzzle {
    /// Shorthand for a [`PuzzleBuilder`] holding `tiles` and `reference`, which must form a complete chain.
    pub fn new(tiles: impl IntoIterator<Item = Tile>, reference: impl IntoIterator<Item = Link>) -> Result<Self, Vec<BuilderInvalidReason>> {
        let mut builder = PuzzleBuilder::new();
        builder.add_tiles(tiles);
        for link in reference {
            builder.add_reference_link(link.as_pair());
        }
        builder.build()
    }

    /// Display title, if the puzzle has one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Tiles in the order the puzzle lists them.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The intended solution. Callers showing this to the player spoil the puzzle.
    pub fn reference(&self) -> &BTreeSet<Link> {
        &self.reference
    }

    /// Whether the reference was cut down by sampling and may no longer cover every tile.
    pub fn has_partial_reference(&self) -> bool {
        self.partial_reference
    }

    /// A fresh, unlinked [`Board`] for this puzzle.
    pub fn into_board(self) -> Board {
        Board::new(self)
    }
}

/// Assembles a [`Puzzle`] step by step.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Once a builder is invalid, further calls do nothing and [`build`](Self::build) reports why.
#[derive(Clone, Debug, Default)]
pub struct PuzzleBuilder {
    title: Option<String>,
    tiles: Vec<Tile>,
    reference: BTreeSet<Link>,
    // set once sampling may have cut the reference into pieces
    partial_reference: bool,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl PuzzleBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of an existing puzzle.
    pub fn from_puzzle(puzzle: &Puzzle) -> Self {
        Self {
            title: puzzle.title.clone(),
            tiles: puzzle.tiles.clone(),
            reference: puzzle.reference.clone(),
            partial_reference: puzzle.partial_reference,
            invalid_reasons: Default::default(),
        }
    }

    /// Set the title shown for the puzzle.
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Add a tile.
    ///
    /// May cause the builder to enter a [`DuplicateTile`](BuilderInvalidReason::DuplicateTile) invalid state if the name is taken.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_tile(&mut self, tile: Tile) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if self.tiles.iter().any(|existing| existing.name() == tile.name()) {
            self.invalid_reasons.push(BuilderInvalidReason::DuplicateTile { name: tile.name().to_owned() });
            return self;
        }

        self.tiles.push(tile);
        self
    }

    /// Shorthand for multiple calls to [`Self::add_tile`], with the same conditions.
    pub fn add_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>) -> &mut Self {
        for tile in tiles {
            self.add_tile(tile);
        }

        self
    }

    /// Add a link to the reference solution. The order in which the two names are given does not matter.
    ///
    /// Both tiles must have been added already; otherwise the builder enters an
    /// [`UnknownTile`](BuilderInvalidReason::UnknownTile) invalid state.
    /// Linking a tile to itself causes a [`SelfLink`](BuilderInvalidReason::SelfLink) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_reference_link(&mut self, names: UnorderedPair<&str>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for name in [names.0, names.1] {
            if !self.tiles.iter().any(|tile| tile.name() == name) {
                self.invalid_reasons.push(BuilderInvalidReason::UnknownTile { name: name.to_owned() });
                return self;
            }
        }

        if names.0 == names.1 {
            self.invalid_reasons.push(BuilderInvalidReason::SelfLink { name: names.0.to_owned() });
            return self;
        }

        self.reference.insert(Link::from(names));
        self
    }

    /// Shorthand for linking each name in `names` to the next one, with the same conditions as [`Self::add_reference_link`].
    pub fn add_reference_chain(&mut self, names: &[&str]) -> &mut Self {
        for (a, b) in names.iter().tuple_windows() {
            self.add_reference_link(UnorderedPair(*a, *b));
        }

        self
    }

    /// Give every tile `per_tile` decoy tags drawn from `rng`. See [`generator::add_decoys`].
    ///
    /// If the builder is in an invalid state, this function does nothing.
    pub fn add_decoys<R: Rng + ?Sized>(&mut self, per_tile: usize, rng: &mut R) -> &mut Self {
        if !self.invalid_reasons.is_empty() || per_tile == 0 {
            return self;
        }

        self.tiles = generator::add_decoys(&self.tiles, per_tile, rng);
        self
    }

    /// Keep a random subset of `size` tiles, preserving their order, and drop every reference link
    /// that lost an endpoint. The reference may no longer be a complete chain afterwards, which [`build`](Self::build) accepts.
    ///
    /// May cause the builder to enter a [`SubsetSize`](BuilderInvalidReason::SubsetSize) invalid state if `size` is zero or
    /// larger than the number of tiles.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn sample<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let available = self.tiles.len();
        if size == 0 || size > available {
            self.invalid_reasons.push(BuilderInvalidReason::SubsetSize { requested: size, available });
            return self;
        }

        let mut keep = rand::seq::index::sample(rng, available, size).into_vec();
        keep.sort_unstable();
        self.tiles = keep.into_iter().map(|i| self.tiles[i].clone()).collect_vec();

        let kept: HashSet<&str> = self.tiles.iter().map(Tile::name).collect();
        self.reference.retain(|link| kept.contains(link.first()) && kept.contains(link.second()));
        self.partial_reference = true;

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Puzzle`].
    ///
    /// Unless the builder has sampled, the reference solution must form a complete chain over all tiles;
    /// [`ReferenceNotAChain`](BuilderInvalidReason::ReferenceNotAChain) reports the first defect otherwise.
    pub fn build(&self) -> Result<Puzzle, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        let puzzle = Puzzle {
            title: self.title.clone(),
            tiles: self.tiles.clone(),
            reference: self.reference.clone(),
            partial_reference: self.partial_reference,
        };

        if !puzzle.partial_reference {
            let mut scratch = Board::new(puzzle.clone());
            scratch.replace_links(&puzzle.reference);
            scratch.check_chain()
                .map_err(|defect| vec![BuilderInvalidReason::ReferenceNotAChain(defect)])?;
        }

        Ok(puzzle)
    }
}

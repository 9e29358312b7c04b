use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::{debug, trace};
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;

use crate::builder::Puzzle;
use crate::difficulty::Difficulty;
use crate::error::{ChainDefect, LinkError};
use crate::link::Link;
use crate::tile::Tile;

/// Position of a tile in the registry; nodes of the link graph.
pub(crate) type TileIndex = usize;

/// Links a tile may have unless a board is built with [`Board::with_max_degree`].
pub const DEFAULT_MAX_DEGREE: usize = 2;

/// A successfully placed link and the tags it was made on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Linked {
    /// The link now on the board.
    pub link: Link,
    /// The shared tags which justified it; real tags only when linked in Hard mode.
    pub shared: BTreeSet<String>,
}

impl Display for Linked {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "linked {}", self.link)?;
        if !self.shared.is_empty() {
            write!(f, " (shared tag: {})", self.shared.iter().join(", "))?;
        }
        Ok(())
    }
}

/// The puzzle in play: a fixed registry of tiles, the links the player has placed between them,
/// and the hidden reference solution used for hints.
///
/// Every rule is checked when a link is placed; nothing is re-validated afterwards.
/// Boards are made from a [`Puzzle`], usually one produced by a [`PuzzleBuilder`](crate::PuzzleBuilder)
/// or the [`generator`](crate::generator) functions.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) tiles: Vec<Tile>,
    index: HashMap<String, TileIndex>,
    // one node per tile, present even while unlinked
    pub(crate) graph: UnGraphMap<TileIndex, ()>,
    pub(crate) reference: BTreeSet<Link>,
    max_degree: usize,
}

impl Board {
    /// A board for `puzzle` with no links and the [`DEFAULT_MAX_DEGREE`].
    pub fn new(puzzle: Puzzle) -> Self {
        Self::with_max_degree(puzzle, DEFAULT_MAX_DEGREE)
    }

    /// A board for `puzzle` with no links, allowing each tile up to `max_degree` links.
    pub fn with_max_degree(puzzle: Puzzle, max_degree: usize) -> Self {
        let Puzzle { tiles, reference, .. } = puzzle;
        let index = tiles.iter()
            .enumerate()
            .map(|(i, tile)| (tile.name().to_owned(), i))
            .collect();

        Self {
            graph: Self::unlinked_graph(tiles.len()),
            tiles,
            index,
            reference,
            max_degree,
        }
    }

    fn unlinked_graph(tile_count: usize) -> UnGraphMap<TileIndex, ()> {
        // a finished chain has one link fewer than it has tiles
        let mut graph = UnGraphMap::with_capacity(tile_count, tile_count.saturating_sub(1));
        for i in 0..tile_count {
            graph.add_node(i);
        }
        graph
    }

    #[inline]
    fn index_of(&self, name: &str) -> Result<TileIndex, LinkError> {
        self.index.get(name)
            .copied()
            .ok_or_else(|| LinkError::UnknownTile { name: name.to_owned() })
    }

    #[inline]
    fn name_of(&self, index: TileIndex) -> &str {
        self.tiles[index].name()
    }

    #[inline]
    fn degree_of(&self, index: TileIndex) -> usize {
        self.graph.neighbors(index).count()
    }

    #[inline]
    fn link_between(&self, a: TileIndex, b: TileIndex) -> Link {
        Link::new(self.name_of(a), self.name_of(b))
    }

    /// The most links any one tile may have.
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// The tile called `name`, if there is one.
    pub fn tile(&self, name: &str) -> Option<&Tile> {
        self.index.get(name).map(|i| &self.tiles[*i])
    }

    /// All tiles, in the order the puzzle lists them.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Number of tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Links currently on the board, sorted.
    pub fn links(&self) -> Vec<Link> {
        self.graph.all_edges()
            .map(|(a, b, _)| self.link_between(a, b))
            .sorted()
            .collect_vec()
    }

    /// Number of links currently on the board.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether `a` and `b` are linked. Unknown names are simply not linked.
    pub fn is_linked(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(a), Some(b)) => self.graph.contains_edge(*a, *b),
            _ => false,
        }
    }

    /// Number of links touching `name`.
    ///
    /// Fails with [`LinkError::UnknownTile`] if there is no such tile.
    pub fn degree(&self, name: &str) -> Result<usize, LinkError> {
        Ok(self.degree_of(self.index_of(name)?))
    }

    /// Tags carried by both `a` and `b`. With `real_only`, decoy tags are left out.
    pub fn shared_tags(&self, a: &str, b: &str, real_only: bool) -> Result<BTreeSet<&str>, LinkError> {
        let (a, b) = (self.index_of(a)?, self.index_of(b)?);
        Ok(self.tiles[a].shared_tags(&self.tiles[b], real_only))
    }

    /// Check whether `a` and `b` may be linked at `difficulty`, without linking them.
    ///
    /// Checks run in order and the first failure is reported:
    /// both tiles exist, they are distinct, they are not linked yet, neither is at the maximum degree,
    /// and they share a tag (in Hard mode, exactly one real tag).
    pub fn can_connect(&self, a: &str, b: &str, difficulty: Difficulty) -> Result<(), LinkError> {
        self.check_link(a, b, difficulty).map(|_| ())
    }

    fn check_link(&self, a: &str, b: &str, difficulty: Difficulty) -> Result<(TileIndex, TileIndex, BTreeSet<&str>), LinkError> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);

        if ia == ib {
            return Err(LinkError::SelfLink { name: a.to_owned() });
        }

        if self.graph.contains_edge(ia, ib) {
            return Err(LinkError::AlreadyConnected(self.link_between(ia, ib)));
        }

        for index in [ia, ib] {
            if self.degree_of(index) >= self.max_degree {
                return Err(LinkError::DegreeExceeded {
                    tile: self.name_of(index).to_owned(),
                    max_degree: self.max_degree,
                });
            }
        }

        let real_only = difficulty.requires_single_real_tag();
        let shared = self.tiles[ia].shared_tags(&self.tiles[ib], real_only);
        if real_only {
            if shared.len() != 1 {
                return Err(LinkError::NotExactlyOneSharedTag {
                    link: self.link_between(ia, ib),
                    shared: shared.len(),
                });
            }
        } else if shared.is_empty() {
            return Err(LinkError::NoSharedTag(self.link_between(ia, ib)));
        }

        Ok((ia, ib, shared))
    }

    /// Link `a` and `b` if [`can_connect`](Self::can_connect) allows it.
    ///
    /// Linking the same pair twice fails the second time with [`LinkError::AlreadyConnected`].
    pub fn link(&mut self, a: &str, b: &str, difficulty: Difficulty) -> Result<Linked, LinkError> {
        let (ia, ib, shared) = match self.check_link(a, b, difficulty) {
            Ok(checked) => checked,
            Err(refusal) => {
                debug!("refused {a} - {b} at {difficulty}: {refusal}");
                return Err(refusal);
            }
        };
        let shared: BTreeSet<String> = shared.into_iter().map(str::to_owned).collect();

        self.graph.add_edge(ia, ib, ());
        let linked = Linked { link: self.link_between(ia, ib), shared };
        debug!("{linked}");
        Ok(linked)
    }

    /// Remove the link between `a` and `b`, returning it.
    ///
    /// Fails with [`LinkError::NoSuchLink`] if they are not linked, including when either name is unknown.
    pub fn unlink(&mut self, a: &str, b: &str) -> Result<Link, LinkError> {
        let link = Link::new(a, b);
        let removed = match (self.index.get(a).copied(), self.index.get(b).copied()) {
            (Some(ia), Some(ib)) => self.graph.remove_edge(ia, ib).is_some(),
            _ => false,
        };

        if !removed {
            return Err(LinkError::NoSuchLink(link));
        }
        debug!("unlinked {link}");
        Ok(link)
    }

    /// Remove every link.
    pub fn reset_links(&mut self) {
        debug!("cleared {} links", self.graph.edge_count());
        self.graph = Self::unlinked_graph(self.tiles.len());
    }

    /// Replace the current links with `links` as is, skipping anything naming an unknown tile.
    pub(crate) fn replace_links<'a>(&mut self, links: impl IntoIterator<Item = &'a Link>) {
        let mut graph = Self::unlinked_graph(self.tiles.len());
        for link in links {
            if let (Some(a), Some(b)) = (self.index.get(link.first()), self.index.get(link.second())) {
                graph.add_edge(*a, *b, ());
            }
        }
        self.graph = graph;
    }

    /// Whether the links form one simple path through every tile.
    ///
    /// Reports the first failing stage: the link count, then isolated tiles, then the degree shape,
    /// then a walk from one end that must reach every tile.
    pub fn check_chain(&self) -> Result<(), ChainDefect> {
        let total = self.tiles.len();
        let links = self.graph.edge_count();
        let needed = total.saturating_sub(1);
        if total == 0 || links != needed {
            return Err(ChainDefect::Incomplete { links, needed });
        }
        trace!("{links} links over {total} tiles");

        let degrees = (0..total).map(|i| self.degree_of(i)).collect_vec();
        if let Some(isolated) = degrees.iter().position(|degree| *degree == 0) {
            return Err(ChainDefect::IsolatedTile { name: self.name_of(isolated).to_owned() });
        }

        let ends = degrees.iter().positions(|degree| *degree == 1).collect_vec();
        let middles = degrees.iter().filter(|degree| **degree == 2).count();
        // ends.len() == 2 implies total >= 2
        if ends.len() != 2 || middles != total - 2 {
            return Err(ChainDefect::NotAPath { ends: ends.len(), middles });
        }
        trace!("path shape from {} to {}", self.name_of(ends[0]), self.name_of(ends[1]));

        let mut walk = Dfs::new(&self.graph, ends[0]);
        let mut reached = 0;
        while walk.next(&self.graph).is_some() {
            reached += 1;
        }
        if reached != total {
            return Err(ChainDefect::Disconnected {
                start: self.name_of(ends[0]).to_owned(),
                reached,
                total,
            });
        }

        Ok(())
    }
}

impl From<Puzzle> for Board {
    fn from(value: Puzzle) -> Self {
        Self::new(value)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, tile) in self.tiles.iter().enumerate() {
            writeln!(f, "{} ({}/{})", tile, self.degree_of(i), self.max_degree)?;
        }
        for link in self.links() {
            writeln!(f, "  {link}")?;
        }
        Ok(())
    }
}

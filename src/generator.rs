//! Puzzle generation from a base puzzle and a seed.
//!
//! The same base puzzle, difficulty or size, and seed always give the same puzzle with the same build of this crate.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use itertools::Itertools;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::builder::{BuilderInvalidReason, Puzzle, PuzzleBuilder};
use crate::difficulty::Difficulty;
use crate::tile::{Tile, DECOY_PREFIX};

/// Numeric suffixes decoy tags are drawn from.
const DECOY_SUFFIXES: RangeInclusive<u32> = 1000..=9999;

/// Copies of `tiles`, each with `per_tile` extra decoy tags.
///
/// A decoy is named `decoy:<tile name>:<number>`, so it can never match a tag on another tile
/// and never opens up a link the puzzle did not intend. A tile never receives the same decoy twice.
/// Tiles draw from `rng` in order.
pub fn add_decoys<R: Rng + ?Sized>(tiles: &[Tile], per_tile: usize, rng: &mut R) -> Vec<Tile> {
    let per_tile = per_tile.min(DECOY_SUFFIXES.clone().count());

    tiles.iter()
        .map(|tile| {
            let mut decoys = BTreeSet::new();
            while decoys.len() < per_tile {
                let decoy = format!("{DECOY_PREFIX}{}:{}", tile.name(), rng.gen_range(DECOY_SUFFIXES));
                if !tile.has_tag(&decoy) {
                    decoys.insert(decoy);
                }
            }
            tile.with_extra_tags(decoys)
        })
        .collect_vec()
}

/// A fresh copy of `base` dressed for `difficulty`: one decoy tag per tile on Medium, two on Hard, none on Easy.
pub fn build_from_catalog(base: &Puzzle, difficulty: Difficulty, seed: u64) -> Result<Puzzle, Vec<BuilderInvalidReason>> {
    info!("building {} at {difficulty} with seed {seed}", base.title().unwrap_or("puzzle"));
    let mut rng = StdRng::seed_from_u64(seed);
    PuzzleBuilder::from_puzzle(base)
        .add_decoys(difficulty.decoys_per_tile(), &mut rng)
        .build()
}

/// `size` tiles of `base` chosen by `seed`, keeping only the reference links between chosen tiles.
///
/// The remaining reference may not cover every chosen tile; hints and auto-solve then fill in what is left of it.
pub fn build_from_subset(base: &Puzzle, size: usize, seed: u64) -> Result<Puzzle, Vec<BuilderInvalidReason>> {
    info!("sampling {size} of {} tiles with seed {seed}", base.tiles().len());
    let mut rng = StdRng::seed_from_u64(seed);
    PuzzleBuilder::from_puzzle(base)
        .sample(size, &mut rng)
        .build()
}

/// A chain where tile `k` carries the tags `k` and `k + 1`, so that neighbours in `names` share exactly one tag.
pub fn numeric_chain<S: AsRef<str>>(names: &[S]) -> Result<Puzzle, Vec<BuilderInvalidReason>> {
    let names: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();

    let mut builder = PuzzleBuilder::new();
    builder.title("numbers")
        .add_tiles(names.iter()
            .enumerate()
            .map(|(k, name)| Tile::new(*name, [k.to_string(), (k + 1).to_string()])))
        .add_reference_chain(&names);
    builder.build()
}

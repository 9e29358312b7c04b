use chrono::{Datelike, NaiveDate};
use log::info;

use crate::builder::{BuilderInvalidReason, Puzzle, PuzzleBuilder};
use crate::tile::Tile;

// (title, tiles in chain order with their tags)
type Handcrafted = (&'static str, &'static [(&'static str, &'static [&'static str])]);

const HANDCRAFTED: &[Handcrafted] = &[
    ("pets", &[
        ("Dog", &["canine", "pet", "bone"]),
        ("Bone", &["bone", "calcium"]),
        ("Calcium", &["calcium", "milk"]),
        ("Milk", &["milk", "feline"]),
        ("Cat", &["feline", "fur"]),
        ("Fur", &["fur", "coat"]),
        ("Coat", &["coat", "winter"]),
        ("Winter", &["winter", "season"]),
    ]),
    ("garden", &[
        ("Coffee", &["bean", "morning", "hot"]),
        ("Bean", &["bean", "garden"]),
        ("Garden", &["garden", "soil"]),
        ("Soil", &["soil", "worm"]),
        ("Worm", &["worm", "bird"]),
        ("Bird", &["bird", "nest"]),
        ("Nest", &["nest", "egg"]),
        ("Egg", &["egg", "breakfast"]),
    ]),
    ("harbor", &[
        ("Ship", &["sail", "harbor", "captain"]),
        ("Sail", &["sail", "wind"]),
        ("Wind", &["wind", "storm"]),
        ("Storm", &["storm", "thunder"]),
        ("Thunder", &["thunder", "drum"]),
        ("Drum", &["drum", "band"]),
        ("Band", &["band", "stage"]),
        ("Stage", &["stage", "theater"]),
    ]),
    ("journey", &[
        ("Rocket", &["launch", "fuel"]),
        ("Fuel", &["fuel", "oil"]),
        ("Oil", &["oil", "painting"]),
        ("Painting", &["painting", "museum"]),
        ("Museum", &["museum", "ticket"]),
        ("Ticket", &["ticket", "train"]),
        ("Train", &["train", "station"]),
        ("Station", &["station", "space"]),
    ]),
];

/// A fixed, non-empty list of puzzles to rotate through.
#[derive(Clone, Debug)]
pub struct Catalog {
    puzzles: Vec<Puzzle>,
}

impl Catalog {
    /// A catalog of `puzzles`, which must not be empty.
    pub fn new(puzzles: Vec<Puzzle>) -> Result<Self, BuilderInvalidReason> {
        if puzzles.is_empty() {
            return Err(BuilderInvalidReason::EmptyCatalog);
        }
        Ok(Self { puzzles })
    }

    /// The puzzles shipped with the crate. Each is an eight tile chain in which neighbours share exactly one tag,
    /// so every one of them is solvable on Hard.
    pub fn handcrafted() -> Self {
        let puzzles = HANDCRAFTED.iter()
            .map(|(title, tiles)| {
                let names: Vec<&str> = tiles.iter().map(|(name, _)| *name).collect();
                PuzzleBuilder::new()
                    .title(*title)
                    .add_tiles(tiles.iter().map(|(name, tags)| Tile::new(*name, tags.iter().copied())))
                    .add_reference_chain(&names)
                    .build()
                    .expect("handcrafted puzzles are valid chains")
            })
            .collect();

        Self { puzzles }
    }

    /// Every puzzle, in selection order.
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// The puzzle at `index`, wrapping around past the end.
    pub fn select_by_index(&self, index: usize) -> &Puzzle {
        &self.puzzles[index % self.puzzles.len()]
    }

    /// Index of the puzzle of the day: the proleptic Gregorian day number of `date`, shifted by `offset`,
    /// modulo the catalog size. Everyone asking on the same day with the same offset gets the same index.
    pub fn daily_index(&self, date: NaiveDate, offset: i64) -> usize {
        let day = i128::from(date.num_days_from_ce()) + i128::from(offset);
        // rem_euclid keeps negative days in range
        day.rem_euclid(self.puzzles.len() as i128) as usize
    }

    /// Shorthand for [`select_by_index`](Self::select_by_index) with [`daily_index`](Self::daily_index).
    pub fn daily(&self, date: NaiveDate, offset: i64) -> &Puzzle {
        let index = self.daily_index(date, offset);
        info!("puzzle of {date} (offset {offset}) is #{index}");
        self.select_by_index(index)
    }
}

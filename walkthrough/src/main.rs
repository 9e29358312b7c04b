use std::collections::HashSet;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use log::info;
use tagchain::generator::{build_from_catalog, build_from_subset};
use tagchain::view::board_table;
use tagchain::{Board, Catalog, Difficulty, Hint};

/// Build a puzzle and solve it by following hints, printing every step.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,
    /// Seed for decoy tags and tile sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Catalog index; today's puzzle if omitted
    #[arg(long)]
    puzzle: Option<usize>,
    /// Days to shift today's puzzle by
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,
    /// Play only this many of the puzzle's tiles
    #[arg(long)]
    size: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let catalog = Catalog::handcrafted();
    let base = match args.puzzle {
        Some(index) => catalog.select_by_index(index),
        None => catalog.daily(Local::now().date_naive(), args.offset),
    };
    info!("playing {}", base.title().unwrap_or("untitled"));

    let puzzle = match args.size {
        Some(size) => build_from_subset(base, size, args.seed),
        None => Ok(base.clone()),
    }.and_then(|puzzle| build_from_catalog(&puzzle, args.difficulty, args.seed));

    let puzzle = match puzzle {
        Ok(puzzle) => puzzle,
        Err(reasons) => {
            reasons.iter().for_each(|reason| eprintln!("{reason}"));
            return ExitCode::FAILURE;
        }
    };

    let mut board = Board::new(puzzle);
    // nothing inspected: Medium and Hard show hidden tags
    let revealed = HashSet::new();
    println!("{}\n", board_table(&board, args.difficulty, &revealed));

    while let Hint::TryLinking(link) = board.give_hint() {
        println!("hint: try linking {link}");
        match board.link(link.first(), link.second(), args.difficulty) {
            Ok(linked) => println!("{linked}"),
            Err(refusal) => {
                println!("{refusal}");
                break;
            }
        }
    }

    match board.check_chain() {
        Ok(()) => println!("complete"),
        Err(defect) => println!("{defect}"),
    }
    println!("{}", board_table(&board, args.difficulty, &revealed));

    ExitCode::SUCCESS
}

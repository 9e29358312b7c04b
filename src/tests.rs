#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};
    use std::str::FromStr;

    use chrono::NaiveDate;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::VariantArray;
    use unordered_pair::UnorderedPair;

    use crate::generator::{add_decoys, build_from_catalog, build_from_subset, numeric_chain};
    use crate::view::{board_table, visible_tags, TagView};
    use crate::{is_decoy, Board, DECOY_PREFIX, BuilderInvalidReason, Catalog, ChainDefect, Difficulty, Hint, Link, LinkError, Puzzle, PuzzleBuilder, Tile};

    fn puzzle(tiles: &[(&str, &[&str])], chain: &[&str]) -> Puzzle {
        PuzzleBuilder::new()
            .add_tiles(tiles.iter().map(|(name, tags)| Tile::new(*name, tags.iter().copied())))
            .add_reference_chain(chain)
            .build()
            .unwrap()
    }

    fn pets() -> Puzzle {
        Catalog::handcrafted().select_by_index(0).clone()
    }

    const PETS_CHAIN: [&str; 8] = ["Dog", "Bone", "Calcium", "Milk", "Cat", "Fur", "Coat", "Winter"];

    #[test]
    fn can_connect_on_shared_tag() {
        let board = Board::new(puzzle(&[
            ("Dog", &["canine", "pet", "bone"]),
            ("Bone", &["bone", "calcium"]),
            ("Cat", &["feline", "fur"]),
        ], &["Dog", "Bone", "Cat"]));

        assert_eq!(board.can_connect("Dog", "Bone", Difficulty::Easy), Ok(()));
        assert_eq!(board.shared_tags("Dog", "Bone", false).unwrap(), BTreeSet::from(["bone"]));

        let refusal = board.can_connect("Dog", "Cat", Difficulty::Easy).unwrap_err();
        assert_eq!(refusal, LinkError::NoSharedTag(Link::new("Cat", "Dog")));
        assert_eq!(refusal.reason(), "no shared tag");
    }

    #[test]
    fn self_links_are_refused() {
        let board = Board::new(pets());
        for tile in board.tiles() {
            for difficulty in Difficulty::VARIANTS {
                let refusal = board.can_connect(tile.name(), tile.name(), *difficulty).unwrap_err();
                assert_eq!(refusal.reason(), "self-link");
            }
        }
    }

    #[test]
    fn unknown_tiles() {
        let mut board = Board::new(pets());

        // unknown wins over self-link
        assert_eq!(board.can_connect("Nope", "Nope", Difficulty::Easy), Err(LinkError::UnknownTile { name: "Nope".into() }));
        assert_eq!(board.can_connect("Dog", "Nope", Difficulty::Easy), Err(LinkError::UnknownTile { name: "Nope".into() }));
        assert_eq!(board.degree("Nope"), Err(LinkError::UnknownTile { name: "Nope".into() }));
        assert!(board.shared_tags("Nope", "Dog", false).is_err());
        assert!(board.tile("Nope").is_none());
        assert!(!board.is_linked("Dog", "Nope"));

        assert_eq!(board.unlink("Dog", "Nope"), Err(LinkError::NoSuchLink(Link::new("Dog", "Nope"))));
    }

    #[test]
    fn linking_twice() {
        let mut board = Board::new(pets());

        let linked = board.link("Dog", "Bone", Difficulty::Easy).unwrap();
        assert_eq!(linked.link, Link::new("Bone", "Dog"));
        assert_eq!(linked.to_string(), "linked Bone ↔ Dog (shared tag: bone)");

        let before = board.links();
        let refusal = board.link("Bone", "Dog", Difficulty::Easy).unwrap_err();
        assert_eq!(refusal, LinkError::AlreadyConnected(Link::new("Dog", "Bone")));
        assert_eq!(board.links(), before);
        assert_eq!(board.degree("Dog"), Ok(1));
    }

    #[test]
    fn link_unlink_round_trip() {
        let mut board = Board::new(pets());
        board.link("Dog", "Bone", Difficulty::Easy).unwrap();
        board.link("Calcium", "Milk", Difficulty::Easy).unwrap();
        let before = board.links();

        board.link("Bone", "Calcium", Difficulty::Easy).unwrap();
        assert_eq!(board.unlink("Calcium", "Bone"), Ok(Link::new("Bone", "Calcium")));
        assert_eq!(board.links(), before);

        assert_eq!(board.unlink("Calcium", "Bone").unwrap_err().reason(), "no such link");
    }

    #[test]
    fn degree_limit() {
        let tiles: &[(&str, &[&str])] = &[("hub", &["t"]), ("a", &["t"]), ("b", &["t"]), ("c", &["t"])];
        let mut board = Board::new(puzzle(tiles, &["a", "hub", "b", "c"]));

        board.link("hub", "a", Difficulty::Easy).unwrap();
        board.link("hub", "b", Difficulty::Easy).unwrap();

        let refusal = board.link("c", "hub", Difficulty::Easy).unwrap_err();
        assert_eq!(refusal, LinkError::DegreeExceeded { tile: "hub".into(), max_degree: 2 });
        assert!(refusal.to_string().contains("maximum of 2"));

        // duplicates are reported before the degree
        assert_eq!(board.link("hub", "a", Difficulty::Easy).unwrap_err().reason(), "already connected");

        let mut narrow = Board::with_max_degree(puzzle(tiles, &["a", "hub", "b", "c"]), 1);
        narrow.link("hub", "a", Difficulty::Easy).unwrap();
        let refusal = narrow.link("b", "a", Difficulty::Easy).unwrap_err();
        assert_eq!(refusal, LinkError::DegreeExceeded { tile: "a".into(), max_degree: 1 });
        assert!(refusal.to_string().contains("maximum of 1"));
    }

    #[test]
    fn degree_never_exceeds_maximum() {
        let names = ["a", "b", "c", "d", "e", "f"];
        let tiles = names.iter().map(|name| (*name, &["t"] as &[&str])).collect_vec();
        let mut board = Board::new(puzzle(&tiles, &names));

        for (a, b) in names.iter().tuple_combinations() {
            let _ = board.link(a, b, Difficulty::Easy);
        }

        assert!(board.link_count() > 0);
        for name in names {
            assert!(board.degree(name).unwrap() <= board.max_degree());
        }
    }

    #[test]
    fn hard_mode_needs_exactly_one_real_tag() {
        let board = Board::new(puzzle(&[
            ("A", &["x", "y"]),
            ("B", &["x", "y"]),
            ("C", &["x"]),
            ("D", &["z"]),
            ("E", &["decoy:E:1234", "w"]),
            ("F", &["decoy:E:1234", "w"]),
        ], &["A", "B", "C", "D", "E", "F"]));

        assert_eq!(board.can_connect("A", "B", Difficulty::Hard), Err(LinkError::NotExactlyOneSharedTag { link: Link::new("A", "B"), shared: 2 }));
        assert_eq!(board.can_connect("A", "B", Difficulty::Medium), Ok(()));
        assert_eq!(board.can_connect("A", "C", Difficulty::Hard), Ok(()));
        assert_eq!(board.can_connect("A", "D", Difficulty::Hard).unwrap_err().reason(), "must share exactly one tag");
        assert_eq!(board.can_connect("A", "D", Difficulty::Easy).unwrap_err().reason(), "no shared tag");

        // decoys are not counted on Hard
        assert_eq!(board.shared_tags("E", "F", false).unwrap().len(), 2);
        assert_eq!(board.shared_tags("E", "F", true).unwrap(), BTreeSet::from(["w"]));
        assert_eq!(board.can_connect("E", "F", Difficulty::Hard), Ok(()));
    }

    #[test]
    fn hard_mode_link_reports_real_tags() {
        let mut board = Board::new(puzzle(&[
            ("E", &["decoy:E:1234", "w"]),
            ("F", &["decoy:E:1234", "w"]),
        ], &["E", "F"]));

        let linked = board.link("F", "E", Difficulty::Hard).unwrap();
        assert_eq!(linked.shared, BTreeSet::from(["w".to_owned()]));
    }

    #[test]
    fn complete_chain_in_solution_order() {
        let mut board = Board::new(pets());
        assert_eq!(board.check_chain().unwrap_err().reason(), "incomplete");

        for (a, b) in PETS_CHAIN.iter().tuple_windows() {
            board.link(a, b, Difficulty::Easy).unwrap();
        }
        assert_eq!(board.check_chain(), Ok(()));

        board.unlink("Milk", "Cat").unwrap();
        assert_eq!(board.check_chain(), Err(ChainDefect::Incomplete { links: 6, needed: 7 }));
    }

    #[test]
    fn isolated_tile() {
        let mut board = Board::new(puzzle(&[("A", &["t"]), ("B", &["t"]), ("C", &["t"]), ("D", &["t"])], &["A", "B", "C", "D"]));
        board.link("A", "B", Difficulty::Easy).unwrap();
        board.link("B", "C", Difficulty::Easy).unwrap();
        board.link("C", "A", Difficulty::Easy).unwrap();

        assert_eq!(board.check_chain(), Err(ChainDefect::IsolatedTile { name: "D".into() }));
    }

    #[test]
    fn star_is_not_a_path() {
        let tiles: &[(&str, &[&str])] = &[("A", &["t"]), ("B", &["t"]), ("C", &["t"]), ("D", &["t"])];
        let mut board = Board::with_max_degree(puzzle(tiles, &["A", "B", "C", "D"]), 3);
        for other in ["B", "C", "D"] {
            board.link("A", other, Difficulty::Easy).unwrap();
        }

        let defect = board.check_chain().unwrap_err();
        assert_eq!(defect, ChainDefect::NotAPath { ends: 3, middles: 0 });
        assert_eq!(defect.reason(), "not a simple path shape");
    }

    #[test]
    fn path_plus_cycle_is_disconnected() {
        // right link count and degrees, but two pieces
        let mut board = Board::new(puzzle(&[
            ("A", &["p"]),
            ("B", &["p"]),
            ("C", &["t"]),
            ("D", &["t"]),
            ("E", &["t"]),
        ], &["A", "B", "C", "D", "E"]));
        board.link("A", "B", Difficulty::Easy).unwrap();
        board.link("C", "D", Difficulty::Easy).unwrap();
        board.link("D", "E", Difficulty::Easy).unwrap();
        board.link("E", "C", Difficulty::Easy).unwrap();

        assert_eq!(board.check_chain(), Err(ChainDefect::Disconnected { start: "A".into(), reached: 2, total: 5 }));
    }

    #[test]
    fn hints_follow_sorted_reference() {
        let mut board = Board::new(pets());

        assert_eq!(board.give_hint(), Hint::TryLinking(Link::new("Bone", "Calcium")));
        assert_eq!(board.give_hint().to_string(), "try linking Bone ↔ Calcium");

        board.link("Calcium", "Bone", Difficulty::Easy).unwrap();
        assert_eq!(board.give_hint(), Hint::TryLinking(Link::new("Bone", "Dog")));

        board.auto_solve();
        assert_eq!(board.give_hint(), Hint::NoHints);
        assert_eq!(board.link_count(), board.reference_len());
    }

    #[test]
    fn following_hints_solves() {
        let mut board = Board::new(pets());
        while let Hint::TryLinking(link) = board.give_hint() {
            board.link(link.first(), link.second(), Difficulty::Hard).unwrap();
        }
        assert_eq!(board.check_chain(), Ok(()));
    }

    #[test]
    fn reset_and_auto_solve() {
        let mut board = Board::new(pets());
        board.link("Dog", "Bone", Difficulty::Easy).unwrap();
        board.reset_links();
        assert_eq!(board.link_count(), 0);
        assert_eq!(board.degree("Dog"), Ok(0));

        // auto-solve replaces whatever is there
        board.link("Cat", "Fur", Difficulty::Easy).unwrap();
        board.auto_solve();
        assert_eq!(board.links(), pets().reference().iter().cloned().collect_vec());
    }

    #[test]
    fn every_generated_puzzle_solves() {
        let catalog = Catalog::handcrafted();
        for (base, difficulty, seed) in itertools::iproduct!(catalog.puzzles(), Difficulty::VARIANTS, [0, 42, 7777]) {
            let mut board = Board::new(build_from_catalog(base, *difficulty, seed).unwrap());
            board.auto_solve();
            assert_eq!(board.check_chain(), Ok(()), "{:?} at {difficulty}", base.title());

            // and playable by hand at the same difficulty
            board.reset_links();
            for link in base.reference() {
                board.link(link.first(), link.second(), *difficulty).unwrap();
            }
            assert_eq!(board.check_chain(), Ok(()));
        }
    }

    #[test]
    fn decoys_per_difficulty() {
        let base = pets();
        for difficulty in Difficulty::VARIANTS {
            let generated = build_from_catalog(&base, *difficulty, 42).unwrap();
            assert_eq!(generated.reference(), base.reference());

            for (before, after) in base.tiles().iter().zip(generated.tiles()) {
                assert_eq!(before.name(), after.name());
                assert_eq!(after.tag_count(), before.tag_count() + difficulty.decoys_per_tile());
                assert_eq!(after.real_tags().collect_vec(), before.tags().collect_vec());
                for decoy in after.tags().filter(|tag| is_decoy(tag)) {
                    assert!(decoy.starts_with(&format!("decoy:{}:", after.name())));
                }
            }
        }

        // the base catalog keeps its own tags
        assert!(base.tiles().iter().all(|tile| tile.tags().all(|tag| !is_decoy(tag))));
    }

    #[test]
    fn decoys_never_overlap() {
        let generated = build_from_catalog(&pets(), Difficulty::Hard, 3).unwrap();
        let board = Board::new(generated.clone());

        for (a, b) in generated.tiles().iter().tuple_combinations() {
            let shared = board.shared_tags(a.name(), b.name(), false).unwrap();
            assert!(shared.iter().all(|tag| !is_decoy(tag)));
        }
    }

    #[test]
    fn decoys_are_seeded() {
        let base = pets();
        assert_eq!(build_from_catalog(&base, Difficulty::Hard, 5), build_from_catalog(&base, Difficulty::Hard, 5));
        assert_ne!(build_from_catalog(&base, Difficulty::Hard, 5), build_from_catalog(&base, Difficulty::Hard, 6));
    }

    #[test]
    fn many_decoys_on_one_tile() {
        let tiles = [Tile::new("A", ["a"])];
        let decorated = add_decoys(&tiles, 50, &mut StdRng::seed_from_u64(1));
        assert_eq!(decorated[0].tag_count(), 51);
        assert_eq!(tiles[0].tag_count(), 1);
    }

    #[test]
    fn subset_sampling() {
        let base = pets();
        let subset = build_from_subset(&base, 5, 11).unwrap();

        assert_eq!(subset.tiles().len(), 5);
        assert!(subset.has_partial_reference());
        assert_eq!(subset, build_from_subset(&base, 5, 11).unwrap());

        // catalog order is kept
        let positions = subset.tiles().iter()
            .map(|tile| PETS_CHAIN.iter().position(|name| *name == tile.name()).unwrap())
            .collect_vec();
        assert!(positions.iter().tuple_windows().all(|(a, b)| a < b));

        let names: HashSet<&str> = subset.tiles().iter().map(Tile::name).collect();
        for link in subset.reference() {
            assert!(names.contains(link.first()) && names.contains(link.second()));
            assert!(base.reference().contains(link));
        }
        let expected = base.reference().iter()
            .filter(|link| names.contains(link.first()) && names.contains(link.second()))
            .count();
        assert_eq!(subset.reference().len(), expected);

        // auto-solve still works, though the result need not be complete
        let mut board = Board::new(subset);
        board.auto_solve();
        assert_eq!(board.link_count(), expected);
    }

    #[test]
    fn subset_sizes() {
        let base = pets();
        assert_eq!(build_from_subset(&base, 0, 1), Err(vec![BuilderInvalidReason::SubsetSize { requested: 0, available: 8 }]));
        assert_eq!(build_from_subset(&base, 9, 1), Err(vec![BuilderInvalidReason::SubsetSize { requested: 9, available: 8 }]));

        let everything = build_from_subset(&base, 8, 1).unwrap();
        assert_eq!(everything.tiles(), base.tiles());
        assert_eq!(everything.reference(), base.reference());
    }

    #[test]
    fn numeric_chain_is_hard_solvable() {
        let puzzle = numeric_chain(&["one", "two", "three", "four", "five"]).unwrap();
        assert!(puzzle.tiles().iter().all(|tile| tile.tag_count() == 2));

        let mut board = puzzle.into_board();
        assert_eq!(board.can_connect("one", "three", Difficulty::Easy).unwrap_err().reason(), "no shared tag");

        board.link("one", "two", Difficulty::Hard).unwrap();
        board.link("two", "three", Difficulty::Hard).unwrap();
        board.link("four", "three", Difficulty::Hard).unwrap();
        board.link("five", "four", Difficulty::Hard).unwrap();
        assert_eq!(board.check_chain(), Ok(()));
    }

    #[test]
    fn builder_reasons() {
        let mut builder = PuzzleBuilder::new();
        builder.add_tile(Tile::new("A", ["t"]))
            .add_tile(Tile::new("A", ["u"]))
            .add_tile(Tile::new("B", ["t"]));
        // stays invalid, later calls are ignored
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::DuplicateTile { name: "A".into() }]));

        let mut builder = PuzzleBuilder::new();
        builder.add_tile(Tile::new("A", ["t"]))
            .add_reference_link(UnorderedPair("A", "B"));
        assert_eq!(builder.build(), Err(vec![BuilderInvalidReason::UnknownTile { name: "B".into() }]));

        let mut builder = PuzzleBuilder::new();
        builder.add_tile(Tile::new("A", ["t"]))
            .add_reference_link(UnorderedPair("A", "A"));
        assert_eq!(builder.build(), Err(vec![BuilderInvalidReason::SelfLink { name: "A".into() }]));

        let mut builder = PuzzleBuilder::new();
        builder.add_tiles(["A", "B", "C"].map(|name| Tile::new(name, ["t"])))
            .add_reference_link(UnorderedPair("A", "B"));
        assert_eq!(builder.build(), Err(vec![BuilderInvalidReason::ReferenceNotAChain(ChainDefect::Incomplete { links: 1, needed: 2 })]));

        builder.add_reference_link(UnorderedPair("C", "B"));
        assert!(builder.is_valid().is_none());
        assert!(builder.build().is_ok());
    }

    #[test]
    fn puzzle_new_checks_reference() {
        let tiles = ["A", "B", "C"].map(|name| Tile::new(name, ["t"]));
        assert!(Puzzle::new(tiles.clone(), [Link::new("A", "B"), Link::new("B", "C")]).is_ok());
        assert!(matches!(
            Puzzle::new(tiles, [Link::new("A", "B"), Link::new("B", "C"), Link::new("A", "C")]).unwrap_err()[..],
            [BuilderInvalidReason::ReferenceNotAChain(ChainDefect::Incomplete { links: 3, needed: 2 })]
        ));
    }

    #[test]
    fn catalog_selection_wraps() {
        let catalog = Catalog::handcrafted();
        assert_eq!(catalog.puzzles().len(), 4);
        assert_eq!(catalog.select_by_index(0).title(), Some("pets"));
        assert_eq!(catalog.select_by_index(catalog.puzzles().len()), catalog.select_by_index(0));
        assert_eq!(catalog.select_by_index(6), catalog.select_by_index(2));

        assert_eq!(Catalog::new(Vec::new()).unwrap_err(), BuilderInvalidReason::EmptyCatalog);
        assert_eq!(Catalog::new(vec![pets()]).unwrap().select_by_index(3), &pets());
    }

    #[test]
    fn daily_index() {
        let catalog = Catalog::handcrafted();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let next = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();

        assert_eq!(catalog.daily_index(day, 0), catalog.daily_index(day, 0));
        assert_eq!(catalog.daily_index(next, 0), (catalog.daily_index(day, 0) + 1) % catalog.puzzles().len());
        assert_eq!(catalog.daily_index(day, 1), catalog.daily_index(next, 0));
        assert_eq!(catalog.daily(day, 0), catalog.select_by_index(catalog.daily_index(day, 0)));

        // 0001-01-01 is day 1
        assert_eq!(catalog.daily_index(NaiveDate::from_ymd_opt(1, 1, 1).unwrap(), 0), 1);

        for offset in [-1_000_000, -5, -1, 0, 3, i64::MAX, i64::MIN] {
            assert!(catalog.daily_index(day, offset) < catalog.puzzles().len());
        }
    }

    #[test]
    fn tag_visibility() {
        let tile = Tile::new("Dog", ["pet", "bone", "canine"]);
        let mut revealed = HashSet::new();

        let easy = visible_tags(&tile, Difficulty::Easy, &revealed);
        assert_eq!(easy, TagView::Shown(vec!["bone", "canine", "pet"]));
        assert_eq!(easy.to_string(), "bone, canine, pet");

        let hidden = visible_tags(&tile, Difficulty::Medium, &revealed);
        assert!(hidden.is_hidden());
        assert!(hidden.tags().is_empty());

        revealed.insert("Dog".to_owned());
        let shown = visible_tags(&tile, Difficulty::Hard, &revealed);
        assert_eq!(shown, TagView::Revealed(vec!["bone", "canine", "pet"]));
        assert_eq!(shown.to_string(), "bone, canine, pet (revealed)");
    }

    #[test]
    fn board_table_keeps_tags_hidden() {
        let base = pets();
        let mut board = Board::new(build_from_catalog(&base, Difficulty::Hard, 5).unwrap());
        board.auto_solve();
        let mut revealed = HashSet::new();

        let table = board_table(&board, Difficulty::Hard, &revealed);
        assert!(!table.contains(DECOY_PREFIX));
        assert!(!table.contains("pet"));
        assert_eq!(table.lines().filter(|line| line.contains("hidden")).count(), 8);
        assert!(table.contains("  Bone ↔ Dog"));

        revealed.insert("Dog".to_owned());
        let table = board_table(&board, Difficulty::Hard, &revealed);
        assert_eq!(table.lines().filter(|line| line.contains(DECOY_PREFIX)).count(), 1);
        assert!(table.contains("(revealed)"));

        assert!(board_table(&board, Difficulty::Easy, &revealed).lines().all(|line| !line.contains("hidden")));
    }

    #[test]
    fn tile_shared_tags() {
        let dog = Tile::new("Dog", ["pet", "bone", "decoy:Dog:1234"]);
        let shared = {
            let cat = Tile::new("Cat", ["pet", "bone", "fur"]);
            let shared = dog.shared_tags(&cat, false);
            shared.into_iter().map(str::to_owned).collect::<BTreeSet<_>>()
        };
        assert_eq!(shared, BTreeSet::from(["bone".to_owned(), "pet".to_owned()]));

        let twin = Tile::new("Twin", ["pet", "decoy:Dog:1234"]);
        assert_eq!(dog.shared_tags(&twin, false), BTreeSet::from(["decoy:Dog:1234", "pet"]));
        assert_eq!(dog.shared_tags(&twin, true), BTreeSet::from(["pet"]));
        assert_eq!(twin.shared_tags(&dog, true), dog.shared_tags(&twin, true));
    }

    #[test]
    fn difficulty_parsing() {
        assert_eq!(Difficulty::from_str("hard"), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("Medium"), Ok(Difficulty::Medium));
        assert!(Difficulty::from_str("impossible").is_err());
        assert_eq!(Difficulty::default(), Difficulty::Easy);
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
    }

    #[test]
    fn links_are_canonical() {
        assert_eq!(Link::new("b", "a"), Link::new("a", "b"));
        assert_eq!(Link::new("b", "a").first(), "a");
        assert_eq!(Link::from(UnorderedPair("z", "y")), Link::new("y", "z"));
        assert_eq!(Link::new("a", "b").as_pair(), UnorderedPair("b", "a"));
        assert!(Link::new("a", "b") < Link::new("a", "c"));
    }
}

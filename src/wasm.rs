//! Bindings for a browser front end.
//!
//! A [`WebGame`] owns one board together with the per-player state a page needs around it:
//! the difficulty it was generated at and the tiles the player has inspected.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use js_sys::{Array, Date};
use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::builder::BuilderInvalidReason;
use crate::catalog::Catalog;
use crate::difficulty::Difficulty;
use crate::generator::build_from_catalog;
use crate::view::visible_tags;

fn to_js(error: impl ToString) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn reasons_to_js(reasons: Vec<BuilderInvalidReason>) -> JsValue {
    JsValue::from_str(&reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))
}

/// One player's game: today's catalog puzzle at a chosen difficulty.
#[wasm_bindgen]
pub struct WebGame {
    board: Board,
    difficulty: Difficulty,
    revealed: HashSet<String>,
}

#[wasm_bindgen]
impl WebGame {
    /// Start today's puzzle (shifted by `offset` days) at `difficulty`, with decoys drawn from `seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str, seed: u64, offset: i32) -> Result<WebGame, JsValue> {
        let difficulty = Difficulty::from_str(difficulty).map_err(to_js)?;

        let now = Date::new_0();
        let today = NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
            .ok_or_else(|| JsValue::from_str("the browser reported an invalid date"))?;

        let catalog = Catalog::handcrafted();
        let puzzle = build_from_catalog(catalog.daily(today, offset.into()), difficulty, seed)
            .map_err(reasons_to_js)?;

        Ok(Self {
            board: Board::new(puzzle),
            difficulty,
            revealed: HashSet::new(),
        })
    }

    /// Link two tiles, returning the success message or throwing the refusal.
    pub fn link(&mut self, a: &str, b: &str) -> Result<String, JsValue> {
        self.board.link(a, b, self.difficulty)
            .map(|linked| linked.to_string())
            .map_err(to_js)
    }

    /// Remove a link, returning a confirmation or throwing if the tiles are not linked.
    pub fn unlink(&mut self, a: &str, b: &str) -> Result<String, JsValue> {
        self.board.unlink(a, b)
            .map(|link| format!("removed {link}"))
            .map_err(to_js)
    }

    /// The next link to try, or a note that none is left.
    pub fn hint(&self) -> String {
        self.board.give_hint().to_string()
    }

    /// Throws the first chain defect, if any.
    pub fn check(&self) -> Result<String, JsValue> {
        self.board.check_chain()
            .map(|_| String::from("complete"))
            .map_err(to_js)
    }

    /// Replace the current links with the solution.
    #[wasm_bindgen(js_name = autoSolve)]
    pub fn auto_solve(&mut self) {
        self.board.auto_solve();
    }

    /// Remove every link.
    #[wasm_bindgen(js_name = resetLinks)]
    pub fn reset_links(&mut self) {
        self.board.reset_links();
    }

    /// Mark a tile as inspected so its tags are shown.
    pub fn reveal(&mut self, name: &str) -> Result<(), JsValue> {
        let tile = self.board.tile(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown tile: {name}")))?;
        self.revealed.insert(tile.name().to_owned());
        Ok(())
    }

    /// Tile names in puzzle order.
    #[wasm_bindgen(js_name = tileNames)]
    pub fn tile_names(&self) -> Array {
        self.board.tiles()
            .map(|tile| JsValue::from_str(tile.name()))
            .collect()
    }

    /// The tags of `name` as the player may currently see them.
    #[wasm_bindgen(js_name = tileTags)]
    pub fn tile_tags(&self, name: &str) -> Result<String, JsValue> {
        let tile = self.board.tile(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown tile: {name}")))?;
        Ok(visible_tags(tile, self.difficulty, &self.revealed).to_string())
    }

    /// Number of links on `name`.
    pub fn degree(&self, name: &str) -> Result<usize, JsValue> {
        self.board.degree(name).map_err(to_js)
    }

    /// Current links, sorted, as display strings.
    pub fn links(&self) -> Array {
        self.board.links()
            .iter()
            .map(|link| JsValue::from_str(&link.to_string()))
            .collect()
    }
}

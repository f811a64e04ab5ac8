//! Sliding tile puzzle on an N×N board.
//!
//! Tiles are numbered 1..N²-1 with one empty slot. A tile moves only if it
//! shares an edge with the empty slot on the grid; indices that are numerically
//! adjacent but sit on different rows are not neighbours.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::api::game::{MiniGame, ModeContext};
use crate::api::types::{GameMode, SessionEvent};
use crate::core::rng::Rng;
use crate::error::SessionError;
use crate::input::queue::PlayerAction;
use crate::modes::{wrong_mode, ModeSnapshot};

/// Score awarded for solving the board.
pub const SOLVED_SCORE: u32 = 100;

/// Random moves per cell when scrambling.
const SCRAMBLE_MOVES_PER_CELL: usize = 20;

const MIN_SIZE: usize = 2;
const MAX_SIZE: usize = 8;

fn default_seed() -> u64 {
    42
}

/// Catalog content block for `mode: "puzzle"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleContent {
    /// Board edge length N.
    pub size: usize,
    /// Optional fixed starting layout, row-major, `0` for the empty slot.
    /// When absent the solved board is scrambled with `seed`.
    #[serde(default)]
    pub tiles: Option<Vec<u32>>,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PuzzleSnapshot {
    pub size: usize,
    /// Row-major tiles, `None` for the empty slot.
    pub tiles: Vec<Option<u32>>,
    pub empty_index: usize,
    pub moves: u32,
    pub solved: bool,
}

pub struct SlidingPuzzle {
    size: usize,
    tiles: Vec<Option<u32>>,
    rng: Rng,
    moves: u32,
    solved: bool,
}

/// Whether `tiles` is 1..N²-1 in order with the empty slot last.
pub fn is_solved_layout(tiles: &[Option<u32>]) -> bool {
    let Some((last, rest)) = tiles.split_last() else {
        return false;
    };
    last.is_none()
        && rest
            .iter()
            .enumerate()
            .all(|(i, t)| *t == Some(i as u32 + 1))
}

/// Inversion parity test. On odd widths the inversion count must be even;
/// on even widths it must differ in parity from the empty slot's row counted
/// from the bottom.
fn is_solvable(size: usize, tiles: &[Option<u32>]) -> bool {
    let values: Vec<u32> = tiles.iter().flatten().copied().collect();
    let inversions: usize = values
        .iter()
        .enumerate()
        .map(|(i, a)| values[i + 1..].iter().filter(|b| *b < a).count())
        .sum();
    if size % 2 == 1 {
        return inversions % 2 == 0;
    }
    let empty_row = tiles.iter().position(|t| t.is_none()).unwrap_or(0) / size;
    (inversions + (size - empty_row)) % 2 == 1
}

fn solved_layout(size: usize) -> Vec<Option<u32>> {
    let count = size * size;
    (1..count as u32).map(Some).chain(std::iter::once(None)).collect()
}

impl SlidingPuzzle {
    pub fn new(content: &PuzzleContent) -> Result<Self, SessionError> {
        let size = content.size;
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(SessionError::invalid(format!(
                "puzzle size {} outside {}..={}",
                size, MIN_SIZE, MAX_SIZE
            )));
        }
        let mut puzzle = Self {
            size,
            tiles: solved_layout(size),
            rng: Rng::new(content.seed),
            moves: 0,
            solved: false,
        };
        match &content.tiles {
            Some(layout) => puzzle.tiles = Self::parse_layout(size, layout)?,
            None => puzzle.scramble_board(),
        }
        Ok(puzzle)
    }

    fn parse_layout(size: usize, layout: &[u32]) -> Result<Vec<Option<u32>>, SessionError> {
        let count = size * size;
        if layout.len() != count {
            return Err(SessionError::invalid(format!(
                "puzzle grid is not {}x{}: got {} tiles",
                size,
                size,
                layout.len()
            )));
        }
        let mut seen = vec![false; count];
        for &value in layout {
            let v = value as usize;
            if v >= count || seen[v] {
                return Err(SessionError::invalid(format!(
                    "puzzle tiles must be 0..{} each exactly once, bad value {}",
                    count - 1,
                    value
                )));
            }
            seen[v] = true;
        }
        let tiles: Vec<Option<u32>> = layout.iter().map(|&v| if v == 0 { None } else { Some(v) }).collect();
        if !is_solvable(size, &tiles) {
            return Err(SessionError::invalid("puzzle layout cannot be solved"));
        }
        Ok(tiles)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Option<u32>] {
        &self.tiles
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn empty_index(&self) -> usize {
        // Construction guarantees exactly one empty slot.
        self.tiles.iter().position(|t| t.is_none()).unwrap_or(0)
    }

    /// Grid position of a row-major index as (column, row).
    fn cell(&self, index: usize) -> IVec2 {
        IVec2::new((index % self.size) as i32, (index / self.size) as i32)
    }

    /// Edge-adjacent on the grid, no wrap across rows.
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        let d = (self.cell(a) - self.cell(b)).abs();
        d.x + d.y == 1
    }

    fn neighbours(&self, index: usize) -> Vec<usize> {
        let n = self.size;
        let mut out = Vec::with_capacity(4);
        if index >= n {
            out.push(index - n);
        }
        if index + n < n * n {
            out.push(index + n);
        }
        if index % n > 0 {
            out.push(index - 1);
        }
        if index % n + 1 < n {
            out.push(index + 1);
        }
        out
    }

    /// Slide the tile at `index` into the empty slot.
    pub fn click_tile(&mut self, index: usize, ctx: &mut ModeContext) -> Result<(), SessionError> {
        if self.solved {
            return Err(SessionError::illegal("puzzle is already solved"));
        }
        if index >= self.tiles.len() {
            return Err(SessionError::illegal(format!(
                "tile index {} outside the {}x{} board",
                index, self.size, self.size
            )));
        }
        let empty = self.empty_index();
        if !self.is_adjacent(index, empty) {
            return Err(SessionError::illegal(format!(
                "tile {} is not next to the empty slot at {}",
                index, empty
            )));
        }

        self.tiles.swap(index, empty);
        self.moves += 1;
        ctx.emit_event(SessionEvent::new(
            SessionEvent::TILE_MOVED,
            index as f32,
            empty as f32,
            self.moves as f32,
        ));

        if is_solved_layout(&self.tiles) {
            self.solved = true;
            log::debug!("puzzle solved in {} moves", self.moves);
        }
        Ok(())
    }

    /// Re-scramble the board and reset the move counter.
    pub fn shuffle(&mut self, ctx: &mut ModeContext) -> Result<(), SessionError> {
        if self.solved {
            return Err(SessionError::illegal("puzzle is already solved"));
        }
        self.scramble_board();
        self.moves = 0;
        ctx.emit_event(SessionEvent::new(SessionEvent::SHUFFLED, 0.0, 0.0, 0.0));
        Ok(())
    }

    fn scramble_board(&mut self) {
        self.scramble(self.size * self.size * SCRAMBLE_MOVES_PER_CELL);
        // A walk can end on the solved board; one more move leaves it.
        if is_solved_layout(&self.tiles) {
            self.scramble(1);
        }
    }

    /// Random walk of the empty slot. Returns the slot's position before each
    /// step, so replaying it backwards restores the starting layout.
    fn scramble(&mut self, steps: usize) -> Vec<usize> {
        let mut trail = Vec::with_capacity(steps);
        let mut previous = usize::MAX;
        for _ in 0..steps {
            let empty = self.empty_index();
            let options: Vec<usize> = self
                .neighbours(empty)
                .into_iter()
                .filter(|&i| i != previous)
                .collect();
            let next = options[self.rng.pick(options.len())];
            self.tiles.swap(next, empty);
            trail.push(empty);
            previous = empty;
        }
        trail
    }
}

impl MiniGame for SlidingPuzzle {
    fn mode(&self) -> GameMode {
        GameMode::Puzzle
    }

    fn apply(&mut self, action: &PlayerAction, ctx: &mut ModeContext) -> Result<(), SessionError> {
        match *action {
            PlayerAction::ClickTile { index } => self.click_tile(index, ctx),
            PlayerAction::Shuffle => self.shuffle(ctx),
            other => Err(wrong_mode(&other, GameMode::Puzzle)),
        }
    }

    fn score(&self) -> u32 {
        if self.solved {
            SOLVED_SCORE
        } else {
            0
        }
    }

    fn max_score(&self) -> u32 {
        SOLVED_SCORE
    }

    fn is_finished(&self) -> bool {
        self.solved
    }

    fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot::Puzzle(PuzzleSnapshot {
            size: self.size,
            tiles: self.tiles.clone(),
            empty_index: self.empty_index(),
            moves: self.moves,
            solved: self.solved,
        })
    }
}

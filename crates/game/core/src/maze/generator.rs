//! Randomized depth-first maze carving.
//!
//! [`carve`] produces the raw perfect maze. [`MazeGenerator::generate`] then
//! applies the entrance rules and decorates the result with dead ends and
//! coins, yielding a playable [`MazeLayout`].

use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::env::{RngOracle, RngStream, RollSequence};
use crate::maze::{VisitedSet, shortest_distance};
use crate::question::Difficulty;
use crate::state::{Cell, Direction, Grid, Position};

/// Carver stack frame: a cell and its shuffled directions still to try.
struct Frame {
    cell: Position,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter(cell: Position, rolls: &mut RollSequence<'_>) -> Self {
        let mut directions = Direction::ALL;
        rolls.shuffle(&mut directions);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Carves a perfect maze on a `size`×`size` grid starting at the origin.
///
/// Passages advance two cells at a time and open the cell in between, so
/// corridors are one cell wide. An explicit stack replaces recursion; each
/// cell shuffles its directions on entry and tries them in that order, which
/// matches the recursive formulation roll for roll. The exit is forced to
/// `Path` afterwards.
pub fn carve(size: usize, rolls: &mut RollSequence<'_>) -> Grid {
    let mut grid = Grid::filled(size, Cell::Wall);
    if size == 0 {
        return grid;
    }

    let mut visited = VisitedSet::new(size * size);
    grid.set(Position::ORIGIN, Cell::Path);
    visited.insert(0);

    let mut stack = vec![Frame::enter(Position::ORIGIN, rolls)];
    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.directions.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;

        let from = frame.cell;
        let target = from.offset(direction, 2);
        let Some(index) = grid.index(target) else {
            continue;
        };
        if !visited.insert(index) {
            continue;
        }

        grid.set(from.step(direction), Cell::Path);
        grid.set(target, Cell::Path);
        stack.push(Frame::enter(target, rolls));
    }

    let exit = grid.exit();
    grid.set(exit, Cell::Path);
    grid
}

/// Playable maze: decorated grid plus the positions of its special cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    pub grid: Grid,
    pub dead_ends: Vec<Position>,
    pub coins: BTreeSet<Position>,
}

/// Builds decorated mazes from a session seed.
pub struct MazeGenerator<'a> {
    rng: &'a dyn RngOracle,
    seed: u64,
    config: &'a GameConfig,
}

impl<'a> MazeGenerator<'a> {
    pub fn new(rng: &'a dyn RngOracle, seed: u64, config: &'a GameConfig) -> Self {
        Self { rng, seed, config }
    }

    /// Generates the `generation`-th maze of the session.
    ///
    /// Re-carves (bounded) while the exit is closer than the difficulty's
    /// minimum distance, then forces the origin to `DeadEnd` and its two
    /// neighbours to `Path`, places dead ends, and seeds coins.
    pub fn generate(&self, difficulty: Difficulty, generation: u64) -> MazeLayout {
        let size = difficulty.grid_size();
        let minimum = self.config.exit_distance_for(difficulty);
        let attempts = u64::from(GameConfig::MAX_CARVE_ATTEMPTS);

        let mut grid = Grid::filled(size, Cell::Wall);
        for attempt in 0..attempts {
            let nonce = generation * attempts + attempt;
            let mut rolls = RollSequence::new(self.rng, self.seed, nonce, RngStream::Carve);
            grid = carve(size, &mut rolls);
            let distance = shortest_distance(&grid, Position::ORIGIN, grid.exit());
            if distance.is_some_and(|d| d >= minimum) {
                break;
            }
        }

        apply_entrance(&mut grid);
        let dead_ends = self.place_dead_ends(&mut grid, generation);
        let coins = self.place_coins(&mut grid, difficulty, generation);

        MazeLayout {
            grid,
            dead_ends,
            coins,
        }
    }

    fn place_dead_ends(&self, grid: &mut Grid, generation: u64) -> Vec<Position> {
        let size = grid.size() as i32;
        let wanted = self.config.dead_ends_for(grid.size());
        let mut rolls = RollSequence::new(self.rng, self.seed, generation, RngStream::DeadEnds);
        let mut placed = Vec::new();

        let priority = [Position::new(size - 2, size - 1), Position::new(size - 1, size - 2)];
        for candidate in priority {
            if placed.len() < wanted && is_dead_end_candidate(grid, candidate) {
                grid.set(candidate, Cell::DeadEnd);
                placed.push(candidate);
            }
        }

        let cells = grid.size() * grid.size();
        for _ in 0..GameConfig::DEAD_END_ATTEMPTS {
            if placed.len() >= wanted {
                break;
            }
            let candidate = grid.position_of(rolls.index(cells));
            if is_dead_end_candidate(grid, candidate) {
                grid.set(candidate, Cell::DeadEnd);
                placed.push(candidate);
            }
        }

        placed
    }

    fn place_coins(&self, grid: &mut Grid, difficulty: Difficulty, generation: u64) -> BTreeSet<Position> {
        let mut candidates: Vec<Position> = grid
            .positions_of(Cell::Path)
            .filter(|p| !is_reserved(grid, *p))
            .collect();
        let mut rolls = RollSequence::new(self.rng, self.seed, generation, RngStream::Coins);
        rolls.shuffle(&mut candidates);

        let coins: BTreeSet<Position> = candidates
            .into_iter()
            .take(self.config.coins_for(difficulty))
            .collect();
        for coin in &coins {
            grid.set(*coin, Cell::Coin);
        }
        coins
    }
}

/// Origin becomes a `DeadEnd` trap; its neighbours are opened so the first
/// move is never walled in.
fn apply_entrance(grid: &mut Grid) {
    grid.set(Position::ORIGIN, Cell::DeadEnd);
    for neighbor in origin_neighbors() {
        grid.set(neighbor, Cell::Path);
    }
}

fn origin_neighbors() -> [Position; 2] {
    [Position::new(1, 0), Position::new(0, 1)]
}

/// Origin, its neighbours, and the exit never carry decorations.
fn is_reserved(grid: &Grid, position: Position) -> bool {
    position == Position::ORIGIN || position == grid.exit() || origin_neighbors().contains(&position)
}

/// A `Path` leaf (exactly one `Path` neighbour) that does not touch another dead end.
fn is_dead_end_candidate(grid: &Grid, position: Position) -> bool {
    if is_reserved(grid, position) || grid.cell(position) != Some(Cell::Path) {
        return false;
    }

    let neighbors = Direction::ALL.map(|direction| position.step(direction));
    let path_neighbors = neighbors
        .iter()
        .filter(|n| grid.cell(**n) == Some(Cell::Path))
        .count();
    let touches_dead_end = neighbors
        .iter()
        .any(|n| grid.cell(*n) == Some(Cell::DeadEnd));

    path_neighbors == 1 && !touches_dead_end
}

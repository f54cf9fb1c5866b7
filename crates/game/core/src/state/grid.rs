//! Square maze grid and its cell markings.

use std::fmt;

use arrayvec::ArrayVec;
use sha2::{Digest, Sha256};

use crate::state::{Direction, Position};

/// Marking of a single grid cell.
///
/// Every variant except [`Cell::Wall`] is walkable; markings other than walls
/// never add or remove edges from the maze graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Wall,
    Path,
    CorrectPath,
    DeadEnd,
    Coin,
}

impl Cell {
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    pub const fn as_char(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Path => '.',
            Cell::CorrectPath => '+',
            Cell::DeadEnd => 'x',
            Cell::Coin => '$',
        }
    }

    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Path),
            '+' => Some(Cell::CorrectPath),
            'x' => Some(Cell::DeadEnd),
            '$' => Some(Cell::Coin),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridParseError {
    #[error("grid layout is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell '{ch}' at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },
}

/// `size`×`size` grid stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell set to `cell`.
    pub fn filled(size: usize, cell: Cell) -> Self {
        Self {
            size,
            cells: vec![cell; size * size],
        }
    }

    /// Parses an ASCII layout, one row per line (see [`Cell::from_char`]).
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(layout: &str) -> Result<Self, GridParseError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let size = rows.len();
        if size == 0 {
            return Err(GridParseError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != size {
                return Err(GridParseError::NotSquare {
                    row,
                    expected: size,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(GridParseError::UnknownCell { ch, row, col })?;
                cells.push(cell);
            }
        }

        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Bottom-right corner, the only exit.
    pub fn exit(&self) -> Position {
        let last = self.size as i32 - 1;
        Position::new(last, last)
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.size
            && (position.y as usize) < self.size
    }

    /// Row-major index of `position`, the key used by visited bitsets.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.size + position.x as usize)
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new((index % self.size) as i32, (index / self.size) as i32)
    }

    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|index| self.cells[index])
    }

    /// `[row][col]` access for renderers.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.size && col < self.size).then(|| self.cells[row * self.size + col])
    }

    /// Overwrites a cell. Returns false when `position` is out of bounds.
    pub fn set(&mut self, position: Position, cell: Cell) -> bool {
        match self.index(position) {
            Some(index) => {
                self.cells[index] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        self.cell(position).is_some_and(Cell::is_walkable)
    }

    /// Walkable orthogonal neighbours in [`Direction::ALL`] order.
    pub fn walkable_neighbors(&self, position: Position) -> ArrayVec<Position, 4> {
        Direction::ALL
            .into_iter()
            .map(|direction| position.step(direction))
            .filter(|next| self.is_walkable(*next))
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Positions holding exactly `cell`, in row-major order.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == cell)
            .map(|(index, _)| self.position_of(index))
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_walkable()).count()
    }

    /// SHA-256 over the size and every cell marking.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.size as u32).to_le_bytes());
        for cell in &self.cells {
            hasher.update([cell.as_char() as u8]);
        }
        hasher.finalize().into()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

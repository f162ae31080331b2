//! Sudoku boards and their exact-cover encoding.
//!
//! A 9×9 board becomes a 729×324 exact-cover instance: one matrix row per
//! `(row, column, value)` triple and four constraint columns per triple.
//! The constraint columns are partitioned into four blocks of 81, in this
//! order:
//!
//! ```text
//!   0..81    cell (r, c) is filled
//!  81..162   row r contains value v
//! 162..243   column c contains value v
//! 243..324   box b contains value v
//! ```
//!
//! Given clues do not shrink the matrix; instead every row that would put a
//! different value into a clue cell is emptied, which leaves it
//! unsatisfiable for all four of its constraints and therefore unreachable
//! by the search.

use crate::{
    errors::Error,
    matrix::LinkMatrix,
    solver::{search, SolutionHandler},
};
use std::{fmt, ops::ControlFlow};

/// Side length of the board.
pub const SIDE: usize = 9;
/// Side length of one box.
const BOX: usize = 3;
/// Rows of the exact-cover matrix: one per `(row, column, value)` triple.
pub const MATRIX_ROWS: usize = SIDE * SIDE * SIDE;
/// Columns of the exact-cover matrix: four constraint families of 81.
pub const MATRIX_COLUMNS: usize = 4 * SIDE * SIDE;

/// A 9×9 Sudoku board. `0` marks an empty cell, `1`-`9` a value.
///
/// Construction validates the value range, so every `Board` in circulation
/// is well-formed (though not necessarily consistent: contradictory clues
/// are legal input and simply solve to zero solutions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[u8; SIDE]; SIDE],
}

impl Board {
    /// A board with every cell empty.
    pub fn empty() -> Self {
        Board {
            cells: [[0; SIDE]; SIDE],
        }
    }

    /// Build a board from row-major cells, rejecting values outside
    /// `0..=9`.
    pub fn new(cells: [[u8; SIDE]; SIDE]) -> Result<Self, Error> {
        for (row, row_cells) in cells.iter().enumerate() {
            for (column, &value) in row_cells.iter().enumerate() {
                if value > 9 {
                    return Err(Error::ValueOutOfRange { row, column, value });
                }
            }
        }
        Ok(Board { cells })
    }

    /// Parse the 81-character row-major line format, `0` for empty cells.
    ///
    /// This is the usual one-line puzzle notation, e.g.
    /// `"530070000600195000..."`.
    pub fn from_line(line: &str) -> Result<Self, Error> {
        let count = line.chars().count();
        if count != SIDE * SIDE {
            return Err(Error::WrongCellCount(count));
        }

        let mut board = Board::empty();
        for (index, c) in line.chars().enumerate() {
            let digit = c.to_digit(10).ok_or(Error::InvalidCharacter(c))?;
            board.cells[index / SIDE][index % SIDE] = digit as u8;
        }
        Ok(board)
    }

    /// Value at `(row, column)`, `0` if empty.
    pub fn get(&self, row: usize, column: usize) -> u8 {
        self.cells[row][column]
    }

    /// Set `(row, column)` to `value` (`0` clears the cell).
    pub fn set(&mut self, row: usize, column: usize, value: u8) {
        debug_assert!(value <= 9);
        self.cells[row][column] = value;
    }

    /// The board in the same 81-character line format accepted by
    /// [`from_line`](Self::from_line).
    pub fn to_line(&self) -> String {
        self.cells
            .iter()
            .flatten()
            .map(|&value| char::from(b'0' + value))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for &value in row {
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

/// Matrix row index for placing `value` at `(row, column)`. All 0-based
/// except `value`, which is `1..=9`.
fn matrix_row(row: usize, column: usize, value: u8) -> usize {
    SIDE * SIDE * row + SIDE * column + (value as usize - 1)
}

/// The four constraint columns satisfied by placing `value` at
/// `(row, column)`, in ascending order. The cell-filled constraint is
/// always first; the decoder depends on that.
fn constraint_columns(row: usize, column: usize, value: u8) -> [usize; 4] {
    let value = value as usize - 1;
    let square = BOX * (row / BOX) + column / BOX;
    [
        SIDE * row + column,
        SIDE * SIDE + SIDE * row + value,
        2 * SIDE * SIDE + SIDE * column + value,
        3 * SIDE * SIDE + SIDE * square + value,
    ]
}

/// Encode `board` as a dancing-links matrix.
///
/// The matrix always has 729 rows and 324 columns; rows conflicting with a
/// clue are present but empty.
pub fn encode(board: &Board) -> LinkMatrix {
    let mut rows: Vec<Option<[usize; 4]>> = Vec::with_capacity(MATRIX_ROWS);
    for row in 0..SIDE {
        for column in 0..SIDE {
            for value in 1..=SIDE as u8 {
                rows.push(Some(constraint_columns(row, column, value)));
            }
        }
    }

    for row in 0..SIDE {
        for column in 0..SIDE {
            let clue = board.get(row, column);
            if clue == 0 {
                continue;
            }
            for value in 1..=SIDE as u8 {
                if value != clue {
                    rows[matrix_row(row, column, value)] = None;
                }
            }
        }
    }

    LinkMatrix::from_rows(
        MATRIX_COLUMNS,
        rows.into_iter().map(|row| row.into_iter().flatten()),
    )
}

/// Decode a candidate set back into a board.
///
/// For each chosen row the smallest constraint id in its row ring is the
/// cell-filled constraint (guaranteed by the column partition), and the
/// ring neighbor to its right is the row-value constraint, which recovers
/// the value.
pub fn decode(matrix: &LinkMatrix, candidates: &[usize]) -> Board {
    let mut board = Board::empty();

    for &chosen in candidates {
        let mut cell_node = chosen;
        let mut cell_constraint = matrix.column_index(matrix.column_of(chosen));
        let mut node = matrix.right(chosen);
        while node != chosen {
            let constraint = matrix.column_index(matrix.column_of(node));
            if constraint < cell_constraint {
                cell_constraint = constraint;
                cell_node = node;
            }
            node = matrix.right(node);
        }

        let partner = matrix.right(cell_node);
        let value_constraint = matrix.column_index(matrix.column_of(partner));

        let row = cell_constraint / SIDE;
        let column = cell_constraint % SIDE;
        let value = (value_constraint % SIDE) as u8 + 1;
        board.set(row, column, value);
    }

    board
}

/// Handler that decodes each solution and accumulates the boards.
///
/// An optional cap makes bounded enumeration possible on wildly
/// under-constrained boards (an empty grid has more completions than can
/// ever be materialized).
#[derive(Debug, Default)]
pub struct Collector {
    boards: Vec<Board>,
    limit: Option<usize>,
}

impl Collector {
    /// Collector without a solution cap.
    pub fn new() -> Self {
        Collector::default()
    }

    /// Collector that stops the search after `limit` solutions.
    pub fn up_to(limit: usize) -> Self {
        Collector {
            boards: Vec::new(),
            limit: Some(limit),
        }
    }

    /// The boards collected so far.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Consume the collector, returning the boards.
    pub fn into_boards(self) -> Vec<Board> {
        self.boards
    }
}

impl SolutionHandler for Collector {
    fn accept(&mut self, matrix: &LinkMatrix, candidates: &[usize]) -> ControlFlow<()> {
        self.boards.push(decode(matrix, candidates));
        match self.limit {
            Some(limit) if self.boards.len() >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

/// The default solution capability: decodes each solution and drops it.
///
/// Useful with the count returned by [`solve_with`] or [`search`] when
/// only the number of solutions matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl SolutionHandler for Discard {
    fn accept(&mut self, matrix: &LinkMatrix, candidates: &[usize]) -> ControlFlow<()> {
        let _ = decode(matrix, candidates);
        ControlFlow::Continue(())
    }
}

/// Solve `board`, streaming every solution to `handler` without retaining
/// earlier ones. Returns the number of solutions visited.
///
/// Builds a fresh matrix per call, so repeated invocations are fully
/// independent.
pub fn solve_with<H>(board: &Board, handler: &mut H) -> usize
where
    H: SolutionHandler + ?Sized,
{
    let mut matrix = encode(board);
    let count = search(&mut matrix, handler);
    log::debug!("solve finished with {count} solution(s)");
    count
}

/// Solve `board` and collect every solution as a decoded grid, in
/// discovery order. An unsatisfiable board yields an empty vector.
pub fn all_solutions(board: &Board) -> Vec<Board> {
    let mut collector = Collector::new();
    solve_with(board, &mut collector);
    collector.into_boards()
}

/// Count the solutions of `board` without materializing them.
pub fn count_solutions(board: &Board) -> usize {
    solve_with(board, &mut Discard)
}

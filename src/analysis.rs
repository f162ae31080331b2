//! Solution-set analysis: per-cell possibility sets, an entropy score, and
//! two recommenders for which empty cell to fill next.
//!
//! Both recommenders are greedy. The frequency-based one
//! ([`PossibilityTable::max_entropy_cells`]) just reads the possibility
//! table; the solver-driven one
//! ([`PossibilityTable::min_expected_entropy_cells`]) re-runs the full
//! encode/search/decode pipeline once per candidate `(cell, value)` pair to
//! estimate the entropy left after each hypothetical move, which is
//! expensive but looks one move ahead instead of none.

use crate::{
    errors::Error,
    sudoku::{self, Board, SIDE},
};
use itertools::Itertools;

/// Tie window for [`PossibilityTable::min_expected_entropy_cells`]: cells
/// within this distance of the minimum expected entropy are all
/// recommended. Entropy scores accumulate over many `log2` terms, so
/// equality is only ever approximate.
pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-9;

/// Set of distinct cell values (`1..=9`) observed across a solution batch,
/// stored as a 9-bit mask.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ValueSet(u16);

impl ValueSet {
    /// Add `value` to the set.
    pub fn insert(&mut self, value: u8) {
        debug_assert!((1..=9).contains(&value));
        self.0 |= 1 << (value - 1);
    }

    /// True if `value` is in the set.
    pub fn contains(&self, value: u8) -> bool {
        debug_assert!((1..=9).contains(&value));
        self.0 & (1 << (value - 1)) != 0
    }

    /// Number of distinct values in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The values in the set, ascending.
    pub fn values(self) -> impl Iterator<Item = u8> {
        (1..=9).filter(move |&value| self.contains(value))
    }
}

/// Row-major iterator over all 81 board coordinates.
fn cells() -> impl Iterator<Item = (usize, usize)> {
    (0..SIDE).cartesian_product(0..SIDE)
}

/// Per-cell possible-value sets for a batch of solution grids.
///
/// Every grid in a batch is fully determined, so every set has size at
/// least 1; size exactly 1 means the cell is certain given the clues the
/// batch was solved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossibilityTable {
    table: [[ValueSet; SIDE]; SIDE],
}

impl PossibilityTable {
    /// Union the values of each cell across `solutions`.
    ///
    /// Fails with [`Error::NoSolutions`] on an empty batch: an aggregate
    /// over zero boards is meaningless, and an unsatisfiable puzzle should
    /// be reported as such rather than analyzed.
    pub fn from_solutions(solutions: &[Board]) -> Result<Self, Error> {
        if solutions.is_empty() {
            return Err(Error::NoSolutions);
        }

        let mut table = [[ValueSet::default(); SIDE]; SIDE];
        for board in solutions {
            for (row, column) in cells() {
                table[row][column].insert(board.get(row, column));
            }
        }
        Ok(PossibilityTable { table })
    }

    /// The possibility set for `(row, column)`.
    pub fn get(&self, row: usize, column: usize) -> ValueSet {
        self.table[row][column]
    }

    /// Average per-cell information across the board: the mean over all 81
    /// cells of `log2(|possible values|)`.
    ///
    /// A certain cell contributes 0; a fully determined batch scores 0.
    /// This is per-cell information, not the joint entropy of the solution
    /// distribution.
    pub fn entropy(&self) -> f64 {
        let total: f64 = cells()
            .map(|(row, column)| (self.table[row][column].len() as f64).log2())
            .sum();
        total / (SIDE * SIDE) as f64
    }

    /// Frequency-based recommender: every cell whose possibility set is as
    /// large as the largest on the board, in row-major order, ties
    /// included.
    pub fn max_entropy_cells(&self) -> Vec<(usize, usize)> {
        let max = cells()
            .map(|(row, column)| self.table[row][column].len())
            .max()
            .unwrap_or(0);

        cells()
            .filter(|&(row, column)| self.table[row][column].len() == max)
            .collect()
    }

    /// Solver-driven recommender: the cells expected to leave the least
    /// entropy behind once filled.
    ///
    /// For every ambiguous cell (set size ≥ 2) and every candidate value in
    /// its set, the value is hypothetically placed on `clues` and the
    /// puzzle is re-solved from scratch; the entropies of the conditioned
    /// solution batches are averaged into an expected post-move score for
    /// the cell. Certain cells get an infinite sentinel so they are never
    /// recommended. Every cell within `tolerance` of the minimum score is
    /// returned, in row-major order.
    ///
    /// `clues` must be the board this table's batch was solved from;
    /// candidate values then always admit at least one solution. A table
    /// with no ambiguous cell yields an empty recommendation.
    pub fn min_expected_entropy_cells(
        &self,
        clues: &Board,
        tolerance: f64,
    ) -> Result<Vec<(usize, usize)>, Error> {
        let mut scores = [[f64::INFINITY; SIDE]; SIDE];

        for (row, column) in cells() {
            let set = self.table[row][column];
            if set.len() <= 1 {
                continue;
            }

            let mut total = 0.0;
            for value in set.values() {
                let mut trial = *clues;
                trial.set(row, column, value);
                let conditioned = sudoku::all_solutions(&trial);
                let entropy = PossibilityTable::from_solutions(&conditioned)?.entropy();
                log::debug!(
                    "cell ({row}, {column}) value {value}: {} solution(s), entropy {entropy:.6}",
                    conditioned.len()
                );
                total += entropy;
            }
            scores[row][column] = total / set.len() as f64;
        }

        let lowest = cells()
            .map(|(row, column)| scores[row][column])
            .fold(f64::INFINITY, f64::min);
        if lowest.is_infinite() {
            return Ok(Vec::new());
        }

        Ok(cells()
            .filter(|&(row, column)| (scores[row][column] - lowest).abs() < tolerance)
            .collect())
    }
}

/// Everything the analyzer derives from one puzzle: the possibility table
/// and both recommendations.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Per-cell possible-value sets across all solutions.
    pub table: PossibilityTable,
    /// Cells with the largest possibility sets (frequency recommender).
    pub most_uncertain: Vec<(usize, usize)>,
    /// Cells with the lowest expected post-move entropy (solver-driven
    /// recommender).
    pub best_moves: Vec<(usize, usize)>,
}

/// Solve `clues` to completion and analyze the full solution set.
///
/// Fails with [`Error::NoSolutions`] if the puzzle is unsatisfiable. Note
/// that this enumerates every solution and re-solves once per ambiguous
/// `(cell, value)` pair, so it is only tractable for boards constrained
/// enough to have a modest solution count.
pub fn analyze(clues: &Board, tolerance: f64) -> Result<Analysis, Error> {
    let solutions = sudoku::all_solutions(clues);
    let table = PossibilityTable::from_solutions(&solutions)?;
    let most_uncertain = table.max_entropy_cells();
    let best_moves = table.min_expected_entropy_cells(clues, tolerance)?;

    Ok(Analysis {
        table,
        most_uncertain,
        best_moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_set_basics() {
        let mut set = ValueSet::default();
        assert!(set.is_empty());

        set.insert(3);
        set.insert(7);
        set.insert(3);
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(!set.contains(4));
        assert_eq!(set.values().collect::<Vec<_>>(), vec![3, 7]);
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert_eq!(
            PossibilityTable::from_solutions(&[]).unwrap_err(),
            Error::NoSolutions
        );
    }

    #[test]
    fn table_unions_values_per_cell() {
        let solved =
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
        let a = Board::from_line(solved).unwrap();
        let mut b = a;
        // Swap a pair of values in two cells to fake a second "solution".
        b.set(0, 0, 9);
        b.set(0, 6, 5);

        let table = PossibilityTable::from_solutions(&[a, b]).unwrap();

        assert_eq!(table.get(0, 0).values().collect::<Vec<_>>(), vec![5, 9]);
        assert_eq!(table.get(0, 6).values().collect::<Vec<_>>(), vec![5, 9]);
        assert_eq!(table.get(8, 8).values().collect::<Vec<_>>(), vec![9]);

        // A certain cell agrees across the whole batch.
        for (row, column) in super::cells() {
            if table.get(row, column).len() == 1 {
                assert_eq!(a.get(row, column), b.get(row, column));
            }
        }
    }

    #[test]
    fn entropy_counts_only_ambiguous_cells() {
        let solved =
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
        let a = Board::from_line(solved).unwrap();

        let certain = PossibilityTable::from_solutions(&[a]).unwrap();
        assert_eq!(certain.entropy(), 0.0);

        let mut b = a;
        b.set(0, 0, 9);
        b.set(0, 6, 5);
        let table = PossibilityTable::from_solutions(&[a, b]).unwrap();
        // Two cells with two options each: 2 * log2(2) / 81.
        assert!((table.entropy() - 2.0 / 81.0).abs() < 1e-12);
    }

    #[test]
    fn max_entropy_cells_reports_all_ties() {
        let solved =
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
        let a = Board::from_line(solved).unwrap();
        let mut b = a;
        b.set(0, 0, 9);
        b.set(0, 6, 5);

        let table = PossibilityTable::from_solutions(&[a, b]).unwrap();
        assert_eq!(table.max_entropy_cells(), vec![(0, 0), (0, 6)]);

        // A single-board batch maxes out at size 1, so every cell ties.
        let certain = PossibilityTable::from_solutions(&[a]).unwrap();
        assert_eq!(certain.max_entropy_cells().len(), 81);
    }

    #[test]
    fn fully_determined_table_recommends_nothing() {
        let solved =
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
        let board = Board::from_line(solved).unwrap();
        let table = PossibilityTable::from_solutions(&[board]).unwrap();

        let moves = table
            .min_expected_entropy_cells(&board, DEFAULT_TIE_TOLERANCE)
            .unwrap();
        assert!(moves.is_empty());
    }
}

mod common;

use common::{board, RECTANGLE_CELLS, TWO_SOLUTION_PUZZLE, UNIQUE_SOLUTION};
use sudoku_dlx::{
    analysis::{self, PossibilityTable, DEFAULT_TIE_TOLERANCE},
    sudoku, Board, Error,
};

#[test]
fn possibility_sets_cover_exactly_the_rectangle() {
    let puzzle = board(TWO_SOLUTION_PUZZLE);
    let solutions = sudoku::all_solutions(&puzzle);
    let table = PossibilityTable::from_solutions(&solutions).unwrap();

    for row in 0..9 {
        for column in 0..9 {
            let set = table.get(row, column);
            assert!(!set.is_empty());
            if RECTANGLE_CELLS.contains(&(row, column)) {
                assert_eq!(set.values().collect::<Vec<_>>(), vec![1, 3]);
            } else {
                assert_eq!(set.len(), 1, "cell ({row}, {column}) should be certain");
            }
        }
    }
}

#[test]
fn entropy_matches_the_four_ambiguous_cells() {
    let puzzle = board(TWO_SOLUTION_PUZZLE);
    let table = PossibilityTable::from_solutions(&sudoku::all_solutions(&puzzle)).unwrap();

    // Four cells with two options each: 4 * log2(2) / 81.
    assert!((table.entropy() - 4.0 / 81.0).abs() < 1e-12);
}

#[test]
fn frequency_recommender_reports_the_rectangle() {
    let puzzle = board(TWO_SOLUTION_PUZZLE);
    let table = PossibilityTable::from_solutions(&sudoku::all_solutions(&puzzle)).unwrap();

    assert_eq!(table.max_entropy_cells(), RECTANGLE_CELLS.to_vec());
}

#[test]
fn solver_driven_recommender_reports_the_rectangle() {
    let puzzle = board(TWO_SOLUTION_PUZZLE);
    let table = PossibilityTable::from_solutions(&sudoku::all_solutions(&puzzle)).unwrap();

    // Placing either candidate value in any rectangle cell collapses the
    // puzzle to a single solution, so every rectangle cell has expected
    // entropy 0 and all four tie for the recommendation.
    let moves = table
        .min_expected_entropy_cells(&puzzle, DEFAULT_TIE_TOLERANCE)
        .unwrap();
    assert_eq!(moves, RECTANGLE_CELLS.to_vec());
}

#[test]
fn analyze_bundles_table_and_recommendations() {
    let puzzle = board(TWO_SOLUTION_PUZZLE);
    let analysis = analysis::analyze(&puzzle, DEFAULT_TIE_TOLERANCE).unwrap();

    assert_eq!(analysis.most_uncertain, RECTANGLE_CELLS.to_vec());
    assert_eq!(analysis.best_moves, RECTANGLE_CELLS.to_vec());
    assert_eq!(analysis.table.get(3, 5).len(), 2);
}

#[test]
fn analyze_rejects_unsatisfiable_puzzles() {
    let mut puzzle = Board::empty();
    puzzle.set(0, 0, 2);
    puzzle.set(8, 0, 2);

    assert_eq!(
        analysis::analyze(&puzzle, DEFAULT_TIE_TOLERANCE).unwrap_err(),
        Error::NoSolutions
    );
}

#[test]
fn forced_cell_is_certain_in_the_table() {
    let mut puzzle = board(UNIQUE_SOLUTION);
    let forced = puzzle.get(6, 2);
    puzzle.set(6, 2, 0);

    let solutions = sudoku::all_solutions(&puzzle);
    assert_eq!(solutions.len(), 1);

    let table = PossibilityTable::from_solutions(&solutions).unwrap();
    let set = table.get(6, 2);
    assert_eq!(set.len(), 1);
    assert!(set.contains(forced));
}

#[test]
fn limited_empty_board_batch_still_ranks_cells() {
    // A bounded sample of the empty board's solutions is enough for the
    // frequency recommender to single out the most volatile cells.
    let mut collector = sudoku::Collector::up_to(2);
    sudoku::solve_with(&Board::empty(), &mut collector);
    let table = PossibilityTable::from_solutions(collector.boards()).unwrap();

    let recommended = table.max_entropy_cells();
    assert!(!recommended.is_empty());

    let max = recommended
        .iter()
        .map(|&(row, column)| table.get(row, column).len())
        .max()
        .unwrap();
    assert!(max >= 2, "two distinct solutions must disagree somewhere");
    for row in 0..9 {
        for column in 0..9 {
            assert!(table.get(row, column).len() <= max);
        }
    }
}

use sudoku_dlx::Board;

/// A well-known puzzle with exactly one solution.
#[allow(dead_code)]
pub const UNIQUE_PUZZLE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

/// The unique solution of [`UNIQUE_PUZZLE`].
pub const UNIQUE_SOLUTION: &str =
    "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

/// [`UNIQUE_SOLUTION`] with an unavoidable rectangle blanked: cells
/// (3, 5), (3, 8), (4, 5), (4, 8) hold the values 1/3 in a pattern that
/// can be completed two ways, so this board has exactly two solutions.
#[allow(dead_code)]
pub const TWO_SOLUTION_PUZZLE: &str =
    "534678912672195348198342567859760420426850790713924856961537284287419635345286179";

/// The two completions of [`TWO_SOLUTION_PUZZLE`].
#[allow(dead_code)]
pub const TWO_SOLUTIONS: [&str; 2] = [
    UNIQUE_SOLUTION,
    "534678912672195348198342567859763421426851793713924856961537284287419635345286179",
];

/// The blanked cells of [`TWO_SOLUTION_PUZZLE`], row-major.
#[allow(dead_code)]
pub const RECTANGLE_CELLS: [(usize, usize); 4] = [(3, 5), (3, 8), (4, 5), (4, 8)];

#[allow(dead_code)]
pub fn board(line: &str) -> Board {
    Board::from_line(line).expect("fixture board must parse")
}

/// Check the four Sudoku constraint families plus clue agreement: every
/// row, column, and box of `solution` contains 1 through 9 exactly once,
/// and every non-zero cell of `clues` is preserved.
#[allow(dead_code)]
pub fn is_valid_solution(solution: &Board, clues: &Board) -> bool {
    fn covers_all_values(cells: impl Iterator<Item = u8>) -> bool {
        let mut seen = [false; 10];
        for value in cells {
            if value == 0 || seen[value as usize] {
                return false;
            }
            seen[value as usize] = true;
        }
        seen[1..].iter().all(|&present| present)
    }

    for index in 0..9 {
        let row = (0..9).map(|column| solution.get(index, column));
        let column = (0..9).map(|row| solution.get(row, index));
        let square = (0..9).map(|offset| {
            solution.get(3 * (index / 3) + offset / 3, 3 * (index % 3) + offset % 3)
        });
        if !covers_all_values(row) || !covers_all_values(column) || !covers_all_values(square) {
            return false;
        }
    }

    (0..9).all(|row| {
        (0..9).all(|column| {
            let clue = clues.get(row, column);
            clue == 0 || clue == solution.get(row, column)
        })
    })
}

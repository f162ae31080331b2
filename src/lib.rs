#![deny(missing_docs)]

//! Enumerate every solution of a Sudoku puzzle with
//! [Dancing Links](https://en.wikipedia.org/wiki/Dancing_Links) and
//! [Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X), then
//! analyze the solution set to find the move that most reduces the remaining
//! uncertainty.
//!
//! The crate is layered bottom-up:
//!  - [`matrix`] holds the circular doubly-linked sparse matrix and its
//!    `cover`/`uncover` primitives,
//!  - [`solver`] runs the recursive exact-cover search over it,
//!  - [`sudoku`] encodes a 9×9 board into the 729×324 exact-cover instance
//!    and decodes chosen rows back into boards,
//!  - [`analysis`] aggregates a batch of solutions into per-cell possibility
//!    sets, an entropy score, and next-move recommendations.
//!
//! ```
//! use sudoku_dlx::{analysis::PossibilityTable, sudoku::{self, Board}};
//!
//! // A solved grid with one cell blanked has exactly one completion.
//! let solved =
//!     "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
//! let mut line: Vec<u8> = solved.bytes().collect();
//! line[0] = b'0';
//! let puzzle = Board::from_line(std::str::from_utf8(&line).unwrap()).unwrap();
//!
//! let solutions = sudoku::all_solutions(&puzzle);
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions[0].to_line(), solved);
//!
//! let table = PossibilityTable::from_solutions(&solutions).unwrap();
//! assert_eq!(table.entropy(), 0.0);
//! ```

pub mod analysis;
mod errors;
pub mod matrix;
pub mod solver;
pub mod sudoku;

pub use errors::Error;
pub use matrix::LinkMatrix;
pub use solver::{search, SolutionHandler};
pub use sudoku::Board;

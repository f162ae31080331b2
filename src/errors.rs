/// Errors reported at the crate's input boundaries.
///
/// Structural problems inside the link matrix (a cover/uncover ordering
/// violation, a broken ring) are programming errors, not recoverable
/// conditions; those are guarded by `debug_assert!` instead of surfacing
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A board line did not contain exactly 81 cells.
    #[error("expected 81 cells, found {0}")]
    WrongCellCount(usize),
    /// A board line contained a character other than `0`-`9`.
    #[error("invalid board character {0:?}, expected '0'-'9'")]
    InvalidCharacter(char),
    /// A cell value was outside `0..=9`.
    #[error("cell value {value} at row {row}, column {column} is outside 0..=9")]
    ValueOutOfRange {
        /// Row of the offending cell, `0..9`.
        row: usize,
        /// Column of the offending cell, `0..9`.
        column: usize,
        /// The rejected value.
        value: u8,
    },
    /// The analyzer was handed an empty solution batch.
    ///
    /// An unsatisfiable puzzle is not itself an error (the solve entry
    /// points report it as zero solutions), but an entropy average over
    /// zero boards is undefined, so the analyzer refuses it.
    #[error("puzzle has no solutions")]
    NoSolutions,
}

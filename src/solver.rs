//! Recursive exact-cover search (Knuth's Algorithm X) over a
//! [`LinkMatrix`].

use crate::matrix::LinkMatrix;
use std::ops::ControlFlow;

/// Capability that consumes completed exact covers.
///
/// [`search`] invokes [`accept`](Self::accept) once per discovered
/// solution. Implementations decide what a solution becomes: the sudoku
/// layer provides [`Collector`](crate::sudoku::Collector) (decode and
/// accumulate) and [`Discard`](crate::sudoku::Discard) (decode and drop,
/// for counting).
pub trait SolutionHandler {
    /// Consume one complete candidate set.
    ///
    /// `candidates` holds one chosen body node per satisfied row, in the
    /// order the search selected them. The slice is only valid for the
    /// duration of the call; decode it (for example with
    /// [`sudoku::decode`](crate::sudoku::decode)) before returning if the
    /// solution needs to outlive it.
    ///
    /// Returning [`ControlFlow::Break`] stops the enumeration
    /// cooperatively: the search unwinds its covers as usual and returns
    /// early. This is the only cancellation point; a handler that always
    /// returns [`ControlFlow::Continue`] runs the search to exhaustion.
    fn accept(&mut self, matrix: &LinkMatrix, candidates: &[usize]) -> ControlFlow<()>;
}

/// Adapter that turns a closure into a [`SolutionHandler`].
#[derive(Debug)]
pub struct FnHandler<F>(F);

impl<F> FnHandler<F>
where
    F: FnMut(&LinkMatrix, &[usize]) -> ControlFlow<()>,
{
    /// Wrap `f` as a handler.
    pub fn new(f: F) -> Self {
        FnHandler(f)
    }
}

impl<F> SolutionHandler for FnHandler<F>
where
    F: FnMut(&LinkMatrix, &[usize]) -> ControlFlow<()>,
{
    fn accept(&mut self, matrix: &LinkMatrix, candidates: &[usize]) -> ControlFlow<()> {
        (self.0)(matrix, candidates)
    }
}

/// Enumerate every exact cover of `matrix`, streaming each one to
/// `handler`. Returns the number of solutions found.
///
/// The matrix is mutated in place during the search but is always restored
/// to its entry state before returning, including when the handler breaks
/// off the enumeration early.
pub fn search<H>(matrix: &mut LinkMatrix, handler: &mut H) -> usize
where
    H: SolutionHandler + ?Sized,
{
    let mut state = Search {
        matrix,
        handler,
        candidates: Vec::new(),
        solutions: 0,
    };
    let _ = state.step();
    state.solutions
}

struct Search<'a, H: ?Sized> {
    matrix: &'a mut LinkMatrix,
    handler: &'a mut H,
    /// The answer path: one chosen node per recursion level, LIFO.
    candidates: Vec<usize>,
    solutions: usize,
}

impl<H> Search<'_, H>
where
    H: SolutionHandler + ?Sized,
{
    /// One level of the depth-first search.
    fn step(&mut self) -> ControlFlow<()> {
        let column = match self.select_column() {
            Some(column) => column,
            None => {
                // Header ring exhausted: the candidate set is a complete
                // exact cover.
                self.solutions += 1;
                log::debug!(
                    "solution {} found at depth {}",
                    self.solutions,
                    self.candidates.len()
                );
                return self.handler.accept(self.matrix, &self.candidates);
            }
        };

        self.matrix.cover(column);

        let mut flow = ControlFlow::Continue(());
        let mut row = self.matrix.down(column);
        while row != column {
            self.candidates.push(row);
            let mut node = self.matrix.right(row);
            while node != row {
                self.matrix.cover(self.matrix.column_of(node));
                node = self.matrix.right(node);
            }

            flow = self.step();

            // Undo in exact reverse order. The leftward walk of the same
            // row meets the columns covered above, last first.
            let mut node = self.matrix.left(row);
            while node != row {
                self.matrix.uncover(self.matrix.column_of(node));
                node = self.matrix.left(node);
            }
            self.candidates.pop();

            if flow.is_break() {
                break;
            }
            row = self.matrix.down(row);
        }

        // A column of size zero produced no iterations above: a structural
        // dead end, undone by this single uncover.
        self.matrix.uncover(column);
        flow
    }

    /// Minimum-remaining-values heuristic: the active column with the
    /// fewest live nodes, first found kept on ties. `None` when no active
    /// columns remain.
    fn select_column(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for header in self.matrix.active_columns() {
            let size = self.matrix.column_size(header);
            if best.map_or(true, |(_, smallest)| size < smallest) {
                best = Some((header, size));
            }
        }
        if let Some((header, size)) = best {
            log::trace!(
                "selected column {} (size {size})",
                self.matrix.column_index(header)
            );
        }
        best.map(|(header, _)| header)
    }
}

//! Circular doubly-linked sparse matrix for exact-cover problems.
//!
//! The matrix is stored as an arena of nodes addressed by stable `usize`
//! indices, with four link fields per node. Index links sidestep the
//! aliasing problems of a pointer-chasing layout while keeping `cover` and
//! `uncover` O(1) per touched node: an unlinked node keeps its own stale
//! links so its neighbors can be repointed back at it later.
//!
//! Layout of the arena:
//!
//! ```text
//! index 0               the root of the header ring
//! index 1..=num_columns one column header per constraint
//! index num_columns+1.. body nodes, in row-major insertion order
//! ```

/// A cell of the sparse matrix.
///
/// `left`/`right` form the node's row ring and `up`/`down` its column ring;
/// both rings are circular. Column headers and the root reuse the same
/// representation: headers are row-linked only into the header ring and the
/// root is never column-linked at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Arena index of this node's column header. Headers and the root point
    /// at themselves.
    column: usize,
    /// Identifier of the matrix row this node belongs to. Zero for headers
    /// and the root, which sit in no row.
    row: usize,
}

impl Node {
    /// A node at arena index `index`, linked to itself in both rings.
    fn detached(index: usize, column: usize, row: usize) -> Self {
        Node {
            left: index,
            right: index,
            up: index,
            down: index,
            column,
            row,
        }
    }
}

/// The dancing-links matrix: one root, one header per constraint column,
/// and one body node per 1-entry of the underlying 0/1 matrix.
///
/// Covering a column unlinks its header from the header ring and unlinks
/// every row intersecting the column from all other columns; uncovering
/// restores them. Both rely on strict LIFO discipline: uncovers must mirror
/// covers in exact reverse order, or the rings corrupt silently. The search
/// in [`crate::solver`] is the only intended driver of that discipline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatrix {
    nodes: Vec<Node>,
    num_columns: usize,
    /// Live node count per column, indexed by constraint id.
    sizes: Vec<usize>,
}

impl LinkMatrix {
    /// Build a matrix with `num_columns` constraint columns from sparse
    /// rows.
    ///
    /// Each element of `rows` lists the constraint ids satisfied by that
    /// matrix row, in ascending order. Row ids are assigned by enumeration
    /// order. An empty row still occupies a row id but contributes no
    /// nodes, which leaves it unsatisfiable for every constraint and
    /// therefore unreachable by the search.
    pub fn from_rows<I, R>(num_columns: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = usize>,
    {
        let mut matrix = LinkMatrix {
            nodes: Vec::with_capacity(num_columns + 1),
            num_columns,
            sizes: vec![0; num_columns],
        };

        matrix.nodes.push(Node::detached(0, 0, 0));
        for column in 0..num_columns {
            let header = column + 1;
            matrix.nodes.push(Node::detached(header, header, 0));
            matrix.link_right(header - 1, header);
        }

        for (row_id, row) in rows.into_iter().enumerate() {
            matrix.append_row(row_id, row);
        }

        matrix
    }

    fn append_row(&mut self, row_id: usize, columns: impl IntoIterator<Item = usize>) {
        let mut prev: Option<usize> = None;

        for column in columns {
            debug_assert!(column < self.num_columns, "constraint id out of range");

            let header = column + 1;
            let index = self.nodes.len();
            self.nodes.push(Node::detached(index, header, row_id));

            // Insert at the bottom of the column, just above the header.
            let bottom = self.nodes[header].up;
            self.link_below(bottom, index);
            self.sizes[column] += 1;

            if let Some(prev) = prev {
                debug_assert!(
                    self.nodes[prev].column < header,
                    "row constraints must be ascending"
                );
                self.link_right(prev, index);
            }
            prev = Some(index);
        }
    }

    /// Number of constraint columns, active or covered.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Arena index of the header ring's root.
    pub fn root(&self) -> usize {
        0
    }

    /// Arena index of the header for constraint `column`.
    pub fn header(&self, column: usize) -> usize {
        debug_assert!(column < self.num_columns);
        column + 1
    }

    /// Constraint id of `header`'s column. For a body node, pass
    /// [`column_of`](Self::column_of) first.
    pub fn column_index(&self, header: usize) -> usize {
        debug_assert!(self.is_header(header));
        header - 1
    }

    /// Header of the column that `node` belongs to.
    pub fn column_of(&self, node: usize) -> usize {
        self.nodes[node].column
    }

    /// Matrix row id that body node `node` was created for.
    pub fn row_of(&self, node: usize) -> usize {
        debug_assert!(!self.is_header(node) && node != self.root());
        self.nodes[node].row
    }

    /// Count of currently linked nodes in `header`'s column.
    pub fn column_size(&self, header: usize) -> usize {
        self.sizes[self.column_index(header)]
    }

    /// True if no active columns remain, i.e. the header ring holds only
    /// the root. This is the exact-cover termination condition.
    pub fn is_empty(&self) -> bool {
        self.nodes[self.root()].right == self.root()
    }

    /// Left neighbor in `node`'s row ring.
    #[inline]
    pub fn left(&self, node: usize) -> usize {
        self.nodes[node].left
    }

    /// Right neighbor in `node`'s row ring.
    #[inline]
    pub fn right(&self, node: usize) -> usize {
        self.nodes[node].right
    }

    /// Upward neighbor in `node`'s column ring.
    #[inline]
    pub fn up(&self, node: usize) -> usize {
        self.nodes[node].up
    }

    /// Downward neighbor in `node`'s column ring.
    #[inline]
    pub fn down(&self, node: usize) -> usize {
        self.nodes[node].down
    }

    /// Iterator over the headers still linked into the header ring, in
    /// ring order.
    pub fn active_columns(&self) -> ActiveColumns<'_> {
        ActiveColumns {
            matrix: self,
            current: self.root(),
        }
    }

    fn is_header(&self, index: usize) -> bool {
        (1..=self.num_columns).contains(&index)
    }

    /// Splice `new` into the row ring immediately after `at`.
    fn link_right(&mut self, at: usize, new: usize) {
        let next = self.nodes[at].right;
        self.nodes[new].right = next;
        self.nodes[next].left = new;
        self.nodes[new].left = at;
        self.nodes[at].right = new;
    }

    /// Splice `new` into the column ring immediately below `at`. The caller
    /// must have given `new` the same column header as `at`'s column.
    fn link_below(&mut self, at: usize, new: usize) {
        let next = self.nodes[at].down;
        self.nodes[new].down = next;
        self.nodes[next].up = new;
        self.nodes[new].up = at;
        self.nodes[at].down = new;
    }

    /// Unlink `node` from its row ring, leaving `node`'s own links intact
    /// so that [`relink_row`](Self::relink_row) can restore it.
    fn unlink_row(&mut self, node: usize) {
        let Node { left, right, .. } = self.nodes[node];
        self.nodes[left].right = right;
        self.nodes[right].left = left;
    }

    /// Reverse of [`unlink_row`](Self::unlink_row). Only valid in exact
    /// reverse order of the matching unlinks.
    fn relink_row(&mut self, node: usize) {
        let Node { left, right, .. } = self.nodes[node];
        debug_assert_eq!(self.nodes[left].right, right, "row ring already relinked");
        self.nodes[left].right = node;
        self.nodes[right].left = node;
    }

    /// Unlink `node` from its column ring, leaving `node`'s own links
    /// intact.
    fn unlink_column(&mut self, node: usize) {
        let Node { up, down, .. } = self.nodes[node];
        self.nodes[up].down = down;
        self.nodes[down].up = up;
    }

    /// Reverse of [`unlink_column`](Self::unlink_column). Only valid in
    /// exact reverse order of the matching unlinks.
    fn relink_column(&mut self, node: usize) {
        let Node { up, down, .. } = self.nodes[node];
        debug_assert_eq!(self.nodes[up].down, down, "column ring already relinked");
        self.nodes[up].down = node;
        self.nodes[down].up = node;
    }

    /// Cover `header`'s column: remove the header from the header ring,
    /// then unlink every other node of every row intersecting the column
    /// from its own column, decrementing that column's size.
    ///
    /// The covered column's own up/down links are left untouched, so the
    /// rows remain reachable from the header for [`uncover`](Self::uncover).
    pub fn cover(&mut self, header: usize) {
        debug_assert!(self.is_header(header), "cover target must be a header");

        self.unlink_row(header);

        let mut row = self.nodes[header].down;
        while row != header {
            let mut node = self.nodes[row].right;
            while node != row {
                self.unlink_column(node);
                self.sizes[self.nodes[node].column - 1] -= 1;
                node = self.nodes[node].right;
            }
            row = self.nodes[row].down;
        }
    }

    /// Exact mirror of [`cover`](Self::cover), walking bottom-to-top and
    /// right-to-left so every relink meets the ring state its unlink left
    /// behind. Must be called with the same column, in reverse
    /// chronological order relative to the covers.
    pub fn uncover(&mut self, header: usize) {
        debug_assert!(self.is_header(header), "uncover target must be a header");

        let mut row = self.nodes[header].up;
        while row != header {
            let mut node = self.nodes[row].left;
            while node != row {
                self.sizes[self.nodes[node].column - 1] += 1;
                self.relink_column(node);
                node = self.nodes[node].left;
            }
            row = self.nodes[row].up;
        }

        self.relink_row(header);
    }
}

/// Iterator over active column headers. See
/// [`LinkMatrix::active_columns`].
#[derive(Debug)]
pub struct ActiveColumns<'a> {
    matrix: &'a LinkMatrix,
    current: usize,
}

impl Iterator for ActiveColumns<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.matrix.right(self.current);
        if next == self.matrix.root() {
            None
        } else {
            self.current = next;
            Some(next)
        }
    }
}

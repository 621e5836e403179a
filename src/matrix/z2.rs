//! Matrices over the two-element field.
use crate::matrix::bits::BitChain;

/// A rectangular matrix over the field of two elements, stored as one
/// bit-packed chain per row.
#[derive(Debug, Clone)]
pub struct Z2Matrix {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<BitChain>,
}

impl Z2Matrix {
    /// The zero matrix of the given shape.
    pub fn new(n_rows: usize, n_cols: usize) -> Z2Matrix {
        Z2Matrix {
            n_rows,
            n_cols,
            rows: vec![BitChain::new(); n_rows],
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Set the entry at the given position to one.
    pub fn set(&mut self, row: usize, col: usize) {
        assert!(row < self.n_rows && col < self.n_cols, "Matrix entry out of range.");
        if !self.rows[row].contains(col) {
            self.rows[row].toggle(col);
        }
    }

    /// Whether the entry at the given position is one.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows[row].contains(col)
    }

    /// The rank, computed by Gaussian elimination on a working copy.
    /// Row operations are symmetric differences of bit-packed rows.
    pub fn rank(&self) -> usize {
        let mut rows = self.rows.clone();
        let mut rank = 0;
        for col in 0..self.n_cols {
            let Some(pivot_row) = (rank..rows.len()).find(|&r| rows[r].contains(col)) else {
                continue;
            };
            rows.swap(rank, pivot_row);
            let (head, tail) = rows.split_at_mut(rank + 1);
            let pivot = &head[rank];
            for row in tail.iter_mut() {
                if row.contains(col) {
                    row.xor_with(pivot);
                }
            }
            rank += 1;
            if rank == rows.len() {
                break;
            }
        }
        rank
    }
}

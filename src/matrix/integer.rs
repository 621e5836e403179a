//! Matrices over the integers: rank, column echelon form with tracked
//! operations, and Smith normal form.
//!
//! Entries are `i64` and every elimination step uses checked arithmetic;
//! an overflowing step surfaces as [ReductionError::Overflow] instead of
//! silently wrapping.
use thiserror::Error;

/// An error during an integer matrix reduction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionError {
    #[error("integer overflow while eliminating a matrix entry")]
    Overflow,
}

/// An elementary integer column operation, recorded so that a reduction of
/// one boundary operator can be replayed on the next one.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ColumnOp {
    /// Exchange two columns.
    Swap(usize, usize),
    /// Negate a column.
    Negate(usize),
    /// `column[target] -= factor * column[source]`.
    SubtractScaled {
        target: usize,
        source: usize,
        factor: i64,
    },
}

/// A dense, row-major rectangular matrix over the integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerMatrix {
    n_rows: usize,
    n_cols: usize,
    entries: Vec<i64>,
}

impl IntegerMatrix {
    /// The zero matrix of the given shape.
    pub fn new(n_rows: usize, n_cols: usize) -> IntegerMatrix {
        IntegerMatrix {
            n_rows,
            n_cols,
            entries: vec![0; n_rows * n_cols],
        }
    }

    /// Build a matrix from its rows.
    /// Panics if the rows have unequal lengths.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> IntegerMatrix {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut entries = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            assert_eq!(row.len(), n_cols, "All matrix rows must have the same length.");
            entries.extend(row);
        }
        IntegerMatrix {
            n_rows,
            n_cols,
            entries,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.entries[row * self.n_cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        assert!(row < self.n_rows && col < self.n_cols, "Matrix entry out of range.");
        self.entries[row * self.n_cols + col] = value;
    }

    fn column_is_zero(&self, col: usize) -> bool {
        (0..self.n_rows).all(|r| self.get(r, col) == 0)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.n_cols {
            self.entries.swap(a * self.n_cols + col, b * self.n_cols + col);
        }
    }

    fn swap_cols(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for row in 0..self.n_rows {
            self.entries.swap(row * self.n_cols + a, row * self.n_cols + b);
        }
    }

    fn negate_row(&mut self, row: usize) -> Result<(), ReductionError> {
        for col in 0..self.n_cols {
            let v = self.get(row, col).checked_neg().ok_or(ReductionError::Overflow)?;
            self.set(row, col, v);
        }
        Ok(())
    }

    fn negate_col(&mut self, col: usize) -> Result<(), ReductionError> {
        for row in 0..self.n_rows {
            let v = self.get(row, col).checked_neg().ok_or(ReductionError::Overflow)?;
            self.set(row, col, v);
        }
        Ok(())
    }

    /// `row[target] += factor * row[source]`.
    fn row_add_scaled(&mut self, target: usize, source: usize, factor: i64) -> Result<(), ReductionError> {
        for col in 0..self.n_cols {
            let delta = factor
                .checked_mul(self.get(source, col))
                .ok_or(ReductionError::Overflow)?;
            let v = self
                .get(target, col)
                .checked_add(delta)
                .ok_or(ReductionError::Overflow)?;
            self.set(target, col, v);
        }
        Ok(())
    }

    /// `column[target] += factor * column[source]`.
    fn col_add_scaled(&mut self, target: usize, source: usize, factor: i64) -> Result<(), ReductionError> {
        for row in 0..self.n_rows {
            let delta = factor
                .checked_mul(self.get(row, source))
                .ok_or(ReductionError::Overflow)?;
            let v = self
                .get(row, target)
                .checked_add(delta)
                .ok_or(ReductionError::Overflow)?;
            self.set(row, target, v);
        }
        Ok(())
    }

    /// The rank: the number of nonzero pivots of the column echelon form.
    pub fn rank(&self) -> Result<usize, ReductionError> {
        let (echelon, _) = self.column_echelon()?;
        Ok((0..echelon.n_cols).filter(|&c| !echelon.column_is_zero(c)).count())
    }

    /// Reduce to column echelon form by elementary integer column
    /// operations, and return the form together with the operations in the
    /// order they were applied.
    ///
    /// Pivots end up positive, and the zero columns come last.
    pub fn column_echelon(&self) -> Result<(IntegerMatrix, Vec<ColumnOp>), ReductionError> {
        let mut m = self.clone();
        let mut ops = Vec::new();
        let mut pivot_col = 0;
        for row in 0..m.n_rows {
            if pivot_col == m.n_cols {
                break;
            }
            loop {
                // Euclidean reduction along the row: the column with the
                // entry of least magnitude becomes the pivot, the others
                // are reduced modulo it.
                let best = (pivot_col..m.n_cols)
                    .filter(|&c| m.get(row, c) != 0)
                    .min_by_key(|&c| m.get(row, c).unsigned_abs());
                let Some(best) = best else {
                    break;
                };
                if best != pivot_col {
                    m.swap_cols(best, pivot_col);
                    ops.push(ColumnOp::Swap(best, pivot_col));
                }
                let pivot = m.get(row, pivot_col);
                let mut cleared = true;
                for col in (pivot_col + 1)..m.n_cols {
                    let v = m.get(row, col);
                    if v == 0 {
                        continue;
                    }
                    let factor = v / pivot;
                    if factor != 0 {
                        m.col_add_scaled(col, pivot_col, factor.checked_neg().ok_or(ReductionError::Overflow)?)?;
                        ops.push(ColumnOp::SubtractScaled {
                            target: col,
                            source: pivot_col,
                            factor,
                        });
                    }
                    if m.get(row, col) != 0 {
                        cleared = false;
                    }
                }
                if cleared {
                    if m.get(row, pivot_col) < 0 {
                        m.negate_col(pivot_col)?;
                        ops.push(ColumnOp::Negate(pivot_col));
                    }
                    pivot_col += 1;
                    break;
                }
            }
        }
        Ok((m, ops))
    }

    /// Diagonalize to Smith normal form and return the diagonal: a
    /// non-negative vector `d` of length `min(n_rows, n_cols)` with
    /// `d[0] | d[1] | ...`, the nonzero entries first.
    pub fn smith_normal_form(&self) -> Result<Vec<i64>, ReductionError> {
        let mut m = self.clone();
        let n = std::cmp::min(m.n_rows, m.n_cols);
        let mut t = 0;
        while t < n {
            let Some((pi, pj)) = m.min_abs_entry(t) else {
                break;
            };
            m.swap_rows(t, pi);
            m.swap_cols(t, pj);
            loop {
                m.clear_cross(t)?;
                // The pivot must divide the rest of the submatrix for the
                // diagonal to form a divisibility chain; a non-divisible
                // entry is pulled into the pivot row and the clearing
                // repeats with a strictly smaller pivot.
                let pivot = m.get(t, t);
                let offender = ((t + 1)..m.n_rows)
                    .flat_map(|i| ((t + 1)..m.n_cols).map(move |j| (i, j)))
                    .find(|&(i, j)| m.get(i, j) % pivot != 0);
                match offender {
                    Some((i, _)) => m.row_add_scaled(t, i, 1)?,
                    None => break,
                }
            }
            t += 1;
        }
        let mut diagonal = Vec::with_capacity(n);
        for i in 0..n {
            diagonal.push(m.get(i, i).checked_abs().ok_or(ReductionError::Overflow)?);
        }
        Ok(diagonal)
    }

    /// The position of a nonzero entry of least magnitude in the submatrix
    /// starting at `(t, t)`, if the submatrix is nonzero.
    fn min_abs_entry(&self, t: usize) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for i in t..self.n_rows {
            for j in t..self.n_cols {
                let v = self.get(i, j);
                if v != 0
                    && best.map_or(true, |(bi, bj)| {
                        v.unsigned_abs() < self.get(bi, bj).unsigned_abs()
                    })
                {
                    best = Some((i, j));
                }
            }
        }
        best
    }

    /// Clear row `t` and column `t` outside the pivot by repeated division
    /// with remainder, promoting remainders into the pivot position until
    /// everything divides out.
    fn clear_cross(&mut self, t: usize) -> Result<(), ReductionError> {
        'restart: loop {
            for i in (t + 1)..self.n_rows {
                let v = self.get(i, t);
                if v == 0 {
                    continue;
                }
                let q = v / self.get(t, t);
                self.row_add_scaled(i, t, q.checked_neg().ok_or(ReductionError::Overflow)?)?;
                if self.get(i, t) != 0 {
                    self.swap_rows(i, t);
                    continue 'restart;
                }
            }
            for j in (t + 1)..self.n_cols {
                let v = self.get(t, j);
                if v == 0 {
                    continue;
                }
                let q = v / self.get(t, t);
                self.col_add_scaled(j, t, q.checked_neg().ok_or(ReductionError::Overflow)?)?;
                if self.get(t, j) != 0 {
                    self.swap_cols(j, t);
                    continue 'restart;
                }
            }
            return Ok(());
        }
    }
}

/// Express the image of `b` in a basis of the kernel of `a`.
///
/// `a` and `b` are consecutive boundary operators, so the columns of `a`
/// and the rows of `b` are indexed by the same simplices and `a * b = 0`.
/// The column operations that bring `a` to echelon form are replayed on
/// `b` as the inverse row operations; the rows corresponding to the zero
/// columns of the echelon form then express the image of `b` in kernel
/// coordinates, and the remaining rows are zero.
///
/// Panics if the inner dimensions disagree.
pub fn image_in_kernel(a: &IntegerMatrix, b: &IntegerMatrix) -> Result<IntegerMatrix, ReductionError> {
    assert_eq!(
        a.n_cols, b.n_rows,
        "Chained boundary operators must have compatible shapes."
    );
    let (echelon, ops) = a.column_echelon()?;
    let mut transformed = b.clone();
    for op in &ops {
        match *op {
            ColumnOp::Swap(i, j) => transformed.swap_rows(i, j),
            ColumnOp::Negate(c) => transformed.negate_row(c)?,
            ColumnOp::SubtractScaled {
                target,
                source,
                factor,
            } => {
                // (column[target] -= f * column[source]) on `a` inverts to
                // (row[source] += f * row[target]) on `b`.
                transformed.row_add_scaled(source, target, factor)?;
            }
        }
    }
    let kernel_columns: Vec<usize> = (0..echelon.n_cols)
        .filter(|&c| echelon.column_is_zero(c))
        .collect();
    let mut result = IntegerMatrix::new(kernel_columns.len(), b.n_cols);
    for (new_row, &c) in kernel_columns.iter().enumerate() {
        for col in 0..b.n_cols {
            result.set(new_row, col, transformed.get(c, col));
        }
    }
    Ok(result)
}

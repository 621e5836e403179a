//! Persistence barcodes of a filtration, over the two-element field.
//!
//! The engine runs the incremental column reduction dimension by
//! dimension. Each boundary chain is a bit-packed set of positions in the
//! previous layer; reducing a chain XORs away stored chains until its
//! pivot (its youngest member) lands in a free slot or the chain dies.
//! A simplex whose chain dies is *marked*: it creates a cycle, and either
//! gets paired by a later simplex one dimension up (a finite bar) or
//! persists forever (an infinite bar).
//!
//! The within-dimension order is load-bearing: each reduction depends on
//! the slots filled by the simplices before it, so this loop is sequential
//! by design even though whole-filtration inputs may be prepared in
//! parallel elsewhere.
use log::debug;
use std::cmp::Ordering;
use std::fmt::Formatter;

use crate::filtration::{check_descending, Filtration, ScaleOrderError};
use crate::matrix::BitChain;
use crate::Value;

/// A value extended with a point at infinity, strictly greater than every
/// finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extended<T> {
    Finite(T),
    Infinity,
}

impl<T: Ord> Ord for Extended<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Extended::Finite(a), Extended::Finite(b)) => a.cmp(b),
            (Extended::Finite(_), Extended::Infinity) => Ordering::Less,
            (Extended::Infinity, Extended::Finite(_)) => Ordering::Greater,
            (Extended::Infinity, Extended::Infinity) => Ordering::Equal,
        }
    }
}

impl<T: Ord> PartialOrd for Extended<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Extended<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Extended::Finite(v) => write!(f, "{}", v),
            Extended::Infinity => write!(f, "inf"),
        }
    }
}

/// A feature born at the first component and dead at the second.
pub type Bar<T> = (T, Extended<T>);

/// The persistence barcodes of the filtration, one vector per dimension
/// `0..=filtration.dimension()`, in entry indices.
///
/// Bars whose birth equals their death are dropped. The filtration must
/// satisfy the ordering invariants of [crate::filtration]; violations
/// abort.
pub fn index_barcodes(filtration: &Filtration) -> Vec<Vec<Bar<usize>>> {
    filtration.validate();
    if filtration.n_vertices() == 0 {
        return Vec::new();
    }

    let n_dims = filtration.dimension() + 1;
    let mut barcodes: Vec<Vec<Bar<usize>>> = vec![Vec::new(); n_dims];

    // Dimension 0: there are no boundaries, so every vertex is marked.
    let mut marked_below: Vec<bool> = vec![true; filtration.n_vertices()];
    let mut indices_below: Vec<usize> = filtration.vertex_indices().to_vec();

    for (k, layer) in filtration.layers().iter().enumerate() {
        let dim = k + 1;
        let mut slots: Vec<Option<BitChain>> = vec![None; indices_below.len()];
        let mut marked: Vec<bool> = vec![false; layer.len()];

        for (pos, simplex) in layer.iter().enumerate() {
            // The boundary chain, restricted to the marked faces: the
            // unmarked ones reduce away by construction.
            let face_positions: &[usize] = if k == 0 {
                simplex.vertices()
            } else {
                simplex.faces()
            };
            let mut chain = BitChain::from_positions(
                face_positions.iter().copied().filter(|&p| marked_below[p]),
            );
            while let Some(p) = chain.pivot() {
                match &slots[p] {
                    Some(stored) => chain.xor_with(stored),
                    None => break,
                }
            }

            match chain.pivot() {
                None => marked[pos] = true,
                Some(p) => {
                    let birth = indices_below[p];
                    let death = simplex.index();
                    slots[p] = Some(chain);
                    if birth != death {
                        barcodes[dim - 1].push((birth, Extended::Finite(death)));
                    }
                }
            }
        }

        // Marked faces whose slot stayed empty are never filled in.
        for (p, &is_marked) in marked_below.iter().enumerate() {
            if is_marked && slots[p].is_none() {
                barcodes[dim - 1].push((indices_below[p], Extended::Infinity));
            }
        }
        debug!(
            "dimension {}: {} bars after processing {} simplices",
            dim - 1,
            barcodes[dim - 1].len(),
            layer.len()
        );

        marked_below = marked;
        indices_below = layer.iter().map(|s| s.index()).collect();
    }

    // The top layer has no layer above to pair against: every marked
    // simplex persists forever.
    for (p, &is_marked) in marked_below.iter().enumerate() {
        if is_marked {
            barcodes[n_dims - 1].push((indices_below[p], Extended::Infinity));
        }
    }

    barcodes
}

/// The persistence barcodes in scale values: entry index `i` maps to the
/// scale at position `m - 1 - i` of the descending scale list the
/// filtration was built over.
pub fn scale_barcodes<T: Value>(
    scales: &[T],
    filtration: &Filtration,
) -> Result<Vec<Vec<Bar<T>>>, ScaleOrderError> {
    check_descending(scales)?;
    let m = scales.len();
    let to_scale = |index: usize| -> T {
        assert!(index < m, "A filtration entry index has no scale in the given list.");
        scales[m - 1 - index]
    };
    Ok(index_barcodes(filtration)
        .into_iter()
        .map(|bars| {
            bars.into_iter()
                .map(|(birth, death)| {
                    let death = match death {
                        Extended::Finite(d) => Extended::Finite(to_scale(d)),
                        Extended::Infinity => Extended::Infinity,
                    };
                    (to_scale(birth), death)
                })
                .collect()
        })
        .collect())
}

//! Homology of a simplicial complex.
//!
//! Two code paths with very different costs:
//! - [integer_homology] computes the full groups, torsion included, by
//!   Smith normal form of the boundary operators expressed in kernel
//!   coordinates;
//! - [betti_numbers] computes only the ranks over the two-element field,
//!   which is dramatically cheaper on large complexes.
//!
//! Dimensions are independent of each other, so both functions accept a
//! `parallel` knob that fans them out on the rayon thread pool. The
//! outputs do not depend on the knob.
use log::debug;
use rayon::prelude::*;

use crate::boundary::{integer_boundaries, z2_boundaries};
use crate::matrix::integer::image_in_kernel;
use crate::matrix::{IntegerMatrix, ReductionError};
use crate::simplicial_complex::SimplicialComplex;
use crate::Dimension;

/// The homology groups of the complex over the integers, one list of
/// cyclic orders per dimension `0..=sc.dimension()`.
///
/// In each list, an entry `k > 1` is a cyclic summand of order k and an
/// entry `0` is a free summand; trivial factors are not reported. So a
/// circle yields `[[0], [0]]` and a projective plane `[[0], [2], []]`.
///
/// Fails when an elimination step overflows the fixed-width entries.
pub fn integer_homology(
    sc: &SimplicialComplex,
    parallel: bool,
) -> Result<Vec<Vec<i64>>, ReductionError> {
    let boundaries = integer_boundaries(sc);
    let dims: Vec<Dimension> = (0..=sc.dimension()).collect();

    let group_at = |&k: &Dimension| -> Result<Vec<i64>, ReductionError> {
        let group = if k == 0 {
            match boundaries.first() {
                Some(d1) => cyclic_orders(d1)?,
                // No edges: every vertex is a free generator.
                None => vec![0; sc.n_vertices()],
            }
        } else if k < sc.dimension() {
            let reduced = image_in_kernel(&boundaries[k - 1], &boundaries[k])?;
            cyclic_orders(&reduced)?
        } else {
            let free = sc.n_simplices(k) - boundaries[k - 1].rank()?;
            vec![0; free]
        };
        debug!("H_{} has invariant factors {:?}", k, group);
        Ok(group)
    };

    if parallel {
        dims.par_iter().map(group_at).collect()
    } else {
        dims.iter().map(group_at).collect()
    }
}

/// The cyclic orders of the cokernel presented by `reduced`, whose rows
/// are the available generators: the nontrivial invariant factors of its
/// Smith normal form, followed by one zero per unbounded generator.
fn cyclic_orders(reduced: &IntegerMatrix) -> Result<Vec<i64>, ReductionError> {
    let diagonal = reduced.smith_normal_form()?;
    let rank = diagonal.iter().filter(|&&d| d != 0).count();
    let mut orders: Vec<i64> = diagonal.into_iter().filter(|&d| d > 1).collect();
    orders.extend(std::iter::repeat(0).take(reduced.n_rows() - rank));
    Ok(orders)
}

/// The Betti numbers of the complex over the two-element field, one per
/// dimension `0..=sc.dimension()`: the k-th is
/// `n_k - rank(d_k) - rank(d_{k+1})`.
pub fn betti_numbers(sc: &SimplicialComplex, parallel: bool) -> Vec<usize> {
    let boundaries = z2_boundaries(sc);

    let ranks: Vec<usize> = if parallel {
        boundaries.par_iter().map(|d| d.rank()).collect()
    } else {
        boundaries.iter().map(|d| d.rank()).collect()
    };

    let rank_of = |k: usize| -> usize {
        // ranks[k - 1] is the rank of d_k; out-of-range operators are zero.
        if k == 0 || k > ranks.len() {
            0
        } else {
            ranks[k - 1]
        }
    };

    (0..=sc.dimension())
        .map(|k| sc.n_simplices(k) - rank_of(k) - rank_of(k + 1))
        .collect()
}

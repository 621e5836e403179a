//! Topological data analysis on point clouds and metric data: Vietoris-Rips
//! complexes, simplicial homology over the integers, and persistent homology
//! over the two-element field.
//!
//! The pipeline has three entry points:
//! - [simplicial_complex::vietoris_rips] builds the clique complex of the
//!   graph whose edges are the point pairs closer than a scale;
//! - [homology::integer_homology] and [homology::betti_numbers] compute the
//!   homology of such a complex, via Smith normal form of the integer
//!   boundary operators or via ranks over the two-element field;
//! - [filtration::vietoris_rips_filtration] builds a filtered complex over a
//!   descending list of scales, whose barcodes are computed by
//!   [persistence::index_barcodes] and [persistence::scale_barcodes].

#![warn(clippy::shadow_unrelated)]
#![warn(clippy::needless_pass_by_value)]
#![allow(clippy::needless_range_loop)]

use num::{Bounded, Zero};
use std::hash::Hash;

pub mod boundary;
pub mod clique;
pub mod distance_matrix;
pub mod edges;
pub mod filtration;
pub mod homology;
pub mod matrix;
pub mod metric;
pub mod persistence;
pub mod points;
pub mod simplicial_complex;

pub use filtration::{vietoris_rips_filtration, Filtration};
pub use homology::{betti_numbers, integer_homology};
pub use persistence::{index_barcodes, scale_barcodes, Extended};
pub use simplicial_complex::{vietoris_rips, SimplicialComplex};

/// A vertex of a complex, identified by its position in the point set.
pub type Vertex = usize;

/// The dimension of a simplex: one less than its number of vertices.
pub type Dimension = usize;

/// A generic value, like usize or an ordered float, that we can use as a
/// distance between points or as a filtration scale.
pub trait Value:
    Zero
    + Ord
    + Bounded
    + Copy
    + Clone
    + Hash
    + std::fmt::Debug
    + std::fmt::Display
    + std::marker::Send
    + std::marker::Sync
{
}

impl<T> Value for T where
    T: Zero
        + Ord
        + Bounded
        + Copy
        + Clone
        + Hash
        + std::fmt::Debug
        + std::fmt::Display
        + std::marker::Send
        + std::marker::Sync
{
}

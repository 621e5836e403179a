//! Distance matrices: the cached backend for metric queries.
//!
//! A [DistanceMatrix] stores all pairwise distances up front, trading
//! `O(n^2)` memory for constant-time lookups. It is the "fast" counterpart
//! of [crate::metric::EuclideanMetric], which recomputes distances on
//! demand; both implement [crate::metric::MetricSpace] and produce
//! identical complexes and filtrations.
use num::Zero;

/// Stores a distance matrix of a number of vertices.
pub struct DistanceMatrix<T> {
    // We store a lower triangular distance matrix.
    distances: Vec<Vec<T>>,
}

impl<T: Zero + Clone> DistanceMatrix<T> {
    /// Create a new distance matrix on the given number of points.
    pub fn new(n: usize) -> DistanceMatrix<T> {
        let mut distances = Vec::with_capacity(n);
        for v in 0..n {
            distances.push(vec![T::zero(); v + 1]);
        }
        DistanceMatrix { distances }
    }

    /// Set the distance between two points.
    /// Panics when u == v and the given distance is not zero.
    pub fn set(&mut self, u: usize, v: usize, d: T) {
        if u == v {
            if !d.is_zero() {
                panic!("The distance between the same vertex cannot be different from zero.");
            }
        } else {
            let (new_u, new_v) = max_min(u, v);
            self.distances[new_u][new_v] = d;
        }
    }
}

impl<T> DistanceMatrix<T> {
    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Returns whether the distance matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Returns the distance between two points.
    pub fn get(&self, u: usize, v: usize) -> &T {
        let (new_u, new_v) = max_min(u, v);
        &self.distances[new_u][new_v]
    }
}

fn max_min(u: usize, v: usize) -> (usize, usize) {
    (std::cmp::max(u, v), std::cmp::min(u, v))
}

#[cfg(test)]
mod tests {
    use crate::distance_matrix::DistanceMatrix;
    use ordered_float::OrderedFloat;

    #[test]
    fn get_is_symmetric() {
        let mut m: DistanceMatrix<OrderedFloat<f64>> = DistanceMatrix::new(3);
        m.set(0, 1, 4.0.into());
        m.set(2, 1, 5.0.into());
        assert_eq!(*m.get(0, 1), OrderedFloat(4.0));
        assert_eq!(*m.get(1, 0), OrderedFloat(4.0));
        assert_eq!(*m.get(1, 2), OrderedFloat(5.0));
        assert_eq!(*m.get(0, 2), OrderedFloat(0.0));
    }

    #[test]
    #[should_panic]
    fn nonzero_diagonal_is_rejected() {
        let mut m: DistanceMatrix<OrderedFloat<f64>> = DistanceMatrix::new(2);
        m.set(1, 1, 1.0.into());
    }
}

//! The metric seam between point data and the complex builders.
//!
//! [MetricSpace] is the only interface through which the Vietoris-Rips
//! builders look at distances. Two implementations ship with the crate:
//! [crate::distance_matrix::DistanceMatrix] answers queries from a
//! precomputed table, and [EuclideanMetric] re-evaluates the metric on
//! every query. The choice trades CPU for `O(n^2)` memory and does not
//! affect any output. Custom metrics on opaque data implement the trait
//! directly.
use num::Float;

use crate::distance_matrix::DistanceMatrix;
use crate::points::PointCloud;
use crate::{Value, Vertex};

/// A finite set of points together with a totally ordered distance.
///
/// Distances are required to be `Ord` (see [Value]); for floating point
/// distances use `OrderedFloat`.
pub trait MetricSpace {
    type Distance: Value;

    /// The number of points.
    fn n_points(&self) -> usize;

    /// The distance between the points at positions `u` and `v`.
    /// Must be symmetric, and zero when `u == v`.
    fn distance(&self, u: Vertex, v: Vertex) -> Self::Distance;
}

impl<T: Value> MetricSpace for DistanceMatrix<T> {
    type Distance = T;

    fn n_points(&self) -> usize {
        self.len()
    }

    fn distance(&self, u: Vertex, v: Vertex) -> T {
        if u == v {
            T::zero()
        } else {
            *self.get(u, v)
        }
    }
}

/// A metric over a borrowed point cloud that recomputes the Euclidean
/// distance on every query.
pub struct EuclideanMetric<'a, T: Float, const N: usize> {
    cloud: &'a PointCloud<T, N>,
}

impl<'a, T: Float, const N: usize> EuclideanMetric<'a, T, N> {
    pub fn new(cloud: &'a PointCloud<T, N>) -> Self {
        Self { cloud }
    }
}

impl<T: Float + Value, const N: usize> MetricSpace for EuclideanMetric<'_, T, N> {
    type Distance = T;

    fn n_points(&self) -> usize {
        self.cloud.len()
    }

    fn distance(&self, u: Vertex, v: Vertex) -> T {
        self.cloud.0[u].euclidean_distance(&self.cloud.0[v])
    }
}

#[cfg(test)]
mod tests {
    use super::{EuclideanMetric, MetricSpace};
    use crate::points::PointCloud;
    use ordered_float::OrderedFloat;

    fn cloud() -> PointCloud<OrderedFloat<f64>, 2> {
        let mut cloud = PointCloud::new();
        cloud.push_point([0., 0.].into());
        cloud.push_point([3., 4.].into());
        cloud.push_point([3., 0.].into());
        cloud
    }

    #[test]
    fn cached_and_lazy_metrics_agree() {
        let cloud = cloud();
        let cached = cloud.distance_matrix();
        let lazy = EuclideanMetric::new(&cloud);
        assert_eq!(cached.n_points(), lazy.n_points());
        for u in 0..cloud.len() {
            for v in 0..cloud.len() {
                assert_eq!(cached.distance(u, v), lazy.distance(u, v));
            }
        }
    }
}

//! Filtered simplicial complexes over a descending list of scales.
//!
//! A [Filtration] is a complex whose simplices carry the index at which
//! they enter: index 0 is the complex at the smallest scale, and raising
//! the index through `1..m` adds the simplices that need the successively
//! larger scales, up to the complex built at the largest scale. Index `i`
//! corresponds to the scale at position `m - 1 - i` of the descending
//! scale list.
//!
//! After construction every layer is sorted by entry index and the face
//! indices are rewritten to the sorted positions; this ordering is the
//! input contract of [crate::persistence].
use itertools::Itertools;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::edges::{BareEdge, EdgeList, WeightedEdge};
use crate::metric::MetricSpace;
use crate::simplicial_complex::{vietoris_rips, SimplicialComplex};
use crate::{Dimension, Value, Vertex};

/// Error for a scale list that is not strictly descending.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleOrderError {
    #[error("scales must be strictly descending, but the scale at position {position} is not smaller than its predecessor")]
    NotDescending { position: usize },
}

/// Reject scale lists that are not strictly descending.
pub(crate) fn check_descending<T: Value>(scales: &[T]) -> Result<(), ScaleOrderError> {
    for (i, pair) in scales.windows(2).enumerate() {
        if pair[0] <= pair[1] {
            return Err(ScaleOrderError::NotDescending { position: i + 1 });
        }
    }
    Ok(())
}

/// A simplex of a filtration: a simplex together with the index at which
/// it enters. Index 0 means present from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredSimplex {
    pub(crate) index: usize,
    pub(crate) verts: Vec<Vertex>,
    pub(crate) faces: Vec<usize>,
}

impl FilteredSimplex {
    pub fn new(index: usize, verts: Vec<Vertex>, faces: Vec<usize>) -> FilteredSimplex {
        FilteredSimplex { index, verts, faces }
    }

    /// The index at which this simplex enters the filtration.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The vertices, in ascending order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.verts
    }

    /// Positions of the codimension-1 faces in the previous layer,
    /// ascending. Empty for edges.
    pub fn faces(&self) -> &[usize] {
        &self.faces
    }
}

/// A filtered simplicial complex.
///
/// `layers[k]` holds the filtered simplices of dimension `k + 1`, sorted
/// by entry index. Vertices are not materialized as simplices: they carry
/// one entry index each, all zero for a Vietoris-Rips filtration.
#[derive(Debug, Clone)]
pub struct Filtration {
    n_vertices: usize,
    vertex_indices: Vec<usize>,
    layers: Vec<Vec<FilteredSimplex>>,
}

impl Filtration {
    /// The filtration of the empty complex.
    pub fn empty() -> Filtration {
        Filtration {
            n_vertices: 0,
            vertex_indices: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// A filtration in which all vertices are present from the start.
    pub fn new(n_vertices: usize, layers: Vec<Vec<FilteredSimplex>>) -> Filtration {
        Filtration {
            n_vertices,
            vertex_indices: vec![0; n_vertices],
            layers,
        }
    }

    /// A filtration with explicit vertex entry indices, which must be
    /// ascending.
    pub fn with_vertex_indices(
        vertex_indices: Vec<usize>,
        layers: Vec<Vec<FilteredSimplex>>,
    ) -> Filtration {
        Filtration {
            n_vertices: vertex_indices.len(),
            vertex_indices,
            layers,
        }
    }

    pub fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    /// The entry index of each vertex.
    pub fn vertex_indices(&self) -> &[usize] {
        &self.vertex_indices
    }

    /// The filtered simplex layers; `layers()[k]` holds the
    /// (k+1)-dimensional simplices.
    pub fn layers(&self) -> &[Vec<FilteredSimplex>] {
        &self.layers
    }

    /// The dimension of the largest simplex, 0 when there are no edges.
    pub fn dimension(&self) -> Dimension {
        self.layers.len()
    }

    /// Check the ordering invariants the persistence engine relies on.
    /// Panics with the violated invariant.
    pub fn validate(&self) {
        assert_eq!(
            self.vertex_indices.len(),
            self.n_vertices,
            "A filtration carries one entry index per vertex."
        );
        assert!(
            self.vertex_indices.windows(2).all(|w| w[0] <= w[1]),
            "Vertex entry indices must be ascending."
        );
        for (k, layer) in self.layers.iter().enumerate() {
            let mut previous_index = 0;
            for simplex in layer.iter() {
                assert!(
                    simplex.index >= previous_index,
                    "A filtration layer must be sorted by entry index."
                );
                previous_index = simplex.index;
                assert_eq!(
                    simplex.verts.len(),
                    k + 2,
                    "A simplex of layer {} must have {} vertices.",
                    k,
                    k + 2
                );
                assert!(
                    simplex.verts.windows(2).all(|w| w[0] < w[1]),
                    "Simplex vertices must be ascending and distinct."
                );
                assert!(
                    *simplex.verts.last().unwrap() < self.n_vertices,
                    "A simplex mentions a vertex outside the filtration."
                );
                if k == 0 {
                    assert!(simplex.faces.is_empty(), "Edges carry no face indices.");
                    for &v in &simplex.verts {
                        assert!(
                            self.vertex_indices[v] <= simplex.index,
                            "A simplex cannot enter before its faces."
                        );
                    }
                    continue;
                }
                assert_eq!(
                    simplex.faces.len(),
                    simplex.verts.len(),
                    "A simplex must point at all of its codimension-1 faces."
                );
                assert!(
                    simplex.faces.windows(2).all(|w| w[0] < w[1]),
                    "Face indices must be ascending."
                );
                for &f in &simplex.faces {
                    assert!(f < self.layers[k - 1].len(), "Face index out of range.");
                    assert!(
                        self.layers[k - 1][f].index <= simplex.index,
                        "A simplex cannot enter before its faces."
                    );
                }
            }
        }
    }
}

/// Build the Vietoris-Rips filtration of the metric over a strictly
/// descending list of scales.
///
/// The complex is the one at the largest scale; each simplex enters at the
/// smallest index whose scale is larger than its longest edge. An empty
/// scale list yields the empty filtration.
pub fn vietoris_rips_filtration<M: MetricSpace>(
    scales: &[M::Distance],
    metric: &M,
) -> Result<Filtration, ScaleOrderError> {
    check_descending(scales)?;
    let Some(&largest) = scales.first() else {
        return Ok(Filtration::empty());
    };
    let complex = vietoris_rips(largest, metric);

    let mut edges = EdgeList::new(complex.n_vertices());
    if let Some(edge_layer) = complex.layers().first() {
        for edge in edge_layer {
            let (u, v) = (edge.vertices()[0], edge.vertices()[1]);
            edges.add_edge(WeightedEdge {
                weight: metric.distance(u, v),
                edge: BareEdge(u, v),
            });
        }
    }

    filtration_from_complex(scales, complex, &edges)
}

/// Build a filtration from a complex already built at the largest scale,
/// together with the weighted graph of its edges.
///
/// Every pair of vertices of a simplex of the complex must be an edge of
/// the graph, as is the case for a clique complex.
pub fn filtration_from_complex<T: Value>(
    scales: &[T],
    complex: SimplicialComplex,
    edges: &EdgeList<T>,
) -> Result<Filtration, ScaleOrderError> {
    check_descending(scales)?;
    if scales.is_empty() {
        return Ok(Filtration::empty());
    }

    let m = scales.len();
    let weights: FxHashMap<BareEdge, T> = edges
        .edge_iter()
        .map(|e| (e.edge, e.weight))
        .collect();
    let n_vertices = complex.n_vertices();

    // A simplex enters at the smallest index whose scale admits its
    // longest edge: with descending scales, the first position t >= 1
    // whose scale the edge reaches puts the entry index at m - t.
    let mut layers: Vec<Vec<FilteredSimplex>> = complex
        .into_layers()
        .into_iter()
        .map(|layer| {
            layer
                .into_iter()
                .map(|simplex| {
                    let longest = simplex
                        .vertices()
                        .iter()
                        .copied()
                        .tuple_combinations()
                        .map(|(u, v)| {
                            *weights.get(&BareEdge(u, v)).expect(
                                "Every vertex pair of a simplex must be an edge of the weighted graph.",
                            )
                        })
                        .max()
                        .expect("Layers hold simplices of dimension at least one.");
                    let t = scales[1..].partition_point(|s| *s > longest) + 1;
                    let index = if t == m { 0 } else { m - t };
                    FilteredSimplex {
                        index,
                        verts: simplex.verts,
                        faces: simplex.faces,
                    }
                })
                .collect()
        })
        .collect();

    sort_and_renumber(&mut layers);

    Ok(Filtration::new(n_vertices, layers))
}

/// Sort each layer by entry index and rewrite the face indices of the
/// layer above to the sorted positions, normalizing each face list to
/// ascending order.
fn sort_and_renumber(layers: &mut [Vec<FilteredSimplex>]) {
    for k in 0..layers.len() {
        let layer = std::mem::take(&mut layers[k]);
        let mut indexed: Vec<(usize, FilteredSimplex)> = layer.into_iter().enumerate().collect();
        // Stable on the original position, so ties keep construction order.
        indexed.sort_by_key(|&(original, ref simplex)| (simplex.index, original));

        let mut new_position = vec![0; indexed.len()];
        layers[k] = indexed
            .into_iter()
            .enumerate()
            .map(|(new, (original, simplex))| {
                new_position[original] = new;
                simplex
            })
            .collect();

        if k + 1 < layers.len() {
            for simplex in layers[k + 1].iter_mut() {
                for f in simplex.faces.iter_mut() {
                    *f = new_position[*f];
                }
                simplex.faces.sort_unstable();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{check_descending, vietoris_rips_filtration, ScaleOrderError};
    use crate::distance_matrix::DistanceMatrix;
    use ordered_float::OrderedFloat;

    fn skewed_triangle() -> DistanceMatrix<OrderedFloat<f64>> {
        let mut m = DistanceMatrix::new(3);
        m.set(0, 1, 1.0.into());
        m.set(1, 2, 1.0.into());
        m.set(0, 2, 2.0.into());
        m
    }

    #[test]
    fn ascending_scales_are_rejected() {
        let scales: Vec<OrderedFloat<f64>> = vec![1.0.into(), 2.0.into()];
        assert_eq!(
            check_descending(&scales),
            Err(ScaleOrderError::NotDescending { position: 1 })
        );
        let metric = skewed_triangle();
        assert!(vietoris_rips_filtration(&scales, &metric).is_err());
    }

    #[test]
    fn equal_scales_are_rejected() {
        let scales: Vec<OrderedFloat<f64>> = vec![2.0.into(), 2.0.into()];
        assert!(check_descending(&scales).is_err());
    }

    #[test]
    fn empty_scales_yield_the_empty_filtration() {
        let metric = skewed_triangle();
        let scales: Vec<OrderedFloat<f64>> = Vec::new();
        let filtration = vietoris_rips_filtration(&scales, &metric).unwrap();
        assert_eq!(filtration.n_vertices(), 0);
        assert!(filtration.layers().is_empty());
    }

    #[test]
    fn long_edges_enter_later() {
        let metric = skewed_triangle();
        let scales: Vec<OrderedFloat<f64>> = vec![3.0.into(), 1.5.into()];
        let filtration = vietoris_rips_filtration(&scales, &metric).unwrap();
        filtration.validate();

        let edge_layer = &filtration.layers()[0];
        assert_eq!(edge_layer.len(), 3);
        // The two unit edges are present from the start; the long edge and
        // the triangle only appear at the largest scale.
        assert_eq!(edge_layer[0].index(), 0);
        assert_eq!(edge_layer[1].index(), 0);
        assert_eq!(edge_layer[2].index(), 1);
        assert_eq!(edge_layer[2].vertices(), &[0, 2]);
        assert_eq!(filtration.layers()[1][0].index(), 1);
    }

    #[test]
    fn single_scale_filtration_is_constant() {
        let metric = skewed_triangle();
        let scales: Vec<OrderedFloat<f64>> = vec![3.0.into()];
        let filtration = vietoris_rips_filtration(&scales, &metric).unwrap();
        filtration.validate();
        for layer in filtration.layers() {
            assert!(layer.iter().all(|s| s.index() == 0));
        }
    }

    #[test]
    fn faces_resolve_to_the_same_vertex_sets_after_renumbering() {
        let metric = skewed_triangle();
        let scales: Vec<OrderedFloat<f64>> = vec![3.0.into(), 1.5.into()];
        let filtration = vietoris_rips_filtration(&scales, &metric).unwrap();

        let triangle = &filtration.layers()[1][0];
        let mut facet_sets: Vec<Vec<usize>> = triangle
            .faces()
            .iter()
            .map(|&f| filtration.layers()[0][f].vertices().to_vec())
            .collect();
        facet_sets.sort();
        assert_eq!(facet_sets, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    }
}

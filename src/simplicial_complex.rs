//! Simplicial complexes as layered arenas of simplices.
//!
//! A complex stores, per dimension, a vector of [Simplex] values. A simplex
//! holds its vertices in ascending order, and the positions of its
//! codimension-1 faces inside the previous layer. Face references are plain
//! indices into a sibling vector, which keeps the structure renumberable
//! (see [crate::filtration]) and free of reference cycles.
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::clique::maximal_cliques;
use crate::metric::MetricSpace;
use crate::{Dimension, Vertex};

/// A simplex of dimension >= 1, stored inside a [SimplicialComplex] layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplex {
    /// Vertex indices, in ascending order.
    pub(crate) verts: Vec<Vertex>,
    /// For a simplex of dimension k >= 2, the positions of its
    /// (k-1)-dimensional faces in the previous layer. Empty for edges,
    /// whose faces are their two vertices.
    pub(crate) faces: Vec<usize>,
}

impl Simplex {
    /// The vertices, in ascending order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.verts
    }

    /// Positions of the codimension-1 faces in the previous layer.
    pub fn faces(&self) -> &[usize] {
        &self.faces
    }

    /// One less than the number of vertices.
    pub fn dimension(&self) -> Dimension {
        self.verts.len() - 1
    }
}

/// A finite simplicial complex on vertices `0..n_vertices`.
///
/// `layers[k]` holds the simplices of dimension `k + 1`: `layers[0]` are
/// the edges. Vertices are not materialized; they are implied by
/// `n_vertices`. The complex is closed under taking faces, and no layer
/// contains duplicates.
#[derive(Debug, Clone)]
pub struct SimplicialComplex {
    n_vertices: usize,
    layers: Vec<Vec<Simplex>>,
}

impl SimplicialComplex {
    /// The number of vertices.
    pub fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    /// The simplex layers; `layers()[k]` holds the (k+1)-dimensional
    /// simplices.
    pub fn layers(&self) -> &[Vec<Simplex>] {
        &self.layers
    }

    /// The dimension of the largest simplex, 0 when the complex has no
    /// edges.
    pub fn dimension(&self) -> Dimension {
        self.layers.len()
    }

    /// The number of simplices of the given dimension.
    pub fn n_simplices(&self, dim: Dimension) -> usize {
        if dim == 0 {
            self.n_vertices
        } else {
            self.layers.get(dim - 1).map_or(0, Vec::len)
        }
    }

    /// The alternating sum of the simplex counts over all dimensions.
    pub fn euler_characteristic(&self) -> i64 {
        let mut chi = self.n_vertices as i64;
        let mut sign = -1;
        for layer in &self.layers {
            chi += sign * layer.len() as i64;
            sign = -sign;
        }
        chi
    }

    pub(crate) fn into_layers(self) -> Vec<Vec<Simplex>> {
        self.layers
    }

    /// Build the complex generated by the given cells: the cells themselves
    /// plus all their subsets of two or more vertices. Cell vertex lists do
    /// not need to be sorted; duplicate and singleton cells are ignored.
    ///
    /// Panics if a cell mentions a vertex outside `0..n_vertices` or
    /// repeats a vertex.
    pub fn from_maximal_cells<I>(n_vertices: usize, cells: I) -> SimplicialComplex
    where
        I: IntoIterator<Item = Vec<Vertex>>,
    {
        let mut top_cells: Vec<Vec<Vertex>> = Vec::new();
        for mut cell in cells {
            cell.sort_unstable();
            for pair in cell.windows(2) {
                assert_ne!(pair[0], pair[1], "A cell cannot repeat a vertex.");
            }
            if let Some(&last) = cell.last() {
                assert!(last < n_vertices, "A cell mentions a vertex outside the complex.");
            }
            if cell.len() >= 2 {
                top_cells.push(cell);
            }
        }

        let top_size = top_cells.iter().map(Vec::len).max().unwrap_or(0);
        if top_size == 0 {
            return SimplicialComplex {
                n_vertices,
                layers: Vec::new(),
            };
        }

        let n_layers = top_size - 1;
        let mut layers: Vec<Vec<Simplex>> = vec![Vec::new(); n_layers];
        let mut positions: Vec<FxHashMap<Vec<Vertex>, usize>> = vec![FxHashMap::default(); n_layers];

        // Seed every layer with the cells of its size; subsets fill in below.
        for cell in top_cells {
            let layer = cell.len() - 2;
            insert_simplex(&mut layers[layer], &mut positions[layer], cell);
        }

        // Walk the layers top-down: the faces of each simplex are looked up,
        // or appended, one layer below.
        for k in (1..n_layers).rev() {
            let (lower, upper) = layers.split_at_mut(k);
            let target = &mut lower[k - 1];
            let target_positions = &mut positions[k - 1];
            for simplex in upper[0].iter_mut() {
                let n_verts = simplex.verts.len();
                let mut faces = Vec::with_capacity(n_verts);
                for facet in simplex.verts.iter().copied().combinations(n_verts - 1) {
                    faces.push(insert_simplex(target, target_positions, facet));
                }
                simplex.faces = faces;
            }
        }

        SimplicialComplex { n_vertices, layers }
    }

    /// Check the structural invariants: ascending vertex lists, closure
    /// under faces, valid face indices, and per-layer uniqueness.
    /// Panics with the violated invariant.
    pub fn validate(&self) {
        for (k, layer) in self.layers.iter().enumerate() {
            let mut seen: FxHashMap<&[Vertex], usize> = FxHashMap::default();
            for (i, simplex) in layer.iter().enumerate() {
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
                    "A simplex mentions a vertex outside the complex."
                );
                assert!(
                    seen.insert(&simplex.verts, i).is_none(),
                    "A layer contains the same simplex twice."
                );
                if k == 0 {
                    assert!(simplex.faces.is_empty(), "Edges carry no face indices.");
                    continue;
                }
                assert_eq!(
                    simplex.faces.len(),
                    simplex.verts.len(),
                    "A simplex must point at all of its codimension-1 faces."
                );
                for &f in &simplex.faces {
                    assert!(f < self.layers[k - 1].len(), "Face index out of range.");
                    let face = &self.layers[k - 1][f];
                    assert!(
                        is_facet(&face.verts, &simplex.verts),
                        "A face index must name a codimension-1 face of the simplex."
                    );
                }
                let mut distinct = simplex.faces.clone();
                distinct.sort_unstable();
                distinct.dedup();
                assert_eq!(
                    distinct.len(),
                    simplex.faces.len(),
                    "A simplex cannot point at the same face twice."
                );
            }
        }
    }
}

fn insert_simplex(
    layer: &mut Vec<Simplex>,
    positions: &mut FxHashMap<Vec<Vertex>, usize>,
    verts: Vec<Vertex>,
) -> usize {
    if let Some(&idx) = positions.get(&verts) {
        return idx;
    }
    let idx = layer.len();
    positions.insert(verts.clone(), idx);
    layer.push(Simplex {
        verts,
        faces: Vec::new(),
    });
    idx
}

/// Whether `face` is `simplex` with exactly one vertex removed.
/// Both slices must be ascending.
fn is_facet(face: &[Vertex], simplex: &[Vertex]) -> bool {
    if face.len() + 1 != simplex.len() {
        return false;
    }
    let mut skipped = 0;
    let mut i = 0;
    for &v in simplex {
        if i < face.len() && face[i] == v {
            i += 1;
        } else {
            skipped += 1;
        }
    }
    skipped == 1
}

/// Build the Vietoris-Rips complex of the metric at the given scale: the
/// clique complex of the graph with an edge between every pair of points at
/// distance strictly less than `scale`.
///
/// An empty metric yields the empty complex. Isolated points contribute to
/// the vertex count but to no simplex.
pub fn vietoris_rips<M: MetricSpace>(scale: M::Distance, metric: &M) -> SimplicialComplex {
    let n = metric.n_points();
    let cliques = maximal_cliques(n, |u, v| metric.distance(u, v) < scale);
    SimplicialComplex::from_maximal_cells(n, cliques)
}

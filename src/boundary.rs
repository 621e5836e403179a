//! Boundary operators of a simplicial complex, over the integers and over
//! the two-element field.
//!
//! The k-th operator has one row per (k-1)-simplex and one column per
//! k-simplex. Over the integers the face obtained by removing the i-th
//! vertex carries the sign `(-1)^i`, which makes the composition of two
//! consecutive operators vanish.
use crate::matrix::{IntegerMatrix, Z2Matrix};
use crate::simplicial_complex::SimplicialComplex;

/// The integer boundary operators `[d_1, ..., d_dim]` of the complex.
/// `d_1` is synthesized from the edge endpoints.
pub fn integer_boundaries(sc: &SimplicialComplex) -> Vec<IntegerMatrix> {
    let layers = sc.layers();
    let mut boundaries = Vec::with_capacity(layers.len());
    if layers.is_empty() {
        return boundaries;
    }

    let mut d1 = IntegerMatrix::new(sc.n_vertices(), layers[0].len());
    for (col, edge) in layers[0].iter().enumerate() {
        let verts = edge.vertices();
        d1.set(verts[0], col, -1);
        d1.set(verts[1], col, 1);
    }
    boundaries.push(d1);

    for k in 1..layers.len() {
        let mut d = IntegerMatrix::new(layers[k - 1].len(), layers[k].len());
        for (col, simplex) in layers[k].iter().enumerate() {
            for &face_idx in simplex.faces() {
                let removed = removed_vertex_position(
                    layers[k - 1][face_idx].vertices(),
                    simplex.vertices(),
                );
                let sign = if removed % 2 == 0 { 1 } else { -1 };
                d.set(face_idx, col, sign);
            }
        }
        boundaries.push(d);
    }

    boundaries
}

/// The boundary operators `[d_1, ..., d_dim]` over the two-element field.
pub fn z2_boundaries(sc: &SimplicialComplex) -> Vec<Z2Matrix> {
    let layers = sc.layers();
    let mut boundaries = Vec::with_capacity(layers.len());
    if layers.is_empty() {
        return boundaries;
    }

    let mut d1 = Z2Matrix::new(sc.n_vertices(), layers[0].len());
    for (col, edge) in layers[0].iter().enumerate() {
        d1.set(edge.vertices()[0], col);
        d1.set(edge.vertices()[1], col);
    }
    boundaries.push(d1);

    for k in 1..layers.len() {
        let mut d = Z2Matrix::new(layers[k - 1].len(), layers[k].len());
        for (col, simplex) in layers[k].iter().enumerate() {
            for &face_idx in simplex.faces() {
                d.set(face_idx, col);
            }
        }
        boundaries.push(d);
    }

    boundaries
}

/// The position of the vertex of `simplex` that `face` omits.
/// Panics if `face` is not a codimension-1 face of `simplex`.
fn removed_vertex_position(face: &[usize], simplex: &[usize]) -> usize {
    let mut face_iter = face.iter().peekable();
    let mut removed = None;
    for (i, v) in simplex.iter().enumerate() {
        if face_iter.peek() == Some(&v) {
            face_iter.next();
        } else {
            assert!(removed.is_none(), "Face index does not name a codimension-1 face.");
            removed = Some(i);
        }
    }
    removed.expect("Face index does not name a codimension-1 face.")
}

#[cfg(test)]
mod tests {
    use super::{integer_boundaries, z2_boundaries};
    use crate::matrix::IntegerMatrix;
    use crate::simplicial_complex::SimplicialComplex;

    fn compose(a: &IntegerMatrix, b: &IntegerMatrix) -> Vec<i64> {
        assert_eq!(a.n_cols(), b.n_rows());
        let mut product = Vec::with_capacity(a.n_rows() * b.n_cols());
        for i in 0..a.n_rows() {
            for j in 0..b.n_cols() {
                let mut sum = 0;
                for k in 0..a.n_cols() {
                    sum += a.get(i, k) * b.get(k, j);
                }
                product.push(sum);
            }
        }
        product
    }

    #[test]
    fn edge_columns_have_one_of_each_sign() {
        let sc = SimplicialComplex::from_maximal_cells(3, vec![vec![0, 1], vec![1, 2]]);
        let d = integer_boundaries(&sc);
        assert_eq!(d.len(), 1);
        for col in 0..2 {
            let entries: Vec<i64> = (0..3).map(|r| d[0].get(r, col)).collect();
            assert_eq!(entries.iter().filter(|&&e| e == 1).count(), 1);
            assert_eq!(entries.iter().filter(|&&e| e == -1).count(), 1);
        }
    }

    #[test]
    fn boundary_of_boundary_vanishes_on_a_tetrahedron() {
        let sc = SimplicialComplex::from_maximal_cells(4, vec![vec![0, 1, 2, 3]]);
        let d = integer_boundaries(&sc);
        assert_eq!(d.len(), 3);
        for pair in d.windows(2) {
            assert!(compose(&pair[0], &pair[1]).iter().all(|&e| e == 0));
        }
    }

    #[test]
    fn z2_columns_list_the_faces() {
        let sc = SimplicialComplex::from_maximal_cells(3, vec![vec![0, 1, 2]]);
        let d = z2_boundaries(&sc);
        assert_eq!(d.len(), 2);
        // The triangle column holds its three edges.
        let ones = (0..3).filter(|&r| d[1].get(r, 0)).count();
        assert_eq!(ones, 3);
    }

    #[test]
    fn z2_boundary_of_boundary_vanishes() {
        let sc = SimplicialComplex::from_maximal_cells(5, vec![vec![0, 1, 2, 3], vec![2, 3, 4]]);
        let d = z2_boundaries(&sc);
        for pair in d.windows(2) {
            for i in 0..pair[0].n_rows() {
                for j in 0..pair[1].n_cols() {
                    let mut parity = false;
                    for k in 0..pair[0].n_cols() {
                        parity ^= pair[0].get(i, k) && pair[1].get(k, j);
                    }
                    assert!(!parity);
                }
            }
        }
    }

    #[test]
    fn empty_complex_has_no_boundaries() {
        let sc = SimplicialComplex::from_maximal_cells(2, Vec::new());
        assert!(integer_boundaries(&sc).is_empty());
        assert!(z2_boundaries(&sc).is_empty());
    }
}

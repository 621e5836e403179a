//! Maximal clique enumeration.
//!
//! [maximal_cliques] is the combinatorial engine behind the Vietoris-Rips
//! builder: the simplices of a clique complex are exactly the subsets of
//! maximal cliques of the underlying graph. The enumeration is
//! Bron-Kerbosch with pivoting; every maximal clique is reported exactly
//! once, in no particular order.
use sorted_iter::assume::AssumeSortedByItemExt;
use sorted_iter::SortedIterator;

use crate::Vertex;

/// Enumerate all maximal cliques of the graph on `0..n_vertices` whose
/// edges are the pairs `(u, v)`, `u != v`, for which `adjacent(u, v)` is
/// true. The predicate must be symmetric.
///
/// Isolated vertices are reported as singleton cliques.
/// Each returned clique has its vertices in ascending order.
pub fn maximal_cliques<F>(n_vertices: usize, adjacent: F) -> Vec<Vec<Vertex>>
where
    F: Fn(Vertex, Vertex) -> bool,
{
    if n_vertices == 0 {
        return Vec::new();
    }

    let mut neighbours: Vec<Vec<Vertex>> = vec![Vec::new(); n_vertices];
    for u in 0..n_vertices {
        for v in (u + 1)..n_vertices {
            if adjacent(u, v) {
                neighbours[u].push(v);
                neighbours[v].push(u);
            }
        }
    }

    let mut cliques = Vec::new();
    let mut current = Vec::new();
    let candidates: Vec<Vertex> = (0..n_vertices).collect();
    bron_kerbosch(&neighbours, &mut current, candidates, Vec::new(), &mut cliques);
    cliques
}

/// One step of Bron-Kerbosch. `current` is the clique built so far,
/// `candidates` the vertices that extend it, `excluded` the vertices that
/// extend it but whose cliques have all been reported already. Both vertex
/// sets are kept as ascending vectors.
fn bron_kerbosch(
    neighbours: &[Vec<Vertex>],
    current: &mut Vec<Vertex>,
    mut candidates: Vec<Vertex>,
    mut excluded: Vec<Vertex>,
    out: &mut Vec<Vec<Vertex>>,
) {
    if candidates.is_empty() && excluded.is_empty() {
        let mut clique = current.clone();
        clique.sort_unstable();
        out.push(clique);
        return;
    }

    // Pivot on the vertex covering the most candidates; only candidates
    // outside its neighbourhood start a branch.
    let pivot = candidates
        .iter()
        .chain(excluded.iter())
        .copied()
        .max_by_key(|&u| intersection_size(&neighbours[u], &candidates))
        .unwrap();
    let branch_vertices: Vec<Vertex> = candidates
        .iter()
        .copied()
        .assume_sorted_by_item()
        .difference(neighbours[pivot].iter().copied().assume_sorted_by_item())
        .collect();

    for v in branch_vertices {
        let neigh_v = neighbours[v].iter().copied().assume_sorted_by_item();
        let next_candidates: Vec<Vertex> = candidates
            .iter()
            .copied()
            .assume_sorted_by_item()
            .intersection(neigh_v)
            .collect();
        let neigh_v = neighbours[v].iter().copied().assume_sorted_by_item();
        let next_excluded: Vec<Vertex> = excluded
            .iter()
            .copied()
            .assume_sorted_by_item()
            .intersection(neigh_v)
            .collect();

        current.push(v);
        bron_kerbosch(neighbours, current, next_candidates, next_excluded, out);
        current.pop();

        let removed = candidates.binary_search(&v).expect("branch vertex comes from the candidate set");
        candidates.remove(removed);
        let insert_at = excluded.binary_search(&v).unwrap_err();
        excluded.insert(insert_at, v);
    }
}

/// The number of common elements of two ascending vertex vectors.
fn intersection_size(a: &[Vertex], b: &[Vertex]) -> usize {
    a.iter()
        .copied()
        .assume_sorted_by_item()
        .intersection(b.iter().copied().assume_sorted_by_item())
        .count()
}

#[cfg(test)]
mod tests {
    use super::maximal_cliques;
    use crate::Vertex;

    fn sorted(mut cliques: Vec<Vec<Vertex>>) -> Vec<Vec<Vertex>> {
        cliques.sort();
        cliques
    }

    #[test]
    fn complete_graph_is_one_clique() {
        let cliques = maximal_cliques(4, |_, _| true);
        assert_eq!(cliques, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn empty_graph_yields_singletons() {
        let cliques = sorted(maximal_cliques(3, |_, _| false));
        assert_eq!(cliques, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn no_vertices_no_cliques() {
        assert!(maximal_cliques(0, |_, _| true).is_empty());
    }

    #[test]
    fn path_graph_cliques_are_its_edges() {
        // 0 - 1 - 2 - 3
        let edges = [(0, 1), (1, 2), (2, 3)];
        let cliques = sorted(maximal_cliques(4, |u, v| {
            edges.contains(&(u.min(v), u.max(v)))
        }));
        assert_eq!(cliques, vec![vec![0, 1], vec![1, 2], vec![2, 3]]);
    }

    #[test]
    fn two_triangles_sharing_a_vertex() {
        let edges = [(0, 1), (0, 2), (1, 2), (2, 3), (2, 4), (3, 4)];
        let cliques = sorted(maximal_cliques(5, |u, v| {
            edges.contains(&(u.min(v), u.max(v)))
        }));
        assert_eq!(cliques, vec![vec![0, 1, 2], vec![2, 3, 4]]);
    }

    #[test]
    fn every_clique_is_maximal_and_reported_once() {
        // Octahedron: each vertex adjacent to all but its antipode.
        let cliques = sorted(maximal_cliques(6, |u, v| u + 3 != v && v + 3 != u));
        assert_eq!(cliques.len(), 8);
        for c in &cliques {
            assert_eq!(c.len(), 3);
        }
        let mut deduped = cliques.clone();
        deduped.dedup();
        assert_eq!(deduped, cliques);
    }
}

//! End-to-end scenarios: small spaces with known homology and barcodes.
use ordered_float::OrderedFloat;
use paste::paste;

use rips_homology::distance_matrix::DistanceMatrix;
use rips_homology::metric::EuclideanMetric;
use rips_homology::persistence::Bar;
use rips_homology::points::PointCloud;
use rips_homology::simplicial_complex::SimplicialComplex;
use rips_homology::{
    betti_numbers, index_barcodes, integer_homology, scale_barcodes, vietoris_rips_filtration,
    Extended,
};

/// Create test cases that build a complex from its maximal cells and check
/// its homology along both the integer and the field-two paths.
macro_rules! homology_case {
    ($name:ident, $n_vertices:expr, $cells:expr, $integer:expr, $betti:expr) => {
        paste! {
            #[test]
            fn [<$name _integer_homology>]() {
                let sc = SimplicialComplex::from_maximal_cells($n_vertices, $cells);
                sc.validate();
                let groups = integer_homology(&sc, false).unwrap();
                let expected: Vec<Vec<i64>> = $integer;
                assert_eq!(groups, expected);
            }

            #[test]
            fn [<$name _betti_numbers>]() {
                let sc = SimplicialComplex::from_maximal_cells($n_vertices, $cells);
                let betti = betti_numbers(&sc, false);
                let expected: Vec<usize> = $betti;
                assert_eq!(betti, expected);
            }
        }
    };
}

homology_case!(two_isolated_points, 2, vec![], vec![vec![0, 0]], vec![2]);

homology_case!(
    filled_triangle,
    3,
    vec![vec![0, 1, 2]],
    vec![vec![0], vec![], vec![]],
    vec![1, 0, 0]
);

homology_case!(
    hollow_triangle,
    3,
    vec![vec![0, 1], vec![1, 2], vec![0, 2]],
    vec![vec![0], vec![0]],
    vec![1, 1]
);

homology_case!(
    two_disconnected_triangles,
    6,
    vec![vec![0, 1, 2], vec![3, 4, 5]],
    vec![vec![0, 0], vec![], vec![]],
    vec![2, 0, 0]
);

homology_case!(
    figure_eight,
    5,
    vec![
        vec![0, 1],
        vec![1, 2],
        vec![0, 2],
        vec![2, 3],
        vec![3, 4],
        vec![2, 4]
    ],
    vec![vec![0], vec![0, 0]],
    vec![1, 2]
);

// The six-vertex triangulation of the projective plane: the antipodal
// quotient of the icosahedron, ten triangles on the complete graph K6.
homology_case!(
    projective_plane,
    6,
    vec![
        vec![0, 1, 2],
        vec![0, 2, 4],
        vec![0, 3, 4],
        vec![0, 1, 5],
        vec![0, 3, 5],
        vec![1, 2, 3],
        vec![1, 3, 4],
        vec![1, 4, 5],
        vec![2, 3, 5],
        vec![2, 4, 5]
    ],
    vec![vec![0], vec![2], vec![]],
    vec![1, 1, 1]
);

#[test]
fn two_isolated_points_barcodes() {
    let mut metric: DistanceMatrix<OrderedFloat<f64>> = DistanceMatrix::new(2);
    metric.set(0, 1, 10.0.into());
    let scales: Vec<OrderedFloat<f64>> = vec![5.0.into(), 1.0.into()];

    let filtration = vietoris_rips_filtration(&scales, &metric).unwrap();
    let barcodes = index_barcodes(&filtration);

    assert_eq!(barcodes.len(), 1);
    assert_eq!(
        barcodes[0],
        vec![(0, Extended::Infinity), (0, Extended::Infinity)]
    );
}

fn circle_sample(n_points: usize) -> PointCloud<OrderedFloat<f64>, 2> {
    let mut cloud = PointCloud::new();
    for i in 0..n_points {
        let angle = 2.0 * std::f64::consts::PI * (i as f64) / (n_points as f64);
        cloud.push_point([angle.cos(), angle.sin()].into());
    }
    cloud
}

#[test]
fn circle_sample_barcodes() {
    let cloud = circle_sample(12);
    let scales: Vec<OrderedFloat<f64>> = vec![3.0.into(), 0.6.into(), 0.1.into()];
    let metric = EuclideanMetric::new(&cloud);
    let filtration = vietoris_rips_filtration(&scales, &metric).unwrap();
    let barcodes = index_barcodes(&filtration);

    // The twelve adjacent edges enter at index 1 and merge all components.
    let finite: Vec<Bar<usize>> = barcodes[0]
        .iter()
        .copied()
        .filter(|(_, death)| *death != Extended::Infinity)
        .collect();
    assert_eq!(finite.len(), 11);
    assert!(finite.iter().all(|&bar| bar == (0, Extended::Finite(1))));
    let infinite = barcodes[0].len() - finite.len();
    assert_eq!(infinite, 1);

    // One loop, closed by the adjacent edges and filled by the chords.
    assert_eq!(barcodes[1], vec![(1, Extended::Finite(2))]);

    // Everything at higher dimensions is born and dies at the top scale.
    for bars in &barcodes[2..] {
        assert!(bars.is_empty());
    }
}

#[test]
fn circle_sample_scale_barcodes() {
    let cloud = circle_sample(12);
    let scales: Vec<OrderedFloat<f64>> = vec![3.0.into(), 0.6.into(), 0.1.into()];
    let metric = EuclideanMetric::new(&cloud);
    let filtration = vietoris_rips_filtration(&scales, &metric).unwrap();
    let barcodes = scale_barcodes(&scales, &filtration).unwrap();

    // Index 1 is the middle scale, index 2 the largest.
    assert_eq!(
        barcodes[1],
        vec![(OrderedFloat(0.6), Extended::Finite(OrderedFloat(3.0)))]
    );
}

#[test]
fn cached_and_lazy_metrics_build_the_same_filtration() {
    let cloud = circle_sample(9);
    let scales: Vec<OrderedFloat<f64>> = vec![3.0.into(), 0.8.into(), 0.2.into()];

    let lazy = EuclideanMetric::new(&cloud);
    let from_lazy = vietoris_rips_filtration(&scales, &lazy).unwrap();

    let cached = cloud.distance_matrix();
    let from_cached = vietoris_rips_filtration(&scales, &cached).unwrap();

    assert_eq!(index_barcodes(&from_lazy), index_barcodes(&from_cached));
}

//! End-to-end scenarios: build a partition, inspect it, fill it

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use turtle::Turtle;
use turtle_core::SliceSource;

fn gaussian_rows(n: usize, dimension: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    (0..n * dimension).map(|_| normal.sample(&mut rng)).collect()
}

#[test]
fn eight_points_two_bins() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let turtle = Turtle::from_rows(&data, 2, 8, 1).unwrap();

    assert_eq!(turtle.num_bins(), 2);
    assert_eq!(turtle.entries_per_bin(), 4);

    // Four lowest-valued points in bin 0, four highest in bin 1, with
    // the boundary midway between 4 and 5.
    assert_eq!(turtle.indices(0), &[0, 1, 2, 3]);
    assert_eq!(turtle.indices(1), &[4, 5, 6, 7]);
    assert_relative_eq!(turtle.max_edges(0).unwrap()[0], 4.5);
    assert_relative_eq!(turtle.min_edges(1).unwrap()[0], 4.5);
}

#[test]
fn populations_are_exactly_balanced_in_three_dimensions() {
    let rows = gaussian_rows(600, 3, 1);
    let turtle = Turtle::from_rows(&rows, 12, 600, 3).unwrap();

    for bin in 0..turtle.num_bins() {
        assert_eq!(turtle.indices(bin).len(), 50, "bin {bin}");
    }
}

#[test]
fn duplicate_heavy_reference_data_balances_exactly() {
    // Integer-valued data with every value duplicated: the index map
    // must still hold exactly entries_per_bin indices per bin.
    let rows: Vec<f64> = (1..=8).flat_map(|v| [f64::from(v); 2]).collect();
    let turtle = Turtle::from_rows(&rows, 4, 16, 1).unwrap();

    for bin in 0..turtle.num_bins() {
        assert_eq!(turtle.indices(bin).len(), 4, "bin {bin}");
    }
}

#[test]
fn coincident_boundary_points_fail_construction() {
    // All-identical points, and duplicates that straddle every
    // possible cut: no equal-population partition exists, so the
    // build fails instead of deriving an imbalanced index map.
    assert!(Turtle::from_rows(&[1.0; 4], 2, 4, 1).is_err());
    assert!(Turtle::from_rows(&[1.0, 2.0, 2.0, 2.0, 2.0, 3.0], 2, 6, 1).is_err());
}

#[test]
fn every_reference_index_appears_exactly_once() {
    let rows = gaussian_rows(240, 2, 2);
    let turtle = Turtle::from_rows(&rows, 8, 240, 2).unwrap();

    let mut seen = vec![0usize; 240];
    for bin in 0..turtle.num_bins() {
        for &i in turtle.indices(bin) {
            seen[i] += 1;
        }
    }
    assert!(seen.iter().all(|&n| n == 1));
}

#[test]
fn reference_points_resolve_into_their_own_bins() {
    let rows = gaussian_rows(150, 2, 3);
    let turtle = Turtle::from_rows(&rows, 5, 150, 2).unwrap();

    for bin in 0..turtle.num_bins() {
        for &i in turtle.indices(bin) {
            let point = turtle.dataset().point(i);
            assert_eq!(turtle.find_bin(point).unwrap(), bin);
        }
    }
}

#[test]
fn find_bin_is_deterministic() {
    let rows = gaussian_rows(100, 2, 4);
    let turtle = Turtle::from_rows(&rows, 4, 100, 2).unwrap();
    let probe = [0.17, -0.92];
    let first = turtle.find_bin(&probe).unwrap();
    for _ in 0..20 {
        assert_eq!(turtle.find_bin(&probe).unwrap(), first);
    }
}

#[test]
fn cap_beyond_available_truncates_to_bin_multiple() {
    // 10 points available, 100 requested, 4 bins: keep 8.
    let rows: Vec<f64> = (0..10).map(f64::from).collect();
    let source = SliceSource::new(&rows, 1).unwrap();
    let turtle = Turtle::from_source_capped(source, 4, 100).unwrap();

    assert_eq!(turtle.entries_per_bin(), 2);
    assert_eq!(turtle.dataset().len(), 8);
}

#[test]
fn construction_fails_cleanly_on_too_few_points() {
    let rows = [1.0, 2.0, 3.0];
    let source = SliceSource::new(&rows, 1).unwrap();
    assert!(Turtle::from_source(source, 5).is_err());
}

#[test]
fn partition_round_trips_through_serde() {
    let rows = gaussian_rows(120, 2, 5);
    let turtle = Turtle::from_rows(&rows, 6, 120, 2).unwrap();

    let blob = serde_json::to_vec(turtle.partition()).unwrap();
    let restored: turtle_tree::Partition = serde_json::from_slice(&blob).unwrap();
    assert_eq!(turtle.partition(), &restored);

    for point in turtle.dataset().points() {
        assert_eq!(turtle.partition().resolve_bin(point), restored.resolve_bin(point));
    }
}

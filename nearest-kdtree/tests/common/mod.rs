#![allow(dead_code)]

use nearest_kdtree::{Cluster, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Uniform random points in `[0, extent)` on both axes.
pub fn random_cloud(rng: &mut StdRng, count: usize, extent: f64) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.gen_range(0.0..extent), rng.gen_range(0.0..extent)))
        .collect()
}

/// Points on a small integer grid, so many of them repeat exactly.
pub fn duplicate_heavy_cloud(rng: &mut StdRng, count: usize) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.gen_range(0..6) as f64, rng.gen_range(0..6) as f64))
        .collect()
}

/// Points on a single vertical and a single horizontal line.
pub fn collinear_cloud(rng: &mut StdRng, count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let t = rng.gen_range(-50.0..50.0);
            if i % 2 == 0 {
                Point::new(3.0, t)
            } else {
                Point::new(t, -2.0)
            }
        })
        .collect()
}

/// Tight groups of points around random centres.
pub fn random_clusters(rng: &mut StdRng, count: usize, per_cluster: usize) -> Vec<Cluster> {
    (0..count)
        .map(|_| {
            let cx: f64 = rng.gen_range(0.0..500.0);
            let cy: f64 = rng.gen_range(0.0..500.0);
            (0..per_cluster)
                .map(|_| Point::new(cx + rng.gen_range(-3.0..3.0), cy + rng.gen_range(-3.0..3.0)))
                .collect()
        })
        .collect()
}

/// Smallest distance from `query` to any point accepted by `keep`.
pub fn brute_force<F>(points: &[Point], query: &Point, keep: F) -> Option<f64>
where
    F: Fn(&Point) -> bool,
{
    points
        .iter()
        .filter(|p| keep(p))
        .map(|p| query.distance(p))
        .min_by(|a, b| a.total_cmp(b))
}

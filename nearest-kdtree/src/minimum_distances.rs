//! Batch nearest neighbour computations.
//!
//! For every cluster of a list, and every member of each cluster, these
//! functions find the nearest stored point that lies outside the member's
//! own cluster. The parallel form splits the cluster list into contiguous
//! slices, one per worker thread, and returns rows in the same order as the
//! sequential form.

use std::thread;

use crate::config::{validate_workers, KdTreeConfig};
use crate::errors::{KdTreeError, KdTreeResult};
use crate::nearest::Cluster;
use crate::nearest_tree::NearestKdTree;
use crate::pair::ResultPair;

/// One row per cluster, one entry per cluster member.
pub type Rows<'t, D> = Vec<Vec<Option<ResultPair<'t, D>>>>;

/// For each cluster in order, the nearest point outside the cluster for
/// each of its members.
pub fn min_cluster_distance<'t, D>(tree: &'t NearestKdTree<D>, clusters: &[Cluster]) -> Rows<'t, D> {
    clusters
        .iter()
        .map(|cluster| tree.nearest_not_in_pairs(cluster))
        .collect()
}

/// Parallel form of [`min_cluster_distance`] using `workers` threads.
///
/// Worker `i` handles a contiguous slice of `clusters.len() / workers`
/// clusters, the last worker also takes the remainder. All workers are
/// joined before the rows are concatenated in worker order, so the output
/// equals the sequential output.
///
/// # Errors
/// Returns [`KdTreeError::InvalidOperation`] if `workers` is zero and
/// [`KdTreeError::WorkerFailed`] if a worker could not be started or
/// panicked.
pub fn min_cluster_distance_parallel<'t, D>(
    tree: &'t NearestKdTree<D>,
    clusters: &[Cluster],
    workers: usize,
) -> KdTreeResult<Rows<'t, D>>
where
    D: Sync,
{
    validate_workers(workers)?;
    if workers == 1 {
        return Ok(min_cluster_distance(tree, clusters));
    }

    let slices = partition(clusters, workers);
    log::debug!(
        "Splitting {} clusters across {} workers ({} per worker)",
        clusters.len(),
        workers,
        clusters.len() / workers
    );

    let parts = run_workers(slices, |slice| min_cluster_distance(tree, slice))?;
    Ok(parts.into_iter().flatten().collect())
}

/// Runs `work` once per input, each on its own scoped thread named
/// `calculator<i>`, and returns the outputs in input order.
///
/// Every started worker is joined before returning. The first worker that
/// could not be started or panicked is reported as
/// [`KdTreeError::WorkerFailed`].
fn run_workers<I, T, F>(inputs: Vec<I>, work: F) -> KdTreeResult<Vec<T>>
where
    I: Send,
    T: Send,
    F: Fn(I) -> T + Sync,
{
    let work = &work;
    thread::scope(|s| {
        let mut handles = Vec::with_capacity(inputs.len());
        let mut failure = None;

        for (index, input) in inputs.into_iter().enumerate() {
            let name = format!("calculator{}", index);
            let spawned = thread::Builder::new()
                .name(name.clone())
                .spawn_scoped(s, move || work(input));
            match spawned {
                Ok(handle) => handles.push((name, handle)),
                Err(e) => {
                    log::error!("Could not start worker {}: {}", name, e);
                    failure = Some(KdTreeError::WorkerFailed(format!(
                        "{} could not be started: {}",
                        name, e
                    )));
                    break;
                }
            }
        }

        // every started worker is joined, even after a failure
        let mut outputs = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            match handle.join() {
                Ok(output) => outputs.push(output),
                Err(_) => {
                    log::error!("Worker {} panicked", name);
                    if failure.is_none() {
                        failure = Some(KdTreeError::WorkerFailed(format!("{} panicked", name)));
                    }
                }
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(outputs),
        }
    })
}

/// Runs [`min_cluster_distance_parallel`] with the worker count of `config`.
pub fn min_cluster_distance_with<'t, D>(
    tree: &'t NearestKdTree<D>,
    clusters: &[Cluster],
    config: &KdTreeConfig,
) -> KdTreeResult<Rows<'t, D>>
where
    D: Sync,
{
    min_cluster_distance_parallel(tree, clusters, config.workers())
}

/// For every node, in depth-first order, the nearest other point in the
/// tree. The source node is attached to each pair as `node1`.
///
/// An entry is `None` when the tree holds no point other than the node's own.
pub fn min_distance<D>(tree: &NearestKdTree<D>) -> Vec<Option<ResultPair<'_, D>>> {
    let mut distances = Vec::with_capacity(tree.node_count());
    for (index, node) in tree.iter().enumerate() {
        let pair = tree.nearest_not_identical_pair(node.point()).map(|mut pair| {
            pair.set_node1(node);
            pair
        });
        distances.push(pair);

        let processed = index + 1;
        if processed % 10 == 0 {
            log::trace!("{} nodes processed", processed);
        }
    }
    distances
}

fn partition(clusters: &[Cluster], workers: usize) -> Vec<&[Cluster]> {
    let chunk = clusters.len() / workers;
    let mut slices = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let end = if worker == workers - 1 {
            clusters.len()
        } else {
            start + chunk
        };
        slices.push(&clusters[start..end]);
        start = end;
    }
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Five clusters of three points each along a diagonal.
    fn clustered() -> (NearestKdTree, Vec<Cluster>) {
        let mut clusters = Vec::new();
        let mut points = Vec::new();
        for c in 0..5 {
            let base = c as f64 * 10.0;
            let cluster: Cluster = [p(base, base), p(base + 1.0, base), p(base, base + 1.0)]
                .into_iter()
                .collect();
            points.extend(cluster.iter().copied());
            clusters.push(cluster);
        }
        (NearestKdTree::load(&points), clusters)
    }

    fn summary<D>(rows: &Rows<'_, D>) -> Vec<Vec<Option<(Point, Point, f64)>>> {
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|r| r.as_ref().map(|r| (*r.point1(), *r.point2(), r.distance())))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_partition_sizes() {
        let (_, clusters) = clustered();
        let lens: Vec<usize> = partition(&clusters, 2).iter().map(|s| s.len()).collect();
        assert_eq!(lens, vec![2, 3]);
        let lens: Vec<usize> = partition(&clusters, 5).iter().map(|s| s.len()).collect();
        assert_eq!(lens, vec![1, 1, 1, 1, 1]);
        // more workers than clusters: all but the last slice are empty
        let lens: Vec<usize> = partition(&clusters, 7).iter().map(|s| s.len()).collect();
        assert_eq!(lens, vec![0, 0, 0, 0, 0, 0, 5]);
    }

    #[test]
    fn test_sequential_rows() {
        let (tree, clusters) = clustered();
        let rows = min_cluster_distance(&tree, &clusters);
        assert_eq!(rows.len(), 5);
        for (row, cluster) in rows.iter().zip(&clusters) {
            assert_eq!(row.len(), cluster.len());
            for (pair, member) in row.iter().zip(cluster) {
                let pair = pair.as_ref().unwrap();
                assert_eq!(pair.point1(), member);
                assert!(!cluster.contains(pair.point2()));
            }
        }

        // the first cluster's nearest outside point is (10, 10)
        let first = rows[0][0].as_ref().unwrap();
        assert_eq!(*first.point2(), p(10.0, 10.0));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (tree, clusters) = clustered();
        let expected = summary(&min_cluster_distance(&tree, &clusters));
        for workers in [1, 2, 3, 4, 7] {
            let rows = min_cluster_distance_parallel(&tree, &clusters, workers).unwrap();
            assert_eq!(summary(&rows), expected, "workers = {}", workers);
        }
    }

    #[test]
    fn test_parallel_rejects_zero_workers() {
        let (tree, clusters) = clustered();
        let err = min_cluster_distance_parallel(&tree, &clusters, 0).unwrap_err();
        assert!(matches!(err, KdTreeError::InvalidOperation(_)));
    }

    #[test]
    fn test_panicking_worker_is_reported() {
        let result = run_workers(vec![1, 2, 3], |n: u32| {
            if n == 2 {
                panic!("worker gave up");
            }
            n * 10
        });
        match result {
            Err(KdTreeError::WorkerFailed(msg)) => assert_eq!(msg, "calculator1 panicked"),
            other => panic!("expected a worker failure, got {:?}", other),
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let result = run_workers(vec![0, 1, 2, 3], |n: usize| {
            if n >= 2 {
                panic!("worker {} gave up", n);
            }
            n
        });
        assert_eq!(
            result.unwrap_err().to_string(),
            "Worker failed: calculator2 panicked"
        );
    }

    #[test]
    fn test_worker_outputs_keep_input_order() {
        let outputs = run_workers((0..8).collect(), |n: usize| n * n).unwrap();
        assert_eq!(outputs, vec![0, 1, 4, 9, 16, 25, 36, 49]);
    }

    #[test]
    fn test_parallel_empty_input() {
        let (tree, _) = clustered();
        let rows = min_cluster_distance_parallel(&tree, &[], 3).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_with_config() {
        let (tree, clusters) = clustered();
        let config = KdTreeConfig::new().with_workers(2).unwrap();
        let rows = min_cluster_distance_with(&tree, &clusters, &config).unwrap();
        assert_eq!(summary(&rows), summary(&min_cluster_distance(&tree, &clusters)));
    }

    #[test]
    fn test_min_distance_sets_source_node() {
        let (tree, _) = clustered();
        let distances = min_distance(&tree);
        assert_eq!(distances.len(), tree.node_count());

        for (pair, node) in distances.iter().zip(tree.iter()) {
            let pair = pair.as_ref().unwrap();
            assert!(std::ptr::eq(pair.node1().unwrap(), node));
            assert_eq!(pair.point1(), node.point());
            assert_ne!(pair.point2(), node.point());
            assert_eq!(pair.distance(), 1.0);
            assert!(pair.node2().is_some());
        }
    }

    #[test]
    fn test_min_distance_single_point() {
        let tree: NearestKdTree = NearestKdTree::load(&[p(1.0, 1.0)]);
        let distances = min_distance(&tree);
        assert_eq!(distances.len(), 1);
        assert!(distances[0].is_none());
    }
}

//! # Nearest KD-Tree - Nearest Neighbour Search over 2-D Points
//!
//! This crate provides an in-memory two-dimensional KD-tree with snapping
//! insertion, balanced bulk loading, range queries and several nearest
//! neighbour searches, plus a batch engine that computes cluster-to-cluster
//! minimum distances on worker threads.
//!
//! ## Features
//!
//! - **Snapping Insertion**: Points within a tolerance of a stored node are merged into it
//! - **Balanced Bulk Load**: Median splits at every level, duplicates removed
//! - **Range Queries**: All points inside an axis-aligned rectangle
//! - **Nearest Neighbour**: Plain, non-identical and not-in-set searches
//! - **Cluster Distances**: Nearest point outside each cluster, sequential or parallel
//! - **Payloads**: Any value type can be attached to a stored point
//!
//! ## Quick Start
//!
//! ```rust
//! use nearest_kdtree::{BoundingBox, Cluster, NearestKdTree, Point};
//!
//! let tree: NearestKdTree = NearestKdTree::load(&[
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(2.0, 2.0),
//!     Point::new(3.0, 0.0),
//! ]);
//!
//! // Range query
//! let found = tree.query(&BoundingBox::new(0.0, 0.0, 2.0, 2.0));
//! assert_eq!(found.len(), 3);
//!
//! // Nearest neighbour
//! assert_eq!(tree.nearest(&Point::new(1.1, 1.1)), Some(Point::new(1.0, 1.0)));
//!
//! // Nearest point outside a cluster
//! let cluster: Cluster = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)].into_iter().collect();
//! let pairs = tree.nearest_not_in_pairs(&cluster);
//! assert_eq!(pairs.len(), 2);
//! ```
//!
//! ## Cluster Distances
//!
//! ```rust
//! use nearest_kdtree::{min_cluster_distance_parallel, Cluster, NearestKdTree, Point};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let a: Cluster = [Point::new(0.0, 0.0), Point::new(0.0, 1.0)].into_iter().collect();
//! let b: Cluster = [Point::new(5.0, 0.0), Point::new(5.0, 1.0)].into_iter().collect();
//! let points: Vec<Point> = a.iter().chain(b.iter()).copied().collect();
//! let tree: NearestKdTree = NearestKdTree::load(&points);
//!
//! let rows = min_cluster_distance_parallel(&tree, &[a, b], 2)?;
//! assert_eq!(rows.len(), 2);
//! assert!(rows.iter().flatten().flatten().all(|pair| pair.distance() == 5.0));
//! # Ok(())
//! # }
//! ```

// Geometry and configuration
pub mod bounding_box;
pub mod config;
pub mod errors;
pub mod geometry;

// Tree structure
pub mod iter;
pub mod kdtree;
pub mod node;
pub mod visitor;

// Searches
pub mod nearest;
pub mod nearest_tree;
pub mod pair;
pub mod search;

// Batch computations
pub mod minimum_distances;

pub use bounding_box::BoundingBox;
pub use config::KdTreeConfig;
pub use errors::{KdTreeError, KdTreeResult};
pub use geometry::Point;

pub use iter::{KdTreeIter, PointIter};
pub use kdtree::KdTree;
pub use node::{Axis, KdNode};
pub use visitor::{NodeCollector, NodeVisitor};

pub use nearest::{
    AnyPoint, Cluster, Eligibility, NearestNonIdenticalSearch, NearestNotInSearch, NearestSearch,
    NotIdentical, NotIn, PointSet,
};
pub use nearest_tree::NearestKdTree;
pub use pair::ResultPair;
pub use search::Search;

pub use minimum_distances::{
    min_cluster_distance, min_cluster_distance_parallel, min_cluster_distance_with, min_distance,
    Rows,
};

use std::ops::{Deref, DerefMut};

use crate::bounding_box::BoundingBox;
use crate::config::KdTreeConfig;
use crate::errors::KdTreeResult;
use crate::geometry::Point;
use crate::kdtree::KdTree;
use crate::nearest::{Cluster, NearestNonIdenticalSearch, NearestNotInSearch, NearestSearch, PointSet};
use crate::node::KdNode;
use crate::pair::ResultPair;
use crate::search::Search;
use crate::visitor::NodeVisitor;

/// A [`KdTree`] with nearest neighbour search.
///
/// Dereferences to the underlying tree, so insertion, range queries and
/// iteration are available directly. Every search runs against the root the
/// tree has at the time of the call.
///
/// # Example
///
/// ```
/// use nearest_kdtree::{NearestKdTree, Point};
///
/// let tree: NearestKdTree = NearestKdTree::load(&[
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(2.0, 2.0),
///     Point::new(3.0, 0.0),
/// ]);
///
/// let pair = tree.nearest_pair(&Point::new(1.1, 1.1)).unwrap();
/// assert_eq!(*pair.point2(), Point::new(1.0, 1.0));
/// assert!((pair.distance() - 0.1414).abs() < 1e-4);
/// ```
#[derive(Debug)]
pub struct NearestKdTree<D = ()> {
    tree: KdTree<D>,
}

impl<D> Default for NearestKdTree<D> {
    fn default() -> Self {
        NearestKdTree::new()
    }
}

impl<D> NearestKdTree<D> {
    /// Creates an empty tree that never snaps.
    pub fn new() -> Self {
        NearestKdTree { tree: KdTree::new() }
    }

    /// Creates an empty tree with the given snap tolerance.
    ///
    /// # Errors
    /// Returns an error if `tolerance` is negative or NaN.
    pub fn with_tolerance(tolerance: f64) -> KdTreeResult<Self> {
        Ok(NearestKdTree {
            tree: KdTree::with_tolerance(tolerance)?,
        })
    }

    /// Creates an empty tree using the tolerance from `config`.
    pub fn with_config(config: &KdTreeConfig) -> Self {
        NearestKdTree {
            tree: KdTree::with_config(config),
        }
    }

    /// Builds a balanced tree from `points`. See [`KdTree::load`].
    pub fn load(points: &[Point]) -> Self {
        NearestKdTree {
            tree: KdTree::load(points),
        }
    }

    /// Consumes the facade and returns the underlying tree.
    pub fn into_inner(self) -> KdTree<D> {
        self.tree
    }

    fn search(&self) -> Search<'_, D> {
        Search::new(self.tree.root())
    }

    /// Returns true if the tree holds exactly `p`.
    pub fn contains(&self, p: &Point) -> bool {
        self.search().contains(p)
    }

    /// Returns the nodes from the root down to the node holding `p`, or an
    /// empty path if `p` is not in the tree.
    pub fn trace(&self, p: &Point) -> Vec<&KdNode<D>> {
        self.search().coordinate_path(p)
    }

    /// The stored point nearest to `query`.
    pub fn nearest(&self, query: &Point) -> Option<Point> {
        NearestSearch::new(self.tree.root()).nearest(query)
    }

    pub fn nearest_pair(&self, query: &Point) -> Option<ResultPair<'_, D>> {
        NearestSearch::new(self.tree.root()).nearest_pair(query)
    }

    /// The stored point nearest to `query` other than `query` itself.
    pub fn nearest_not_identical(&self, query: &Point) -> Option<Point> {
        NearestNonIdenticalSearch::new(self.tree.root()).nearest(query)
    }

    pub fn nearest_not_identical_pair(&self, query: &Point) -> Option<ResultPair<'_, D>> {
        NearestNonIdenticalSearch::new(self.tree.root()).nearest_pair(query)
    }

    /// The stored point nearest to `query` that is not in `exclude`.
    pub fn nearest_not_in<S>(&self, query: &Point, exclude: &S) -> Option<Point>
    where
        S: PointSet + ?Sized,
    {
        NearestNotInSearch::new(self.tree.root()).nearest(query, exclude)
    }

    pub fn nearest_not_in_pair<S>(&self, query: &Point, exclude: &S) -> Option<ResultPair<'_, D>>
    where
        S: PointSet + ?Sized,
    {
        NearestNotInSearch::new(self.tree.root()).nearest_pair(query, exclude)
    }

    /// For each member of `cluster`, the nearest stored point outside the
    /// cluster. `None` entries mark members for which every stored point is
    /// in the cluster.
    pub fn nearest_not_in_pairs(&self, cluster: &Cluster) -> Vec<Option<ResultPair<'_, D>>> {
        NearestNotInSearch::new(self.tree.root()).nearest_pairs(cluster)
    }

    /// Runs a range query and shows each result to `visitor`, in result order.
    pub fn query_with<'a, V>(&'a self, rect: &BoundingBox, visitor: &mut V)
    where
        V: NodeVisitor<'a, D> + ?Sized,
    {
        for node in self.tree.query(rect) {
            visitor.visit_node(node);
        }
    }

    /// Removal is not supported; always returns false and leaves the tree
    /// unchanged.
    pub fn remove(&mut self, _p: &Point) -> bool {
        false
    }
}

impl<D> From<KdTree<D>> for NearestKdTree<D> {
    fn from(tree: KdTree<D>) -> Self {
        NearestKdTree { tree }
    }
}

impl<D> Deref for NearestKdTree<D> {
    type Target = KdTree<D>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

impl<D> DerefMut for NearestKdTree<D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tree
    }
}

impl<'a, D> IntoIterator for &'a NearestKdTree<D> {
    type Item = &'a KdNode<D>;
    type IntoIter = crate::iter::KdTreeIter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}

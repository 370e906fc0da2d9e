//! Nearest neighbour search strategies.
//!
//! All strategies run the same branch-and-bound search and differ only in
//! which nodes may be reported as the answer:
//!
//! - [`NearestSearch`]: any point in the tree.
//! - [`NearestNonIdenticalSearch`]: any point other than the search point
//!   itself, for neighbours of points already stored in the tree.
//! - [`NearestNotInSearch`]: any point outside a caller supplied set, for
//!   neighbours outside the search point's own cluster.
//!
//! The search walks down to the leaves, then unwinds the path. At each node
//! the distance to the node's splitting line bounds how close anything on the
//! untried side can be; that side is searched only when the bound beats the
//! best distance found so far.

use indexmap::IndexSet;
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;
use std::ops::Deref;

use crate::geometry::Point;
use crate::node::KdNode;
use crate::pair::ResultPair;
use crate::search::{other_child, traverse, Search};
use crate::visitor::NodeCollector;

/// A cluster of points. Iteration order is insertion order, and membership
/// tests are constant time.
pub type Cluster = IndexSet<Point>;

/// Decides whether a visited node may be reported as the nearest neighbour.
pub trait Eligibility<D> {
    fn is_eligible(&self, query: &Point, node: &KdNode<D>) -> bool;
}

/// Every node is eligible.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyPoint;

impl<D> Eligibility<D> for AnyPoint {
    #[inline]
    fn is_eligible(&self, _query: &Point, _node: &KdNode<D>) -> bool {
        true
    }
}

/// Nodes holding exactly the search point are not eligible.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotIdentical;

impl<D> Eligibility<D> for NotIdentical {
    #[inline]
    fn is_eligible(&self, query: &Point, node: &KdNode<D>) -> bool {
        !node.point().equals_2d(query)
    }
}

/// Nodes whose point belongs to the wrapped set are not eligible.
#[derive(Debug)]
pub struct NotIn<'s, S: ?Sized>(pub &'s S);

impl<D, S: PointSet + ?Sized> Eligibility<D> for NotIn<'_, S> {
    #[inline]
    fn is_eligible(&self, _query: &Point, node: &KdNode<D>) -> bool {
        !self.0.contains_point(node.point())
    }
}

/// A collection that can answer point membership.
pub trait PointSet {
    fn contains_point(&self, p: &Point) -> bool;
}

impl<S: BuildHasher> PointSet for HashSet<Point, S> {
    fn contains_point(&self, p: &Point) -> bool {
        self.contains(p)
    }
}

impl<S: BuildHasher> PointSet for IndexSet<Point, S> {
    fn contains_point(&self, p: &Point) -> bool {
        self.contains(p)
    }
}

impl PointSet for BTreeSet<Point> {
    fn contains_point(&self, p: &Point) -> bool {
        self.contains(p)
    }
}

impl PointSet for [Point] {
    fn contains_point(&self, p: &Point) -> bool {
        self.iter().any(|q| q.equals_2d(p))
    }
}

impl PointSet for Vec<Point> {
    fn contains_point(&self, p: &Point) -> bool {
        self.as_slice().contains_point(p)
    }
}

/// Finds the eligible node nearest to `query` in the subtree under `start`.
///
/// Returns `None` when no node in the subtree is eligible. Among nodes at the
/// same minimal distance, the first one met while unwinding wins.
pub fn nearest<'t, D, E>(
    start: Option<&'t KdNode<D>>,
    query: &Point,
    eligibility: &E,
) -> Option<ResultPair<'t, D>>
where
    E: Eligibility<D> + ?Sized,
{
    nearest_node(start, query, eligibility).map(|(node, distance)| {
        let mut pair = ResultPair::new(*query, *node.point(), distance);
        pair.set_node2(node);
        pair
    })
}

fn nearest_node<'t, D, E>(
    start: Option<&'t KdNode<D>>,
    query: &Point,
    eligibility: &E,
) -> Option<(&'t KdNode<D>, f64)>
where
    E: Eligibility<D> + ?Sized,
{
    let mut path = NodeCollector::new();
    traverse(start, query, &mut path);

    let mut best: Option<(&'t KdNode<D>, f64)> = None;
    let improves = |best: Option<(&'t KdNode<D>, f64)>, distance: f64| match best {
        None => true,
        Some((_, min_dist)) => distance < min_dist,
    };

    for &current in path.items().iter().rev() {
        if eligibility.is_eligible(query, current) {
            let distance = query.distance(current.point());
            if improves(best, distance) {
                best = Some((current, distance));
            }
        }

        // could something closer sit on the other side of this split?
        let lower_bound = query.distance(&current.project_point(query));
        if improves(best, lower_bound) {
            if let Some(child) = other_child(current, query) {
                if let Some((node, distance)) = nearest_node(Some(child), query, eligibility) {
                    if improves(best, distance) {
                        best = Some((node, distance));
                    }
                }
            }
        }
    }

    best
}

/// Plain nearest neighbour search.
#[derive(Debug)]
pub struct NearestSearch<'t, D> {
    search: Search<'t, D>,
}

impl<'t, D> NearestSearch<'t, D> {
    pub fn new(root: Option<&'t KdNode<D>>) -> Self {
        NearestSearch {
            search: Search::new(root),
        }
    }

    /// The point in the tree nearest to `query`.
    pub fn nearest(&self, query: &Point) -> Option<Point> {
        self.nearest_pair(query).map(|pair| *pair.point2())
    }

    /// The search point, its nearest neighbour and their separation.
    pub fn nearest_pair(&self, query: &Point) -> Option<ResultPair<'t, D>> {
        nearest(self.search.root(), query, &AnyPoint)
    }
}

impl<'t, D> Deref for NearestSearch<'t, D> {
    type Target = Search<'t, D>;

    fn deref(&self) -> &Self::Target {
        &self.search
    }
}

/// Nearest neighbour search that never reports the search point itself.
#[derive(Debug)]
pub struct NearestNonIdenticalSearch<'t, D> {
    search: Search<'t, D>,
}

impl<'t, D> NearestNonIdenticalSearch<'t, D> {
    pub fn new(root: Option<&'t KdNode<D>>) -> Self {
        NearestNonIdenticalSearch {
            search: Search::new(root),
        }
    }

    /// The point nearest to `query` that is not `query` itself.
    pub fn nearest(&self, query: &Point) -> Option<Point> {
        self.nearest_pair(query).map(|pair| *pair.point2())
    }

    /// Pair form of [`nearest`](Self::nearest).
    pub fn nearest_pair(&self, query: &Point) -> Option<ResultPair<'t, D>> {
        nearest(self.search.root(), query, &NotIdentical)
    }
}

impl<'t, D> Deref for NearestNonIdenticalSearch<'t, D> {
    type Target = Search<'t, D>;

    fn deref(&self) -> &Self::Target {
        &self.search
    }
}

/// Nearest neighbour search that skips every point of an exclusion set.
#[derive(Debug)]
pub struct NearestNotInSearch<'t, D> {
    search: Search<'t, D>,
}

impl<'t, D> NearestNotInSearch<'t, D> {
    pub fn new(root: Option<&'t KdNode<D>>) -> Self {
        NearestNotInSearch {
            search: Search::new(root),
        }
    }

    /// The point nearest to `query` that is not in `exclude`.
    pub fn nearest<S>(&self, query: &Point, exclude: &S) -> Option<Point>
    where
        S: PointSet + ?Sized,
    {
        self.nearest_pair(query, exclude).map(|pair| *pair.point2())
    }

    /// Pair form of [`nearest`](Self::nearest).
    pub fn nearest_pair<S>(&self, query: &Point, exclude: &S) -> Option<ResultPair<'t, D>>
    where
        S: PointSet + ?Sized,
    {
        nearest(self.search.root(), query, &NotIn(exclude))
    }

    /// For every member of `cluster`, in iteration order, the nearest point
    /// outside the cluster.
    pub fn nearest_pairs(&self, cluster: &Cluster) -> Vec<Option<ResultPair<'t, D>>> {
        cluster
            .iter()
            .map(|member| self.nearest_pair(member, cluster))
            .collect()
    }
}

impl<'t, D> Deref for NearestNotInSearch<'t, D> {
    type Target = Search<'t, D>;

    fn deref(&self) -> &Self::Target {
        &self.search
    }
}

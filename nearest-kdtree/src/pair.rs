use std::cmp::Ordering;
use std::fmt;

use crate::geometry::Point;
use crate::node::KdNode;

/// Two points, the distance between them and, optionally, the tree nodes
/// the points came from.
///
/// `point1` is the point searched for and `point2` the neighbour found. The
/// distance is fixed at construction. Each node reference can be attached
/// once; later attempts leave the first value in place.
pub struct ResultPair<'t, D = ()> {
    point1: Point,
    point2: Point,
    distance: f64,
    node1: Option<&'t KdNode<D>>,
    node2: Option<&'t KdNode<D>>,
}

impl<'t, D> ResultPair<'t, D> {
    /// Creates a pair with a precomputed distance.
    pub fn new(point1: Point, point2: Point, distance: f64) -> Self {
        ResultPair {
            point1,
            point2,
            distance,
            node1: None,
            node2: None,
        }
    }

    /// Creates a pair and computes the distance between the two points.
    pub fn between(point1: Point, point2: Point) -> Self {
        ResultPair::new(point1, point2, point1.distance(&point2))
    }

    #[inline]
    pub fn point1(&self) -> &Point {
        &self.point1
    }

    #[inline]
    pub fn point2(&self) -> &Point {
        &self.point2
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The node `point1` belongs to, if it was attached.
    #[inline]
    pub fn node1(&self) -> Option<&'t KdNode<D>> {
        self.node1
    }

    /// The node `point2` belongs to, if it was attached.
    #[inline]
    pub fn node2(&self) -> Option<&'t KdNode<D>> {
        self.node2
    }

    /// Attaches the node of `point1`. Ignored if one is already attached.
    pub fn set_node1(&mut self, node: &'t KdNode<D>) {
        if self.node1.is_none() {
            self.node1 = Some(node);
        }
    }

    /// Attaches the node of `point2`. Ignored if one is already attached.
    pub fn set_node2(&mut self, node: &'t KdNode<D>) {
        if self.node2.is_none() {
            self.node2 = Some(node);
        }
    }

    /// Orders pairs by separation distance.
    pub fn compare_distance(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

impl<D> Clone for ResultPair<'_, D> {
    fn clone(&self) -> Self {
        ResultPair {
            point1: self.point1,
            point2: self.point2,
            distance: self.distance,
            node1: self.node1,
            node2: self.node2,
        }
    }
}

impl<D> fmt::Debug for ResultPair<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultPair")
            .field("point1", &self.point1)
            .field("point2", &self.point2)
            .field("distance", &self.distance)
            .field("node1", &self.node1.map(|n| n.point()))
            .field("node2", &self.node2.map(|n| n.point()))
            .finish()
    }
}

impl<D> fmt::Display for ResultPair<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} [{}]", self.point1, self.point2, self.distance)
    }
}

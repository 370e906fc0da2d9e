//! Tree nodes and splitting axes.

use std::fmt;

use crate::geometry::Point;

/// The coordinate dimension a node splits its subtree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Axis used at a given tree level: X on even levels, Y on odd levels.
    #[inline]
    pub fn from_level(level: usize) -> Axis {
        if level % 2 == 0 {
            Axis::X
        } else {
            Axis::Y
        }
    }

    /// The other axis.
    #[inline]
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Selects the coordinate of `p` along this axis.
    #[inline]
    pub fn ordinate(self, p: &Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

/// A node of a [`KdTree`](crate::KdTree).
///
/// Each node exclusively owns its subtrees. The point, axis and payload are
/// fixed at creation; only the duplicate counter changes afterwards, and a
/// child slot can be filled once but never replaced.
pub struct KdNode<D = ()> {
    point: Point,
    axis: Axis,
    split_value: f64,
    count: usize,
    data: Option<D>,
    left: Option<Box<KdNode<D>>>,
    right: Option<Box<KdNode<D>>>,
}

impl<D> KdNode<D> {
    pub(crate) fn new(point: Point, data: Option<D>, axis: Axis) -> Self {
        KdNode {
            point,
            axis,
            split_value: axis.ordinate(&point),
            count: 1,
            data,
            left: None,
            right: None,
        }
    }

    /// The point stored in this node.
    #[inline]
    pub fn point(&self) -> &Point {
        &self.point
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.point.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.point.y
    }

    /// The splitting axis of this node.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The node's own ordinate along its splitting axis.
    #[inline]
    pub fn split_value(&self) -> f64 {
        self.split_value
    }

    /// The ordinate of `p` along this node's splitting axis.
    #[inline]
    pub fn split_value_of(&self, p: &Point) -> f64 {
        self.axis.ordinate(p)
    }

    /// Returns the point on this node's splitting line closest to `p`.
    ///
    /// The distance from `p` to the projection is a lower bound on the
    /// distance from `p` to anything on the far side of the split.
    pub fn project_point(&self, p: &Point) -> Point {
        match self.axis {
            Axis::X => Point::new(self.split_value, p.y),
            Axis::Y => Point::new(p.x, self.split_value),
        }
    }

    /// Number of insertions this node has absorbed (at least 1).
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// True if more than one insertion snapped onto this node.
    #[inline]
    pub fn is_repeated(&self) -> bool {
        self.count > 1
    }

    pub(crate) fn increment(&mut self) {
        self.count += 1;
    }

    /// The payload attached when the node was inserted, if any.
    #[inline]
    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    #[inline]
    pub fn left(&self) -> Option<&KdNode<D>> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&KdNode<D>> {
        self.right.as_deref()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Attaches a left child. Returns false if one is already attached.
    pub(crate) fn set_left(&mut self, node: KdNode<D>) -> bool {
        attach(&mut self.left, node)
    }

    /// Attaches a right child. Returns false if one is already attached.
    pub(crate) fn set_right(&mut self, node: KdNode<D>) -> bool {
        attach(&mut self.right, node)
    }

    pub(crate) fn left_slot(&mut self) -> &mut Option<Box<KdNode<D>>> {
        &mut self.left
    }

    pub(crate) fn right_slot(&mut self) -> &mut Option<Box<KdNode<D>>> {
        &mut self.right
    }
}

fn attach<D>(slot: &mut Option<Box<KdNode<D>>>, node: KdNode<D>) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(Box::new(node));
    true
}

impl<D: fmt::Debug> fmt::Debug for KdNode<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KdNode")
            .field("point", &self.point)
            .field("axis", &self.axis)
            .field("count", &self.count)
            .field("data", &self.data)
            .field("left", &self.left.as_ref().map(|n| n.point))
            .field("right", &self.right.as_ref().map(|n| n.point))
            .finish()
    }
}

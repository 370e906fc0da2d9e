//! Two-dimensional KD-tree with snapping insertion.
//!
//! Points closer than the tree's tolerance to a node met while descending are
//! not stored twice: the existing node's counter is incremented instead. A
//! tree can also be bulk loaded from a point set, which produces a tree
//! balanced by median at every level regardless of input order.

use log::debug;

use crate::bounding_box::BoundingBox;
use crate::config::{validate_tolerance, KdTreeConfig};
use crate::errors::KdTreeResult;
use crate::geometry::{compare_ordinate, Point};
use crate::iter::{KdTreeIter, PointIter};
use crate::node::{Axis, KdNode};

/// A 2-D KD-tree of points with optional payloads of type `D`.
#[derive(Debug)]
pub struct KdTree<D = ()> {
    root: Option<Box<KdNode<D>>>,
    tolerance: f64,
    size: usize,
    node_count: usize,
}

impl<D> Default for KdTree<D> {
    fn default() -> Self {
        KdTree::new()
    }
}

impl<D> KdTree<D> {
    /// Creates an empty tree with a snap tolerance of 0.0, so distinct
    /// points are never snapped.
    pub fn new() -> Self {
        KdTree {
            root: None,
            tolerance: 0.0,
            size: 0,
            node_count: 0,
        }
    }

    /// Creates an empty tree that treats points closer than `tolerance` to
    /// an existing node as that node.
    ///
    /// # Errors
    /// Returns an error if `tolerance` is negative or NaN.
    pub fn with_tolerance(tolerance: f64) -> KdTreeResult<Self> {
        validate_tolerance(tolerance)?;
        Ok(KdTree {
            tolerance,
            ..KdTree::new()
        })
    }

    /// Creates an empty tree using the tolerance from `config`.
    pub fn with_config(config: &KdTreeConfig) -> Self {
        KdTree {
            tolerance: config.tolerance(),
            ..KdTree::new()
        }
    }

    /// Builds a balanced tree from `points`.
    ///
    /// Exact duplicates are removed before building. The resulting
    /// [`size`](Self::size) is the length of the input including duplicates,
    /// while [`node_count`](Self::node_count) is the number of distinct points.
    pub fn load(points: &[Point]) -> Self {
        let mut unique = points.to_vec();
        unique.sort();
        unique.dedup();

        debug!(
            "Bulk loading kd-tree from {} points ({} distinct)",
            points.len(),
            unique.len()
        );

        let node_count = unique.len();
        KdTree {
            root: make_tree(&mut unique, 0).map(Box::new),
            tolerance: 0.0,
            size: points.len(),
            node_count,
        }
    }

    /// Inserts a point without payload. See [`insert`](Self::insert).
    pub fn insert_point(&mut self, p: Point) -> &KdNode<D> {
        self.insert_entry(p, None)
    }

    /// Inserts a point carrying `data`.
    ///
    /// Returns the new node, or the existing node the point snapped onto.
    /// Every node on the insertion path is a snap candidate, the root
    /// included.
    /// The two cases can be told apart with [`KdNode::is_repeated`]: an
    /// absorbed insertion always leaves the returned node with a count above 1.
    pub fn insert(&mut self, p: Point, data: D) -> &KdNode<D> {
        self.insert_entry(p, Some(data))
    }

    fn insert_entry(&mut self, p: Point, data: Option<D>) -> &KdNode<D> {
        let tolerance = self.tolerance;
        self.size += 1;

        let mut current: &mut KdNode<D> = match &mut self.root {
            slot @ None => {
                self.node_count += 1;
                return slot.insert(Box::new(KdNode::new(p, data, Axis::X)));
            }
            Some(root) => &mut **root,
        };

        if p.distance(current.point()) < tolerance {
            current.increment();
            return current;
        }

        // cut the plane left-right, then top-bottom, alternating by depth
        let mut axis = Axis::X;
        loop {
            debug_assert_eq!(current.axis(), axis, "stored axis disagrees with depth");
            let is_less_than = axis.ordinate(&p) < axis.ordinate(current.point());
            let slot = if is_less_than {
                current.left_slot()
            } else {
                current.right_slot()
            };

            match slot {
                Some(child) => {
                    if p.distance(child.point()) < tolerance {
                        child.increment();
                        return child;
                    }
                    current = &mut **child;
                }
                None => {
                    self.node_count += 1;
                    return slot.insert(Box::new(KdNode::new(p, data, axis.next())));
                }
            }
            axis = axis.next();
        }
    }

    /// Returns every node whose point lies inside `rect`, in traversal order.
    pub fn query(&self, rect: &BoundingBox) -> Vec<&KdNode<D>> {
        let mut result = Vec::new();
        self.query_into(rect, &mut result);
        result
    }

    /// Same as [`query`](Self::query) but accumulates into `result`.
    /// A rectangle with `min > max` on either axis contains nothing.
    pub fn query_into<'a>(&'a self, rect: &BoundingBox, result: &mut Vec<&'a KdNode<D>>) {
        if !rect.is_valid() {
            return;
        }
        query_node(self.root(), rect, Axis::X, result);
    }

    /// The root node, or `None` for an empty tree.
    #[inline]
    pub fn root(&self) -> Option<&KdNode<D>> {
        self.root.as_deref()
    }

    /// Number of logical insertions, snapped duplicates included.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct nodes in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Depth-first (left, node, right) iterator over the nodes.
    pub fn iter(&self) -> KdTreeIter<'_, D> {
        KdTreeIter::new(self.root())
    }

    /// Depth-first iterator over the stored points.
    pub fn points(&self) -> PointIter<'_, D> {
        PointIter::new(self.iter())
    }
}

impl<'a, D> IntoIterator for &'a KdTree<D> {
    type Item = &'a KdNode<D>;
    type IntoIter = KdTreeIter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn query_node<'a, D>(
    node: Option<&'a KdNode<D>>,
    rect: &BoundingBox,
    axis: Axis,
    result: &mut Vec<&'a KdNode<D>>,
) {
    let Some(node) = node else {
        return;
    };

    let (min, max) = rect.range(axis);
    let discriminant = axis.ordinate(node.point());
    // bulk loading can leave points equal to the split value on either side
    let search_left = min <= discriminant;
    let search_right = discriminant <= max;

    if search_left {
        query_node(node.left(), rect, axis.next(), result);
    }
    if rect.contains_point(node.point()) {
        result.push(node);
    }
    if search_right {
        query_node(node.right(), rect, axis.next(), result);
    }
}

/// Recursively builds a balanced subtree from `points`.
///
/// The slice is sorted on the axis of `level`, its median becomes the subtree
/// root and the two halves become its children. Slices of three or fewer
/// points are laid out directly. The sort is stable, so the outcome only
/// depends on the incoming order of points that tie on the current axis.
pub(crate) fn make_tree<D>(points: &mut [Point], level: usize) -> Option<KdNode<D>> {
    let axis = Axis::from_level(level);
    points.sort_by(|a, b| compare_ordinate(axis.ordinate(a), axis.ordinate(b)));

    match points.len() {
        0 => None,
        1 => Some(KdNode::new(points[0], None, axis)),
        2 => {
            let mut middle = KdNode::new(points[1], None, axis);
            middle.set_left(KdNode::new(points[0], None, axis.next()));
            Some(middle)
        }
        3 => {
            let mut middle = KdNode::new(points[1], None, axis);
            middle.set_left(KdNode::new(points[0], None, axis.next()));
            middle.set_right(KdNode::new(points[2], None, axis.next()));
            Some(middle)
        }
        len => {
            let median = len / 2;
            let mut middle = KdNode::new(points[median], None, axis);
            let (left, rest) = points.split_at_mut(median);
            if let Some(node) = make_tree(left, level + 1) {
                middle.set_left(node);
            }
            if let Some(node) = make_tree(&mut rest[1..], level + 1) {
                middle.set_right(node);
            }
            Some(middle)
        }
    }
}

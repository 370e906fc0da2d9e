//! Depth-first iteration over a KD-tree.

use crate::geometry::Point;
use crate::node::KdNode;

/// Depth-first (left, node, right) iterator over the nodes of a tree.
///
/// Every node on the way down a left spine is pushed onto a stack; popping a
/// node yields it and pushes the left spine of its right child. A new
/// iterator created from the same root starts over.
#[derive(Debug)]
pub struct KdTreeIter<'a, D> {
    stack: Vec<&'a KdNode<D>>,
}

impl<'a, D> KdTreeIter<'a, D> {
    pub fn new(root: Option<&'a KdNode<D>>) -> Self {
        let mut iter = KdTreeIter { stack: Vec::new() };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut current: Option<&'a KdNode<D>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left();
        }
    }
}

impl<'a, D> Iterator for KdTreeIter<'a, D> {
    type Item = &'a KdNode<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.descend(current.right());
        Some(current)
    }
}

/// Iterator over the points of a tree, in the same order as [`KdTreeIter`].
#[derive(Debug)]
pub struct PointIter<'a, D> {
    nodes: KdTreeIter<'a, D>,
}

impl<'a, D> PointIter<'a, D> {
    pub fn new(nodes: KdTreeIter<'a, D>) -> Self {
        PointIter { nodes }
    }
}

impl<D> Iterator for PointIter<'_, D> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        self.nodes.next().map(|node| *node.point())
    }
}

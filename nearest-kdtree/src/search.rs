//! Traversal logic shared by every search strategy.
//!
//! Descent compares the search point against each node's stored axis and
//! split value. When the search point lies exactly on a node's splitting
//! line, a matching point may sit in either subtree, so both are traversed:
//! the right subtree recursively, then the left one by continuing the loop.

use crate::geometry::Point;
use crate::node::KdNode;
use crate::visitor::{NodeCollector, NodeVisitor};

/// Search helper bound to the root of a tree.
#[derive(Debug)]
pub struct Search<'t, D> {
    root: Option<&'t KdNode<D>>,
}

impl<D> Clone for Search<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Search<'_, D> {}

impl<'t, D> Search<'t, D> {
    pub fn new(root: Option<&'t KdNode<D>>) -> Self {
        Search { root }
    }

    #[inline]
    pub fn root(&self) -> Option<&'t KdNode<D>> {
        self.root
    }

    /// Returns every node visited while descending towards `p`, from the
    /// root down to the leaves. The point is not expected to be in the tree,
    /// and descent does not stop if it is.
    pub fn path(&self, p: &Point) -> Vec<&'t KdNode<D>> {
        let mut collector = NodeCollector::new();
        traverse(self.root, p, &mut collector);
        collector.into_items()
    }

    /// Returns the last node visited while descending towards `p`.
    pub fn find_leaf(&self, p: &Point) -> Option<&'t KdNode<D>> {
        self.path(p).last().copied()
    }

    /// Returns true if a node holds exactly `p`.
    pub fn contains(&self, p: &Point) -> bool {
        traverse_find(self.root, p)
    }

    /// Returns the path from the root to the node holding `p`.
    ///
    /// The full descent path is trimmed from its tail until the last node
    /// holds `p`. The result is empty if `p` is not in the tree.
    pub fn coordinate_path(&self, p: &Point) -> Vec<&'t KdNode<D>> {
        let mut path = self.path(p);
        while let Some(last) = path.last() {
            if last.point().equals_2d(p) {
                break;
            }
            path.pop();
        }
        path
    }
}

/// Descends from `start` towards `p`, showing each node to `visitor`.
///
/// Never stops early: the walk always reaches the bottom of the tree, and on
/// a tie with a node's split value both of its subtrees are walked.
pub fn traverse<'t, D, V>(start: Option<&'t KdNode<D>>, p: &Point, visitor: &mut V)
where
    V: NodeVisitor<'t, D> + ?Sized,
{
    let mut current = start;
    while let Some(node) = current {
        visitor.visit_node(node);

        let test = node.split_value_of(p);
        let split = node.split_value();
        if test < split {
            current = node.left();
        } else if test > split {
            current = node.right();
        } else {
            traverse(node.right(), p, visitor);
            current = node.left();
        }
    }
}

/// Same descent as [`traverse`], returning as soon as a node holding exactly
/// `p` is met.
pub fn traverse_find<D>(start: Option<&KdNode<D>>, p: &Point) -> bool {
    let mut current = start;
    while let Some(node) = current {
        if node.point().equals_2d(p) {
            return true;
        }

        let test = node.split_value_of(p);
        let split = node.split_value();
        if test < split {
            current = node.left();
        } else if test > split {
            current = node.right();
        } else {
            if traverse_find(node.right(), p) {
                return true;
            }
            current = node.left();
        }
    }
    false
}

/// Returns the child of `node` that a descent towards `p` does not take.
///
/// `None` on a tie, because [`traverse`] already walked both children.
pub fn other_child<'t, D>(node: &'t KdNode<D>, p: &Point) -> Option<&'t KdNode<D>> {
    let test = node.split_value_of(p);
    let split = node.split_value();
    if test < split {
        node.right()
    } else if test > split {
        node.left()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdtree::KdTree;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn points(nodes: &[&KdNode]) -> Vec<Point> {
        nodes.iter().map(|n| *n.point()).collect()
    }

    /// Root (5,5) on X; left (2,2) and right (8,8) on Y; (1,9) and (9,1) below.
    fn sample() -> KdTree {
        let mut tree = KdTree::new();
        for (x, y) in [(5.0, 5.0), (2.0, 2.0), (8.0, 8.0), (1.0, 9.0), (9.0, 1.0)] {
            tree.insert_point(p(x, y));
        }
        tree
    }

    #[test]
    fn test_path_descends_to_leaf() {
        let tree = sample();
        let search = Search::new(tree.root());
        assert_eq!(
            points(&search.path(&p(1.0, 8.0))),
            vec![p(5.0, 5.0), p(2.0, 2.0), p(1.0, 9.0)]
        );
        assert_eq!(search.find_leaf(&p(9.5, 0.0)).map(|n| *n.point()), Some(p(9.0, 1.0)));
    }

    #[test]
    fn test_path_visits_both_sides_on_tie() {
        let tree = sample();
        let search = Search::new(tree.root());
        // x == 5 ties with the root: the right subtree is walked first, then the left
        assert_eq!(
            points(&search.path(&p(5.0, 0.0))),
            vec![p(5.0, 5.0), p(8.0, 8.0), p(9.0, 1.0), p(2.0, 2.0)]
        );
    }

    #[test]
    fn test_contains() {
        let tree = sample();
        let search = Search::new(tree.root());
        for (x, y) in [(5.0, 5.0), (2.0, 2.0), (8.0, 8.0), (1.0, 9.0), (9.0, 1.0)] {
            assert!(search.contains(&p(x, y)), "({}, {}) should be found", x, y);
        }
        assert!(!search.contains(&p(5.0, 6.0)));
        assert!(!search.contains(&p(0.0, 0.0)));
    }

    #[test]
    fn test_contains_across_tie() {
        // (1,5) goes right of the root on insertion; the search tie on x = 1
        // has to look at both sides to find it
        let mut tree: KdTree = KdTree::new();
        tree.insert_point(p(1.0, 0.0));
        tree.insert_point(p(1.0, 5.0));
        tree.insert_point(p(0.0, 3.0));
        let search = Search::new(tree.root());
        assert!(search.contains(&p(1.0, 5.0)));
        assert!(search.contains(&p(0.0, 3.0)));
    }

    #[test]
    fn test_coordinate_path() {
        let tree = sample();
        let search = Search::new(tree.root());
        assert_eq!(
            points(&search.coordinate_path(&p(2.0, 2.0))),
            vec![p(5.0, 5.0), p(2.0, 2.0)]
        );
        assert!(search.coordinate_path(&p(3.0, 3.0)).is_empty());
    }

    #[test]
    fn test_other_child() {
        let tree = sample();
        let root = tree.root().unwrap();
        assert_eq!(other_child(root, &p(1.0, 0.0)).map(|n| *n.point()), Some(p(8.0, 8.0)));
        assert_eq!(other_child(root, &p(7.0, 0.0)).map(|n| *n.point()), Some(p(2.0, 2.0)));
        assert!(other_child(root, &p(5.0, 0.0)).is_none());
    }

    #[test]
    fn test_traverse_with_closure() {
        let tree = sample();
        let mut seen = 0;
        traverse(tree.root(), &p(9.0, 0.0), &mut |_: &KdNode| seen += 1);
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_empty_root() {
        let search: Search<'_, ()> = Search::new(None);
        assert!(search.path(&p(0.0, 0.0)).is_empty());
        assert!(search.find_leaf(&p(0.0, 0.0)).is_none());
        assert!(!search.contains(&p(0.0, 0.0)));
    }
}

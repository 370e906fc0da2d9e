use crate::node::KdNode;

/// A callback invoked once per visited node.
///
/// Implemented for every `FnMut(&KdNode<D>)` closure, so most callers pass a
/// closure. [`NodeCollector`] gathers the visited nodes in order.
pub trait NodeVisitor<'a, D> {
    fn visit_node(&mut self, node: &'a KdNode<D>);
}

impl<'a, D: 'a, F> NodeVisitor<'a, D> for F
where
    F: FnMut(&'a KdNode<D>),
{
    fn visit_node(&mut self, node: &'a KdNode<D>) {
        self(node)
    }
}

/// Visitor that records every node it is shown.
#[derive(Debug)]
pub struct NodeCollector<'a, D> {
    items: Vec<&'a KdNode<D>>,
}

impl<D> Default for NodeCollector<'_, D> {
    fn default() -> Self {
        NodeCollector { items: Vec::new() }
    }
}

impl<'a, D> NodeCollector<'a, D> {
    pub fn new() -> Self {
        NodeCollector::default()
    }

    pub fn items(&self) -> &[&'a KdNode<D>] {
        &self.items
    }

    pub fn into_items(self) -> Vec<&'a KdNode<D>> {
        self.items
    }
}

impl<'a, D> NodeVisitor<'a, D> for NodeCollector<'a, D> {
    fn visit_node(&mut self, node: &'a KdNode<D>) {
        self.items.push(node);
    }
}

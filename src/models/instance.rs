//! Problem instance: the node set a plan is computed from.

use std::collections::BTreeMap;

use super::{Node, NodeId};
use crate::distance::GeoPoint;
use crate::error::RoutingError;

/// Mapping from node id to node, iterated in ascending id order.
///
/// The instance is the single source of truth for positions and demands.
/// Routes only reference node ids, so anything derived from a route is
/// recomputed against an instance.
///
/// # Examples
///
/// ```
/// use u_depot_routing::distance::GeoPoint;
/// use u_depot_routing::models::{Node, ProblemInstance};
///
/// let instance = ProblemInstance::from_nodes([
///     Node::customer(10, "Shop A", GeoPoint::new(40.4168, -3.7038), 200.0),
///     Node::depot(1, "North", GeoPoint::new(40.45, -3.70), 2),
/// ])
/// .unwrap();
///
/// assert_eq!(instance.depot_ids(), vec![1]);
/// assert_eq!(instance.customer_ids(), vec![10]);
/// assert_eq!(instance.total_demand(), 200.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemInstance {
    nodes: BTreeMap<NodeId, Node>,
}

impl ProblemInstance {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an instance from nodes, rejecting invalid or duplicate ones.
    pub fn from_nodes<I>(nodes: I) -> Result<Self, RoutingError>
    where
        I: IntoIterator<Item = Node>,
    {
        let mut instance = Self::new();
        for node in nodes {
            instance.insert(node)?;
        }
        Ok(instance)
    }

    /// Adds a node.
    ///
    /// # Errors
    ///
    /// [`RoutingError::DuplicateNode`] if the id is taken, or
    /// [`RoutingError::InvalidNode`] if the node fails validation.
    pub fn insert(&mut self, node: Node) -> Result<(), RoutingError> {
        node.validate()?;
        if self.nodes.contains_key(&node.id()) {
            return Err(RoutingError::DuplicateNode { id: node.id() });
        }
        self.nodes.insert(node.id(), node);
        Ok(())
    }

    /// Returns the node with the given id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns `true` if a node with this id exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes, ascending by id.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Depots, ascending by id.
    pub fn depots(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|n| n.is_depot())
    }

    /// Customers, ascending by id.
    pub fn customers(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|n| n.is_customer())
    }

    /// Depot ids, ascending.
    pub fn depot_ids(&self) -> Vec<NodeId> {
        self.depots().map(Node::id).collect()
    }

    /// Customer ids, ascending.
    pub fn customer_ids(&self) -> Vec<NodeId> {
        self.customers().map(Node::id).collect()
    }

    /// Number of depots.
    pub fn num_depots(&self) -> usize {
        self.depots().count()
    }

    /// Number of customers.
    pub fn num_customers(&self) -> usize {
        self.customers().count()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the instance has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Demand of a node (zero for depots), or `None` if absent.
    pub fn demand(&self, id: NodeId) -> Option<f64> {
        self.get(id).map(Node::demand)
    }

    /// Position of a node, or `None` if absent.
    pub fn position(&self, id: NodeId) -> Option<GeoPoint> {
        self.get(id).map(Node::position)
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> f64 {
        self.customers().map(Node::demand).sum()
    }

    /// Sum of declared fleet sizes over all depots.
    pub fn declared_fleet(&self) -> u64 {
        self.depots()
            .filter_map(Node::fleet_size)
            .map(u64::from)
            .sum()
    }

    /// Returns a copy with `f` applied to every node.
    ///
    /// `f` must preserve ids and validity; it is used for data repair.
    pub(crate) fn map_nodes<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Node) -> Node,
    {
        let nodes = self
            .nodes
            .values()
            .map(|node| {
                let mapped = f(node);
                debug_assert_eq!(mapped.id(), node.id());
                (node.id(), mapped)
            })
            .collect();
        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProblemInstance {
        ProblemInstance::from_nodes([
            Node::depot(2, "South", GeoPoint::new(40.43, -3.71), 2),
            Node::depot(1, "North", GeoPoint::new(40.45, -3.70), 1),
            Node::customer(12, "C", GeoPoint::new(40.4285, -3.6950), 250.0),
            Node::customer(10, "A", GeoPoint::new(40.4168, -3.7038), 200.0),
            Node::customer(11, "B", GeoPoint::new(40.4233, -3.7000), 300.0),
        ])
        .expect("valid instance")
    }

    #[test]
    fn test_ascending_order() {
        let inst = sample();
        assert_eq!(inst.depot_ids(), vec![1, 2]);
        assert_eq!(inst.customer_ids(), vec![10, 11, 12]);
        let all: Vec<NodeId> = inst.nodes().map(Node::id).collect();
        assert_eq!(all, vec![1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_counts_and_totals() {
        let inst = sample();
        assert_eq!(inst.len(), 5);
        assert_eq!(inst.num_depots(), 2);
        assert_eq!(inst.num_customers(), 3);
        assert_eq!(inst.total_demand(), 750.0);
        assert_eq!(inst.declared_fleet(), 3);
    }

    #[test]
    fn test_lookup() {
        let inst = sample();
        assert_eq!(inst.demand(11), Some(300.0));
        assert_eq!(inst.demand(1), Some(0.0));
        assert_eq!(inst.demand(99), None);
        assert!(inst.position(10).is_some());
        assert!(!inst.contains(99));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut inst = sample();
        let err = inst
            .insert(Node::customer(10, "dup", GeoPoint::new(40.0, -3.0), 200.0))
            .unwrap_err();
        assert!(matches!(err, RoutingError::DuplicateNode { id: 10 }));
        assert_eq!(inst.demand(10), Some(200.0));
    }

    #[test]
    fn test_invalid_rejected() {
        let result = ProblemInstance::from_nodes([Node::customer(
            5,
            "x",
            GeoPoint::new(0.0, 0.0),
            -3.0,
        )]);
        assert!(matches!(result, Err(RoutingError::InvalidNode { id: 5, .. })));
    }

    #[test]
    fn test_empty() {
        let inst = ProblemInstance::new();
        assert!(inst.is_empty());
        assert_eq!(inst.total_demand(), 0.0);
        assert_eq!(inst.declared_fleet(), 0);
    }

    #[test]
    fn test_map_nodes_leaves_source_untouched() {
        let inst = sample();
        let doubled = inst.map_nodes(|n| n.clone().with_demand(n.demand() * 2.0));
        assert_eq!(doubled.total_demand(), 1500.0);
        assert_eq!(inst.total_demand(), 750.0);
    }
}

//! Nearest-depot clustering.
//!
//! Every customer is assigned to the depot closest to it by haversine
//! distance. Ties go to the depot with the smallest id, so assignments are
//! reproducible.

use std::collections::BTreeMap;

use crate::distance::DistanceMatrix;
use crate::error::RoutingError;
use crate::models::{NodeId, ProblemInstance};

/// Customers grouped by the depot that serves them.
///
/// Depots iterate in ascending id order; each depot's customers keep the
/// instance's ascending id order, not distance order. Depots with no
/// customers are kept with an empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepotClusters {
    clusters: BTreeMap<NodeId, Vec<NodeId>>,
}

impl DepotClusters {
    /// Depot ids, ascending.
    pub fn depots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.clusters.keys().copied()
    }

    /// `(depot, customers)` pairs, ascending by depot.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[NodeId])> {
        self.clusters.iter().map(|(&d, cs)| (d, cs.as_slice()))
    }

    /// Customers assigned to `depot`; empty for unknown depots.
    pub fn customers_of(&self, depot: NodeId) -> &[NodeId] {
        self.clusters.get(&depot).map(Vec::as_slice).unwrap_or_default()
    }

    /// Depot a customer was assigned to.
    pub fn depot_of(&self, customer: NodeId) -> Option<NodeId> {
        self.clusters
            .iter()
            .find(|(_, cs)| cs.contains(&customer))
            .map(|(&d, _)| d)
    }

    /// Number of depots.
    pub fn num_depots(&self) -> usize {
        self.clusters.len()
    }

    /// Number of assigned customers.
    pub fn num_customers(&self) -> usize {
        self.clusters.values().map(Vec::len).sum()
    }
}

/// Assigns each customer of `instance` to its nearest depot.
///
/// `distances` must cover every node of `instance`.
///
/// # Errors
///
/// [`RoutingError::NoDepotsAvailable`] if the instance has no depot.
///
/// # Examples
///
/// ```
/// use u_depot_routing::constructive::cluster_by_nearest_depot;
/// use u_depot_routing::distance::{DistanceMatrix, GeoPoint};
/// use u_depot_routing::models::{Node, ProblemInstance};
///
/// let instance = ProblemInstance::from_nodes([
///     Node::depot(1, "west", GeoPoint::new(0.0, 0.0), 1),
///     Node::depot(2, "east", GeoPoint::new(0.0, 1.0), 1),
///     Node::customer(10, "a", GeoPoint::new(0.0, 0.1), 200.0),
///     Node::customer(11, "b", GeoPoint::new(0.0, 0.9), 200.0),
/// ])
/// .unwrap();
/// let dm = DistanceMatrix::from_instance(&instance);
///
/// let clusters = cluster_by_nearest_depot(&instance, &dm).unwrap();
/// assert_eq!(clusters.customers_of(1), &[10]);
/// assert_eq!(clusters.customers_of(2), &[11]);
/// ```
pub fn cluster_by_nearest_depot(
    instance: &ProblemInstance,
    distances: &DistanceMatrix,
) -> Result<DepotClusters, RoutingError> {
    let depots = instance.depot_ids();
    if depots.is_empty() {
        return Err(RoutingError::NoDepotsAvailable);
    }

    let mut clusters: BTreeMap<NodeId, Vec<NodeId>> =
        depots.iter().map(|&d| (d, Vec::new())).collect();

    for customer in instance.customer_ids() {
        if let Some(depot) = distances.nearest(customer, depots.iter().copied()) {
            clusters.entry(depot).or_default().push(customer);
        }
    }

    for (depot, customers) in &clusters {
        log::debug!("depot {depot} clusters {} customer(s)", customers.len());
    }

    Ok(DepotClusters { clusters })
}

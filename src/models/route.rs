//! Closed depot tours.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A single vehicle's tour: depot, customers in visiting order, depot.
///
/// The node sequence always has at least two entries (depot→depot when no
/// customer could be served). Load and distance are recorded when the route
/// is built; audit them against the live instance with
/// [`RouteEvaluator::audit`](crate::evaluation::RouteEvaluator::audit).
///
/// Serializes with the field names of the instance document
/// (`sequence`, `demand`, `distance`, `depot`, `vehicleIdx`, `capacity`).
///
/// # Examples
///
/// ```
/// use u_depot_routing::models::Route;
///
/// let mut route = Route::new(1, 0, 1000.0);
/// assert_eq!(route.sequence(), &[1, 1]);
///
/// route.push_customer(10, 200.0);
/// route.push_customer(11, 300.0);
/// assert_eq!(route.sequence(), &[1, 10, 11, 1]);
/// assert_eq!(route.customer_ids(), &[10, 11]);
/// assert_eq!(route.load(), 500.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    sequence: Vec<NodeId>,
    #[serde(rename = "demand")]
    load: f64,
    distance: f64,
    depot: NodeId,
    vehicle_idx: usize,
    capacity: f64,
}

impl Route {
    /// Creates an empty closed tour at `depot`.
    pub fn new(depot: NodeId, vehicle_idx: usize, capacity: f64) -> Self {
        Self {
            sequence: vec![depot, depot],
            load: 0.0,
            distance: 0.0,
            depot,
            vehicle_idx,
            capacity,
        }
    }

    /// Appends a customer just before the return to the depot.
    pub fn push_customer(&mut self, customer_id: NodeId, demand: f64) {
        let at = self.sequence.len().saturating_sub(1);
        self.sequence.insert(at, customer_id);
        self.load += demand;
    }

    /// Full node sequence, depot at both ends.
    pub fn sequence(&self) -> &[NodeId] {
        &self.sequence
    }

    /// Customers in visiting order (the sequence without its endpoints).
    pub fn customer_ids(&self) -> &[NodeId] {
        match self.sequence.len() {
            0..=2 => &[],
            n => &self.sequence[1..n - 1],
        }
    }

    /// Owning depot.
    pub fn depot(&self) -> NodeId {
        self.depot
    }

    /// Zero-based vehicle index within the owning depot.
    pub fn vehicle_idx(&self) -> usize {
        self.vehicle_idx
    }

    /// Capacity ceiling the route was built against.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Total demand carried.
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Total distance in kilometers, including the return leg.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Sets the total distance (used by evaluator).
    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance;
    }

    /// Number of customers visited.
    pub fn len(&self) -> usize {
        self.customer_ids().len()
    }

    /// Returns `true` if no customer is visited.
    pub fn is_empty(&self) -> bool {
        self.customer_ids().is_empty()
    }

    /// Returns `true` if the customer is on this route.
    pub fn visits(&self, customer_id: NodeId) -> bool {
        self.customer_ids().contains(&customer_id)
    }

    /// Returns `true` if the sequence starts and ends at the owning depot.
    pub fn is_closed(&self) -> bool {
        self.sequence.len() >= 2
            && self.sequence.first() == Some(&self.depot)
            && self.sequence.last() == Some(&self.depot)
    }
}

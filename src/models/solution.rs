//! Solution, depot summary and violation types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{NodeId, Route};

/// Identifier of a route within a solution, assigned 1, 2, 3, … in
/// construction order across all depots.
pub type RouteId = u32;

/// A type of problem found when auditing a route against an instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Carried demand exceeds the route's capacity.
    CapacityExceeded {
        /// Route id in the solution (0 for a standalone route).
        route_id: RouteId,
        /// Load recomputed from the instance.
        load: f64,
        /// Capacity the route was built against.
        capacity: f64,
    },
    /// The sequence does not start and end at the owning depot.
    OpenTour {
        /// Route id in the solution.
        route_id: RouteId,
    },
    /// The sequence references a node missing from the instance.
    UnknownNode {
        /// Route id in the solution.
        route_id: RouteId,
        /// Offending node id.
        node_id: NodeId,
    },
    /// A depot appears between the endpoints of a route.
    DepotMidRoute {
        /// Route id in the solution.
        route_id: RouteId,
        /// Offending depot id.
        node_id: NodeId,
    },
    /// A customer is visited more than once.
    DuplicateVisit {
        /// Customer visited twice.
        node_id: NodeId,
    },
    /// The recorded load or distance disagrees with the instance.
    StaleMeasure {
        /// Route id in the solution.
        route_id: RouteId,
        /// Recorded (load, distance).
        recorded: (f64, f64),
        /// Recomputed (load, distance).
        actual: (f64, f64),
    },
}

/// A problem found in a route or solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Demand dispatched from a depot against the capacity it used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepotSummary {
    /// Depot id.
    pub depot: NodeId,
    /// Routes leaving the depot.
    pub routes: usize,
    /// Sum of route loads.
    pub dispatched: f64,
    /// Sum of route capacities.
    pub capacity: f64,
}

/// Routes produced by one planning request plus the aggregate distance.
///
/// Serializes as `{ "routes": { "1": …, "2": … }, "totalKm": … }`, with an
/// `unserved` list only when customers were left out.
///
/// # Examples
///
/// ```
/// use u_depot_routing::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// let mut route = Route::new(1, 0, 1000.0);
/// route.push_customer(10, 200.0);
/// route.set_distance(6.5);
///
/// assert_eq!(sol.add_route(route), 1);
/// assert_eq!(sol.add_route(Route::new(2, 0, 1000.0)), 2);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 1);
/// assert!((sol.total_distance() - 6.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: BTreeMap<RouteId, Route>,
    #[serde(rename = "totalKm")]
    total_distance: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    unserved: Vec<NodeId>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route under the next sequential id and returns that id.
    pub fn add_route(&mut self, route: Route) -> RouteId {
        let id = self.routes.keys().next_back().map_or(1, |last| last + 1);
        self.total_distance += route.distance();
        self.routes.insert(id, route);
        id
    }

    /// Marks a customer as left out of every route.
    pub fn add_unserved(&mut self, customer_id: NodeId) {
        self.unserved.push(customer_id);
    }

    /// Routes keyed by id, ascending.
    pub fn routes(&self) -> &BTreeMap<RouteId, Route> {
        &self.routes
    }

    /// Returns the route with the given id.
    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(&id)
    }

    /// Routes owned by a depot, in id order.
    pub fn routes_of(&self, depot: NodeId) -> impl Iterator<Item = (RouteId, &Route)> {
        self.routes
            .iter()
            .filter(move |(_, r)| r.depot() == depot)
            .map(|(&id, r)| (id, r))
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Sum of route distances in kilometers.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Customers left out of every route, ascending.
    pub fn unserved(&self) -> &[NodeId] {
        &self.unserved
    }

    /// Number of customers left out.
    pub fn num_unserved(&self) -> usize {
        self.unserved.len()
    }

    /// Total number of customer visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.values().map(Route::len).sum()
    }

    /// Returns the route id serving a customer, if any.
    pub fn route_of(&self, customer_id: NodeId) -> Option<RouteId> {
        self.routes
            .iter()
            .find(|(_, r)| r.visits(customer_id))
            .map(|(&id, _)| id)
    }

    /// Per-depot dispatched demand and used capacity, ascending by depot.
    pub fn depot_summaries(&self) -> Vec<DepotSummary> {
        let mut by_depot: BTreeMap<NodeId, DepotSummary> = BTreeMap::new();
        for route in self.routes.values() {
            let entry = by_depot.entry(route.depot()).or_insert(DepotSummary {
                depot: route.depot(),
                routes: 0,
                dispatched: 0.0,
                capacity: 0.0,
            });
            entry.routes += 1;
            entry.dispatched += route.load();
            entry.capacity += route.capacity();
        }
        by_depot.into_values().collect()
    }
}

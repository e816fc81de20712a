//! Route evaluator that measures and audits depot tours.

use std::collections::HashSet;

use crate::distance::DistanceMatrix;
use crate::models::{
    NodeId, ProblemInstance, Route, RouteId, Solution, Violation, ViolationType,
};

const MEASURE_TOLERANCE: f64 = 1e-9;

/// Measures routes against a live instance: carried load, haversine length
/// including the return leg, and constraint checks.
///
/// # Examples
///
/// ```
/// use u_depot_routing::distance::{DistanceMatrix, GeoPoint};
/// use u_depot_routing::evaluation::RouteEvaluator;
/// use u_depot_routing::models::{Node, ProblemInstance};
///
/// let instance = ProblemInstance::from_nodes([
///     Node::depot(1, "depot", GeoPoint::new(40.45, -3.70), 1),
///     Node::customer(10, "a", GeoPoint::new(40.43, -3.70), 200.0),
///     Node::customer(11, "b", GeoPoint::new(40.41, -3.70), 300.0),
/// ])
/// .unwrap();
/// let dm = DistanceMatrix::from_instance(&instance);
///
/// let evaluator = RouteEvaluator::new(&instance, &dm);
/// let (route, violations) = evaluator.build_route(1, &[10, 11], 0, 1000.0);
/// assert_eq!(route.sequence(), &[1, 10, 11, 1]);
/// assert_eq!(route.load(), 500.0);
/// assert!(violations.is_empty());
/// assert!(evaluator.audit(&route).is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a ProblemInstance,
    distances: &'a DistanceMatrix,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given instance and its matrix.
    pub fn new(instance: &'a ProblemInstance, distances: &'a DistanceMatrix) -> Self {
        Self {
            instance,
            distances,
        }
    }

    /// Builds a closed tour from `depot` through `customer_ids` and back.
    ///
    /// Returns the route with load and distance filled in, plus any
    /// violations found. Ids unknown to the instance are skipped.
    pub fn build_route(
        &self,
        depot: NodeId,
        customer_ids: &[NodeId],
        vehicle_idx: usize,
        capacity: f64,
    ) -> (Route, Vec<Violation>) {
        let mut route = Route::new(depot, vehicle_idx, capacity);
        let mut violations = Vec::new();

        if !self.instance.contains(depot) {
            violations.push(Violation::new(ViolationType::UnknownNode {
                route_id: 0,
                node_id: depot,
            }));
        }

        for &cid in customer_ids {
            match self.instance.demand(cid) {
                Some(demand) => route.push_customer(cid, demand),
                None => violations.push(Violation::new(ViolationType::UnknownNode {
                    route_id: 0,
                    node_id: cid,
                })),
            }
        }

        route.set_distance(self.length(route.sequence()).unwrap_or(0.0));

        if route.load() > capacity {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_id: 0,
                load: route.load(),
                capacity,
            }));
        }

        (route, violations)
    }

    /// Re-measures a route against the instance and reports what is wrong
    /// with it. Violations carry `route_id` 0.
    pub fn audit(&self, route: &Route) -> Vec<Violation> {
        let mut seen = HashSet::new();
        let mut violations = Vec::new();
        self.audit_into(route, 0, &mut seen, &mut violations);
        violations
    }

    /// Audits every route of a solution, including customers served by more
    /// than one route.
    pub fn audit_solution(&self, solution: &Solution) -> Vec<Violation> {
        let mut seen = HashSet::new();
        let mut violations = Vec::new();
        for (&route_id, route) in solution.routes() {
            self.audit_into(route, route_id, &mut seen, &mut violations);
        }
        violations
    }

    /// Haversine length of a node sequence, or `None` if a node is unknown.
    pub fn length(&self, sequence: &[NodeId]) -> Option<f64> {
        sequence
            .windows(2)
            .map(|leg| self.distances.try_get(leg[0], leg[1]))
            .sum()
    }

    fn audit_into(
        &self,
        route: &Route,
        route_id: RouteId,
        seen: &mut HashSet<NodeId>,
        violations: &mut Vec<Violation>,
    ) {
        if !route.is_closed() {
            violations.push(Violation::new(ViolationType::OpenTour { route_id }));
        }
        if !self.instance.contains(route.depot()) {
            violations.push(Violation::new(ViolationType::UnknownNode {
                route_id,
                node_id: route.depot(),
            }));
        }

        let mut load = 0.0;
        for &id in route.customer_ids() {
            match self.instance.get(id) {
                None => violations.push(Violation::new(ViolationType::UnknownNode {
                    route_id,
                    node_id: id,
                })),
                Some(node) if node.is_depot() => {
                    violations.push(Violation::new(ViolationType::DepotMidRoute {
                        route_id,
                        node_id: id,
                    }))
                }
                Some(node) => {
                    load += node.demand();
                    if !seen.insert(id) {
                        violations.push(Violation::new(ViolationType::DuplicateVisit {
                            node_id: id,
                        }));
                    }
                }
            }
        }

        if load > route.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_id,
                load,
                capacity: route.capacity(),
            }));
        }

        if let Some(distance) = self.length(route.sequence()) {
            if !approx_eq(load, route.load()) || !approx_eq(distance, route.distance()) {
                violations.push(Violation::new(ViolationType::StaleMeasure {
                    route_id,
                    recorded: (route.load(), route.distance()),
                    actual: (load, distance),
                }));
            }
        }
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= MEASURE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

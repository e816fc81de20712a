//! Capacity-constrained nearest-neighbor tours, one cluster per depot.
//!
//! For each depot in ascending id order, a tour starts at the depot and
//! repeatedly moves to the nearest customer of that depot's cluster that is
//! still unserved and fits in the remaining capacity. When nothing fits, the
//! tour returns to the depot.
//!
//! There is no lookahead and no reassignment between depots: a customer that
//! no tour of its own depot can take stays unserved.
//!
//! # Complexity
//!
//! O(n²) per depot where n = cluster size.

use std::collections::HashSet;

use crate::config::FleetPolicy;
use crate::distance::DistanceMatrix;
use crate::evaluation::RouteEvaluator;
use crate::models::{Node, NodeId, ProblemInstance, Route};

use super::DepotClusters;

/// Tours built by [`nearest_neighbor_routes`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructedRoutes {
    /// Tours in construction order (depot ascending, then vehicle index).
    pub routes: Vec<Route>,
    /// Customers no tour could take, ascending.
    pub unserved: Vec<NodeId>,
}

/// Builds nearest-neighbor tours for every depot cluster.
///
/// Under [`FleetPolicy::SingleVehicle`] each visited depot gets exactly one
/// tour, possibly depot→depot. Under [`FleetPolicy::UseDeclaredFleet`] a
/// depot dispatches further tours up to its declared fleet while they still
/// serve someone. Construction stops as soon as every customer of the
/// instance is served, so later depots may get no tour at all.
///
/// `clusters` and `distances` must have been computed from `instance`.
///
/// # Examples
///
/// ```
/// use u_depot_routing::config::FleetPolicy;
/// use u_depot_routing::constructive::{cluster_by_nearest_depot, nearest_neighbor_routes};
/// use u_depot_routing::distance::{DistanceMatrix, GeoPoint};
/// use u_depot_routing::models::{Node, ProblemInstance};
///
/// let instance = ProblemInstance::from_nodes([
///     Node::depot(1, "depot", GeoPoint::new(0.0, 0.0), 1),
///     Node::customer(10, "far", GeoPoint::new(0.0, 0.03), 200.0),
///     Node::customer(11, "near", GeoPoint::new(0.0, 0.01), 200.0),
///     Node::customer(12, "mid", GeoPoint::new(0.0, 0.02), 200.0),
/// ])
/// .unwrap();
/// let dm = DistanceMatrix::from_instance(&instance);
/// let clusters = cluster_by_nearest_depot(&instance, &dm).unwrap();
///
/// let built = nearest_neighbor_routes(&instance, &clusters, &dm, 400.0, FleetPolicy::SingleVehicle);
/// assert_eq!(built.routes.len(), 1);
/// assert_eq!(built.routes[0].sequence(), &[1, 11, 12, 1]);
/// assert_eq!(built.unserved, vec![10]);
/// ```
pub fn nearest_neighbor_routes(
    instance: &ProblemInstance,
    clusters: &DepotClusters,
    distances: &DistanceMatrix,
    capacity: f64,
    fleet: FleetPolicy,
) -> ConstructedRoutes {
    let total_customers = instance.num_customers();
    let evaluator = RouteEvaluator::new(instance, distances);
    let mut served: HashSet<NodeId> = HashSet::with_capacity(total_customers);
    let mut routes = Vec::new();

    'depots: for (depot, assigned) in clusters.iter() {
        let declared = instance
            .get(depot)
            .and_then(Node::fleet_size)
            .unwrap_or(1);

        for vehicle_idx in 0..fleet.vehicles_for(declared) as usize {
            let tour = greedy_tour(instance, distances, depot, assigned, capacity, &mut served);
            if vehicle_idx > 0 && tour.is_empty() {
                break;
            }

            let (route, _) = evaluator.build_route(depot, &tour, vehicle_idx, capacity);
            routes.push(route);

            if served.len() == total_customers {
                break 'depots;
            }
        }
    }

    let unserved = instance
        .customers()
        .map(Node::id)
        .filter(|id| !served.contains(id))
        .collect();

    ConstructedRoutes { routes, unserved }
}

/// Visits the nearest unserved, fitting customer of `assigned` until none
/// fits, marking each visit in `served`.
fn greedy_tour(
    instance: &ProblemInstance,
    distances: &DistanceMatrix,
    depot: NodeId,
    assigned: &[NodeId],
    capacity: f64,
    served: &mut HashSet<NodeId>,
) -> Vec<NodeId> {
    let demand = |id: NodeId| instance.demand(id).unwrap_or(0.0);
    let mut tour = Vec::new();
    let mut current = depot;
    let mut load = 0.0;

    loop {
        let candidates = assigned
            .iter()
            .copied()
            .filter(|id| !served.contains(id) && load + demand(*id) <= capacity);

        match distances.nearest(current, candidates) {
            Some(next) => {
                served.insert(next);
                load += demand(next);
                tour.push(next);
                current = next;
            }
            None => break,
        }
    }

    tour
}

//! End-to-end route planning for one request.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. depot presence check
//! 2. fleet capacity check on declared demands
//! 3. demand normalization into a new snapshot
//! 4. nearest-depot clustering
//! 5. nearest-neighbor tours per depot
//! 6. aggregation into a [`Solution`] with routes numbered from 1
//!
//! Every step reads the normalized snapshot; the caller's instance is never
//! modified.

use crate::config::{resolve_capacity, PlannerConfig, ServicePolicy};
use crate::constructive::{cluster_by_nearest_depot, nearest_neighbor_routes};
use crate::distance::DistanceMatrix;
use crate::error::RoutingError;
use crate::evaluation::{check_fleet_capacity, FleetCapacity};
use crate::models::{ProblemInstance, Solution};
use crate::preprocessing::{normalize_demands, DemandAdjustment, NormalizedInstance};

/// Result of a successful planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    /// Routes and total distance.
    pub solution: Solution,
    /// Instance the routes were built from, with demands normalized.
    pub normalized: ProblemInstance,
    /// Demands raised to the floor, for callers that persist them.
    pub adjustments: Vec<DemandAdjustment>,
    /// Totals seen by the fleet capacity check.
    pub fleet: FleetCapacity,
}

/// Plans routes for problem instances under a fixed configuration.
///
/// # Examples
///
/// ```
/// use u_depot_routing::config::PlannerConfig;
/// use u_depot_routing::distance::GeoPoint;
/// use u_depot_routing::models::{Node, ProblemInstance};
/// use u_depot_routing::planner::RoutePlanner;
///
/// let instance = ProblemInstance::from_nodes([
///     Node::depot(1, "depot", GeoPoint::new(40.45, -3.70), 1),
///     Node::customer(10, "near", GeoPoint::new(40.423, -3.70), 200.0),
///     Node::customer(11, "far", GeoPoint::new(40.405, -3.70), 300.0),
/// ])
/// .unwrap();
///
/// let planner = RoutePlanner::new(PlannerConfig::default().with_vehicle_capacity(1000.0));
/// let outcome = planner.plan(&instance).unwrap();
///
/// let route = outcome.solution.route(1).unwrap();
/// assert_eq!(route.sequence(), &[1, 10, 11, 1]);
/// assert_eq!(route.load(), 500.0);
/// assert!((outcome.solution.total_distance() - 10.0).abs() < 0.05);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    config: PlannerConfig,
}

impl RoutePlanner {
    /// Creates a planner with the given configuration.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans routes for `instance`.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::NoDepotsAvailable`] if the instance has no depot.
    /// - [`RoutingError::InfeasibleDemand`] if declared demand exceeds the
    ///   declared fleet capacity.
    /// - [`RoutingError::PartialService`] if some customer is left unserved
    ///   and the service policy is [`ServicePolicy::Strict`].
    pub fn plan(&self, instance: &ProblemInstance) -> Result<PlanOutcome, RoutingError> {
        if instance.num_depots() == 0 {
            return Err(RoutingError::NoDepotsAvailable);
        }

        let capacity = self.config.vehicle_capacity();
        let fleet = check_fleet_capacity(instance, capacity)?;

        let NormalizedInstance {
            instance: normalized,
            adjustments,
        } = normalize_demands(instance, self.config.min_demand());

        let distances = DistanceMatrix::from_instance(&normalized);
        let clusters = cluster_by_nearest_depot(&normalized, &distances)?;
        let built = nearest_neighbor_routes(
            &normalized,
            &clusters,
            &distances,
            capacity,
            self.config.fleet_policy(),
        );

        if !built.unserved.is_empty() {
            match self.config.service_policy() {
                ServicePolicy::Strict => {
                    return Err(RoutingError::PartialService {
                        unserved: built.unserved,
                    });
                }
                ServicePolicy::Lenient => {
                    log::warn!(
                        "{} customer(s) left unserved: {:?}",
                        built.unserved.len(),
                        built.unserved
                    );
                }
            }
        }

        let mut solution = Solution::new();
        for route in built.routes {
            solution.add_route(route);
        }
        for customer in built.unserved {
            solution.add_unserved(customer);
        }

        log::info!(
            "planned {} route(s) serving {}/{} customer(s), {:.3} km",
            solution.num_routes(),
            solution.num_served(),
            normalized.num_customers(),
            solution.total_distance()
        );

        Ok(PlanOutcome {
            solution,
            normalized,
            adjustments,
            fleet,
        })
    }
}

/// Plans with the default configuration and a caller-supplied capacity.
///
/// A missing or unusable capacity is replaced by the default of 22000.
pub fn plan_routes(
    instance: &ProblemInstance,
    capacity: Option<f64>,
) -> Result<PlanOutcome, RoutingError> {
    let config = PlannerConfig::default().with_vehicle_capacity(resolve_capacity(capacity));
    RoutePlanner::new(config).plan(instance)
}

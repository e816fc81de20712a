//! Property-based tests for the route planner.
//!
//! # Invariants tested
//!
//! - **Admission:** feasible instances always plan, infeasible ones never do.
//! - **Capacity:** no route carries more than the capacity it was built with.
//! - **Closed tours:** every route starts and ends at its own depot.
//! - **Single service:** no customer appears on two routes, and every
//!   customer is either served or listed as unserved.
//! - **Clustering:** customers are only served from their nearest depot.
//! - **Normalization:** idempotent, and never lowers a demand.
//! - **Distance:** haversine is symmetric and zero for coincident points.

use std::collections::HashSet;

use proptest::prelude::*;
use u_depot_routing::config::{FleetPolicy, PlannerConfig};
use u_depot_routing::constructive::cluster_by_nearest_depot;
use u_depot_routing::distance::{haversine_km, DistanceMatrix, GeoPoint, EARTH_RADIUS_KM};
use u_depot_routing::evaluation::RouteEvaluator;
use u_depot_routing::models::{Node, ProblemInstance};
use u_depot_routing::planner::{plan_routes, RoutePlanner};
use u_depot_routing::preprocessing::normalize_demands;
use u_depot_routing::RoutingError;

/// Depots numbered from 1 and customers from 100, scattered over central Madrid.
fn instance_strategy() -> impl Strategy<Value = ProblemInstance> {
    let depots = prop::collection::vec((40.40..40.46f64, -3.72..-3.68f64, 1u32..=3), 1..=3);
    let customers =
        prop::collection::vec((40.40..40.46f64, -3.72..-3.68f64, 0.0..600.0f64), 0..=12);

    (depots, customers).prop_map(|(depots, customers)| {
        let depots = depots.into_iter().enumerate().map(|(i, (lat, lon, vehicles))| {
            Node::depot(i as u64 + 1, format!("D{}", i + 1), GeoPoint::new(lat, lon), vehicles)
        });
        let customers = customers.into_iter().enumerate().map(|(i, (lat, lon, demand))| {
            Node::customer(i as u64 + 100, format!("C{i}"), GeoPoint::new(lat, lon), demand)
        });
        ProblemInstance::from_nodes(depots.chain(customers)).expect("generated nodes are valid")
    })
}

fn fleet_policy() -> impl Strategy<Value = FleetPolicy> {
    prop_oneof![
        Just(FleetPolicy::SingleVehicle),
        Just(FleetPolicy::UseDeclaredFleet)
    ]
}

fn point() -> impl Strategy<Value = GeoPoint> {
    (-90.0..=90.0f64, -180.0..=180.0f64).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: the admission check alone decides between success and
    /// `InfeasibleDemand` when at least one depot exists.
    #[test]
    fn admission_matches_fleet_capacity(
        instance in instance_strategy(),
        capacity in 200.0..2000.0f64,
    ) {
        let total_capacity = instance.declared_fleet() as f64 * capacity;
        let result = plan_routes(&instance, Some(capacity));

        if instance.total_demand() <= total_capacity {
            prop_assert!(result.is_ok(), "feasible instance rejected: {:?}", result.err());
        } else {
            prop_assert!(
                matches!(result, Err(RoutingError::InfeasibleDemand { .. })),
                "expected InfeasibleDemand, got {:?}",
                result.map(|o| o.solution)
            );
        }
    }

    /// Property: produced routes are closed, within capacity, and serve each
    /// customer at most once.
    #[test]
    fn routes_are_well_formed(
        instance in instance_strategy(),
        capacity in 600.0..3000.0f64,
        policy in fleet_policy(),
    ) {
        let planner = RoutePlanner::new(
            PlannerConfig::default()
                .with_vehicle_capacity(capacity)
                .with_fleet_policy(policy),
        );
        prop_assume!(instance.total_demand() <= instance.declared_fleet() as f64 * capacity);
        let outcome = planner.plan(&instance).expect("admitted instance plans");
        let solution = &outcome.solution;

        let ids: Vec<u32> = solution.routes().keys().copied().collect();
        let expected: Vec<u32> = (1..=solution.num_routes() as u32).collect();
        prop_assert_eq!(ids, expected);

        let mut seen = HashSet::new();
        let mut total = 0.0;
        for route in solution.routes().values() {
            let sequence = route.sequence();
            prop_assert_eq!(sequence.first(), Some(&route.depot()));
            prop_assert_eq!(sequence.last(), Some(&route.depot()));
            prop_assert!(route.load() <= route.capacity());
            prop_assert_eq!(route.capacity(), capacity);
            for &customer in route.customer_ids() {
                prop_assert!(outcome.normalized.get(customer).is_some_and(Node::is_customer));
                prop_assert!(seen.insert(customer), "customer {} served twice", customer);
            }
            total += route.distance();
        }
        prop_assert!((solution.total_distance() - total).abs() < 1e-9);

        for &customer in solution.unserved() {
            prop_assert!(!seen.contains(&customer));
        }
        prop_assert_eq!(seen.len() + solution.num_unserved(), instance.num_customers());

        let dm = DistanceMatrix::from_instance(&outcome.normalized);
        let violations =
            RouteEvaluator::new(&outcome.normalized, &dm).audit_solution(solution);
        prop_assert!(violations.is_empty(), "audit failed: {:?}", violations);
    }

    /// Property: a customer is only ever served from the depot it clusters to.
    #[test]
    fn customers_served_from_nearest_depot(
        instance in instance_strategy(),
        policy in fleet_policy(),
    ) {
        let planner = RoutePlanner::new(PlannerConfig::default().with_fleet_policy(policy));
        let outcome = planner.plan(&instance).expect("default capacity admits");
        let dm = DistanceMatrix::from_instance(&outcome.normalized);
        let clusters = cluster_by_nearest_depot(&outcome.normalized, &dm).expect("has depots");

        for route in outcome.solution.routes().values() {
            for &customer in route.customer_ids() {
                prop_assert_eq!(clusters.depot_of(customer), Some(route.depot()));
            }
        }
    }

    /// Property: normalizing twice equals normalizing once.
    #[test]
    fn normalization_is_idempotent(
        instance in instance_strategy(),
        floor in 0.0..400.0f64,
    ) {
        let once = normalize_demands(&instance, floor);
        let twice = normalize_demands(&once.instance, floor);

        prop_assert!(twice.adjustments.is_empty());
        prop_assert_eq!(&twice.instance, &once.instance);
        for customer in instance.customers() {
            let normalized = once.instance.demand(customer.id()).expect("same ids");
            prop_assert!(normalized >= floor);
            prop_assert!(normalized >= customer.demand());
        }
    }

    /// Property: haversine distance is a symmetric, bounded, non-negative
    /// measure that vanishes on coincident points.
    #[test]
    fn haversine_is_symmetric(a in point(), b in point()) {
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert!(ab >= 0.0);
        prop_assert!(ab <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        prop_assert_eq!(haversine_km(a, a), 0.0);
    }
}

/// Instances with customers but no depot fail before the capacity check.
#[test]
fn no_depots_always_reported() {
    let instance = ProblemInstance::from_nodes((0..5).map(|i| {
        Node::customer(100 + i, "c", GeoPoint::new(40.42, -3.70 + 0.001 * i as f64), 200.0)
    }))
    .expect("valid nodes");

    for capacity in [None, Some(1.0), Some(1e9)] {
        let err = plan_routes(&instance, capacity).unwrap_err();
        assert!(matches!(err, RoutingError::NoDepotsAvailable));
    }
}

//! Aggregate demand-versus-fleet admission test.

use crate::error::RoutingError;
use crate::models::ProblemInstance;

/// Totals compared by [`check_fleet_capacity`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleetCapacity {
    /// Sum of customer demands.
    pub total_demand: f64,
    /// Declared vehicles over all depots.
    pub vehicles: u64,
    /// `vehicles × capacity per vehicle`.
    pub total_capacity: f64,
}

impl FleetCapacity {
    /// Capacity left over once every demand is loaded.
    pub fn slack(&self) -> f64 {
        self.total_capacity - self.total_demand
    }
}

/// Checks that total demand fits in the declared fleet.
///
/// Uses each depot's declared fleet size, so passing this check does not
/// guarantee that a single-vehicle-per-depot construction serves everyone.
///
/// # Errors
///
/// [`RoutingError::InfeasibleDemand`] when total demand exceeds total
/// capacity.
///
/// # Examples
///
/// ```
/// use u_depot_routing::distance::GeoPoint;
/// use u_depot_routing::evaluation::check_fleet_capacity;
/// use u_depot_routing::models::{Node, ProblemInstance};
///
/// let instance = ProblemInstance::from_nodes([
///     Node::depot(1, "A", GeoPoint::new(0.0, 0.0), 2),
///     Node::customer(10, "x", GeoPoint::new(0.0, 0.01), 500.0),
///     Node::customer(11, "y", GeoPoint::new(0.0, 0.02), 500.0),
/// ])
/// .unwrap();
///
/// let fleet = check_fleet_capacity(&instance, 500.0).unwrap();
/// assert_eq!(fleet.total_capacity, 1000.0);
///
/// assert!(check_fleet_capacity(&instance, 400.0).is_err());
/// ```
pub fn check_fleet_capacity(
    instance: &ProblemInstance,
    capacity_per_vehicle: f64,
) -> Result<FleetCapacity, RoutingError> {
    let vehicles = instance.declared_fleet();
    let fleet = FleetCapacity {
        total_demand: instance.total_demand(),
        vehicles,
        total_capacity: vehicles as f64 * capacity_per_vehicle,
    };

    if fleet.total_demand > fleet.total_capacity {
        return Err(RoutingError::InfeasibleDemand {
            total_demand: fleet.total_demand,
            total_capacity: fleet.total_capacity,
        });
    }
    Ok(fleet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::GeoPoint;
    use crate::models::Node;

    fn instance(vehicles: &[u32], demands: &[f64]) -> ProblemInstance {
        let depots = vehicles.iter().enumerate().map(|(i, &v)| {
            Node::depot(i as u64 + 1, "d", GeoPoint::new(40.0, -3.0 + i as f64 * 0.1), v)
        });
        let customers = demands.iter().enumerate().map(|(i, &d)| {
            Node::customer(i as u64 + 100, "c", GeoPoint::new(40.01, -3.0 + i as f64 * 0.01), d)
        });
        ProblemInstance::from_nodes(depots.chain(customers)).expect("valid instance")
    }

    #[test]
    fn test_fits() {
        let fleet = check_fleet_capacity(&instance(&[1, 1], &[200.0, 200.0, 200.0]), 400.0)
            .expect("fits");
        assert_eq!(fleet.vehicles, 2);
        assert_eq!(fleet.total_demand, 600.0);
        assert_eq!(fleet.total_capacity, 800.0);
        assert_eq!(fleet.slack(), 200.0);
    }

    #[test]
    fn test_exact_fit_passes() {
        assert!(check_fleet_capacity(&instance(&[1], &[200.0, 200.0]), 400.0).is_ok());
    }

    #[test]
    fn test_exceeds() {
        let err = check_fleet_capacity(&instance(&[1, 1], &[500.0, 500.0, 500.0]), 400.0)
            .unwrap_err();
        match err {
            RoutingError::InfeasibleDemand {
                total_demand,
                total_capacity,
            } => {
                assert_eq!(total_demand, 1500.0);
                assert_eq!(total_capacity, 800.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_declared_fleet_counts() {
        // one depot declaring three vehicles admits three vehicles' worth
        assert!(check_fleet_capacity(&instance(&[3], &[400.0, 400.0, 400.0]), 400.0).is_ok());
        assert!(check_fleet_capacity(&instance(&[1], &[400.0, 400.0, 400.0]), 400.0).is_err());
    }

    #[test]
    fn test_no_depots_has_no_capacity() {
        let err = check_fleet_capacity(&instance(&[], &[200.0]), 400.0).unwrap_err();
        assert!(matches!(err, RoutingError::InfeasibleDemand { .. }));
        assert!(check_fleet_capacity(&instance(&[], &[]), 400.0).is_ok());
    }
}

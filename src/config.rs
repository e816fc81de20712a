//! Planner configuration.

use serde::{Deserialize, Serialize};

/// Capacity used when the caller supplies none or an unusable value.
pub const DEFAULT_VEHICLE_CAPACITY: f64 = 22000.0;

/// Minimum demand a customer is billed for.
pub const DEFAULT_MIN_DEMAND: f64 = 200.0;

/// How many tours a depot may dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FleetPolicy {
    /// Exactly one tour per depot, whatever its declared fleet.
    #[default]
    SingleVehicle,
    /// Up to the depot's declared fleet size in tours.
    UseDeclaredFleet,
}

impl FleetPolicy {
    /// Tours a depot with `declared` vehicles may dispatch.
    pub fn vehicles_for(self, declared: u32) -> u32 {
        match self {
            Self::SingleVehicle => 1,
            Self::UseDeclaredFleet => declared,
        }
    }
}

/// What to do with customers no route could take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServicePolicy {
    /// Leave them out and list them on the solution.
    #[default]
    Lenient,
    /// Fail the request with `RoutingError::PartialService`.
    Strict,
}

/// Settings for a [`RoutePlanner`](crate::planner::RoutePlanner).
///
/// # Examples
///
/// ```
/// use u_depot_routing::config::{FleetPolicy, PlannerConfig, ServicePolicy};
///
/// let config = PlannerConfig::default()
///     .with_vehicle_capacity(1000.0)
///     .with_fleet_policy(FleetPolicy::UseDeclaredFleet)
///     .with_service_policy(ServicePolicy::Strict);
/// assert_eq!(config.vehicle_capacity(), 1000.0);
/// assert_eq!(config.min_demand(), 200.0);
///
/// let fallback = PlannerConfig::default().with_vehicle_capacity(f64::NAN);
/// assert_eq!(fallback.vehicle_capacity(), 22000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlannerConfig {
    vehicle_capacity: f64,
    min_demand: f64,
    fleet_policy: FleetPolicy,
    service_policy: ServicePolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            vehicle_capacity: DEFAULT_VEHICLE_CAPACITY,
            min_demand: DEFAULT_MIN_DEMAND,
            fleet_policy: FleetPolicy::default(),
            service_policy: ServicePolicy::default(),
        }
    }
}

impl PlannerConfig {
    /// Sets the per-vehicle capacity.
    ///
    /// Non-finite or non-positive values fall back to
    /// [`DEFAULT_VEHICLE_CAPACITY`].
    pub fn with_vehicle_capacity(mut self, capacity: f64) -> Self {
        self.vehicle_capacity = resolve_capacity(Some(capacity));
        self
    }

    /// Sets the demand floor applied before routing.
    pub fn with_min_demand(mut self, min_demand: f64) -> Self {
        self.min_demand = min_demand;
        self
    }

    /// Sets the fleet policy.
    pub fn with_fleet_policy(mut self, policy: FleetPolicy) -> Self {
        self.fleet_policy = policy;
        self
    }

    /// Sets the service policy.
    pub fn with_service_policy(mut self, policy: ServicePolicy) -> Self {
        self.service_policy = policy;
        self
    }

    /// Per-vehicle capacity, uniform across the fleet.
    ///
    /// A deserialized config holding an unusable value reports the default.
    pub fn vehicle_capacity(&self) -> f64 {
        if is_usable_capacity(self.vehicle_capacity) {
            self.vehicle_capacity
        } else {
            DEFAULT_VEHICLE_CAPACITY
        }
    }

    /// Demand floor; non-finite values read as [`DEFAULT_MIN_DEMAND`].
    pub fn min_demand(&self) -> f64 {
        if self.min_demand.is_finite() {
            self.min_demand
        } else {
            DEFAULT_MIN_DEMAND
        }
    }

    /// Fleet policy.
    pub fn fleet_policy(&self) -> FleetPolicy {
        self.fleet_policy
    }

    /// Service policy.
    pub fn service_policy(&self) -> ServicePolicy {
        self.service_policy
    }
}

fn is_usable_capacity(capacity: f64) -> bool {
    capacity.is_finite() && capacity > 0.0
}

/// Returns the capacity to plan with.
///
/// Absent, non-finite, zero or negative values are replaced by
/// [`DEFAULT_VEHICLE_CAPACITY`].
pub fn resolve_capacity(capacity: Option<f64>) -> f64 {
    match capacity {
        Some(c) if is_usable_capacity(c) => c,
        Some(c) => {
            log::warn!("vehicle capacity {c} is unusable, using {DEFAULT_VEHICLE_CAPACITY}");
            DEFAULT_VEHICLE_CAPACITY
        }
        None => DEFAULT_VEHICLE_CAPACITY,
    }
}

/// Parses a capacity typed by a user, falling back to the default when the
/// text is not a usable number.
///
/// # Examples
///
/// ```
/// use u_depot_routing::config::parse_capacity;
///
/// assert_eq!(parse_capacity(" 1500 "), 1500.0);
/// assert_eq!(parse_capacity("lots"), 22000.0);
/// assert_eq!(parse_capacity(""), 22000.0);
/// ```
pub fn parse_capacity(raw: &str) -> f64 {
    resolve_capacity(raw.trim().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.vehicle_capacity(), 22000.0);
        assert_eq!(config.min_demand(), 200.0);
        assert_eq!(config.fleet_policy(), FleetPolicy::SingleVehicle);
        assert_eq!(config.service_policy(), ServicePolicy::Lenient);
    }

    #[test]
    fn test_resolve_capacity() {
        assert_eq!(resolve_capacity(None), DEFAULT_VEHICLE_CAPACITY);
        assert_eq!(resolve_capacity(Some(f64::NAN)), DEFAULT_VEHICLE_CAPACITY);
        assert_eq!(resolve_capacity(Some(0.0)), DEFAULT_VEHICLE_CAPACITY);
        assert_eq!(resolve_capacity(Some(-5.0)), DEFAULT_VEHICLE_CAPACITY);
        assert_eq!(resolve_capacity(Some(400.0)), 400.0);
    }

    #[test]
    fn test_fleet_policy_vehicles() {
        assert_eq!(FleetPolicy::SingleVehicle.vehicles_for(4), 1);
        assert_eq!(FleetPolicy::UseDeclaredFleet.vehicles_for(4), 4);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{ "vehicleCapacity": 400, "fleetPolicy": "useDeclaredFleet" }"#)
                .expect("valid config");
        assert_eq!(config.vehicle_capacity(), 400.0);
        assert_eq!(config.fleet_policy(), FleetPolicy::UseDeclaredFleet);
        assert_eq!(config.service_policy(), ServicePolicy::Lenient);
        assert_eq!(config.min_demand(), DEFAULT_MIN_DEMAND);
    }

    #[test]
    fn test_deserialized_unusable_capacity_reads_default() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{ "vehicleCapacity": -1 }"#).expect("valid config");
        assert_eq!(config.vehicle_capacity(), DEFAULT_VEHICLE_CAPACITY);
    }
}

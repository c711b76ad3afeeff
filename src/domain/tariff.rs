use crate::domain::model::{VehicleCapacity, VehicleKind, Zone};
use crate::domain::tariff_data;
use crate::utils::error::{FareError, Result};
use std::collections::HashMap;

/// Zone names are compared trimmed, with inner whitespace collapsed and
/// without regard to case, so "Lomas de lo Aguirre" finds "Lomas de Lo Aguirre".
pub fn normalize_zone_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The single source of truth for prices: zones, vehicle capacities and the
/// airport surcharge.
#[derive(Debug, Clone)]
pub struct Tariff {
    name: String,
    airport_surcharge: u32,
    zones: Vec<Zone>,
    vehicles: Vec<VehicleCapacity>,
    zone_index: HashMap<String, usize>,
}

impl Tariff {
    pub fn new(
        name: impl Into<String>,
        airport_surcharge: u32,
        zones: Vec<Zone>,
        vehicles: Vec<VehicleCapacity>,
    ) -> Result<Self> {
        let mut zone_index = HashMap::with_capacity(zones.len());
        for (position, zone) in zones.iter().enumerate() {
            let key = normalize_zone_name(&zone.name);
            if key.is_empty() {
                return Err(FareError::InvalidConfigValueError {
                    field: "zones.name".to_string(),
                    value: zone.name.clone(),
                    reason: "Zone name cannot be empty".to_string(),
                });
            }
            if zone.base_price == 0 {
                return Err(FareError::InvalidConfigValueError {
                    field: "zones.base_price".to_string(),
                    value: zone.name.clone(),
                    reason: "Base price must be positive".to_string(),
                });
            }
            if zone.base_price.checked_add(airport_surcharge).is_none() {
                return Err(FareError::InvalidConfigValueError {
                    field: "tariff.airport_surcharge".to_string(),
                    value: airport_surcharge.to_string(),
                    reason: format!("Fare for '{}' would overflow", zone.name),
                });
            }
            if zone_index.insert(key, position).is_some() {
                return Err(FareError::InvalidConfigValueError {
                    field: "zones.name".to_string(),
                    value: zone.name.clone(),
                    reason: "Duplicate zone".to_string(),
                });
            }
        }

        for (position, vehicle) in vehicles.iter().enumerate() {
            if vehicles[..position].iter().any(|v| v.kind == vehicle.kind) {
                return Err(FareError::InvalidConfigValueError {
                    field: "vehicles.kind".to_string(),
                    value: vehicle.kind.to_string(),
                    reason: "Duplicate vehicle type".to_string(),
                });
            }
            if vehicle.max_passengers == 0 {
                return Err(FareError::InvalidConfigValueError {
                    field: "vehicles.max_passengers".to_string(),
                    value: vehicle.kind.to_string(),
                    reason: "A vehicle must carry at least one passenger".to_string(),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            airport_surcharge,
            zones,
            vehicles,
            zone_index,
        })
    }

    /// The compiled-in tariff.
    pub fn builtin() -> Self {
        let zones = tariff_data::ZONES
            .iter()
            .map(|(name, base_price)| Zone {
                name: (*name).to_string(),
                base_price: *base_price,
            })
            .collect::<Vec<_>>();
        let zone_index = zones
            .iter()
            .enumerate()
            .map(|(position, zone)| (normalize_zone_name(&zone.name), position))
            .collect();

        Self {
            name: tariff_data::TARIFF_NAME.to_string(),
            airport_surcharge: tariff_data::AIRPORT_SURCHARGE,
            zones,
            vehicles: builtin_vehicles(),
            zone_index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn airport_surcharge(&self) -> u32 {
        self.airport_surcharge
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn vehicles(&self) -> &[VehicleCapacity] {
        &self.vehicles
    }

    pub fn zone(&self, name: &str) -> Result<&Zone> {
        self.zone_index
            .get(&normalize_zone_name(name))
            .map(|&position| &self.zones[position])
            .ok_or_else(|| FareError::InvalidZone {
                name: name.to_string(),
            })
    }

    pub fn vehicle(&self, kind: VehicleKind) -> Result<&VehicleCapacity> {
        self.vehicles
            .iter()
            .find(|v| v.kind == kind)
            .ok_or_else(|| FareError::InvalidVehicleType {
                value: kind.to_string(),
            })
    }

    /// Zones whose name contains `query`, in table order. An empty query
    /// matches everything.
    pub fn search_zones(&self, query: &str) -> Vec<&Zone> {
        let needle = normalize_zone_name(query);
        self.zones
            .iter()
            .filter(|zone| normalize_zone_name(&zone.name).contains(&needle))
            .collect()
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self::builtin()
    }
}

pub(crate) fn builtin_vehicles() -> Vec<VehicleCapacity> {
    tariff_data::VEHICLES
        .iter()
        .map(|&(kind, max_passengers, large, medium, small)| VehicleCapacity {
            kind,
            max_passengers,
            large_luggage: large,
            medium_luggage: medium,
            small_luggage: small,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tariff_is_internally_consistent() {
        let builtin = Tariff::builtin();
        let rebuilt = Tariff::new(
            builtin.name(),
            builtin.airport_surcharge(),
            builtin.zones().to_vec(),
            builtin.vehicles().to_vec(),
        );
        assert!(rebuilt.is_ok(), "builtin tariff failed validation: {:?}", rebuilt.err());
        assert!(builtin.zones().len() >= 80);
        assert_eq!(builtin.vehicles().len(), 2);
    }

    #[test]
    fn test_zone_lookup_ignores_case_and_spacing() {
        let tariff = Tariff::builtin();
        assert_eq!(tariff.zone("Pudahuel").unwrap().base_price, 20000);
        assert_eq!(
            tariff.zone("lomas de lo  aguirre").unwrap().name,
            "Lomas de Lo Aguirre"
        );
        assert!(matches!(
            tariff.zone("Atlantis"),
            Err(FareError::InvalidZone { .. })
        ));
        assert!(tariff.zone("   ").is_err());
    }

    #[test]
    fn test_search_zones() {
        let tariff = Tariff::builtin();
        let names: Vec<_> = tariff
            .search_zones("condes")
            .into_iter()
            .map(|z| z.name.as_str())
            .collect();
        assert_eq!(names, vec!["Las Condes", "Nueva Las Condes"]);
        assert_eq!(tariff.search_zones("").len(), tariff.zones().len());
        assert!(tariff.search_zones("zzz").is_empty());
    }

    #[test]
    fn test_new_rejects_duplicate_zones() {
        let zones = vec![
            Zone {
                name: "Maipú".to_string(),
                base_price: 23000,
            },
            Zone {
                name: "maipú ".to_string(),
                base_price: 24000,
            },
        ];
        let err = Tariff::new("t", 3000, zones, builtin_vehicles()).unwrap_err();
        assert!(err.to_string().contains("Duplicate zone"));
    }

    #[test]
    fn test_new_rejects_zero_price_and_empty_vehicle() {
        let zero = vec![Zone {
            name: "Renca".to_string(),
            base_price: 0,
        }];
        assert!(Tariff::new("t", 3000, zero, builtin_vehicles()).is_err());

        let empty_vehicle = vec![VehicleCapacity {
            kind: VehicleKind::Taxi,
            max_passengers: 0,
            large_luggage: 1,
            medium_luggage: 1,
            small_luggage: 1,
        }];
        assert!(Tariff::new("t", 3000, vec![], empty_vehicle).is_err());
    }

    #[test]
    fn test_new_rejects_surcharge_that_overflows_a_fare() {
        let zones = vec![Zone {
            name: "Pudahuel".to_string(),
            base_price: 20000,
        }];
        let err = Tariff::new("t", u32::MAX, zones.clone(), builtin_vehicles()).unwrap_err();
        assert!(matches!(err, FareError::InvalidConfigValueError { ref field, .. } if field == "tariff.airport_surcharge"));

        let edge = u32::MAX - 20000;
        assert!(Tariff::new("t", edge, zones, builtin_vehicles()).is_ok());
    }

    #[test]
    fn test_missing_vehicle_is_invalid_vehicle_type() {
        let taxi_only = builtin_vehicles()
            .into_iter()
            .filter(|v| v.kind == VehicleKind::Taxi)
            .collect();
        let tariff = Tariff::new("taxi-only", 3000, vec![], taxi_only).unwrap();
        assert!(matches!(
            tariff.vehicle(VehicleKind::Suv),
            Err(FareError::InvalidVehicleType { .. })
        ));
    }
}

use crate::domain::model::{
    Direction, FareRequest, LuggageSize, PriceCalculation, VehicleCapacity, VehicleKind,
};
use crate::domain::tariff::Tariff;
use crate::utils::error::{FareError, Result};

/// Prices trips against one tariff.
#[derive(Debug, Clone, Copy)]
pub struct FareCalculator<'a> {
    tariff: &'a Tariff,
}

impl<'a> FareCalculator<'a> {
    pub fn new(tariff: &'a Tariff) -> Self {
        Self { tariff }
    }

    pub fn tariff(&self) -> &'a Tariff {
        self.tariff
    }

    pub fn calculate(&self, request: &FareRequest) -> Result<PriceCalculation> {
        calculate_fare(self.tariff, request)
    }

    /// One-passenger, no-luggage fare for every zone in table order.
    pub fn quote_all(
        &self,
        vehicle: VehicleKind,
        direction: Direction,
    ) -> Result<Vec<PriceCalculation>> {
        self.tariff
            .zones()
            .iter()
            .map(|zone| self.calculate(&FareRequest::new(zone.name.clone(), vehicle, direction, 1)))
            .collect()
    }
}

/// `base_price + surcharge` when leaving the airport, `base_price` otherwise.
/// Fails instead of clamping when the group does not fit the vehicle.
pub fn calculate_fare(tariff: &Tariff, request: &FareRequest) -> Result<PriceCalculation> {
    let zone = tariff.zone(&request.zone)?;
    let capacity = tariff.vehicle(request.vehicle)?;
    check_capacity(capacity, request)?;

    let airport_surcharge = match request.direction {
        Direction::FromAirport => tariff.airport_surcharge(),
        Direction::ToAirport => 0,
    };

    let total_price = zone
        .base_price
        .checked_add(airport_surcharge)
        .ok_or_else(|| FareError::InvalidConfigValueError {
            field: "tariff.airport_surcharge".to_string(),
            value: airport_surcharge.to_string(),
            reason: format!("Fare for '{}' would overflow", zone.name),
        })?;

    let calculation = PriceCalculation {
        destination: zone.name.clone(),
        vehicle: request.vehicle,
        direction: request.direction,
        base_price: zone.base_price,
        airport_surcharge,
        total_price,
    };

    tracing::debug!(
        zone = %calculation.destination,
        vehicle = %calculation.vehicle,
        direction = %calculation.direction,
        total = calculation.total_price,
        "fare calculated"
    );

    Ok(calculation)
}

pub fn check_capacity(capacity: &VehicleCapacity, request: &FareRequest) -> Result<()> {
    if request.passengers == 0 {
        return Err(FareError::validation(
            "passengers",
            "Debe viajar al menos un pasajero",
        ));
    }

    let exceeded = |dimension: &str, requested: u32, allowed: u32| FareError::CapacityExceeded {
        vehicle: capacity.kind.to_string(),
        dimension: dimension.to_string(),
        requested,
        allowed,
    };

    if request.passengers > capacity.max_passengers {
        return Err(exceeded(
            "passengers",
            request.passengers,
            capacity.max_passengers,
        ));
    }

    for size in LuggageSize::ALL {
        let requested = request.luggage(size);
        let allowed = capacity.luggage(size);
        if requested > allowed {
            return Err(exceeded(size.label(), requested, allowed));
        }
    }

    Ok(())
}

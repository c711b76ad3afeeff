use crate::utils::error::FareError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named pickup/drop-off area with a fixed base fare to or from the airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub base_price: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VehicleKind {
    Taxi,
    Suv,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 2] = [VehicleKind::Taxi, VehicleKind::Suv];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Taxi => "Taxi",
            VehicleKind::Suv => "SUV",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleKind {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "taxi" => Ok(VehicleKind::Taxi),
            "suv" => Ok(VehicleKind::Suv),
            _ => Err(FareError::InvalidVehicleType {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for VehicleKind {
    type Error = FareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VehicleKind> for String {
    fn from(kind: VehicleKind) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuggageSize {
    /// Checked suitcase, carried in the trunk ("bodega").
    Large,
    /// Cabin bag.
    Medium,
    /// Backpack.
    Small,
}

impl LuggageSize {
    pub const ALL: [LuggageSize; 3] = [LuggageSize::Large, LuggageSize::Medium, LuggageSize::Small];

    pub fn label(&self) -> &'static str {
        match self {
            LuggageSize::Large => "large luggage",
            LuggageSize::Medium => "medium luggage",
            LuggageSize::Small => "small luggage",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCapacity {
    pub kind: VehicleKind,
    pub max_passengers: u32,
    pub large_luggage: u32,
    pub medium_luggage: u32,
    pub small_luggage: u32,
}

impl VehicleCapacity {
    pub fn luggage(&self, size: LuggageSize) -> u32 {
        match size {
            LuggageSize::Large => self.large_luggage,
            LuggageSize::Medium => self.medium_luggage,
            LuggageSize::Small => self.small_luggage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    ToAirport,
    FromAirport,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::ToAirport => "to-airport",
            Direction::FromAirport => "from-airport",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "to-airport" => Ok(Direction::ToAirport),
            "from-airport" => Ok(Direction::FromAirport),
            _ => Err(FareError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareRequest {
    pub zone: String,
    pub vehicle: VehicleKind,
    pub direction: Direction,
    pub passengers: u32,
    #[serde(default)]
    pub large_luggage: u32,
    #[serde(default)]
    pub medium_luggage: u32,
    #[serde(default)]
    pub small_luggage: u32,
}

impl FareRequest {
    pub fn new(
        zone: impl Into<String>,
        vehicle: VehicleKind,
        direction: Direction,
        passengers: u32,
    ) -> Self {
        Self {
            zone: zone.into(),
            vehicle,
            direction,
            passengers,
            large_luggage: 0,
            medium_luggage: 0,
            small_luggage: 0,
        }
    }

    pub fn with_luggage(mut self, large: u32, medium: u32, small: u32) -> Self {
        self.large_luggage = large;
        self.medium_luggage = medium;
        self.small_luggage = small;
        self
    }

    pub fn luggage(&self, size: LuggageSize) -> u32 {
        match size {
            LuggageSize::Large => self.large_luggage,
            LuggageSize::Medium => self.medium_luggage,
            LuggageSize::Small => self.small_luggage,
        }
    }
}

/// Derived fare breakdown, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCalculation {
    pub destination: String,
    pub vehicle: VehicleKind,
    pub direction: Direction,
    pub base_price: u32,
    pub airport_surcharge: u32,
    pub total_price: u32,
}

/// Wizard state as typed by the customer. Every field is optional until the
/// booking is confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub direction: Option<Direction>,
    pub zone: Option<String>,
    pub vehicle: Option<VehicleKind>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub passengers: Option<u32>,
    #[serde(default)]
    pub large_luggage: u32,
    #[serde(default)]
    pub medium_luggage: u32,
    #[serde(default)]
    pub small_luggage: u32,
    pub flight_number: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub reference: String,
    pub request: FareRequest,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub flight_number: Option<String>,
    pub contact: ContactDetails,
    pub notes: Option<String>,
    pub price: PriceCalculation,
    pub created_at: NaiveDateTime,
}

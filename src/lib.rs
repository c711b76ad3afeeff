pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::{LocalStorage, MemoryStorage};
pub use config::{load_tariff, TariffConfig};
pub use crate::core::{draft::DraftStore, fare::calculate_fare, fare::FareCalculator};
pub use domain::model::{Direction, FareRequest, PriceCalculation, VehicleKind};
pub use domain::tariff::Tariff;
pub use utils::error::{FareError, Result};

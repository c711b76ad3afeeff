pub mod booking;
pub mod draft;
pub mod export;
pub mod fare;

pub use crate::domain::model::{FareRequest, PriceCalculation};
pub use crate::domain::ports::Storage;
pub use crate::domain::tariff::Tariff;
pub use crate::utils::error::Result;

// Domain layer: fare model, tariff tables and ports. Nothing here touches the filesystem.

pub mod model;
pub mod ports;
pub mod tariff;
pub mod tariff_data;

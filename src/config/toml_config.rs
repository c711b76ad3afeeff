use crate::domain::model::{VehicleCapacity, Zone};
use crate::domain::tariff::{builtin_vehicles, Tariff};
use crate::domain::tariff_data;
use crate::utils::error::{FareError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is a valid regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffConfig {
    pub tariff: TariffSection,
    pub zones: Option<Vec<Zone>>,
    pub vehicles: Option<Vec<VehicleCapacity>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffSection {
    pub name: String,
    pub currency: Option<String>,
    pub airport_surcharge: Option<u32>,
}

impl TariffConfig {
    /// Reads and parses a tariff file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FareError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FareError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left untouched.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn airport_surcharge(&self) -> u32 {
        self.tariff
            .airport_surcharge
            .unwrap_or(tariff_data::AIRPORT_SURCHARGE)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("tariff.name", &self.tariff.name)?;

        if let Some(currency) = &self.tariff.currency {
            if currency != tariff_data::CURRENCY {
                return Err(FareError::InvalidConfigValueError {
                    field: "tariff.currency".to_string(),
                    value: currency.clone(),
                    reason: format!("Only {} is supported", tariff_data::CURRENCY),
                });
            }
        }

        if matches!(&self.zones, Some(zones) if zones.is_empty()) {
            return Err(FareError::ConfigValidationError {
                field: "zones".to_string(),
                message: "At least one zone is required".to_string(),
            });
        }
        if matches!(&self.vehicles, Some(vehicles) if vehicles.is_empty()) {
            return Err(FareError::ConfigValidationError {
                field: "vehicles".to_string(),
                message: "At least one vehicle is required".to_string(),
            });
        }

        Ok(())
    }

    /// Builds the tariff, falling back to the built-in tables for any
    /// section the file leaves out.
    pub fn into_tariff(self) -> Result<Tariff> {
        self.validate_config()?;
        let surcharge = self.airport_surcharge();
        let builtin = Tariff::builtin();

        let zones = self.zones.unwrap_or_else(|| builtin.zones().to_vec());
        let vehicles = self.vehicles.unwrap_or_else(builtin_vehicles);

        tracing::info!(
            "loaded tariff '{}': {} zones, {} vehicles, surcharge {}",
            self.tariff.name,
            zones.len(),
            vehicles.len(),
            surcharge
        );

        Tariff::new(self.tariff.name, surcharge, zones, vehicles)
    }
}

impl Validate for TariffConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

/// Loads the tariff from `path`, or the built-in one when no file is given.
pub fn load_tariff<P: AsRef<Path>>(path: Option<P>) -> Result<Tariff> {
    match path {
        Some(path) => {
            tracing::debug!("loading tariff from {}", path.as_ref().display());
            TariffConfig::from_file(path)?.into_tariff()
        }
        None => Ok(Tariff::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::VehicleKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_tariff() {
        let toml_content = r#"
[tariff]
name = "winter"
currency = "CLP"
airport_surcharge = 2000

[[zones]]
name = "Pudahuel"
base_price = 21000

[[zones]]
name = "Las Condes"
base_price = 31000

[[vehicles]]
kind = "taxi"
max_passengers = 3
large_luggage = 2
medium_luggage = 1
small_luggage = 3
"#;

        let tariff = TariffConfig::from_toml_str(toml_content)
            .unwrap()
            .into_tariff()
            .unwrap();

        assert_eq!(tariff.name(), "winter");
        assert_eq!(tariff.airport_surcharge(), 2000);
        assert_eq!(tariff.zones().len(), 2);
        assert_eq!(tariff.vehicle(VehicleKind::Taxi).unwrap().max_passengers, 3);
        assert!(tariff.vehicle(VehicleKind::Suv).is_err());
    }

    #[test]
    fn test_missing_sections_use_builtin_tables() {
        let config = TariffConfig::from_toml_str("[tariff]\nname = \"minimal\"\n").unwrap();
        assert_eq!(config.airport_surcharge(), 3000);

        let tariff = config.into_tariff().unwrap();
        assert_eq!(tariff.zones().len(), Tariff::builtin().zones().len());
        assert_eq!(tariff.vehicles().len(), 2);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TRANSFER_FARES_TEST_SURCHARGE", "2500");

        let config = TariffConfig::from_toml_str(
            "[tariff]\nname = \"env\"\nairport_surcharge = ${TRANSFER_FARES_TEST_SURCHARGE}\n",
        )
        .unwrap();
        assert_eq!(config.airport_surcharge(), 2500);

        std::env::remove_var("TRANSFER_FARES_TEST_SURCHARGE");
    }

    #[test]
    fn test_config_validation() {
        let usd = TariffConfig::from_toml_str("[tariff]\nname = \"x\"\ncurrency = \"USD\"\n")
            .unwrap();
        assert!(usd.validate().is_err());

        let no_zones = TariffConfig::from_toml_str("zones = []\n[tariff]\nname = \"x\"\n").unwrap();
        assert!(no_zones.validate().is_err());

        assert!(TariffConfig::from_toml_str("[tariff]\nname = 3\n").is_err());
    }

    #[test]
    fn test_overflowing_surcharge_is_rejected_at_load() {
        let toml_content = r#"
[tariff]
name = "huge"
airport_surcharge = 4294967295

[[zones]]
name = "Pudahuel"
base_price = 20000
"#;
        let config = TariffConfig::from_toml_str(toml_content).unwrap();
        let err = config.into_tariff().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_shipped_example_tariff_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tariff.example.toml");
        let tariff = load_tariff(Some(&path)).unwrap();

        assert_eq!(tariff.name(), "SCL winter");
        assert_eq!(tariff.airport_surcharge(), 3000);
        assert_eq!(tariff.zone("pudahuel").unwrap().base_price, 20000);
        assert_eq!(tariff.vehicles().len(), 2);
    }

    #[test]
    fn test_duplicate_vehicle_is_rejected() {
        let toml_content = r#"
[tariff]
name = "dup"

[[vehicles]]
kind = "SUV"
max_passengers = 6
large_luggage = 4
medium_luggage = 3
small_luggage = 6

[[vehicles]]
kind = "suv"
max_passengers = 7
large_luggage = 4
medium_luggage = 3
small_luggage = 6
"#;
        let config = TariffConfig::from_toml_str(toml_content).unwrap();
        assert!(config.into_tariff().is_err());
    }

    #[test]
    fn test_load_tariff_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[tariff]\nname = \"file-test\"\nairport_surcharge = 1000\n")
            .unwrap();

        let tariff = load_tariff(Some(temp_file.path())).unwrap();
        assert_eq!(tariff.name(), "file-test");
        assert_eq!(tariff.airport_surcharge(), 1000);

        let builtin = load_tariff(None::<&Path>).unwrap();
        assert_eq!(builtin.name(), tariff_data::TARIFF_NAME);
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FareError {
    #[error("Unknown zone: '{name}'")]
    InvalidZone { name: String },

    #[error("Unknown vehicle type: '{value}'")]
    InvalidVehicleType { value: String },

    #[error("{vehicle} capacity exceeded for {dimension}: requested {requested}, allowed {allowed}")]
    CapacityExceeded {
        vehicle: String,
        dimension: String,
        requested: u32,
        allowed: u32,
    },

    #[error("Invalid direction: '{value}' (expected 'to-airport' or 'from-airport')")]
    InvalidDirection { value: String },

    #[error("Validation error in {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Pricing,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FareError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidZone { .. }
            | Self::InvalidVehicleType { .. }
            | Self::CapacityExceeded { .. } => ErrorCategory::Pricing,
            Self::InvalidDirection { .. } | Self::ValidationError { .. } => ErrorCategory::Input,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Pricing | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Pricing | ErrorCategory::Input => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::System => 3,
        }
    }

    /// Customer-facing message, in the language of the booking site.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidZone { name } => {
                format!("La comuna '{}' no está disponible para traslados", name)
            }
            Self::InvalidVehicleType { value } => {
                format!("El tipo de vehículo '{}' no existe", value)
            }
            Self::CapacityExceeded {
                vehicle,
                dimension,
                allowed,
                ..
            } => format!(
                "El vehículo {} admite como máximo {} ({})",
                vehicle, allowed, dimension
            ),
            Self::InvalidDirection { .. } => {
                "Debe indicar si el viaje es hacia o desde el aeropuerto".to_string()
            }
            Self::ValidationError { message, .. } => message.clone(),
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "La tarifa configurada no es válida".to_string()
            }
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                "Ocurrió un error interno, intente nuevamente".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidZone { .. } => "Run `transfer-fares zones --search <text>` to find the zone name",
            Self::InvalidVehicleType { .. } => "Use one of: taxi, suv",
            Self::CapacityExceeded { .. } => "Choose a larger vehicle or split the group",
            Self::InvalidDirection { .. } => "Use 'to-airport' or 'from-airport'",
            Self::ValidationError { .. } => "Correct the highlighted booking field and retry",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the tariff TOML file against the documented format"
            }
            Self::CsvError(_) | Self::SerializationError(_) => {
                "The stored data may be corrupt; clear it and retry"
            }
            Self::IoError(_) => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, FareError>;

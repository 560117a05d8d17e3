use thiserror::Error;

#[derive(Error, Debug)]
pub enum OfferLetterError {
    #[error("Missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl OfferLetterError {
    /// Field names reported by a validation failure, in declaration order.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            OfferLetterError::Validation { missing } => missing,
            _ => &[],
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            OfferLetterError::Validation { missing } => format!(
                "The offer letter is incomplete: {} required field(s) missing ({})",
                missing.len(),
                missing.join(", ")
            ),
            OfferLetterError::ConfigError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            OfferLetterError::InvalidValue { field, reason, .. } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            OfferLetterError::Io(e) => format!("Could not read or write a file: {}", e),
            OfferLetterError::Serialization(e) => format!("Input is not valid offer letter JSON: {}", e),
            OfferLetterError::TomlParse(e) => format!("Template configuration is not valid TOML: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OfferLetterError::Validation { .. } => {
                "Supply the missing fields in the input or in the template [defaults] table"
            }
            OfferLetterError::ConfigError { .. } | OfferLetterError::TomlParse(_) => {
                "Check the template configuration file against the documented layout"
            }
            OfferLetterError::InvalidValue { .. } => "Correct the value and run again",
            OfferLetterError::Io(_) => "Make sure the path exists and is readable",
            OfferLetterError::Serialization(_) => {
                "Input must be a JSON object with camelCase offer letter fields"
            }
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            OfferLetterError::Validation { .. } => 1,
            OfferLetterError::ConfigError { .. }
            | OfferLetterError::InvalidValue { .. }
            | OfferLetterError::Serialization(_)
            | OfferLetterError::TomlParse(_) => 2,
            OfferLetterError::Io(_) => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, OfferLetterError>;

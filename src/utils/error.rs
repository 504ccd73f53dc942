use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpsError {
    #[error("Failed to open GPS device {path}: {reason}")]
    DeviceOpenError { path: String, reason: String },

    #[error("No data read from GPS device")]
    NoDataRead,

    #[error("No $GPRMC sentence found in frame")]
    SentenceNotFound,

    #[error("Malformed {field} field: {value:?}")]
    MalformedField { field: &'static str, value: String },

    #[error("Serial port configuration failed: {0}")]
    ConfigurationError(String),

    #[error("Communication error: {0}")]
    CommunicationError(String),

    #[error("Lock acquisition failed")]
    LockError,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for GpsError {
    fn from(err: std::io::Error) -> Self {
        GpsError::CommunicationError(format!("IO error: {}", err))
    }
}

impl From<serialport::Error> for GpsError {
    fn from(err: serialport::Error) -> Self {
        GpsError::ConfigurationError(err.to_string())
    }
}

impl From<toml::de::Error> for GpsError {
    fn from(err: toml::de::Error) -> Self {
        GpsError::ConfigError(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for GpsError {
    fn from(err: toml::ser::Error) -> Self {
        GpsError::ConfigError(format!("TOML write error: {}", err))
    }
}

impl From<serde_json::Error> for GpsError {
    fn from(err: serde_json::Error) -> Self {
        GpsError::CommunicationError(format!("JSON error: {}", err))
    }
}

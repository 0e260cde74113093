use std::path::PathBuf;
use thiserror::Error;

/// Raised while turning a raw key/value record into an entity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("field '{field}' expected {expected}, got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("expected object, got {found}")]
    NotAnObject { found: &'static str },
}

/// A single rejected value, shared by config and input validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value '{value}' for {field}: {reason}")]
pub struct InvalidValue {
    pub field: String,
    pub value: String,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Cannot delete {entity} {id}: referenced by {references} reservation(s)")]
    ReferentialConflict {
        entity: &'static str,
        id: String,
        references: usize,
    },

    #[error(
        "Not enough rooms at hotel {hotel_id}: requested {requested}, available {available}"
    )]
    CapacityExceeded {
        hotel_id: String,
        requested: i64,
        available: i64,
    },

    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

impl From<InvalidValue> for ReservationError {
    fn from(e: InvalidValue) -> Self {
        Self::InvalidInput {
            message: format!("{} {}", e.field, e.reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Conflict,
    Validation,
    NotFound,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReservationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. }
            | Self::ReferentialConflict { .. }
            | Self::CapacityExceeded { .. } => ErrorCategory::Conflict,
            Self::InvalidInput { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Persistence(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Medium,
            ErrorCategory::Conflict | ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::AlreadyExists { .. } => "Choose a different id or modify the existing record",
            Self::NotFound { .. } => "Check the id; use the list command to see existing records",
            Self::InvalidInput { .. } => "Correct the input values and retry",
            Self::ReferentialConflict { .. } => "Cancel the referencing reservations first",
            Self::CapacityExceeded { .. } => "Request fewer rooms or pick different dates",
            Self::Persistence(_) => "Check permissions and free space in the data directory",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Persistence(_) => format!("Could not save changes: {}", self),
            _ => self.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    InvalidValue(#[from] InvalidValue),
}

pub type Result<T> = std::result::Result<T, ReservationError>;

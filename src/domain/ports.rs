use crate::utils::error::DecodeError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// An entity that can live in a collection document.
pub trait Record: Sized + Clone {
    /// Singular noun used in diagnostics and errors ("hotel").
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn encode(&self) -> Map<String, Value>;

    fn decode(map: &Map<String, Value>) -> Result<Self, DecodeError>;
}

/// Raw document access. Paths are relative to the storage root unless absolute.
pub trait Storage: Send + Sync {
    fn resolve(&self, document: &str) -> PathBuf;

    /// `Ok(None)` when the document does not exist.
    fn read_document(&self, document: &str) -> std::io::Result<Option<Vec<u8>>>;

    /// Replaces the document as a whole, creating parent directories.
    fn write_document(&self, document: &str, data: &[u8]) -> std::io::Result<()>;
}

/// Receives human-readable load/save failures.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, line: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &Path;
    fn hotels_document(&self) -> &str;
    fn customers_document(&self) -> &str;
    fn reservations_document(&self) -> &str;
}

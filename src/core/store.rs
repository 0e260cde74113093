use crate::domain::model::json_type_name;
use crate::domain::ports::{DiagnosticSink, Record, Storage};
use crate::utils::error::{DecodeError, StoreError};
use serde_json::Value;
use std::sync::Arc;

/// Outcome of a tolerant load: the entities that decoded and one line per rejected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub entities: Vec<T>,
    pub diagnostics: Vec<String>,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl<T> Loaded<T> {
    fn rejected(diagnostic: String) -> Self {
        Self {
            entities: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }
}

/// Decodes a raw collection document, skipping every element that does not decode.
///
/// `origin` only appears in diagnostics. A document that is not JSON, or not a
/// JSON array, yields no entities and a single diagnostic.
pub fn decode_collection<T: Record>(raw: &[u8], origin: &str) -> Loaded<T> {
    let data: Value = match serde_json::from_slice(raw) {
        Ok(data) => data,
        Err(e) => return Loaded::rejected(format!("Invalid JSON in {}: {}", origin, e)),
    };

    let items = match data {
        Value::Array(items) => items,
        other => {
            return Loaded::rejected(format!(
                "Expected a JSON list in {}, got {}",
                origin,
                json_type_name(&other)
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .fold(Loaded::default(), |mut loaded, (index, item)| {
            let decoded = match item {
                Value::Object(map) => T::decode(map),
                other => Err(DecodeError::NotAnObject {
                    found: json_type_name(other),
                }),
            };
            match decoded {
                Ok(entity) => loaded.entities.push(entity),
                Err(e) => loaded.diagnostics.push(format!(
                    "Invalid {} at index {} in {}: {}",
                    T::KIND,
                    index,
                    origin,
                    e
                )),
            }
            loaded
        })
}

pub fn encode_collection<T: Record>(entities: &[T]) -> Result<Vec<u8>, StoreError> {
    let payload: Vec<Value> = entities
        .iter()
        .map(|entity| Value::Object(entity.encode()))
        .collect();
    let mut data = serde_json::to_vec_pretty(&payload)?;
    data.push(b'\n');
    Ok(data)
}

/// Loads and saves whole collections through a [`Storage`], reporting failures to a sink.
pub struct CollectionStore<S: Storage> {
    storage: S,
    sink: Arc<dyn DiagnosticSink>,
}

impl<S: Storage> CollectionStore<S> {
    pub fn new(storage: S, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { storage, sink }
    }

    pub fn load<T: Record>(&self, document: &str) -> Vec<T> {
        self.load_report(document).entities
    }

    /// Like [`load`](Self::load), also returning the diagnostics that were reported.
    pub fn load_report<T: Record>(&self, document: &str) -> Loaded<T> {
        let path = self.storage.resolve(document);
        let origin = path.display().to_string();

        let loaded = match self.storage.read_document(document) {
            Ok(None) => {
                tracing::debug!("{} does not exist, starting empty", origin);
                Loaded::default()
            }
            Ok(Some(raw)) => decode_collection(&raw, &origin),
            Err(e) => Loaded::rejected(format!("Cannot read {}: {}", origin, e)),
        };

        for line in &loaded.diagnostics {
            self.sink.report(line);
        }
        tracing::debug!(
            "Loaded {} {}(s) from {} ({} skipped)",
            loaded.entities.len(),
            T::KIND,
            origin,
            loaded.diagnostics.len()
        );
        loaded
    }

    pub fn save<T: Record>(&self, document: &str, entities: &[T]) -> Result<(), StoreError> {
        let result = encode_collection(entities).and_then(|data| {
            self.storage
                .write_document(document, &data)
                .map_err(|source| StoreError::Io {
                    path: self.storage.resolve(document),
                    source,
                })
        });

        if let Err(e) = &result {
            self.sink.report(&format!("Cannot write {} collection: {}", T::KIND, e));
        }
        result
    }
}

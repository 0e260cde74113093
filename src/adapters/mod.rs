// Adapters layer: concrete implementations of the domain ports.

pub mod diagnostics;
pub mod storage;

pub use diagnostics::{MemorySink, TracingSink};
pub use storage::LocalStorage;

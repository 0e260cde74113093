pub mod availability;
pub mod service;
pub mod store;

pub use crate::domain::model::{Customer, Hotel, Reservation};
pub use crate::domain::ports::{ConfigProvider, DiagnosticSink, Record, Storage};
pub use crate::utils::error::Result;

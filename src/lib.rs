pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{LocalStorage, MemorySink, TracingSink};
pub use crate::core::{
    service::{CollectionDocuments, ReservationService},
    store::{CollectionStore, Loaded},
};
pub use domain::{
    Customer, CustomerUpdate, Hotel, HotelUpdate, NewReservation, Record, Reservation,
};
pub use utils::error::{ReservationError, Result};

// Domain layer: entity values and the ports the store and service depend on.

pub mod model;
pub mod ports;

pub use model::{Customer, CustomerUpdate, Hotel, HotelUpdate, NewReservation, Reservation};
pub use ports::{ConfigProvider, DiagnosticSink, Record, Storage};

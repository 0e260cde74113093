use crate::adapters::LocalStorage;
use crate::core::availability::{overlapping_demand, peak_demand};
use crate::core::store::CollectionStore;
use crate::domain::model::{
    Customer, CustomerUpdate, Hotel, HotelUpdate, NewReservation, Reservation,
};
use crate::domain::ports::{ConfigProvider, DiagnosticSink, Record, Storage};
use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{validate_date_range, validate_non_empty_string, validate_positive};
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Document names of the three collections, relative to the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDocuments {
    pub hotels: String,
    pub customers: String,
    pub reservations: String,
}

impl Default for CollectionDocuments {
    fn default() -> Self {
        Self {
            hotels: "hotels.json".to_string(),
            customers: "customers.json".to_string(),
            reservations: "reservations.json".to_string(),
        }
    }
}

impl CollectionDocuments {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            hotels: config.hotels_document().to_string(),
            customers: config.customers_document().to_string(),
            reservations: config.reservations_document().to_string(),
        }
    }
}

/// Business rules over the hotel, customer and reservation collections.
///
/// Every operation reloads the collections it needs, validates, mutates in
/// memory and rewrites whole documents. Operations on one service are
/// serialized by an internal lock held for the full load/save sequence, so
/// two threads sharing a service cannot both pass the availability check
/// against the same stale state. Separate processes writing the same files
/// are not coordinated.
pub struct ReservationService<S: Storage> {
    store: CollectionStore<S>,
    documents: CollectionDocuments,
    guard: Mutex<()>,
}

impl ReservationService<LocalStorage> {
    pub fn from_config<C: ConfigProvider + ?Sized>(
        config: &C,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let storage = LocalStorage::new(config.data_dir());
        Self::new(
            CollectionStore::new(storage, sink),
            CollectionDocuments::from_config(config),
        )
    }
}

impl<S: Storage> ReservationService<S> {
    pub fn new(store: CollectionStore<S>, documents: CollectionDocuments) -> Self {
        Self {
            store,
            documents,
            guard: Mutex::new(()),
        }
    }

    fn load_hotels(&self) -> Vec<Hotel> {
        self.store.load(&self.documents.hotels)
    }

    fn load_customers(&self) -> Vec<Customer> {
        self.store.load(&self.documents.customers)
    }

    fn load_reservations(&self) -> Vec<Reservation> {
        self.store.load(&self.documents.reservations)
    }

    // Hotels

    pub fn create_hotel(&self, hotel: Hotel) -> Result<Hotel> {
        let _guard = self.guard.lock();
        validate_non_empty_string("hotel_id", &hotel.hotel_id)?;

        let mut hotels = self.load_hotels();
        ensure_unique(&hotels, &hotel.hotel_id)?;
        validate_positive("total_rooms", hotel.total_rooms)?;

        hotels.push(hotel.clone());
        self.store.save(&self.documents.hotels, &hotels)?;
        tracing::info!("Created hotel {} ({} rooms)", hotel.hotel_id, hotel.total_rooms);
        Ok(hotel)
    }

    pub fn display_hotel(&self, hotel_id: &str) -> Result<Hotel> {
        let _guard = self.guard.lock();
        find(self.load_hotels(), hotel_id)
    }

    pub fn list_hotels(&self) -> Vec<Hotel> {
        let _guard = self.guard.lock();
        self.load_hotels()
    }

    pub fn modify_hotel(&self, hotel_id: &str, update: HotelUpdate) -> Result<Hotel> {
        let _guard = self.guard.lock();
        let mut hotels = self.load_hotels();
        let slot = position(&hotels, hotel_id)?;
        if update.is_empty() {
            return Ok(hotels.swap_remove(slot));
        }
        let updated = hotels[slot].with_update(&update);

        if let Some(total_rooms) = update.total_rooms {
            validate_positive("total_rooms", total_rooms)?;
            let peak = peak_demand(&self.load_reservations(), hotel_id);
            if peak > total_rooms {
                return Err(ReservationError::CapacityExceeded {
                    hotel_id: hotel_id.to_string(),
                    requested: peak,
                    available: total_rooms,
                });
            }
        }

        hotels[slot] = updated.clone();
        self.store.save(&self.documents.hotels, &hotels)?;
        tracing::info!("Modified hotel {}", hotel_id);
        Ok(updated)
    }

    pub fn delete_hotel(&self, hotel_id: &str) -> Result<()> {
        let _guard = self.guard.lock();
        let mut hotels = self.load_hotels();
        position(&hotels, hotel_id)?;

        let references = self
            .load_reservations()
            .iter()
            .filter(|r| r.hotel_id == hotel_id)
            .count();
        if references > 0 {
            return Err(ReservationError::ReferentialConflict {
                entity: Hotel::KIND,
                id: hotel_id.to_string(),
                references,
            });
        }

        hotels.retain(|h| h.hotel_id != hotel_id);
        self.store.save(&self.documents.hotels, &hotels)?;
        tracing::info!("Deleted hotel {}", hotel_id);
        Ok(())
    }

    // Customers

    pub fn create_customer(&self, customer: Customer) -> Result<Customer> {
        let _guard = self.guard.lock();
        validate_non_empty_string("customer_id", &customer.customer_id)?;

        let mut customers = self.load_customers();
        ensure_unique(&customers, &customer.customer_id)?;

        customers.push(customer.clone());
        self.store.save(&self.documents.customers, &customers)?;
        tracing::info!("Created customer {}", customer.customer_id);
        Ok(customer)
    }

    pub fn display_customer(&self, customer_id: &str) -> Result<Customer> {
        let _guard = self.guard.lock();
        find(self.load_customers(), customer_id)
    }

    pub fn list_customers(&self) -> Vec<Customer> {
        let _guard = self.guard.lock();
        self.load_customers()
    }

    pub fn modify_customer(&self, customer_id: &str, update: CustomerUpdate) -> Result<Customer> {
        let _guard = self.guard.lock();
        let mut customers = self.load_customers();
        let slot = position(&customers, customer_id)?;
        if update.is_empty() {
            return Ok(customers.swap_remove(slot));
        }
        let updated = customers[slot].with_update(&update);

        customers[slot] = updated.clone();
        self.store.save(&self.documents.customers, &customers)?;
        tracing::info!("Modified customer {}", customer_id);
        Ok(updated)
    }

    pub fn delete_customer(&self, customer_id: &str) -> Result<()> {
        let _guard = self.guard.lock();
        let mut customers = self.load_customers();
        position(&customers, customer_id)?;

        let references = self
            .load_reservations()
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .count();
        if references > 0 {
            return Err(ReservationError::ReferentialConflict {
                entity: Customer::KIND,
                id: customer_id.to_string(),
                references,
            });
        }

        customers.retain(|c| c.customer_id != customer_id);
        self.store.save(&self.documents.customers, &customers)?;
        tracing::info!("Deleted customer {}", customer_id);
        Ok(())
    }

    // Reservations

    /// Books rooms after checking both references, the request shape and
    /// the rooms already held by overlapping stays at the same hotel.
    pub fn create_reservation(&self, request: NewReservation) -> Result<Reservation> {
        let _guard = self.guard.lock();
        let hotel = find(self.load_hotels(), &request.hotel_id)?;
        find(self.load_customers(), &request.customer_id)?;

        validate_positive("rooms", request.rooms)?;
        validate_date_range(request.check_in, request.check_out)?;

        let mut reservations = self.load_reservations();
        if let Some(id) = &request.reservation_id {
            validate_non_empty_string("reservation_id", id)?;
            ensure_unique(&reservations, id)?;
        }

        let booked = overlapping_demand(
            &reservations,
            &hotel.hotel_id,
            request.check_in,
            request.check_out,
        );
        let fits = booked
            .checked_add(request.rooms)
            .is_some_and(|total| total <= hotel.total_rooms);
        if !fits {
            return Err(ReservationError::CapacityExceeded {
                hotel_id: hotel.hotel_id,
                requested: request.rooms,
                available: hotel.total_rooms.saturating_sub(booked).max(0),
            });
        }

        let reservation_id = match request.reservation_id.clone() {
            Some(id) => id,
            None => fresh_id(&reservations),
        };
        let reservation = request.into_reservation(reservation_id);

        reservations.push(reservation.clone());
        self.store.save(&self.documents.reservations, &reservations)?;
        tracing::info!(
            "Reserved {} room(s) at {} for {} from {} to {} ({})",
            reservation.rooms,
            reservation.hotel_id,
            reservation.customer_id,
            reservation.check_in,
            reservation.check_out,
            reservation.reservation_id
        );
        Ok(reservation)
    }

    pub fn display_reservation(&self, reservation_id: &str) -> Result<Reservation> {
        let _guard = self.guard.lock();
        find(self.load_reservations(), reservation_id)
    }

    pub fn list_reservations(&self) -> Vec<Reservation> {
        let _guard = self.guard.lock();
        self.load_reservations()
    }

    pub fn reservations_for_hotel(&self, hotel_id: &str) -> Result<Vec<Reservation>> {
        let _guard = self.guard.lock();
        find(self.load_hotels(), hotel_id)?;
        let mut reservations = self.load_reservations();
        reservations.retain(|r| r.hotel_id == hotel_id);
        Ok(reservations)
    }

    pub fn reservations_for_customer(&self, customer_id: &str) -> Result<Vec<Reservation>> {
        let _guard = self.guard.lock();
        find(self.load_customers(), customer_id)?;
        let mut reservations = self.load_reservations();
        reservations.retain(|r| r.customer_id == customer_id);
        Ok(reservations)
    }

    pub fn cancel_reservation(&self, reservation_id: &str) -> Result<()> {
        let _guard = self.guard.lock();
        let mut reservations = self.load_reservations();
        position(&reservations, reservation_id)?;

        reservations.retain(|r| r.reservation_id != reservation_id);
        self.store.save(&self.documents.reservations, &reservations)?;
        tracing::info!("Cancelled reservation {}", reservation_id);
        Ok(())
    }

    /// Rooms a new booking over `[check_in, check_out)` could still take.
    pub fn available_rooms(
        &self,
        hotel_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<i64> {
        let _guard = self.guard.lock();
        let hotel = find(self.load_hotels(), hotel_id)?;
        validate_date_range(check_in, check_out)?;

        let booked = overlapping_demand(&self.load_reservations(), hotel_id, check_in, check_out);
        Ok(hotel.total_rooms.saturating_sub(booked).max(0))
    }
}

fn not_found<T: Record>(id: &str) -> ReservationError {
    ReservationError::NotFound {
        entity: T::KIND,
        id: id.to_string(),
    }
}

fn position<T: Record>(entities: &[T], id: &str) -> Result<usize> {
    entities
        .iter()
        .position(|e| e.id() == id)
        .ok_or_else(|| not_found::<T>(id))
}

fn find<T: Record>(entities: Vec<T>, id: &str) -> Result<T> {
    entities
        .into_iter()
        .find(|e| e.id() == id)
        .ok_or_else(|| not_found::<T>(id))
}

fn ensure_unique<T: Record>(entities: &[T], id: &str) -> Result<()> {
    if entities.iter().any(|e| e.id() == id) {
        return Err(ReservationError::AlreadyExists {
            entity: T::KIND,
            id: id.to_string(),
        });
    }
    Ok(())
}

fn fresh_id(reservations: &[Reservation]) -> String {
    let taken: HashSet<&str> = reservations.iter().map(|r| r.reservation_id.as_str()).collect();
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }
}

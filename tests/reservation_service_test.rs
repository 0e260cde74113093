use chrono::NaiveDate;
use hotel_store::{
    CollectionDocuments, CollectionStore, Customer, CustomerUpdate, Hotel, HotelUpdate,
    LocalStorage, MemorySink, NewReservation, ReservationError, ReservationService,
};
use std::sync::Arc;
use tempfile::TempDir;

struct Fixture {
    temp_dir: TempDir,
    sink: Arc<MemorySink>,
    service: ReservationService<LocalStorage>,
}

fn fixture() -> Fixture {
    let temp_dir = TempDir::new().unwrap();
    let sink = Arc::new(MemorySink::new());
    let service = ReservationService::new(
        CollectionStore::new(LocalStorage::new(temp_dir.path()), sink.clone()),
        CollectionDocuments::default(),
    );
    service
        .create_hotel(Hotel::new("H1", "Hotel Plaza", "CDMX", 10))
        .unwrap();
    service
        .create_customer(Customer::new("C1", "Karen Martell", "karen@example.com"))
        .unwrap();
    Fixture {
        temp_dir,
        sink,
        service,
    }
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn booking(check_in: &str, check_out: &str, rooms: i64) -> NewReservation {
    NewReservation::new("H1", "C1", date(check_in), date(check_out)).rooms(rooms)
}

#[test]
fn test_create_and_display_hotel() {
    let fx = fixture();
    fx.service
        .create_hotel(Hotel::new("H2", "Resort Playa", "Cancun", 50))
        .unwrap();

    let retrieved = fx.service.display_hotel("H2").unwrap();
    assert_eq!(retrieved.name, "Resort Playa");
    assert_eq!(retrieved.total_rooms, 50);
    assert_eq!(fx.service.list_hotels().len(), 2);
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let fx = fixture();
    assert!(matches!(
        fx.service.create_hotel(Hotel::new("H1", "Another", "Monterrey", 20)),
        Err(ReservationError::AlreadyExists { entity: "hotel", .. })
    ));
    assert!(matches!(
        fx.service.create_customer(Customer::new("C1", "Someone", "x@example.com")),
        Err(ReservationError::AlreadyExists { entity: "customer", .. })
    ));
    assert_eq!(fx.service.display_hotel("H1").unwrap().name, "Hotel Plaza");
}

#[test]
fn test_hotel_needs_rooms() {
    let fx = fixture();
    assert!(matches!(
        fx.service.create_hotel(Hotel::new("H2", "Empty", "Nowhere", 0)),
        Err(ReservationError::InvalidInput { .. })
    ));
    assert!(matches!(
        fx.service.modify_hotel("H1", HotelUpdate::new().total_rooms(-1)),
        Err(ReservationError::InvalidInput { .. })
    ));
    assert_eq!(fx.service.display_hotel("H1").unwrap().total_rooms, 10);
}

#[test]
fn test_modify_hotel_and_customer() {
    let fx = fixture();
    let hotel = fx
        .service
        .modify_hotel("H1", HotelUpdate::new().city("Monterrey").total_rooms(15))
        .unwrap();
    assert_eq!(hotel.city, "Monterrey");
    assert_eq!(hotel.total_rooms, 15);
    assert_eq!(hotel.name, "Hotel Plaza");
    assert_eq!(fx.service.display_hotel("H1").unwrap(), hotel);

    let customer = fx
        .service
        .modify_customer("C1", CustomerUpdate::new().full_name("Karen M."))
        .unwrap();
    assert_eq!(customer.full_name, "Karen M.");
    assert_eq!(customer.email, "karen@example.com");

    assert!(matches!(
        fx.service.modify_customer("C404", CustomerUpdate::new().email("a@b.c")),
        Err(ReservationError::NotFound { .. })
    ));
}

#[test]
fn test_capacity_arithmetic() {
    let fx = fixture();

    assert!(matches!(
        fx.service.create_reservation(booking("2026-04-01", "2026-04-05", 11)),
        Err(ReservationError::CapacityExceeded { requested: 11, available: 10, .. })
    ));
    fx.service
        .create_reservation(booking("2026-04-01", "2026-04-05", 10))
        .unwrap();
    assert!(matches!(
        fx.service.create_reservation(booking("2026-04-01", "2026-04-05", 1)),
        Err(ReservationError::CapacityExceeded { available: 0, .. })
    ));
    fx.service
        .create_reservation(booking("2026-05-01", "2026-05-05", 10))
        .unwrap();
    // Checking in on another stay's check-out date is not an overlap.
    fx.service
        .create_reservation(booking("2026-04-05", "2026-04-07", 10))
        .unwrap();

    assert_eq!(fx.service.list_reservations().len(), 3);
    assert_eq!(
        fx.service
            .available_rooms("H1", date("2026-04-04"), date("2026-04-06"))
            .unwrap(),
        0
    );
    assert_eq!(
        fx.service
            .available_rooms("H1", date("2026-04-20"), date("2026-04-22"))
            .unwrap(),
        10
    );
}

#[test]
fn test_oversized_request_is_a_capacity_error() {
    let fx = fixture();
    fx.service
        .create_reservation(booking("2026-04-01", "2026-04-05", 1))
        .unwrap();

    assert!(matches!(
        fx.service.create_reservation(booking("2026-04-01", "2026-04-05", i64::MAX)),
        Err(ReservationError::CapacityExceeded { requested: i64::MAX, available: 9, .. })
    ));
    assert!(matches!(
        fx.service.create_reservation(booking("2026-06-01", "2026-06-05", i64::MAX)),
        Err(ReservationError::CapacityExceeded { available: 10, .. })
    ));
    assert_eq!(fx.service.list_reservations().len(), 1);
}

#[test]
fn test_empty_update_leaves_documents_alone() {
    let fx = fixture();
    let hotels = fx.temp_dir.path().join("hotels.json");
    let before = std::fs::read_to_string(&hotels).unwrap();

    let hotel = fx.service.modify_hotel("H1", HotelUpdate::new()).unwrap();
    assert_eq!(hotel.total_rooms, 10);
    let customer = fx.service.modify_customer("C1", CustomerUpdate::new()).unwrap();
    assert_eq!(customer.email, "karen@example.com");

    assert_eq!(std::fs::read_to_string(&hotels).unwrap(), before);
    assert!(matches!(
        fx.service.modify_hotel("H404", HotelUpdate::new()),
        Err(ReservationError::NotFound { .. })
    ));
}

#[test]
fn test_reservation_requires_existing_references() {
    let fx = fixture();
    assert!(matches!(
        fx.service.create_reservation(
            NewReservation::new("H404", "C1", date("2026-03-10"), date("2026-03-12"))
        ),
        Err(ReservationError::NotFound { entity: "hotel", .. })
    ));
    assert!(matches!(
        fx.service.create_reservation(
            NewReservation::new("H1", "C404", date("2026-03-10"), date("2026-03-12"))
        ),
        Err(ReservationError::NotFound { entity: "customer", .. })
    ));
}

#[test]
fn test_reversed_dates_are_rejected_without_mutation() {
    let fx = fixture();
    let result = fx
        .service
        .create_reservation(booking("2026-03-15", "2026-03-10", 1));
    assert!(matches!(result, Err(ReservationError::InvalidInput { .. })));

    assert!(matches!(
        fx.service.create_reservation(booking("2026-03-10", "2026-03-10", 1)),
        Err(ReservationError::InvalidInput { .. })
    ));
    assert!(matches!(
        fx.service.create_reservation(booking("2026-03-10", "2026-03-12", 0)),
        Err(ReservationError::InvalidInput { .. })
    ));

    assert!(fx.service.list_reservations().is_empty());
    assert!(!fx.temp_dir.path().join("reservations.json").exists());
}

#[test]
fn test_delete_is_blocked_by_references() {
    let fx = fixture();
    let reservation = fx
        .service
        .create_reservation(booking("2026-03-10", "2026-03-15", 2))
        .unwrap();

    assert!(matches!(
        fx.service.delete_hotel("H1"),
        Err(ReservationError::ReferentialConflict { references: 1, .. })
    ));
    assert!(matches!(
        fx.service.delete_customer("C1"),
        Err(ReservationError::ReferentialConflict { .. })
    ));
    assert!(fx.service.display_hotel("H1").is_ok());

    fx.service
        .cancel_reservation(&reservation.reservation_id)
        .unwrap();
    fx.service.delete_hotel("H1").unwrap();
    fx.service.delete_customer("C1").unwrap();

    assert!(matches!(
        fx.service.display_hotel("H1"),
        Err(ReservationError::NotFound { .. })
    ));
    assert!(matches!(
        fx.service.delete_customer("C1"),
        Err(ReservationError::NotFound { .. })
    ));
}

#[test]
fn test_cancel_twice() {
    let fx = fixture();
    let reservation = fx
        .service
        .create_reservation(booking("2026-03-10", "2026-03-15", 2).reservation_id("R1"))
        .unwrap();
    assert_eq!(reservation.reservation_id, "R1");
    assert_eq!(fx.service.display_reservation("R1").unwrap(), reservation);

    fx.service.cancel_reservation("R1").unwrap();
    assert!(matches!(
        fx.service.cancel_reservation("R1"),
        Err(ReservationError::NotFound { entity: "reservation", .. })
    ));
}

#[test]
fn test_lowering_capacity_below_bookings() {
    let fx = fixture();
    fx.service
        .create_reservation(booking("2026-03-10", "2026-03-15", 4))
        .unwrap();
    fx.service
        .create_reservation(booking("2026-03-12", "2026-03-20", 3))
        .unwrap();

    assert!(matches!(
        fx.service.modify_hotel("H1", HotelUpdate::new().total_rooms(6)),
        Err(ReservationError::CapacityExceeded { requested: 7, available: 6, .. })
    ));
    assert_eq!(
        fx.service
            .modify_hotel("H1", HotelUpdate::new().total_rooms(7))
            .unwrap()
            .total_rooms,
        7
    );
}

#[test]
fn test_reservation_filters() {
    let fx = fixture();
    fx.service
        .create_hotel(Hotel::new("H2", "Resort Playa", "Cancun", 5))
        .unwrap();
    fx.service
        .create_reservation(booking("2026-03-10", "2026-03-15", 1))
        .unwrap();
    fx.service
        .create_reservation(NewReservation::new(
            "H2",
            "C1",
            date("2026-03-10"),
            date("2026-03-15"),
        ))
        .unwrap();

    assert_eq!(fx.service.reservations_for_hotel("H2").unwrap().len(), 1);
    assert_eq!(fx.service.reservations_for_customer("C1").unwrap().len(), 2);
    assert!(fx.service.reservations_for_hotel("H404").is_err());
}

#[test]
fn test_state_survives_a_new_service() {
    let fx = fixture();
    fx.service
        .create_reservation(booking("2026-03-10", "2026-03-15", 2).reservation_id("R1"))
        .unwrap();

    let reopened = ReservationService::new(
        CollectionStore::new(
            LocalStorage::new(fx.temp_dir.path()),
            Arc::new(MemorySink::new()),
        ),
        CollectionDocuments::default(),
    );
    assert_eq!(reopened.display_reservation("R1").unwrap().rooms, 2);
    assert_eq!(reopened.display_customer("C1").unwrap().full_name, "Karen Martell");
    assert!(fx.sink.is_empty());
}

use crate::domain::model::Reservation;
use chrono::NaiveDate;

/// Rooms already held at `hotel_id` by reservations overlapping `[check_in, check_out)`.
pub fn overlapping_demand<'a, I>(
    reservations: I,
    hotel_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> i64
where
    I: IntoIterator<Item = &'a Reservation>,
{
    reservations
        .into_iter()
        .filter(|r| r.hotel_id == hotel_id && r.overlaps(check_in, check_out))
        .fold(0i64, |booked, r| booked.saturating_add(r.rooms))
}

/// Highest number of rooms booked at `hotel_id` for any single night.
pub fn peak_demand<'a, I>(reservations: I, hotel_id: &str) -> i64
where
    I: IntoIterator<Item = &'a Reservation>,
{
    let mut events: Vec<(NaiveDate, i64)> = reservations
        .into_iter()
        .filter(|r| r.hotel_id == hotel_id)
        .flat_map(|r| [(r.check_in, r.rooms), (r.check_out, r.rooms.saturating_neg())])
        .collect();

    // Departures sort before arrivals on the same date: the ranges are half-open.
    events.sort_by_key(|&(date, delta)| (date, delta));

    events
        .iter()
        .scan(0i64, |booked, &(_, delta)| {
            *booked = booked.saturating_add(delta);
            Some(*booked)
        })
        .max()
        .unwrap_or(0)
        .max(0)
}

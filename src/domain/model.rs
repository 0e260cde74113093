use crate::domain::ports::Record;
use crate::utils::error::DecodeError;
use chrono::NaiveDate;
use serde_json::{Map, Value};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotel {
    pub hotel_id: String,
    pub name: String,
    pub city: String,
    pub total_rooms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: String,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub reservation_id: String,
    pub hotel_id: String,
    pub customer_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: i64,
}

impl Hotel {
    pub fn new(
        hotel_id: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        total_rooms: i64,
    ) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            name: name.into(),
            city: city.into(),
            total_rooms,
        }
    }

    /// Copy of `self` with every field set in `update` overridden.
    pub fn with_update(&self, update: &HotelUpdate) -> Self {
        Self {
            hotel_id: self.hotel_id.clone(),
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            city: update.city.clone().unwrap_or_else(|| self.city.clone()),
            total_rooms: update.total_rooms.unwrap_or(self.total_rooms),
        }
    }
}

impl Customer {
    pub fn new(
        customer_id: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    pub fn with_update(&self, update: &CustomerUpdate) -> Self {
        Self {
            customer_id: self.customer_id.clone(),
            full_name: update
                .full_name
                .clone()
                .unwrap_or_else(|| self.full_name.clone()),
            email: update.email.clone().unwrap_or_else(|| self.email.clone()),
        }
    }
}

impl Reservation {
    /// Half-open `[check_in, check_out)` overlap; back-to-back stays do not collide.
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && check_in < self.check_out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub total_rooms: Option<i64>,
}

impl HotelUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn total_rooms(mut self, total_rooms: i64) -> Self {
        self.total_rooms = Some(total_rooms);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.city.is_none() && self.total_rooms.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl CustomerUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none()
    }
}

/// A booking request. The id is optional; the service generates one when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub reservation_id: Option<String>,
    pub hotel_id: String,
    pub customer_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub rooms: i64,
}

impl NewReservation {
    pub fn new(
        hotel_id: impl Into<String>,
        customer_id: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        Self {
            reservation_id: None,
            hotel_id: hotel_id.into(),
            customer_id: customer_id.into(),
            check_in,
            check_out,
            rooms: 1,
        }
    }

    pub fn rooms(mut self, rooms: i64) -> Self {
        self.rooms = rooms;
        self
    }

    pub fn reservation_id(mut self, reservation_id: impl Into<String>) -> Self {
        self.reservation_id = Some(reservation_id.into());
        self
    }

    pub(crate) fn into_reservation(self, reservation_id: String) -> Reservation {
        Reservation {
            reservation_id,
            hotel_id: self.hotel_id,
            customer_id: self.customer_id,
            check_in: self.check_in,
            check_out: self.check_out,
            rooms: self.rooms,
        }
    }
}

impl Record for Hotel {
    const KIND: &'static str = "hotel";

    fn id(&self) -> &str {
        &self.hotel_id
    }

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("hotel_id".into(), Value::from(self.hotel_id.as_str()));
        map.insert("name".into(), Value::from(self.name.as_str()));
        map.insert("city".into(), Value::from(self.city.as_str()));
        map.insert("total_rooms".into(), Value::from(self.total_rooms));
        map
    }

    fn decode(map: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields(map);
        Ok(Self {
            hotel_id: fields.string("hotel_id")?,
            name: fields.string("name")?,
            city: fields.string("city")?,
            total_rooms: fields.integer("total_rooms")?,
        })
    }
}

impl Record for Customer {
    const KIND: &'static str = "customer";

    fn id(&self) -> &str {
        &self.customer_id
    }

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("customer_id".into(), Value::from(self.customer_id.as_str()));
        map.insert("full_name".into(), Value::from(self.full_name.as_str()));
        map.insert("email".into(), Value::from(self.email.as_str()));
        map
    }

    fn decode(map: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields(map);
        Ok(Self {
            customer_id: fields.string("customer_id")?,
            full_name: fields.string("full_name")?,
            email: fields.string("email")?,
        })
    }
}

impl Record for Reservation {
    const KIND: &'static str = "reservation";

    fn id(&self) -> &str {
        &self.reservation_id
    }

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            "reservation_id".into(),
            Value::from(self.reservation_id.as_str()),
        );
        map.insert("hotel_id".into(), Value::from(self.hotel_id.as_str()));
        map.insert("customer_id".into(), Value::from(self.customer_id.as_str()));
        map.insert(
            "check_in".into(),
            Value::from(self.check_in.format(DATE_FORMAT).to_string()),
        );
        map.insert(
            "check_out".into(),
            Value::from(self.check_out.format(DATE_FORMAT).to_string()),
        );
        map.insert("rooms".into(), Value::from(self.rooms));
        map
    }

    fn decode(map: &Map<String, Value>) -> Result<Self, DecodeError> {
        let fields = Fields(map);
        Ok(Self {
            reservation_id: fields.string("reservation_id")?,
            hotel_id: fields.string("hotel_id")?,
            customer_id: fields.string("customer_id")?,
            check_in: fields.date("check_in")?,
            check_out: fields.date("check_out")?,
            rooms: fields.integer("rooms")?,
        })
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct Fields<'a>(&'a Map<String, Value>);

impl<'a> Fields<'a> {
    fn get(&self, field: &'static str) -> Result<&'a Value, DecodeError> {
        self.0.get(field).ok_or(DecodeError::MissingField { field })
    }

    fn mismatch(field: &'static str, expected: &'static str, value: &Value) -> DecodeError {
        DecodeError::TypeMismatch {
            field,
            expected,
            found: value.to_string(),
        }
    }

    fn string(&self, field: &'static str) -> Result<String, DecodeError> {
        match self.get(field)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
            other => Err(Self::mismatch(field, "string", other)),
        }
    }

    fn integer(&self, field: &'static str) -> Result<i64, DecodeError> {
        let value = self.get(field)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| Self::mismatch(field, "integer", value))
    }

    fn date(&self, field: &'static str) -> Result<NaiveDate, DecodeError> {
        let value = self.get(field)?;
        value
            .as_str()
            .and_then(parse_date)
            .ok_or_else(|| Self::mismatch(field, "ISO date (YYYY-MM-DD)", value))
    }
}

use crate::utils::error::InvalidValue;
use chrono::NaiveDate;

pub trait Validate {
    type Error;

    fn validate(&self) -> Result<(), Self::Error>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> InvalidValue {
    InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<(), InvalidValue> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<(), InvalidValue> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: i64) -> Result<(), InvalidValue> {
    if value <= 0 {
        return Err(invalid(field_name, value, "must be > 0"));
    }
    Ok(())
}

/// `check_out` must fall strictly after `check_in`.
pub fn validate_date_range(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), InvalidValue> {
    if check_out <= check_in {
        return Err(invalid(
            "check_out",
            check_out,
            format!("must be after check_in ({})", check_in),
        ));
    }
    Ok(())
}

pub fn validate_one_of(
    field_name: &str,
    value: &str,
    allowed: &[&str],
) -> Result<(), InvalidValue> {
    if !allowed.contains(&value) {
        return Err(invalid(
            field_name,
            value,
            format!("Valid values: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}

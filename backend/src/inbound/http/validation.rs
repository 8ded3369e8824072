//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{DateWindow, Error, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidDate,
    InvalidWindow,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidWindow => "invalid_window",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            format!("{name} must be a valid UUID"),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    parse_uuid(value, field).map(UserId::from_uuid)
}

pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            format!("{name} must be a calendar date formatted YYYY-MM-DD"),
            ErrorCode::InvalidDate,
            value,
        )
    })
}

/// Parse a `[startDate, endDate]` pair into a validated window.
pub(crate) fn parse_window(start: &str, end: &str) -> Result<DateWindow, Error> {
    let start_date = parse_date(start, FieldName::new("startDate"))?;
    let end_date = parse_date(end, FieldName::new("endDate"))?;
    DateWindow::new(start_date, end_date).map_err(|err| {
        field_error(
            FieldName::new("endDate"),
            err.to_string(),
            ErrorCode::InvalidWindow,
            end,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    #[test]
    fn parse_uuid_accepts_canonical_form() {
        let parsed = parse_uuid(
            "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            FieldName::new("engineerId"),
        )
        .expect("valid uuid");
        assert_eq!(parsed.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[test]
    fn parse_uuid_reports_field_and_value() {
        let err = parse_uuid("nope", FieldName::new("engineerId")).expect_err("invalid uuid");
        let details = err.details().expect("details present");
        assert_eq!(details.get("field"), Some(&Value::from("engineerId")));
        assert_eq!(details.get("code"), Some(&Value::from("invalid_uuid")));
    }

    #[rstest]
    #[case("2026-01-31", true)]
    #[case("2026-1-31", false)]
    #[case("31/01/2026", false)]
    #[case("not-a-date", false)]
    fn parse_date_requires_iso_format(#[case] input: &str, #[case] accepted: bool) {
        assert_eq!(
            parse_date(input, FieldName::new("startDate")).is_ok(),
            accepted
        );
    }

    #[test]
    fn parse_window_rejects_inverted_bounds() {
        let err = parse_window("2026-02-10", "2026-02-01").expect_err("inverted window");
        let details = err.details().expect("details present");
        assert_eq!(details.get("code"), Some(&Value::from("invalid_window")));
    }

    #[test]
    fn parse_window_accepts_single_day() {
        let window = parse_window("2026-02-10", "2026-02-10").expect("single-day window");
        assert_eq!(window.start(), window.end());
    }
}

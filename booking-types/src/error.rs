use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a booking operation, shared between the server functions and
/// the browser so callers can branch on the variant instead of the message.
///
/// `Display` and `FromStr` round-trip, which is what lets this type travel as
/// the custom error of a Leptos server function.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BookingError {
    /// The talent is booked out on the requested date.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation failed: {0}")]
    ValidationFailed(String),
    #[error("not found")]
    NotFound,
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("unknown: {0}")]
    Unknown(String),
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Conflict(_) => 409,
            Self::ValidationFailed(_) => 422,
            Self::NotFound => 404,
            Self::Unauthorized(_) => 401,
            Self::Unknown(_) => 500,
        }
    }

    /// Title of the toast shown when a booking could not be created.
    pub fn toast_title(&self) -> &'static str {
        match self {
            Self::Conflict(_) => "Talent unavailable",
            _ => "Failed to create booking",
        }
    }

    /// Human readable detail without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Conflict(m)
            | Self::ValidationFailed(m)
            | Self::Unauthorized(m)
            | Self::Unknown(m) => m.clone(),
            Self::NotFound => "Booking not found".to_string(),
        }
    }
}

impl FromStr for BookingError {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "not found" {
            return Ok(Self::NotFound);
        }
        let parsed = match s.split_once(": ") {
            Some(("conflict", m)) => Self::Conflict(m.to_string()),
            Some(("validation failed", m)) => Self::ValidationFailed(m.to_string()),
            Some(("unauthorized", m)) => Self::Unauthorized(m.to_string()),
            Some(("unknown", m)) => Self::Unknown(m.to_string()),
            _ => Self::Unknown(s.to_string()),
        };
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_from_str_round_trip() {
        let errors = [
            BookingError::Conflict("Talent is unavailable during the selected date".into()),
            BookingError::validation("talent is required"),
            BookingError::NotFound,
            BookingError::Unauthorized("Invalid token".into()),
            BookingError::Unknown("pool timed out".into()),
        ];
        for err in errors {
            let parsed: BookingError = err.to_string().parse().unwrap();
            assert_eq!(parsed, err);
        }
    }

    #[test]
    fn unprefixed_text_parses_as_unknown() {
        let parsed: BookingError = "connection reset".parse().unwrap();
        assert_eq!(parsed, BookingError::Unknown("connection reset".into()));
    }

    #[test]
    fn only_conflict_gets_the_unavailable_toast() {
        assert_eq!(
            BookingError::Conflict("x".into()).toast_title(),
            "Talent unavailable"
        );
        assert_eq!(BookingError::Conflict("x".into()).status_code(), 409);
        for err in [
            BookingError::validation("x"),
            BookingError::NotFound,
            BookingError::Unknown("x".into()),
        ] {
            assert_eq!(err.toast_title(), "Failed to create booking");
        }
    }
}

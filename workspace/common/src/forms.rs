//! Form payloads and their field rules.
//!
//! Every form deserializes with missing fields defaulted to empty so that an
//! absent field is reported as a field error rather than a parse failure.

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Format accepted for concert dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Flattens `validator` output into field/message pairs, sorted by field.
    pub fn from_validation(errors: &ValidationErrors) -> Vec<FieldError> {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        fields
    }
}

fn check<T: Validate>(form: &T) -> Result<(), Vec<FieldError>> {
    form.validate()
        .map_err(|errors| FieldError::from_validation(&errors))
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO || *price > Decimal::from(500) {
        return Err(error("range", "Please enter a number between 0 and 500."));
    }
    Ok(())
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| error("date", "Please enter a valid date (YYYY-MM-DD)."))
}

/// Treats blank optional strings as absent.
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Payload for creating or editing an artist.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq, Default)]
#[serde(default)]
pub struct ArtistForm {
    #[validate(length(min = 3, max = 80, message = "The name needs to be between 3 and 80 chars"))]
    pub name: String,
    #[validate(length(min = 3, max = 80, message = "The hometown needs to be between 3 and 80 chars"))]
    pub hometown: String,
    #[validate(length(min = 3, max = 80, message = "The genre needs to be between 3 and 80 chars"))]
    pub genre: String,
    #[validate(length(min = 3, max = 3000, message = "The biography must be less than 3000 chars"))]
    pub biography: String,
    /// Image URL
    pub image: Option<String>,
}

impl ArtistForm {
    /// The form with surrounding whitespace stripped. Rules are checked on,
    /// and values stored from, this form.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            hometown: self.hometown.trim().to_string(),
            genre: self.genre.trim().to_string(),
            biography: self.biography.trim().to_string(),
            image: non_blank(&self.image),
        }
    }

    /// Runs the field rules on the normalized form, returning every failing
    /// field.
    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        check(&self.normalized())
    }
}

/// Payload for creating or editing a concert.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq, Default)]
#[serde(default)]
pub struct ConcertForm {
    #[validate(length(min = 3, max = 80, message = "The name needs to be between 3 and 80 chars"))]
    pub name: String,
    #[validate(
        required(message = "Please enter a number between 0 and 500."),
        custom(function = "validate_price")
    )]
    pub price: Option<Decimal>,
    #[validate(length(min = 3, max = 80, message = "The venue name needs to be between 3 and 80 chars"))]
    pub venue: String,
    #[validate(length(min = 3, max = 80, message = "The address needs to be between 3 and 80 chars"))]
    pub address: String,
    /// Concert date (YYYY-MM-DD)
    #[validate(custom(function = "validate_date"))]
    pub date: String,
    /// Image URL
    pub image: Option<String>,
    /// Id of the artist playing, if any
    pub artist_id: Option<i32>,
}

impl ConcertForm {
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            price: self.price,
            venue: self.venue.trim().to_string(),
            address: self.address.trim().to_string(),
            date: self.date.trim().to_string(),
            image: non_blank(&self.image),
            artist_id: self.artist_id,
        }
    }

    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        check(&self.normalized())
    }

    /// The parsed date. Only `None` when `check` would fail.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }
}

/// Username and password, used by both signup and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq, Default)]
#[serde(default)]
pub struct Credentials {
    #[validate(length(min = 3, max = 80, message = "The username needs to be between 3 and 80 chars"))]
    pub username: String,
    #[validate(length(min = 1, max = 128, message = "The password must not be empty"))]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Strips the username. Passwords are taken verbatim.
    pub fn normalized(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        }
    }

    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        check(&self.normalized())
    }
}

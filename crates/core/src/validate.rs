//! Request payload shapes.
//!
//! Each inbound JSON body has a dedicated input struct carrying its
//! validation rules. Payloads are sanitized first ([`Sanitize`]), then
//! validated, so length and format rules apply to the canonical text. The
//! HTTP layer reports every failing field, not just the first.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::sanitize::clean;

/// Calendar dates on the wire are `YYYY-MM-DD`. Calendar validity is checked
/// later, when the date is parsed.
pub static DATE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Sanitation applied before validation.
pub trait Sanitize {
    fn sanitize(&mut self);
}

fn uuid_format(value: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        let mut err = ValidationError::new("uuid");
        err.message = Some("Invalid UUID".into());
        Err(err)
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 2, message = "At least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "At least 6 characters"))]
    pub password: String,
}

impl Sanitize for RegisterInput {
    fn sanitize(&mut self) {
        self.name = clean(&self.name);
        self.email = clean(&self.email).to_lowercase();
        self.password = clean(&self.password);
    }
}

/// Body of `POST /auth/login`. Same rules as registration, minus the name.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "At least 6 characters"))]
    pub password: String,
}

impl Sanitize for LoginInput {
    fn sanitize(&mut self) {
        self.email = clean(&self.email).to_lowercase();
        self.password = clean(&self.password);
    }
}

/// Body of `POST /properties`.
#[derive(Debug, Deserialize, Validate)]
pub struct PropertyCreateInput {
    #[validate(length(min = 2, message = "At least 2 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 2, message = "At least 2 characters"))]
    pub location: String,
    #[validate(range(exclusive_min = 0.0, message = "Must be greater than 0"))]
    pub price_per_night: f64,
    /// Defaults to `true` when omitted.
    pub availability: Option<bool>,
    #[validate(url(message = "Invalid URL"))]
    pub image_url: Option<String>,
}

impl Sanitize for PropertyCreateInput {
    fn sanitize(&mut self) {
        self.name = clean(&self.name);
        self.location = clean(&self.location);
    }
}

/// Body of `PATCH /properties/{id}`: every field optional.
#[derive(Debug, Deserialize, Validate)]
pub struct PropertyPatchInput {
    #[validate(length(min = 2, message = "At least 2 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 2, message = "At least 2 characters"))]
    pub location: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Must be greater than 0"))]
    pub price_per_night: Option<f64>,
    pub availability: Option<bool>,
    #[validate(url(message = "Invalid URL"))]
    pub image_url: Option<String>,
}

impl Sanitize for PropertyPatchInput {
    fn sanitize(&mut self) {
        if let Some(name) = &self.name {
            self.name = Some(clean(name));
        }
        if let Some(location) = &self.location {
            self.location = Some(clean(location));
        }
    }
}

/// Body of `POST /bookings`.
#[derive(Debug, Deserialize, Validate)]
pub struct BookingCreateInput {
    #[validate(custom(function = uuid_format))]
    pub property_id: String,
    #[validate(regex(path = *DATE_FORMAT, message = "Format YYYY-MM-DD"))]
    pub check_in_date: String,
    #[validate(regex(path = *DATE_FORMAT, message = "Format YYYY-MM-DD"))]
    pub check_out_date: String,
}

impl Sanitize for BookingCreateInput {
    fn sanitize(&mut self) {
        self.property_id = clean(&self.property_id);
        self.check_in_date = clean(&self.check_in_date);
        self.check_out_date = clean(&self.check_out_date);
    }
}

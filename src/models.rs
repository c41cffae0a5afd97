use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::{self, Plan};

/// Booking form as submitted by the browser
///
/// Every field is optional and untyped; coercion happens in [`NewBooking::from_form`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plan: Option<String>,
    pub hours: Option<String>,
    pub notes: Option<String>,
}

impl BookingForm {
    /// Names of required fields that are missing or blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.email) {
            missing.push("email");
        }
        missing
    }
}

/// A booking ready to be stored, without identifier or timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub plan: Plan,
    pub hours: i64,
    pub price: i64,
    pub notes: Option<String>,
}

impl NewBooking {
    /// Build a booking with the price derived from plan and hours
    pub fn new(name: impl Into<String>, email: impl Into<String>, plan: Plan, hours: i64) -> Self {
        let hours = pricing::clamp_hours(hours);
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            plan,
            hours,
            price: pricing::price_for(plan, hours),
            notes: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = non_blank(Some(phone.into()));
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = non_blank(Some(notes.into()));
        self
    }

    /// Coerce a raw form into a booking.
    ///
    /// Unknown plans become group lessons and bad hour counts become one hour.
    /// Blank optional fields are stored as NULL.
    pub fn from_form(form: BookingForm) -> Self {
        let plan = Plan::from_form(form.plan.as_deref());
        let hours = pricing::coerce_hours(form.hours.as_deref());

        Self {
            name: form.name.map(|s| s.trim().to_string()).unwrap_or_default(),
            email: form.email.map(|s| s.trim().to_string()).unwrap_or_default(),
            phone: non_blank(form.phone),
            plan,
            hours,
            price: pricing::price_for(plan, hours),
            notes: non_blank(form.notes),
        }
    }
}

/// A stored booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub plan: Plan,
    pub hours: i64,
    pub price: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    /// The submitted part of the record, without id and timestamp
    pub fn booking(&self) -> NewBooking {
        NewBooking {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            plan: self.plan,
            hours: self.hours,
            price: self.price,
            notes: self.notes.clone(),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

//! HTTP handlers
//!
//! - pages: home and plans pages
//! - booking: booking form, submission and price quotes
//! - admin: booking listing (HTML and JSON), behind the admin middleware
//! - health: liveness and readiness
//! - metrics_handler: Prometheus exposition

pub mod admin;
pub mod booking;
pub mod health;
pub mod metrics_handler;
pub mod pages;

use serde::Serialize;
use std::sync::Arc;

use crate::{
    pricing::{GROUP_RATE, INDIVIDUAL_RATE},
    store::BookingStore,
    templates::Templates,
};

/// Shared state for page and API handlers
#[derive(Clone)]
pub struct AppState {
    pub store: BookingStore,
    pub templates: Arc<Templates>,
}

/// Values every page needs (the layout's live calculator uses the rates)
#[derive(Debug, Serialize)]
pub(crate) struct PageContext<T: Serialize> {
    group_rate: i64,
    individual_rate: i64,
    #[serde(flatten)]
    page: T,
}

impl<T: Serialize> PageContext<T> {
    pub(crate) fn new(page: T) -> Self {
        Self {
            group_rate: GROUP_RATE,
            individual_rate: INDIVIDUAL_RATE,
            page,
        }
    }
}

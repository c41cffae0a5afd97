use axum::{extract::State, response::Html, Json};
use serde::Serialize;

use super::{AppState, PageContext};
use crate::{error::AppError, models::BookingRecord};

#[derive(Debug, Serialize)]
struct AdminPage {
    bookings: Vec<BookingRecord>,
}

/// GET /admin
pub async fn admin_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let bookings = state.store.list_all().await?;
    tracing::debug!(count = bookings.len(), "Rendering admin listing");
    state
        .templates
        .render("admin", &PageContext::new(AdminPage { bookings }))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingRecord>>, AppError> {
    Ok(Json(state.store.list_all().await?))
}

use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::field::display;

use super::{AppState, PageContext};
use crate::{
    error::AppError,
    logging::{MaskedEmail, MaskedPhone},
    metrics,
    models::{BookingForm, NewBooking},
    pricing::{self, Plan, Quote},
};

#[derive(Debug, Default, Deserialize)]
pub struct BookQuery {
    pub plan: Option<String>,
    pub hours: Option<String>,
    pub submitted: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub plan: Option<String>,
    pub hours: Option<String>,
}

/// Values echoed back into the form inputs
#[derive(Debug, Default, Serialize)]
struct FormValues {
    name: String,
    email: String,
    phone: String,
    notes: String,
}

#[derive(Debug, Serialize)]
struct BookPage {
    group_selected: bool,
    individual_selected: bool,
    hours: i64,
    submitted: bool,
    error: Option<String>,
    form: FormValues,
}

impl BookPage {
    fn new(plan: Plan, hours: i64) -> Self {
        Self {
            group_selected: plan == Plan::Group,
            individual_selected: plan == Plan::Individual,
            hours,
            submitted: false,
            error: None,
            form: FormValues::default(),
        }
    }
}

/// GET /book
pub async fn book_form(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> Result<Response, AppError> {
    let plan = Plan::from_form(query.plan.as_deref());
    let hours = pricing::coerce_hours(query.hours.as_deref());

    let mut page = BookPage::new(plan, hours);
    page.submitted = query.submitted.is_some();

    Ok(state
        .templates
        .render("book", &PageContext::new(page))?
        .into_response())
}

/// POST /book
///
/// Stores the booking and redirects back to the form with a confirmation.
/// A submission without name or email re-renders the form.
pub async fn submit_booking(
    State(state): State<AppState>,
    Form(form): Form<BookingForm>,
) -> Result<Response, AppError> {
    let missing = form.missing_required();
    if !missing.is_empty() {
        tracing::debug!(?missing, "Rejected incomplete booking form");
        return render_invalid(&state, form, &missing);
    }

    let booking = NewBooking::from_form(form);
    let id = state.store.insert(&booking).await?;

    metrics::record_booking(booking.plan, booking.price);
    tracing::info!(
        booking_id = id,
        plan = %booking.plan,
        hours = booking.hours,
        price = booking.price,
        email = %MaskedEmail::new(&booking.email),
        phone = booking.phone.as_deref().map(|p| display(MaskedPhone::new(p))),
        "Booking created"
    );

    Ok(Redirect::to("/book?submitted=1").into_response())
}

fn render_invalid(
    state: &AppState,
    form: BookingForm,
    missing: &[&'static str],
) -> Result<Response, AppError> {
    let plan = Plan::from_form(form.plan.as_deref());
    let hours = pricing::coerce_hours(form.hours.as_deref());

    let mut page = BookPage::new(plan, hours);
    page.error = Some(format!("Заполните обязательные поля: {}", missing.join(", ")));
    page.form = FormValues {
        name: form.name.unwrap_or_default(),
        email: form.email.unwrap_or_default(),
        phone: form.phone.unwrap_or_default(),
        notes: form.notes.unwrap_or_default(),
    };

    let html = state.templates.render("book", &PageContext::new(page))?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
}

/// GET /api/quote
pub async fn quote(Query(query): Query<QuoteQuery>) -> Json<Quote> {
    Json(pricing::quote(query.plan.as_deref(), query.hours.as_deref()))
}

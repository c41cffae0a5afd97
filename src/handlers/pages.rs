use axum::{extract::State, response::Html};
use serde::Serialize;

use super::{AppState, PageContext};
use crate::{
    error::AppError,
    pricing::{self, Plan},
};

#[derive(Debug, Serialize)]
struct Package {
    title: &'static str,
    plan: Plan,
    hours: i64,
    rate: i64,
    total: i64,
}

impl Package {
    fn new(title: &'static str, plan: Plan, hours: i64) -> Self {
        Self {
            title,
            plan,
            hours,
            rate: plan.rate(),
            total: pricing::price_for(plan, hours),
        }
    }
}

#[derive(Debug, Serialize)]
struct PlansPage {
    packages: Vec<Package>,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.templates.render("home", &PageContext::new(()))
}

/// GET /plans
pub async fn plans(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = PlansPage {
        packages: vec![
            Package::new("Экономный", Plan::Group, 8),
            Package::new("Интенсив", Plan::Individual, 16),
        ],
    };
    state.templates.render("plans", &PageContext::new(page))
}

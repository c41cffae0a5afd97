//! HTML page templates
//!
//! Templates are compiled into the binary from `templates/`. Every page wraps
//! itself in the `layout` partial.

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::AppError;

const LAYOUT: &str = include_str!("../templates/layout.hbs");

const PAGES: &[(&str, &str)] = &[
    ("home", include_str!("../templates/home.hbs")),
    ("plans", include_str!("../templates/plans.hbs")),
    ("book", include_str!("../templates/book.hbs")),
    ("admin", include_str!("../templates/admin.hbs")),
];

/// Registry of the site's pages
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("layout", LAYOUT)?;
        for (name, source) in PAGES {
            registry.register_template_string(name, source)?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, page: &str, context: &T) -> Result<Html<String>, AppError> {
        let html = self.registry.render(page, context)?;
        Ok(Html(html))
    }
}

use crate::{error::AppError, metrics};
use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Decides whether a presented credential grants admin access
pub trait AdminVerifier: Send + Sync + 'static {
    fn verify(&self, credential: &str) -> bool;
}

/// Shared handle to the configured verifier
pub type SharedVerifier = Arc<dyn AdminVerifier>;

/// Compares the credential against a configured password in constant time
pub struct PasswordVerifier {
    password: Option<String>,
}

impl PasswordVerifier {
    pub fn new(password: Option<String>) -> Self {
        Self { password }
    }

    pub fn is_configured(&self) -> bool {
        self.password.is_some()
    }
}

impl AdminVerifier for PasswordVerifier {
    fn verify(&self, credential: &str) -> bool {
        match &self.password {
            Some(expected) => expected.as_bytes().ct_eq(credential.as_bytes()).into(),
            None => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AdminQuery {
    pw: Option<String>,
}

/// Admin access middleware
///
/// Takes the credential from a Bearer `Authorization` header, or from the `pw`
/// query parameter so plain browser links keep working.
pub async fn admin_middleware(
    State(verifier): State<SharedVerifier>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credential = match req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
    {
        Some(header) => Some(extract_bearer_token(header)?.to_string()),
        None => Query::<AdminQuery>::try_from_uri(req.uri())
            .ok()
            .and_then(|Query(q)| q.pw)
            .filter(|pw| !pw.is_empty()),
    };

    let Some(credential) = credential else {
        metrics::record_admin_access("missing");
        return Err(AppError::Unauthorized("Admin credential required".to_string()));
    };

    if !verifier.verify(&credential) {
        metrics::record_admin_access("denied");
        tracing::warn!(path = %req.uri().path(), "Rejected admin credential");
        return Err(AppError::Unauthorized("Invalid admin credential".to_string()));
    }

    metrics::record_admin_access("granted");
    Ok(next.run(req).await)
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    const BEARER_PREFIX: &str = "Bearer ";

    let Some(token) = auth_header.strip_prefix(BEARER_PREFIX) else {
        return Err(AppError::Unauthorized(
            "Authorization header must use Bearer scheme".to_string(),
        ));
    };

    if token.is_empty() {
        return Err(AppError::Unauthorized("Bearer token is empty".to_string()));
    }

    Ok(token)
}

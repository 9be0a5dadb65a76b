//! Authenticated caller identity, passed explicitly into every mutating operation.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::store::{DocumentId, InvalidDocumentId};
use crate::users::Role;

/// Header carrying the authenticated user id, set by the upstream gateway.
pub const CALLER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user's role.
pub const CALLER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn document_id(&self) -> Result<DocumentId, InvalidDocumentId> {
        self.user_id.parse()
    }

    /// Role gate applied at the HTTP boundary.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden { role: self.role })
        }
    }

    fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let user_id = header_value(headers, CALLER_ID_HEADER)?;
        let role = header_value(headers, CALLER_ROLE_HEADER)?
            .parse::<Role>()
            .map_err(|err| AppError::Unauthenticated(err.to_string()))?;
        Ok(Self::new(user_id, role))
    }
}

fn header_value(headers: &HeaderMap, name: &'static str) -> Result<String, AppError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Unauthenticated(format!("missing {name} header")))
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Caller::from_headers(&parts.headers)
    }
}

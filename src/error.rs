use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with. Each variant maps to one status
/// code; server-side failures are logged here and never leak detail to
/// the client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("you can only modify your own recipes")]
    Forbidden,

    #[error("recipe not found")]
    RecipeNotFound,

    #[error("tag not found")]
    TagNotFound,

    #[error("ingredient not found")]
    IngredientNotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("recipe already added")]
    DuplicateCartEntry,

    #[error("recipe is not in the shopping cart")]
    MissingCartEntry,

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::RecipeNotFound
            | ApiError::TagNotFound
            | ApiError::IngredientNotFound
            | ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::DuplicateCartEntry
            | ApiError::MissingCartEntry
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Database(e) => error!(error = %e, "database error"),
            ApiError::Internal(e) => error!(error = %e, "internal error"),
            _ => {}
        }
        (status, Json(json!({ "errors": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_client_statuses() {
        assert_eq!(
            ApiError::Unauthenticated("missing Authorization header").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::RecipeNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::DuplicateCartEntry.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingCartEntry.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("email already registered").status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn server_errors_do_not_leak_detail() {
        let err = ApiError::Internal(anyhow::anyhow!("connection pool exhausted"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "internal error");
    }

    #[test]
    fn duplicate_add_renders_original_message() {
        assert_eq!(ApiError::DuplicateCartEntry.to_string(), "recipe already added");
    }
}

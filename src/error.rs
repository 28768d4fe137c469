use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// One failed input field, reported inside the `{"errors": [...]}` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every recoverable failure a handler can produce. Nothing else crosses the
/// HTTP boundary: unexpected errors land in `Internal` and are reported to
/// the caller with a generic message only.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("validation failed")]
    Fields(Vec<FieldError>),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    Authorization(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Fields(_) | ApiError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::Authorization(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Fields(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::Internal(err) => {
                error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Erro interno do servidor" })),
                )
                    .into_response()
            }
            other => {
                let status = other.status();
                (status, Json(json!({ "error": other.to_string() }))).into_response()
            }
        }
    }
}

/// True when the underlying sqlx error is a unique-constraint violation.
/// Used to map the duplicate-email race on registration to a conflict.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn not_found_maps_to_404_envelope() {
        let (status, body) = body_json(ApiError::NotFound("Produto não encontrado".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Produto não encontrado");
    }

    #[tokio::test]
    async fn authentication_maps_to_401_and_authorization_to_403() {
        let (status, _) = body_json(ApiError::Authentication("Token não fornecido".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = body_json(ApiError::Authorization("Usuário não autorizado".into())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn field_errors_use_the_errors_envelope() {
        let errors = vec![FieldError {
            field: "password",
            message: "Senha deve ter pelo menos 6 caracteres",
        }];
        let (status, body) = body_json(ApiError::Fields(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "password");
    }

    #[tokio::test]
    async fn internal_errors_never_leak_the_cause() {
        let (status, body) =
            body_json(ApiError::Internal(anyhow::anyhow!("pool timed out"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Erro interno do servidor");
    }
}

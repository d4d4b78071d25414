use crate::order_actor::OrderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Everything a handler can fail with. Every variant renders as a JSON object with an
/// `error` key.
#[derive(Error, Debug, PartialEq)]
pub enum AppError {
    #[error("Order not found")]
    OrderNotFound,

    #[error("Route not found")]
    RouteNotFound { path: String, method: String },

    #[error("Malformed payload")]
    MalformedPayload { detail: Option<String> },

    #[error("Failed to save orders")]
    StoreWrite { detail: Option<String> },

    #[error("Internal server error")]
    Internal { detail: Option<String> },
}

impl AppError {
    /// Maps a domain error; `detail` carries the underlying message unless hidden.
    pub fn from_order(error: OrderError, hide_detail: bool) -> Self {
        let detail = (!hide_detail).then(|| error.to_string());
        match error {
            OrderError::NotFound(_) => AppError::OrderNotFound,
            OrderError::Storage(_) => AppError::StoreWrite { detail },
            OrderError::ActorCommunicationError(_) => AppError::Internal { detail },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::OrderNotFound | AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
            AppError::StoreWrite { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> Value {
        let mut body = json!({ "error": self.to_string() });
        match self {
            AppError::RouteNotFound { path, method } => {
                body["path"] = json!(path);
                body["method"] = json!(method);
            }
            AppError::MalformedPayload { detail: Some(detail) }
            | AppError::StoreWrite { detail: Some(detail) }
            | AppError::Internal { detail: Some(detail) } => {
                body["detail"] = json!(detail);
            }
            _ => {}
        }
        body
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::StoreError;

    #[test]
    fn test_route_not_found_body() {
        let error = AppError::RouteNotFound {
            path: "/api/unknown".into(),
            method: "GET".into(),
        };
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            error.body(),
            json!({"error": "Route not found", "path": "/api/unknown", "method": "GET"})
        );
    }

    #[test]
    fn test_store_failures_hide_detail_in_production() {
        let failure = OrderError::Storage(StoreError::Write("quota exceeded".into()));

        let hidden = AppError::from_order(failure.clone(), true);
        assert_eq!(hidden.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(hidden.body(), json!({"error": "Failed to save orders"}));

        let shown = AppError::from_order(failure, false);
        assert_eq!(
            shown.body()["detail"],
            json!("Order storage error: Store write failed: quota exceeded")
        );
    }

    #[test]
    fn test_not_found_never_has_detail() {
        let error = AppError::from_order(OrderError::NotFound("42".into()), false);
        assert_eq!(error, AppError::OrderNotFound);
        assert_eq!(error.body(), json!({"error": "Order not found"}));
    }
}

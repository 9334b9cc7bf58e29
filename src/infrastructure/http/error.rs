//! HTTP error responses
//!
//! Every failure leaves the API as `{"error": {"message", "status", "details"?}}`.
//! Internal failures are logged and redacted; their detail is only put back
//! into the body by [`attach_internal_detail`] when running in development.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request, State,
    },
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::application::error::{ServiceError, ServiceResult};
use crate::infrastructure::state::AppState;

/// A `ServiceError` on its way out through axum
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        ApiError(error)
    }
}

/// Unredacted message of an internal error, carried as a response extension
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

fn status_for(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unauthenticated => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_body(message: &str, status: StatusCode, details: Option<Value>) -> Value {
    let mut error = json!({
        "message": message,
        "status": status.as_u16(),
    });
    if let Some(details) = details {
        error["details"] = details;
    }
    json!({ "error": error })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        match self.0 {
            ServiceError::Internal(source) => {
                let detail = format!("{source:#}");
                tracing::error!(error = %detail, "Request failed");
                let mut response =
                    (status, Json(error_body("Internal server error", status, None)))
                        .into_response();
                response.extensions_mut().insert(InternalErrorDetail(detail));
                response
            }
            ServiceError::InvalidInput(violations) => {
                let details = serde_json::to_value(&violations).ok();
                (status, Json(error_body("Validation failed", status, details))).into_response()
            }
            other => (status, Json(error_body(&other.to_string(), status, None))).into_response(),
        }
    }
}

/// Put the internal error detail back into the body in development mode
pub async fn attach_internal_detail(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !state.config.environment.is_development() {
        return response;
    }
    let Some(InternalErrorDetail(detail)) =
        response.extensions().get::<InternalErrorDetail>().cloned()
    else {
        return response;
    };

    let status = response.status();
    let body = error_body("Internal server error", status, Some(Value::String(detail)));
    (status, Json(body)).into_response()
}

/// Parse a path segment into a typed id
pub fn parse_id<T: FromStr>(raw: &str) -> ServiceResult<T> {
    raw.parse()
        .map_err(|_| ServiceError::invalid("id", format!("'{raw}' is not a valid id")))
}

/// `Json` with rejections reported in the API error format
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ServiceError::invalid("body", rejection.body_text()).into()),
        }
    }
}

/// `Query` with rejections reported in the API error format
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => Err(query_error(rejection)),
        }
    }
}

fn query_error(rejection: QueryRejection) -> ApiError {
    ServiceError::invalid("query", rejection.body_text()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::FieldViolation;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn statuses_follow_the_error_kind() {
        let cases = [
            (ServiceError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (ServiceError::forbidden("Not yours"), StatusCode::FORBIDDEN),
            (ServiceError::not_found("Room"), StatusCode::NOT_FOUND),
            (ServiceError::conflict("Stale"), StatusCode::CONFLICT),
        ];
        for (error, status) in cases {
            let message = error.to_string();
            let response = ApiError(error).into_response();
            assert_eq!(response.status(), status);
            let body = body_json(response).await;
            assert_eq!(body["error"]["message"], message);
            assert_eq!(body["error"]["status"], status.as_u16());
        }
    }

    #[tokio::test]
    async fn validation_errors_list_their_fields() {
        let error = ServiceError::InvalidInput(vec![
            FieldViolation::new("name", "Name is required"),
            FieldViolation::new("dimensions.width", "Width must be positive"),
        ]);
        let response = ApiError(error).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["details"][1]["field"], "dimensions.width");
    }

    #[tokio::test]
    async fn internal_errors_are_redacted() {
        let response = ApiError(anyhow::anyhow!("database locked").into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<InternalErrorDetail>().is_some());

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Internal server error");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn development_mode_reveals_internal_detail() {
        use crate::infrastructure::config::Environment;
        use axum::{body::Body, http::Request, routing::get, Router};
        use tower::ServiceExt;

        async fn failing() -> ApiResult<()> {
            Err(ApiError(anyhow::anyhow!("database locked").into()))
        }

        let mut state = AppState::for_tests().await.unwrap();
        state.config.environment = Environment::Development;
        let state = Arc::new(state);
        let app = Router::new()
            .route("/", get(failing))
            .layer(axum::middleware::from_fn_with_state(
                Arc::clone(&state),
                attach_internal_detail,
            ))
            .with_state(state);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["details"], "database locked");
    }

    #[test]
    fn malformed_ids_are_invalid_input() {
        let err = parse_id::<crate::domain::value_objects::RoomId>("nope").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(ref v) if v[0].field == "id"));
    }
}

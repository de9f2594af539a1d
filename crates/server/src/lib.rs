use api_types::ErrorBody;
use auth_client::ClientError;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use guard::{GuardDecision, LANDING_PATH, LOGIN_PATH, PROTECTED_PATHS, RouteGuard};
pub use server::{PAGE_PATHS, ServerState, router, run_with_listener, spawn_with_listener};

mod auth;
mod categories;
mod dashboard;
mod expenses;
mod guard;
mod server;
pub mod session;
mod views;

pub enum ServerError {
    /// Rejected request input.
    Engine(EngineError),
    /// Failure on data the server owns, such as a corrupt dataset.
    Internal(String),
    Auth(ClientError),
    Unauthorized,
    Generic(String),
}

impl ServerError {
    pub(crate) fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UnknownCategory(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidDate(_)
        | EngineError::InvalidExpense(_)
        | EngineError::InvalidFilter(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::InvalidTimezone(_)
        | EngineError::InvalidCatalog(_)
        | EngineError::AmountOverflow
        | EngineError::Dataset(_)
        | EngineError::Io(_)
        | EngineError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn status_for_client_error(err: &ClientError) -> StatusCode {
    match err {
        ClientError::Unauthorized => StatusCode::UNAUTHORIZED,
        ClientError::Forbidden => StatusCode::FORBIDDEN,
        ClientError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ClientError::NotFound
        | ClientError::Server(_)
        | ClientError::Transport(_)
        | ClientError::InvalidUrl(_) => StatusCode::BAD_GATEWAY,
    }
}

fn message_for_client_error(err: ClientError) -> String {
    match err {
        ClientError::Unauthorized => "invalid credentials".to_string(),
        ClientError::Validation(msg) => msg,
        ClientError::Forbidden => "forbidden".to_string(),
        other => {
            tracing::error!("authentication backend error: {other}");
            "authentication service unavailable".to_string()
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), err.to_string()),
            ServerError::Internal(err) => {
                tracing::error!("internal error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::Auth(err) => (status_for_client_error(&err), message_for_client_error(err)),
            ServerError::Unauthorized => (StatusCode::UNAUTHORIZED, "not authenticated".to_string()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<ClientError> for ServerError {
    fn from(value: ClientError) -> Self {
        Self::Auth(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_422() {
        for err in [
            EngineError::UnknownCategory("gifts".to_string()),
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidDate("x".to_string()),
            EngineError::InvalidFilter("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn corrupt_dataset_maps_to_500() {
        let res = ServerError::internal(EngineError::UnknownCategory("gifts".to_string()))
            .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let res = ServerError::from(EngineError::Dataset("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let res = ServerError::from(EngineError::AmountOverflow).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_failures() {
        let res = ServerError::from(ClientError::Unauthorized).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = ServerError::from(ClientError::Server("boom".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let res = ServerError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

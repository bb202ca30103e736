use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{AppState, app, run_with_listener, spawn_with_listener};

mod account;
mod cart;
mod leads;
mod notifications;
mod policy;
mod purchases;
mod server;

pub mod types {
    pub mod lead {
        pub use api_types::lead::{LeadFilter, LeadListResponse, LeadView};
    }

    pub mod cart {
        pub use api_types::cart::{CartToggle, CartView, SettleResponse, ToggleResponse};
    }

    pub mod account {
        pub use api_types::account::{AccountView, TopUp};
    }

    pub mod purchase {
        pub use api_types::purchase::{PurchaseListResponse, PurchaseView};
    }

    pub mod notification {
        pub use api_types::notification::{NotificationListResponse, NotificationView, Severity};
    }

    pub mod policy {
        pub use api_types::policy::{
            PolicyRunResponse, PolicySettingUpdate, PolicySettingView, PolicySettingsResponse,
            SettingValue,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InsufficientFunds(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidBounds(_)
        | EngineError::StaleSelection(_)
        | EngineError::TypeMismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), err.to_string()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        for err in [
            EngineError::InsufficientFunds("x".to_string()),
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidBounds("x".to_string()),
            EngineError::StaleSelection("x".to_string()),
            EngineError::TypeMismatch("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

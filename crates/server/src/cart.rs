//! Cart and settlement endpoints.

use api_types::cart::{CartToggle, CartView, SettleResponse, ToggleResponse};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use engine::{Engine, SettlementOutcome};

use crate::server::AppState;

pub(crate) fn cart_view(engine: &Engine) -> CartView {
    let total = engine.cart_total();
    CartView {
        lead_ids: engine.cart().ids().to_vec(),
        total_minor: total.total_minor,
        stale_ids: total.stale,
    }
}

pub async fn get(State(state): State<AppState>) -> Json<CartView> {
    let engine = state.engine.lock().await;
    Json(cart_view(&engine))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<CartToggle>,
) -> Json<ToggleResponse> {
    let mut engine = state.engine.lock().await;
    let in_cart = engine.toggle_cart(payload.lead_id);

    Json(ToggleResponse {
        in_cart,
        cart: cart_view(&engine),
    })
}

pub async fn clear(State(state): State<AppState>) -> StatusCode {
    let mut engine = state.engine.lock().await;
    engine.clear_cart();

    StatusCode::NO_CONTENT
}

pub async fn settle(State(state): State<AppState>) -> Json<SettleResponse> {
    let mut engine = state.engine.lock().await;

    let response = match engine.settle(Utc::now()) {
        SettlementOutcome::EmptyCart => SettleResponse::EmptyCart,
        SettlementOutcome::Committed {
            purchase_id,
            total_minor,
            leads,
        } => SettleResponse::Committed {
            purchase_id,
            total_minor,
            leads,
        },
        SettlementOutcome::Rejected {
            total_minor,
            balance_minor,
        } => SettleResponse::Rejected {
            total_minor,
            balance_minor,
        },
    };

    Json(response)
}

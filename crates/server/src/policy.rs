//! AI-manager settings endpoints.

use api_types::policy::{
    PolicyRunResponse, PolicySettingUpdate, PolicySettingView, PolicySettingsResponse, SettingValue,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::PolicyOutcome;

use crate::{ServerError, server::AppState};

fn map_value(value: &engine::SettingValue) -> SettingValue {
    match value {
        engine::SettingValue::Toggle(v) => SettingValue::Toggle(*v),
        engine::SettingValue::Slider(v) => SettingValue::Slider(*v),
        engine::SettingValue::Select(v) => SettingValue::Select(v.clone()),
    }
}

fn engine_value(value: SettingValue) -> engine::SettingValue {
    match value {
        SettingValue::Toggle(v) => engine::SettingValue::Toggle(v),
        SettingValue::Slider(v) => engine::SettingValue::Slider(v),
        SettingValue::Select(v) => engine::SettingValue::Select(v),
    }
}

pub async fn list(State(state): State<AppState>) -> Json<PolicySettingsResponse> {
    let engine = state.engine.lock().await;

    let settings = engine
        .policy()
        .settings()
        .iter()
        .map(|setting| PolicySettingView {
            name: setting.name.clone(),
            value: map_value(&setting.value),
            description: setting.description.clone(),
            options: setting.options.clone(),
        })
        .collect();

    Json(PolicySettingsResponse { settings })
}

pub async fn update(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<PolicySettingUpdate>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.lock().await;
    engine.update_policy_setting(&name, engine_value(payload.value))?;

    Ok(StatusCode::OK)
}

/// Evaluates the policy against the current inventory snapshot.
pub async fn run(State(state): State<AppState>) -> Json<PolicyRunResponse> {
    let mut engine = state.engine.lock().await;

    let response = match engine.run_policy(Utc::now()) {
        PolicyOutcome::Disabled => PolicyRunResponse::Disabled,
        PolicyOutcome::NoMatches => PolicyRunResponse::NoMatches,
        PolicyOutcome::Committed {
            purchase_id,
            total_minor,
            leads,
        } => PolicyRunResponse::Committed {
            purchase_id,
            total_minor,
            leads,
        },
        PolicyOutcome::Rejected { total_minor } => PolicyRunResponse::Rejected { total_minor },
    };

    Json(response)
}

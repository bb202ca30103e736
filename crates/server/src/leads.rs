//! Marketplace inventory endpoints.

use api_types::lead::{LeadFilter, LeadListResponse, LeadView};
use axum::{Json, extract::State};
use engine::{AgeBucket, Bounds, Lead, LeadQuery, SalesMode};

use crate::{ServerError, server::AppState};

pub(crate) fn lead_view(lead: &Lead) -> LeadView {
    LeadView {
        id: lead.id,
        category: lead.category.clone(),
        region: lead.region.clone(),
        city: lead.city.clone(),
        score: lead.score,
        price_minor: lead.price_minor,
        income_minor: lead.income_minor,
        age: lead.age,
        credit_score: lead.credit_score,
        urgency: lead.urgency,
        exclusive: lead.is_exclusive(),
        description: lead.description.clone(),
        listed_at: lead.listed_at,
    }
}

fn bounds<T: PartialOrd + Copy>(
    min: Option<T>,
    max: Option<T>,
    floor: T,
    ceiling: T,
) -> Result<Option<Bounds<T>>, ServerError> {
    match (min, max) {
        (None, None) => Ok(None),
        (min, max) => Ok(Some(Bounds::new(
            min.unwrap_or(floor),
            max.unwrap_or(ceiling),
        )?)),
    }
}

fn build_query(payload: LeadFilter) -> Result<LeadQuery, ServerError> {
    let age_bucket = match payload.age_bucket.as_deref() {
        None | Some("any") => AgeBucket::Any,
        Some("under30") => AgeBucket::Under30,
        Some("from30_to50") => AgeBucket::From30To50,
        Some("over50") => AgeBucket::Over50,
        Some(other) => {
            return Err(ServerError::Generic(format!(
                "unknown age bucket: {other}"
            )));
        }
    };

    Ok(LeadQuery {
        category: payload.category,
        region: payload.region,
        city: payload.city,
        score: bounds(payload.score_min, payload.score_max, 0, 100)?,
        price_minor: bounds(payload.price_min_minor, payload.price_max_minor, 0, i64::MAX)?,
        income_floor_minor: payload.income_floor_minor,
        age_bucket,
        credit_score: bounds(payload.credit_min, payload.credit_max, 0, u16::MAX)?,
        urgency: bounds(payload.urgency_min, payload.urgency_max, 0, 10)?,
        sales_mode: if payload.exclusive_only.unwrap_or(false) {
            SalesMode::ExclusiveOnly
        } else {
            SalesMode::All
        },
    })
}

pub async fn list(State(state): State<AppState>) -> Json<LeadListResponse> {
    let engine = state.engine.lock().await;
    let leads = engine.inventory().iter().map(lead_view).collect();

    Json(LeadListResponse { leads })
}

pub async fn filter(
    State(state): State<AppState>,
    Json(payload): Json<LeadFilter>,
) -> Result<Json<LeadListResponse>, ServerError> {
    let query = build_query(payload)?;
    let engine = state.engine.lock().await;
    let leads = engine.filter(&query).iter().map(lead_view).collect();

    Ok(Json(LeadListResponse { leads }))
}

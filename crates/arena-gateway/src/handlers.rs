//! Request handlers for the HTTP API.
//!
//! Presence validation happens here, with the exact 400 messages the mobile
//! client matches on. Everything after validation is delegated to the core
//! services; their errors map to statuses in `domain::error`.

use crate::domain::error::ApiError;
use crate::domain::types::{
    ClaimRewardRequest, HealthResponse, JoinTournamentRequest, MessageResponse,
    RedeemReferralRequest, TournamentsResponse,
};
use crate::service::AppState;
use axum::extract::State;
use axum::Json;

/// Reject absent or empty request fields with the given message.
fn require(field: Option<String>, message: &'static str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::bad_request(message)),
    }
}

/// `GET /api/tournaments`, newest first.
pub async fn list_tournaments(
    State(state): State<AppState>,
) -> Result<Json<TournamentsResponse>, ApiError> {
    let data = state.services.tournaments.list().await?;
    Ok(Json(TournamentsResponse {
        success: true,
        data,
    }))
}

/// `POST /api/claim-reward`
pub async fn claim_reward(
    State(state): State<AppState>,
    Json(body): Json<ClaimRewardRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let uid = require(body.uid, "User ID missing!")?;
    state.services.reward.claim(&uid).await?;
    Ok(Json(MessageResponse::ok("Reward added!")))
}

/// `POST /api/redeem-referral`
pub async fn redeem_referral(
    State(state): State<AppState>,
    Json(body): Json<RedeemReferralRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = require(body.user_id, "Missing data.")?;
    let code = require(body.code, "Missing data.")?;
    state.services.referral.redeem(&user_id, &code).await?;
    Ok(Json(MessageResponse::ok("Referral successful!")))
}

/// `POST /api/join-tournament`
pub async fn join_tournament(
    State(state): State<AppState>,
    Json(body): Json<JoinTournamentRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = require(body.user_id, "Missing Data")?;
    let tournament_id = require(body.tournament_id, "Missing Data")?;
    state
        .services
        .tournaments
        .join(&user_id, &tournament_id)
        .await?;
    Ok(Json(MessageResponse::ok("Joined successfully!")))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

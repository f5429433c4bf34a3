//! Wire DTOs for the HTTP API.
//!
//! Request fields are `Option` so presence checks stay in the handlers and
//! produce the exact messages the mobile client matches on, rather than a
//! framework rejection.

use serde::{Deserialize, Serialize};
use shared_types::TournamentSummary;

/// `POST /api/claim-reward`
#[derive(Debug, Deserialize)]
pub struct ClaimRewardRequest {
    #[serde(default)]
    pub uid: Option<String>,
}

/// `POST /api/redeem-referral`
#[derive(Debug, Deserialize)]
pub struct RedeemReferralRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// `POST /api/join-tournament`
#[derive(Debug, Deserialize)]
pub struct JoinTournamentRequest {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(rename = "tournamentId", default)]
    pub tournament_id: Option<String>,
}

/// Envelope for message-only successes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Envelope for the tournament listing.
#[derive(Debug, Serialize)]
pub struct TournamentsResponse {
    pub success: bool,
    pub data: Vec<TournamentSummary>,
}

/// `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

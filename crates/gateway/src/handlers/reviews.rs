//! Review ledger handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use intake_common::{db::models::StaffNote, errors::Result, metrics};

/// Request to create or replace an entry's review
#[derive(Debug, Deserialize)]
pub struct UpsertReviewRequest {
    pub notes: Option<String>,

    pub score: Option<i16>,
}

/// Create or replace the review for an entry (last writer wins)
pub async fn upsert_review(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpsertReviewRequest>,
) -> Result<Json<StaffNote>> {
    let review = state
        .repo
        .upsert_review(entry_id, request.notes, request.score)
        .await?;

    metrics::record_review_upserted();
    tracing::info!(entry_id = %entry_id, score = ?review.score, "Review upserted");

    Ok(Json(review))
}

/// Get the review for an entry
pub async fn get_review(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<StaffNote>> {
    let review = state.repo.find_review(entry_id).await?;
    Ok(Json(review))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_request_fields_are_optional() {
        let request: UpsertReviewRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(request.notes.is_none());
        assert!(request.score.is_none());

        let request: UpsertReviewRequest =
            serde_json::from_str(r#"{"notes":"strong candidate","score":7}"#).unwrap();
        assert_eq!(request.notes.as_deref(), Some("strong candidate"));
        assert_eq!(request.score, Some(7));
    }

    #[test]
    fn test_upsert_request_rejects_nonnumeric_score() {
        let result = serde_json::from_str::<UpsertReviewRequest>(r#"{"score":"eleven"}"#);
        assert!(result.is_err());
    }
}

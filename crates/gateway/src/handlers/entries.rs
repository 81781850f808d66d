//! Form entry handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use intake_common::{
    db::models::{FormEntry, StaffNote},
    db::{AnswerView, EntrySummary},
    errors::{AppError, Result},
    metrics,
};

/// Request to submit an application against a form
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    pub applicant_id: Uuid,

    pub form_id: Uuid,

    #[validate(length(min = 3, max = 320))]
    pub applicant_email: String,
}

/// Response for a form's enriched entry listing
#[derive(Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<EntrySummary>,
}

/// Composite view of a single entry: the entry, its answers, and the review
#[derive(Serialize)]
pub struct EntryDetailResponse {
    pub entry: FormEntry,
    pub answers: Vec<AnswerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<StaffNote>,
}

/// Create a form entry (one per applicant per form)
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<FormEntry>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let entry = state
        .repo
        .create_entry(request.applicant_id, request.form_id, request.applicant_email)
        .await?;

    metrics::record_entry_created();
    tracing::info!(
        entry_id = %entry.id,
        applicant_id = %entry.applicant_id,
        form_id = %entry.form_id,
        "Form entry created"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// List a form's entries enriched with answer counts and review state
pub async fn list_entries(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> Result<Json<EntriesResponse>> {
    let entries = state.repo.list_entries(form_id).await?;
    Ok(Json(EntriesResponse { entries }))
}

/// Get a single entry with its answers and review
pub async fn get_entry(
    State(state): State<AppState>,
    Path((form_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<EntryDetailResponse>> {
    let entry = state.repo.find_entry(form_id, entry_id).await?;
    let answers = state.repo.list_answers(entry.id).await?;

    let review = match state.repo.find_review(entry.id).await {
        Ok(review) => Some(review),
        Err(AppError::ReviewNotFound { .. }) => None,
        Err(e) => return Err(e),
    };

    Ok(Json(EntryDetailResponse {
        entry,
        answers,
        review,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_entry_request_deserializes() {
        let request: CreateEntryRequest = serde_json::from_str(
            r#"{
                "applicant_id": "00000000-0000-0000-0000-000000000007",
                "form_id": "00000000-0000-0000-0000-000000000003",
                "applicant_email": "jane@example.com"
            }"#,
        )
        .unwrap();
        assert_eq!(request.applicant_email, "jane@example.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_entry_request_rejects_tiny_email() {
        let request = CreateEntryRequest {
            applicant_id: Uuid::nil(),
            form_id: Uuid::nil(),
            applicant_email: "a".to_string(),
        };
        assert!(request.validate().is_err());
    }
}

//! Answer recording handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use intake_common::{
    db::models::{Answer, AnswerType},
    errors::{AppError, Result},
    metrics,
};

/// Request to record an applicant's answer to a question
///
/// The entry is not part of the wire contract; it is resolved from the
/// applicant and the question's form.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordAnswerRequest {
    pub applicant_id: Uuid,

    pub question_id: Uuid,

    pub answer_type: AnswerType,

    #[validate(length(max = 10000))]
    pub response_text: Option<String>,
}

/// Record a text answer against the applicant's entry
pub async fn record_text_answer(
    State(state): State<AppState>,
    Json(request): Json<RecordAnswerRequest>,
) -> Result<(StatusCode, Json<Answer>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let (question, entry) = state
        .repo
        .resolve_entry_for_question(request.applicant_id, request.question_id)
        .await?;

    let answer = state
        .repo
        .record_answer(
            entry.id,
            question.id,
            request.applicant_id,
            request.answer_type,
            request.response_text,
        )
        .await?;

    metrics::record_answer_recorded(answer.kind().as_str());
    tracing::info!(
        answer_id = %answer.id,
        entry_id = %entry.id,
        question_id = %question.id,
        "Answer recorded"
    );

    Ok((StatusCode::CREATED, Json(answer)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_request_deserializes() {
        let request: RecordAnswerRequest = serde_json::from_str(
            r#"{
                "applicant_id": "00000000-0000-0000-0000-000000000007",
                "question_id": "00000000-0000-0000-0000-000000000001",
                "answer_type": "text",
                "response_text": "Five years of Rust."
            }"#,
        )
        .unwrap();
        assert_eq!(request.answer_type, AnswerType::Text);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_text_is_optional() {
        let request: RecordAnswerRequest = serde_json::from_str(
            r#"{
                "applicant_id": "00000000-0000-0000-0000-000000000007",
                "question_id": "00000000-0000-0000-0000-000000000001",
                "answer_type": "video"
            }"#,
        )
        .unwrap();
        assert!(request.response_text.is_none());
    }
}

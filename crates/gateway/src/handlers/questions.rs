//! Question management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use intake_common::{
    db::models::{Question, QuestionType},
    errors::{AppError, Result},
    metrics,
};

/// Request to append a question to a form
#[derive(Debug, Deserialize, Validate)]
pub struct AppendQuestionRequest {
    #[validate(length(min = 1, max = 2000))]
    pub question_text: String,

    pub question_type: QuestionType,

    #[validate(range(min = 1))]
    pub question_order: i32,
}

/// Append a question at the next position of a form's order chain
pub async fn append_question(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(request): Json<AppendQuestionRequest>,
) -> Result<(StatusCode, Json<Question>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let question = state
        .repo
        .append_question(
            form_id,
            request.question_text,
            request.question_type,
            request.question_order,
        )
        .await?;

    metrics::record_question_appended(question.kind().as_str());
    tracing::info!(
        question_id = %question.id,
        form_id = %form_id,
        order = question.question_order,
        "Question appended"
    );

    Ok((StatusCode::CREATED, Json(question)))
}

/// Delete a question from a form
pub async fn delete_question(
    State(state): State<AppState>,
    Path((form_id, question_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Question>> {
    let question = state.repo.delete_question(form_id, question_id).await?;

    tracing::info!(question_id = %question_id, form_id = %form_id, "Question deleted");

    Ok(Json(question))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_request_parses_question_type() {
        let request: AppendQuestionRequest = serde_json::from_str(
            r#"{"question_text":"Tell us about yourself","question_type":"video","question_order":1}"#,
        )
        .unwrap();
        assert_eq!(request.question_type, QuestionType::Video);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_append_request_rejects_nonpositive_order() {
        let request = AppendQuestionRequest {
            question_text: "Why here?".to_string(),
            question_type: QuestionType::Text,
            question_order: 0,
        };
        assert!(request.validate().is_err());
    }
}

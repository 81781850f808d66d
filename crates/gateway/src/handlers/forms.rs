//! Form catalog handlers

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
    db::models::Form,
    db::DeletedForm,
    errors::{AppError, Result},
    metrics,
};

/// Request to create a new form
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFormRequest {
    pub staff_id: Uuid,

    #[validate(length(min = 1, max = 300))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

/// Request to update a form's title and description
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFormRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

/// Response for the full form feed
#[derive(Serialize)]
pub struct FeedResponse {
    pub feed: Vec<Form>,
}

/// Create a new form
pub async fn create_form(
    State(state): State<AppState>,
    Json(request): Json<CreateFormRequest>,
) -> Result<(StatusCode, Json<Form>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let form = state
        .repo
        .create_form(request.staff_id, request.title, request.description)
        .await?;

    metrics::record_form_created();
    tracing::info!(form_id = %form.id, staff_id = %form.staff_id, "Form created");

    Ok((StatusCode::CREATED, Json(form)))
}

/// List all forms
pub async fn list_forms(State(state): State<AppState>) -> Result<Json<FeedResponse>> {
    let feed = state.repo.list_forms().await?;
    Ok(Json(FeedResponse { feed }))
}

/// Get a form by ID
pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Form>> {
    let form = state.repo.find_form_by_id(id).await?;
    Ok(Json(form))
}

/// Update a form's title and description
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFormRequest>,
) -> Result<Json<Form>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let form = state
        .repo
        .update_form(id, request.title, request.description)
        .await?;

    tracing::info!(form_id = %form.id, "Form updated");

    Ok(Json(form))
}

/// Delete a form and everything hanging off it
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedForm>> {
    let deleted = state.repo.delete_form(id).await?;

    metrics::record_cascade_delete(
        deleted.answers_deleted,
        deleted.notes_deleted,
        deleted.entries_deleted,
        deleted.questions_deleted,
    );

    Ok(Json(deleted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_blank_title() {
        let request = CreateFormRequest {
            staff_id: Uuid::nil(),
            title: String::new(),
            description: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_deserializes_without_description() {
        let request: CreateFormRequest = serde_json::from_str(
            r#"{"staff_id":"00000000-0000-0000-0000-000000000000","title":"Eng Role"}"#,
        )
        .unwrap();
        assert_eq!(request.title, "Eng Role");
        assert!(request.description.is_none());
        assert!(request.validate().is_ok());
    }
}

//! Answer entity
//!
//! One applicant's response to one Question within a FormEntry. Text answers
//! carry their body in `answer_text`; the column stays NULL for other types.
//! The `(form_entry_id, question_id)` pair is unique at the database level.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Answer type enum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    Text,
    Video,
}

impl From<String> for AnswerType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "video" => AnswerType::Video,
            _ => AnswerType::Text,
        }
    }
}

impl From<AnswerType> for String {
    fn from(kind: AnswerType) -> Self {
        match kind {
            AnswerType::Text => "text".to_string(),
            AnswerType::Video => "video".to_string(),
        }
    }
}

impl AnswerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerType::Text => "text",
            AnswerType::Video => "video",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "answer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub form_entry_id: Uuid,

    pub question_id: Uuid,

    pub applicant_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub answer_type: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub answer_text: Option<String>,
}

impl Model {
    /// Get the answer type as an enum
    pub fn kind(&self) -> AnswerType {
        AnswerType::from(self.answer_type.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::form_entry::Entity",
        from = "Column::FormEntryId",
        to = "super::form_entry::Column::Id"
    )]
    Entry,

    #[sea_orm(
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::Id"
    )]
    Question,
}

impl Related<super::form_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Question entity
//!
//! One prompt within a Form. `question_order` positions it in the form's
//! contiguous 1..n chain.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Question type enum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    Video,
}

impl From<String> for QuestionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "video" => QuestionType::Video,
            _ => QuestionType::Text,
        }
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Text => "text".to_string(),
            QuestionType::Video => "video".to_string(),
        }
    }
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Video => "video",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub form_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub question_text: String,

    #[sea_orm(column_type = "Text")]
    pub question_type: String,

    pub question_order: i32,
}

impl Model {
    /// Get the question type as an enum
    pub fn kind(&self) -> QuestionType {
        QuestionType::from(self.question_type.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::form::Entity",
        from = "Column::FormId",
        to = "super::form::Column::Id"
    )]
    Form,

    #[sea_orm(has_many = "super::answer::Entity")]
    Answers,
}

impl Related<super::form::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Form.def()
    }
}

impl Related<super::answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_round_trip() {
        assert_eq!(QuestionType::from(String::from(QuestionType::Video)), QuestionType::Video);
        assert_eq!(QuestionType::from(String::from(QuestionType::Text)), QuestionType::Text);
    }

    #[test]
    fn test_unknown_type_defaults_to_text() {
        assert_eq!(QuestionType::from("essay".to_string()), QuestionType::Text);
    }

    #[test]
    fn test_serde_shape() {
        assert_eq!(serde_json::to_string(&QuestionType::Video).unwrap(), r#""video""#);
        let parsed: QuestionType = serde_json::from_str(r#""text""#).unwrap();
        assert_eq!(parsed, QuestionType::Text);
    }
}

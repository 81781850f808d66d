//! Staff application notes entity
//!
//! At most one row per FormEntry; upserts replace it in place.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staffapplicationnotes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub form_entry_id: Uuid,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub score: Option<i16>,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::form_entry::Entity",
        from = "Column::FormEntryId",
        to = "super::form_entry::Column::Id"
    )]
    Entry,
}

impl Related<super::form_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

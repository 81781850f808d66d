//! SeaORM entity models
//!
//! Database entities for the intake schema

mod answer;
mod applicant;
mod form;
mod form_entry;
mod question;
mod staff;
mod staff_note;

pub use form::{
    Entity as FormEntity,
    Model as Form,
    ActiveModel as FormActiveModel,
    Column as FormColumn,
};

pub use question::{
    Entity as QuestionEntity,
    Model as Question,
    ActiveModel as QuestionActiveModel,
    Column as QuestionColumn,
    QuestionType,
};

pub use form_entry::{
    Entity as FormEntryEntity,
    Model as FormEntry,
    ActiveModel as FormEntryActiveModel,
    Column as FormEntryColumn,
};

pub use answer::{
    Entity as AnswerEntity,
    Model as Answer,
    ActiveModel as AnswerActiveModel,
    Column as AnswerColumn,
    AnswerType,
};

pub use staff_note::{
    Entity as StaffNoteEntity,
    Model as StaffNote,
    ActiveModel as StaffNoteActiveModel,
    Column as StaffNoteColumn,
};

pub use staff::{
    Entity as StaffEntity,
    Model as Staff,
    Column as StaffColumn,
};

pub use applicant::{
    Entity as ApplicantEntity,
    Model as Applicant,
    Column as ApplicantColumn,
};

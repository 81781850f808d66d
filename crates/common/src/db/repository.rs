//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations
//! with proper error handling and transaction support.
//!
//! The repository is organized by owner: the form catalog (forms and their
//! ordered questions), the submission tracker (form entries), the answer
//! store, the review ledger, and the cascading form deletion.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use crate::validation;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    FromQueryResult, IsolationLevel, QueryFilter, QueryOrder, Set, SqlErr, Statement,
    TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

/// Form entry enriched with per-entry aggregates for list views
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct EntrySummary {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub form_id: Uuid,
    pub applicant_email: String,
    pub submitted_at: chrono::DateTime<chrono::FixedOffset>,
    pub answer_count: i64,
    pub reviewed: bool,
}

/// Answer joined with its question metadata for display
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct AnswerView {
    pub id: Uuid,
    pub form_entry_id: Uuid,
    pub question_id: Uuid,
    pub applicant_id: Uuid,
    pub answer_type: String,
    pub answer_text: Option<String>,
    pub question_text: String,
    pub question_type: String,
    pub question_order: i32,
}

/// Result of a cascading form delete
#[derive(Debug, Clone, Serialize)]
pub struct DeletedForm {
    pub form: Form,
    pub questions_deleted: u64,
    pub entries_deleted: u64,
    pub answers_deleted: u64,
    pub notes_deleted: u64,
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Form Operations
    // ========================================================================

    /// Create a new form owned by a staff member
    pub async fn create_form(
        &self,
        staff_id: Uuid,
        title: String,
        description: Option<String>,
    ) -> Result<Form> {
        validation::validate_required_text("title", &title)?;

        StaffEntity::find_by_id(staff_id)
            .one(self.conn())
            .await?
            .ok_or_else(|| AppError::Referential {
                resource_type: "staff".to_string(),
                id: staff_id.to_string(),
            })?;

        let form = FormActiveModel {
            id: Set(Uuid::new_v4()),
            staff_id: Set(staff_id),
            title: Set(title),
            description: Set(description),
            created_at: Set(chrono::Utc::now().into()),
        };

        form.insert(self.conn()).await.map_err(Into::into)
    }

    /// List all forms, newest first
    pub async fn list_forms(&self) -> Result<Vec<Form>> {
        FormEntity::find()
            .order_by_desc(FormColumn::CreatedAt)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Find form by ID
    pub async fn find_form_by_id(&self, id: Uuid) -> Result<Form> {
        FormEntity::find_by_id(id)
            .one(self.conn())
            .await?
            .ok_or(AppError::FormNotFound { id })
    }

    /// Update a form's title and description
    pub async fn update_form(
        &self,
        id: Uuid,
        title: String,
        description: Option<String>,
    ) -> Result<Form> {
        validation::validate_required_text("title", &title)?;

        let mut form: FormActiveModel = self.find_form_by_id(id).await?.into();
        form.title = Set(title);
        form.description = Set(description);

        form.update(self.conn()).await.map_err(Into::into)
    }

    // ========================================================================
    // Question Operations
    // ========================================================================

    /// Append a question to a form at the given order position
    ///
    /// The order chain is contiguous: inserting at `order > 1` requires a
    /// question at `order - 1`. The predecessor check and the insert run in
    /// one serializable transaction so concurrent appends cannot slip a gap
    /// or a duplicate position past the check.
    pub async fn append_question(
        &self,
        form_id: Uuid,
        question_text: String,
        question_type: QuestionType,
        question_order: i32,
    ) -> Result<Question> {
        validation::validate_required_text("question_text", &question_text)?;
        validation::validate_question_order(question_order)?;

        let txn = self
            .conn()
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;

        FormEntity::find_by_id(form_id)
            .one(&txn)
            .await?
            .ok_or(AppError::FormNotFound { id: form_id })?;

        if question_order > 1 {
            let predecessor = QuestionEntity::find()
                .filter(QuestionColumn::FormId.eq(form_id))
                .filter(QuestionColumn::QuestionOrder.eq(question_order - 1))
                .one(&txn)
                .await?;

            if predecessor.is_none() {
                return Err(AppError::ChainGap {
                    form_id,
                    order: question_order,
                });
            }
        }

        let question = QuestionActiveModel {
            id: Set(Uuid::new_v4()),
            form_id: Set(form_id),
            question_text: Set(question_text),
            question_type: Set(String::from(question_type)),
            question_order: Set(question_order),
        }
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict {
                message: format!(
                    "question order {} is already taken on form {}",
                    question_order, form_id
                ),
            },
            _ => AppError::from(e),
        })?;

        txn.commit().await?;

        Ok(question)
    }

    /// Delete a question from a form
    pub async fn delete_question(&self, form_id: Uuid, question_id: Uuid) -> Result<Question> {
        let question = QuestionEntity::find_by_id(question_id)
            .filter(QuestionColumn::FormId.eq(form_id))
            .one(self.conn())
            .await?
            .ok_or(AppError::QuestionNotFound { id: question_id })?;

        QuestionEntity::delete_by_id(question_id)
            .exec(self.conn())
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::Conflict {
                    message: format!("question {} has recorded answers", question_id),
                },
                _ => AppError::from(e),
            })?;

        Ok(question)
    }

    /// Get a form's questions in chain order
    pub async fn questions_for_form(&self, form_id: Uuid) -> Result<Vec<Question>> {
        QuestionEntity::find()
            .filter(QuestionColumn::FormId.eq(form_id))
            .order_by_asc(QuestionColumn::QuestionOrder)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Form Entry Operations
    // ========================================================================

    /// Create a form entry for an applicant
    ///
    /// An applicant may submit a given form only once; the database enforces
    /// uniqueness of `(applicant_id, form_id)` and the constraint violation is
    /// surfaced as a conflict for the loser of a concurrent pair.
    pub async fn create_entry(
        &self,
        applicant_id: Uuid,
        form_id: Uuid,
        applicant_email: String,
    ) -> Result<FormEntry> {
        validation::validate_email(&applicant_email)?;

        FormEntity::find_by_id(form_id)
            .one(self.conn())
            .await?
            .ok_or_else(|| AppError::Referential {
                resource_type: "form".to_string(),
                id: form_id.to_string(),
            })?;

        ApplicantEntity::find_by_id(applicant_id)
            .one(self.conn())
            .await?
            .ok_or_else(|| AppError::Referential {
                resource_type: "applicant".to_string(),
                id: applicant_id.to_string(),
            })?;

        let existing = FormEntryEntity::find()
            .filter(FormEntryColumn::ApplicantId.eq(applicant_id))
            .filter(FormEntryColumn::FormId.eq(form_id))
            .one(self.conn())
            .await?;

        if existing.is_some() {
            return Err(AppError::DuplicateEntry {
                applicant_id,
                form_id,
            });
        }

        let entry = FormEntryActiveModel {
            id: Set(Uuid::new_v4()),
            applicant_id: Set(applicant_id),
            form_id: Set(form_id),
            applicant_email: Set(applicant_email),
            submitted_at: Set(chrono::Utc::now().into()),
        };

        entry.insert(self.conn()).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateEntry {
                applicant_id,
                form_id,
            },
            _ => AppError::from(e),
        })
    }

    /// List a form's entries enriched with answer counts and review state
    pub async fn list_entries(&self, form_id: Uuid) -> Result<Vec<EntrySummary>> {
        self.find_form_by_id(form_id).await?;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT e.id, e.applicant_id, e.form_id, e.applicant_email, e.submitted_at,
                   COUNT(a.id) AS answer_count,
                   (n.form_entry_id IS NOT NULL) AS reviewed
            FROM formentries e
            LEFT JOIN answer a ON a.form_entry_id = e.id
            LEFT JOIN staffapplicationnotes n ON n.form_entry_id = e.id
            WHERE e.form_id = $1
            GROUP BY e.id, n.form_entry_id
            ORDER BY e.submitted_at DESC
            "#,
            [form_id.into()],
        );

        EntrySummary::find_by_statement(stmt)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Find a single entry belonging to a form
    pub async fn find_entry(&self, form_id: Uuid, entry_id: Uuid) -> Result<FormEntry> {
        FormEntryEntity::find_by_id(entry_id)
            .filter(FormEntryColumn::FormId.eq(form_id))
            .one(self.conn())
            .await?
            .ok_or(AppError::EntryNotFound { id: entry_id })
    }

    // ========================================================================
    // Answer Operations
    // ========================================================================

    /// Resolve the form entry an answer to `question_id` belongs to
    ///
    /// The wire contract for recording answers carries the applicant and the
    /// question, not the entry; the entry is the applicant's submission
    /// against the question's form.
    pub async fn resolve_entry_for_question(
        &self,
        applicant_id: Uuid,
        question_id: Uuid,
    ) -> Result<(Question, FormEntry)> {
        let question = QuestionEntity::find_by_id(question_id)
            .one(self.conn())
            .await?
            .ok_or_else(|| AppError::Referential {
                resource_type: "question".to_string(),
                id: question_id.to_string(),
            })?;

        let entry = FormEntryEntity::find()
            .filter(FormEntryColumn::ApplicantId.eq(applicant_id))
            .filter(FormEntryColumn::FormId.eq(question.form_id))
            .one(self.conn())
            .await?
            .ok_or_else(|| AppError::Referential {
                resource_type: "form entry".to_string(),
                id: format!("applicant {} on form {}", applicant_id, question.form_id),
            })?;

        Ok((question, entry))
    }

    /// Record an answer against an entry/question pair
    pub async fn record_answer(
        &self,
        form_entry_id: Uuid,
        question_id: Uuid,
        applicant_id: Uuid,
        answer_type: AnswerType,
        answer_text: Option<String>,
    ) -> Result<Answer> {
        let entry = FormEntryEntity::find_by_id(form_entry_id)
            .one(self.conn())
            .await?
            .ok_or(AppError::EntryNotFound { id: form_entry_id })?;

        let question = QuestionEntity::find_by_id(question_id)
            .one(self.conn())
            .await?
            .ok_or_else(|| AppError::Referential {
                resource_type: "question".to_string(),
                id: question_id.to_string(),
            })?;

        if question.form_id != entry.form_id {
            return Err(AppError::Referential {
                resource_type: "question on the entry's form".to_string(),
                id: question_id.to_string(),
            });
        }

        if answer_type == AnswerType::Text {
            let text = answer_text.as_deref().unwrap_or_default();
            validation::validate_required_text("answer_text", text)?;
        }

        let existing = AnswerEntity::find()
            .filter(AnswerColumn::FormEntryId.eq(form_entry_id))
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .one(self.conn())
            .await?;

        if existing.is_some() {
            return Err(AppError::DuplicateAnswer {
                entry_id: form_entry_id,
                question_id,
            });
        }

        let answer = AnswerActiveModel {
            id: Set(Uuid::new_v4()),
            form_entry_id: Set(form_entry_id),
            question_id: Set(question_id),
            applicant_id: Set(applicant_id),
            answer_type: Set(String::from(answer_type)),
            answer_text: Set(answer_text),
        };

        answer.insert(self.conn()).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateAnswer {
                entry_id: form_entry_id,
                question_id,
            },
            _ => AppError::from(e),
        })
    }

    /// List an entry's answers joined with question metadata, in chain order
    pub async fn list_answers(&self, form_entry_id: Uuid) -> Result<Vec<AnswerView>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT a.id, a.form_entry_id, a.question_id, a.applicant_id,
                   a.answer_type, a.answer_text,
                   q.question_text, q.question_type, q.question_order
            FROM answer a
            JOIN questions q ON q.id = a.question_id
            WHERE a.form_entry_id = $1
            ORDER BY q.question_order ASC
            "#,
            [form_entry_id.into()],
        );

        AnswerView::find_by_statement(stmt)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Review Operations
    // ========================================================================

    /// Create or replace the review for an entry (last writer wins)
    pub async fn upsert_review(
        &self,
        form_entry_id: Uuid,
        notes: Option<String>,
        score: Option<i16>,
    ) -> Result<StaffNote> {
        validation::validate_score(score)?;

        FormEntryEntity::find_by_id(form_entry_id)
            .one(self.conn())
            .await?
            .ok_or(AppError::EntryNotFound { id: form_entry_id })?;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            INSERT INTO staffapplicationnotes (form_entry_id, notes, score, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (form_entry_id) DO UPDATE SET
                notes = EXCLUDED.notes,
                score = EXCLUDED.score,
                updated_at = EXCLUDED.updated_at
            RETURNING form_entry_id, notes, score, updated_at
            "#,
            [form_entry_id.into(), notes.into(), score.into()],
        );

        StaffNoteEntity::find()
            .from_raw_sql(stmt)
            .one(self.conn())
            .await?
            .ok_or_else(|| AppError::Internal {
                message: "review upsert returned no row".to_string(),
            })
    }

    /// Find the review for an entry
    pub async fn find_review(&self, form_entry_id: Uuid) -> Result<StaffNote> {
        StaffNoteEntity::find_by_id(form_entry_id)
            .one(self.conn())
            .await?
            .ok_or(AppError::ReviewNotFound {
                entry_id: form_entry_id,
            })
    }

    // ========================================================================
    // Cascading Form Deletion
    // ========================================================================

    /// Delete a form and everything hanging off it, atomically
    ///
    /// Child rows go first (answers, notes, entries, questions), then the
    /// form itself, all inside one transaction. Any failure rolls the whole
    /// cascade back; no partial deletion is observable.
    pub async fn delete_form(&self, form_id: Uuid) -> Result<DeletedForm> {
        let txn = self.conn().begin().await?;

        let form = FormEntity::find_by_id(form_id)
            .one(&txn)
            .await?
            .ok_or(AppError::FormNotFound { id: form_id })?;

        let answers_deleted = txn
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                "DELETE FROM answer WHERE question_id IN (SELECT id FROM questions WHERE form_id = $1)",
                [form_id.into()],
            ))
            .await?
            .rows_affected();

        let notes_deleted = txn
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                "DELETE FROM staffapplicationnotes WHERE form_entry_id IN (SELECT id FROM formentries WHERE form_id = $1)",
                [form_id.into()],
            ))
            .await?
            .rows_affected();

        let entries_deleted = FormEntryEntity::delete_many()
            .filter(FormEntryColumn::FormId.eq(form_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let questions_deleted = QuestionEntity::delete_many()
            .filter(QuestionColumn::FormId.eq(form_id))
            .exec(&txn)
            .await?
            .rows_affected;

        FormEntity::delete_by_id(form_id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            form_id = %form_id,
            questions_deleted,
            entries_deleted,
            answers_deleted,
            notes_deleted,
            "Form deleted"
        );

        Ok(DeletedForm {
            form,
            questions_deleted,
            entries_deleted,
            answers_deleted,
            notes_deleted,
        })
    }
}

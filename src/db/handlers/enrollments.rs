use crate::db::{errors::Result, models::enrollments::EnrollmentDBResponse};
use crate::types::UserId;
use sqlx::PgConnection;

pub struct Enrollments<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Enrollments<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Find the enrollment owned by a user. Users hold at most one.
    pub async fn find_by_user_id(&mut self, user_id: UserId) -> Result<Option<EnrollmentDBResponse>> {
        let enrollment = sqlx::query_as!(
            EnrollmentDBResponse,
            r#"
            SELECT id, user_id, name, created_at, updated_at
            FROM enrollments
            WHERE user_id = $1
            "#,
            user_id
        )
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(enrollment)
    }
}

//! Database models for enrollments.

use crate::types::{EnrollmentId, UserId};
use chrono::{DateTime, Utc};

/// Database response for an enrollment row
#[derive(Debug, Clone)]
pub struct EnrollmentDBResponse {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//! PostgreSQL implementation of ClubDirectory.
//!
//! Reads the `clubs` table for identity and the live rows of `club_members`
//! for roles. Nothing here is cached.

use crate::domain::foundation::{ClubId, DomainError, MemberId};
use crate::domain::membership::ClubRole;
use crate::ports::{ClubDirectory, ClubProfile};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::membership_repository::{corrupt_row, db_error};

/// PostgreSQL implementation of the ClubDirectory port.
pub struct PostgresClubDirectory {
    pool: PgPool,
}

impl PostgresClubDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClubRow {
    id: Uuid,
    name: String,
    max_members: Option<i32>,
}

impl From<ClubRow> for ClubProfile {
    fn from(row: ClubRow) -> Self {
        ClubProfile {
            id: ClubId::from_uuid(row.id),
            name: row.name,
            // Negative limits are treated as "no limit".
            max_members: row.max_members.and_then(|max| u32::try_from(max).ok()),
        }
    }
}

#[async_trait]
impl ClubDirectory for PostgresClubDirectory {
    async fn find_club(&self, club_id: &ClubId) -> Result<Option<ClubProfile>, DomainError> {
        let row: Option<ClubRow> = sqlx::query_as(
            "SELECT id, name, max_members FROM clubs WHERE id = $1 AND NOT is_deleted",
        )
        .bind(club_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find club"))?;

        Ok(row.map(ClubProfile::from))
    }

    async fn member_role(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<Option<ClubRole>, DomainError> {
        let role: Option<String> = sqlx::query_scalar(
            r#"
            SELECT role FROM club_members
            WHERE club_id = $1 AND member_id = $2
              AND status = 'APPROVED' AND NOT is_deleted
            "#,
        )
        .bind(club_id.as_uuid())
        .bind(member_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find member role"))?;

        role.map(|r| r.parse::<ClubRole>().map_err(corrupt_row))
            .transpose()
    }

    async fn find_leader(&self, club_id: &ClubId) -> Result<Option<MemberId>, DomainError> {
        let leader: Option<String> = sqlx::query_scalar(
            r#"
            SELECT member_id FROM club_members
            WHERE club_id = $1 AND role = 'LEADER'
              AND status = 'APPROVED' AND NOT is_deleted
            LIMIT 1
            "#,
        )
        .bind(club_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find club leader"))?;

        leader
            .map(|id| MemberId::new(id).map_err(corrupt_row))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn club_row_keeps_positive_limit() {
        let profile = ClubProfile::from(ClubRow {
            id: Uuid::new_v4(),
            name: "Chess Club".to_string(),
            max_members: Some(30),
        });
        assert_eq!(profile.max_members, Some(30));
        assert_eq!(profile.name, "Chess Club");
    }

    #[test]
    fn club_row_drops_negative_limit() {
        let profile = ClubProfile::from(ClubRow {
            id: Uuid::new_v4(),
            name: "Chess Club".to_string(),
            max_members: Some(-1),
        });
        assert_eq!(profile.max_members, None);
    }
}

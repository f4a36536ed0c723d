//! PostgreSQL implementation of MembershipRepository.
//!
//! Every transition is a single conditional statement whose
//! `rows_affected()` is handed back to the engine. The `WHERE` clause carries
//! the precondition (status, liveness, leader protection), so the check and
//! the write commit together without an explicit transaction.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE club_members (
//!     id          UUID PRIMARY KEY,
//!     club_id     UUID NOT NULL REFERENCES clubs (id),
//!     member_id   TEXT NOT NULL,
//!     status      TEXT NOT NULL,
//!     role        TEXT NOT NULL,
//!     reason      TEXT,
//!     joined_at   TIMESTAMPTZ NOT NULL,
//!     updated_by  TEXT NOT NULL,
//!     updated_at  TIMESTAMPTZ NOT NULL,
//!     is_deleted  BOOLEAN NOT NULL DEFAULT FALSE
//! );
//! CREATE UNIQUE INDEX club_members_live_key
//!     ON club_members (club_id, member_id) WHERE NOT is_deleted;
//! ```

use crate::domain::foundation::{
    ClubId, DomainError, ErrorCode, MemberId, MembershipId, Timestamp,
};
use crate::domain::membership::{ClubRole, Membership, MembershipStatus};
use crate::ports::{AffectedRows, MembershipCounts, MembershipRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const MEMBERSHIP_COLUMNS: &str =
    "id, club_id, member_id, status, role, reason, joined_at, updated_by, updated_at, is_deleted";

/// PostgreSQL implementation of the MembershipRepository port.
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Creates a new PostgresMembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn remove(
        &self,
        status: MembershipStatus,
        club_id: &ClubId,
        member_id: &MemberId,
        reason: &str,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE club_members SET
                status = $3,
                reason = $4,
                updated_by = $5,
                updated_at = $6,
                is_deleted = TRUE
            WHERE club_id = $1 AND member_id = $2
              AND status = 'APPROVED' AND role <> 'LEADER' AND NOT is_deleted
            "#,
        )
        .bind(club_id.as_uuid())
        .bind(member_id.as_str())
        .bind(status.as_str())
        .bind(reason)
        .bind(actor.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error("remove member"))?;

        Ok(result.rows_affected())
    }

    async fn insert_row(&self, row: &Membership, guard: &str) -> Result<AffectedRows, DomainError> {
        let statement = format!(
            r#"
            INSERT INTO club_members ({MEMBERSHIP_COLUMNS})
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10
            WHERE NOT EXISTS ({guard})
            "#
        );
        let result = sqlx::query(&statement)
            .bind(row.id.as_uuid())
            .bind(row.club_id.as_uuid())
            .bind(row.member_id.as_str())
            .bind(row.status.as_str())
            .bind(row.role.as_str())
            .bind(&row.reason)
            .bind(row.joined_at.as_datetime())
            .bind(row.updated_by.as_str())
            .bind(row.updated_at.as_datetime())
            .bind(row.is_deleted)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected()),
            // A concurrent insert won the live-row unique index.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(0),
            Err(e) => Err(db_error("insert membership")(e)),
        }
    }
}

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    club_id: Uuid,
    member_id: String,
    status: String,
    role: String,
    reason: Option<String>,
    joined_at: DateTime<Utc>,
    updated_by: String,
    updated_at: DateTime<Utc>,
    is_deleted: bool,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            club_id: ClubId::from_uuid(row.club_id),
            member_id: MemberId::new(row.member_id).map_err(corrupt_row)?,
            status: row.status.parse().map_err(corrupt_row)?,
            role: row.role.parse().map_err(corrupt_row)?,
            reason: row.reason,
            joined_at: Timestamp::from_datetime(row.joined_at),
            updated_by: MemberId::new(row.updated_by).map_err(corrupt_row)?,
            updated_at: Timestamp::from_datetime(row.updated_at),
            is_deleted: row.is_deleted,
        })
    }
}

pub(super) fn corrupt_row(err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::InternalError, format!("Invalid membership row: {}", err))
}

pub(super) fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn find_latest(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<Option<Membership>, DomainError> {
        let statement = format!(
            r#"
            SELECT {MEMBERSHIP_COLUMNS}
            FROM club_members
            WHERE club_id = $1 AND member_id = $2
            ORDER BY is_deleted ASC, updated_at DESC
            LIMIT 1
            "#
        );
        let row: Option<MembershipRow> = sqlx::query_as(&statement)
            .bind(club_id.as_uuid())
            .bind(member_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find membership"))?;

        row.map(Membership::try_from).transpose()
    }

    async fn insert_leader(
        &self,
        club_id: &ClubId,
        founder: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        let row = Membership::founding_leader(*club_id, founder.clone());
        self.insert_row(
            &row,
            "SELECT 1 FROM club_members WHERE club_id = $2 AND NOT is_deleted",
        )
        .await
    }

    async fn insert_waiting(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        let row = Membership::waiting(*club_id, member_id.clone());
        self.insert_row(
            &row,
            "SELECT 1 FROM club_members WHERE club_id = $2 AND member_id = $3",
        )
        .await
    }

    async fn reactivate_to_waiting(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE club_members SET
                status = 'WAITING',
                role = 'MEMBER',
                reason = NULL,
                joined_at = $3,
                updated_by = member_id,
                updated_at = $3,
                is_deleted = FALSE
            WHERE id = (
                SELECT id FROM club_members
                WHERE club_id = $1 AND member_id = $2
                ORDER BY is_deleted ASC, updated_at DESC
                LIMIT 1
            )
              AND is_deleted
              AND status IN ('REJECTED', 'EXPELLED', 'WITHDRAWN')
            "#,
        )
        .bind(club_id.as_uuid())
        .bind(member_id.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.rows_affected()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(0),
            Err(e) => Err(db_error("reactivate membership")(e)),
        }
    }

    async fn approve(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE club_members SET
                status = 'APPROVED',
                role = 'MEMBER',
                joined_at = $4,
                updated_by = $3,
                updated_at = $4
            WHERE club_id = $1 AND member_id = $2
              AND status = 'WAITING' AND NOT is_deleted
            "#,
        )
        .bind(club_id.as_uuid())
        .bind(member_id.as_str())
        .bind(actor.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error("approve member"))?;

        Ok(result.rows_affected())
    }

    async fn reject(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        reason: &str,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE club_members SET
                status = 'REJECTED',
                reason = $3,
                updated_by = $4,
                updated_at = $5,
                is_deleted = TRUE
            WHERE club_id = $1 AND member_id = $2
              AND status = 'WAITING' AND NOT is_deleted
            "#,
        )
        .bind(club_id.as_uuid())
        .bind(member_id.as_str())
        .bind(reason)
        .bind(actor.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error("reject member"))?;

        Ok(result.rows_affected())
    }

    async fn update_role(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        role: ClubRole,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        if !role.is_assignable() {
            return Ok(0);
        }
        let result = sqlx::query(
            r#"
            UPDATE club_members SET
                role = $3,
                updated_by = $4,
                updated_at = $5
            WHERE club_id = $1 AND member_id = $2
              AND status = 'APPROVED' AND role <> 'LEADER' AND NOT is_deleted
            "#,
        )
        .bind(club_id.as_uuid())
        .bind(member_id.as_str())
        .bind(role.as_str())
        .bind(actor.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error("update member role"))?;

        Ok(result.rows_affected())
    }

    async fn expel(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        reason: &str,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        self.remove(MembershipStatus::Expelled, club_id, member_id, reason, actor)
            .await
    }

    async fn block(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        reason: &str,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        self.remove(MembershipStatus::Blocked, club_id, member_id, reason, actor)
            .await
    }

    async fn withdraw(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE club_members SET
                status = 'WITHDRAWN',
                updated_by = member_id,
                updated_at = $3,
                is_deleted = TRUE
            WHERE club_id = $1 AND member_id = $2
              AND status = 'APPROVED' AND role <> 'LEADER' AND NOT is_deleted
            "#,
        )
        .bind(club_id.as_uuid())
        .bind(member_id.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error("withdraw member"))?;

        Ok(result.rows_affected())
    }

    async fn list_live(&self, club_id: &ClubId) -> Result<Vec<Membership>, DomainError> {
        let statement = format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM club_members WHERE club_id = $1 AND NOT is_deleted"
        );
        let rows: Vec<MembershipRow> = sqlx::query_as(&statement)
            .bind(club_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list memberships"))?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn find_staff_ids(&self, club_id: &ClubId) -> Result<Vec<MemberId>, DomainError> {
        let ids: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT member_id FROM club_members
            WHERE club_id = $1 AND status = 'APPROVED'
              AND role IN ('LEADER', 'MANAGER') AND NOT is_deleted
            "#,
        )
        .bind(club_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("find club staff"))?;

        ids.into_iter()
            .map(|id| MemberId::new(id).map_err(corrupt_row))
            .collect()
    }

    async fn count_live(&self, club_id: &ClubId) -> Result<MembershipCounts, DomainError> {
        let (approved, waiting): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'APPROVED'),
                COUNT(*) FILTER (WHERE status = 'WAITING')
            FROM club_members
            WHERE club_id = $1 AND NOT is_deleted
            "#,
        )
        .bind(club_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("count memberships"))?;

        Ok(MembershipCounts {
            approved: u64::try_from(approved).unwrap_or_default(),
            waiting: u64::try_from(waiting).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, role: &str) -> MembershipRow {
        MembershipRow {
            id: Uuid::new_v4(),
            club_id: Uuid::new_v4(),
            member_id: "member-1".to_string(),
            status: status.to_string(),
            role: role.to_string(),
            reason: None,
            joined_at: Utc::now(),
            updated_by: "leader".to_string(),
            updated_at: Utc::now(),
            is_deleted: false,
        }
    }

    #[test]
    fn converts_valid_row() {
        let membership = Membership::try_from(row("APPROVED", "MANAGER")).unwrap();
        assert_eq!(membership.status, MembershipStatus::Approved);
        assert_eq!(membership.role, ClubRole::Manager);
        assert_eq!(membership.member_id.as_str(), "member-1");
    }

    #[test]
    fn rejects_unknown_status() {
        let err = Membership::try_from(row("SUSPENDED", "MEMBER")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert!(err.message.contains("SUSPENDED"));
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(Membership::try_from(row("WAITING", "OWNER")).is_err());
    }

    #[test]
    fn rejects_blank_member_id() {
        let mut bad = row("WAITING", "MEMBER");
        bad.member_id = String::new();
        assert!(Membership::try_from(bad).is_err());
    }
}

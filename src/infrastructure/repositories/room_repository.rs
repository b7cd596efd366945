//! Room Repository Implementation
//!
//! PostgreSQL implementation of the RoomRepository trait.
//! Handles rooms and their `room_members` rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::domain::{
    MemberRole, Membership, MembershipError, Room, RoomDetail, RoomRepository, RoomSummary,
};
use crate::infrastructure::database::in_transaction;
use crate::shared::error::AppError;

/// Database row representation matching the rooms table schema.
#[derive(Debug, sqlx::FromRow)]
struct RoomRow {
    id: i64,
    name: String,
    description: Option<String>,
    creator_id: i64,
    created_at: DateTime<Utc>,
}

impl RoomRow {
    fn into_room(self) -> Room {
        Room {
            id: self.id,
            name: self.name,
            description: self.description,
            creator_id: self.creator_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RoomSummaryRow {
    id: i64,
    name: String,
    description: Option<String>,
}

/// Database row representation matching the room_members table schema.
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: i64,
    room_id: i64,
    user_id: Option<i64>,
    role: String,
}

impl MemberRow {
    fn into_membership(self) -> Result<Membership, AppError> {
        let role = MemberRole::parse(&self.role).ok_or_else(|| {
            AppError::Internal(format!(
                "Unknown role '{}' on membership {}",
                self.role, self.id
            ))
        })?;

        Ok(Membership {
            id: self.id,
            room_id: self.room_id,
            user_id: self.user_id,
            role,
        })
    }
}

const ROOM_FK: &str = "room_members_room_id_fkey";

/// Translate constraint violations raised by bulk membership writes.
fn map_membership_write_error(e: sqlx::Error, room_id: i64, user_ids: &[i64]) -> MembershipError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            MembershipError::AlreadyMembers(user_ids.to_vec())
        }
        sqlx::Error::Database(db_err)
            if db_err.is_foreign_key_violation() && db_err.constraint() == Some(ROOM_FK) =>
        {
            MembershipError::RoomNotFound(room_id)
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            MembershipError::UnknownUsers
        }
        _ => MembershipError::from(e),
    }
}

/// Sort and deduplicate target IDs so each user is checked and written once.
fn distinct_ids(user_ids: &[i64]) -> Vec<i64> {
    let mut ids = user_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// PostgreSQL room repository implementation.
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Create a new PgRoomRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the room row against deletion and confirm `admin_id` still holds
    /// the admin role in it.
    async fn lock_room_as_admin(
        conn: &mut PgConnection,
        room_id: i64,
        admin_id: i64,
    ) -> Result<(), MembershipError> {
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM rooms WHERE id = $1 FOR SHARE")
            .bind(room_id)
            .fetch_optional(&mut *conn)
            .await?;
        if locked.is_none() {
            return Err(MembershipError::RoomNotFound(room_id));
        }

        let role = sqlx::query_scalar::<_, String>(
            "SELECT role FROM room_members WHERE room_id = $1 AND user_id = $2 FOR SHARE",
        )
        .bind(room_id)
        .bind(admin_id)
        .fetch_optional(&mut *conn)
        .await?;

        match role.as_deref().and_then(MemberRole::parse) {
            Some(MemberRole::Admin) => Ok(()),
            _ => Err(MembershipError::NotAdmin(admin_id)),
        }
    }

    /// Member user IDs among `user_ids`, locking their rows until commit.
    async fn existing_members(
        conn: &mut PgConnection,
        room_id: i64,
        user_ids: &[i64],
    ) -> Result<Vec<i64>, sqlx::Error> {
        let present = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT user_id FROM room_members
            WHERE room_id = $1 AND user_id = ANY($2)
            FOR UPDATE
            "#,
        )
        .bind(room_id)
        .bind(user_ids)
        .fetch_all(&mut *conn)
        .await?;

        Ok(present)
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn room_exists(&self, room_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM rooms WHERE id = $1)")
            .bind(room_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn is_member(&self, room_id: i64, user_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM room_members WHERE room_id = $1 AND user_id = $2)",
        )
        .bind(room_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn is_admin(&self, room_id: i64, user_id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM room_members
                WHERE room_id = $1 AND user_id = $2 AND role = $3
            )
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .bind(MemberRole::Admin.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert the room and its creator's admin membership atomically.
    async fn create_room_with_creator(&self, room: &Room, creator_id: i64) -> Result<Room, AppError> {
        let room = room.clone();

        in_transaction::<_, AppError, _>(&self.pool, "create_room", move |conn| {
            Box::pin(async move {
                let row = sqlx::query_as::<_, RoomRow>(
                    r#"
                    INSERT INTO rooms (id, name, description, creator_id, created_at)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id, name, description, creator_id, created_at
                    "#,
                )
                .bind(room.id)
                .bind(&room.name)
                .bind(&room.description)
                .bind(room.creator_id)
                .bind(room.created_at)
                .fetch_one(&mut *conn)
                .await
                .map_err(|e| match &e {
                    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                        AppError::Conflict("Room with this ID already exists".to_string())
                    }
                    sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                        AppError::BadRequest("Room creator does not exist".to_string())
                    }
                    _ => AppError::Database(e),
                })?;

                sqlx::query("INSERT INTO room_members (room_id, user_id, role) VALUES ($1, $2, $3)")
                    .bind(row.id)
                    .bind(creator_id)
                    .bind(MemberRole::Admin.as_str())
                    .execute(&mut *conn)
                    .await
                    .map_err(|e| match &e {
                        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                            AppError::BadRequest("Room creator does not exist".to_string())
                        }
                        _ => AppError::Database(e),
                    })?;

                Ok(row.into_room())
            })
        })
        .await
    }

    async fn update_room(
        &self,
        room_id: i64,
        name: &str,
        description: Option<String>,
    ) -> Result<Room, AppError> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
            UPDATE rooms
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, description, creator_id, created_at
            "#,
        )
        .bind(room_id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        row.map(RoomRow::into_room)
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))
    }

    async fn delete_room(&self, room_id: i64) -> Result<(), AppError> {
        // room_members and chats are deleted via CASCADE
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(room_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Room {} not found", room_id)));
        }

        Ok(())
    }

    async fn list_rooms_for_user(&self, user_id: i64) -> Result<Vec<RoomSummary>, AppError> {
        let rows = sqlx::query_as::<_, RoomSummaryRow>(
            r#"
            SELECT r.id, r.name, r.description
            FROM rooms r
            INNER JOIN room_members rm ON rm.room_id = r.id
            WHERE rm.user_id = $1
            ORDER BY r.created_at ASC, r.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RoomSummary {
                id: r.id,
                name: r.name,
                description: r.description,
            })
            .collect())
    }

    async fn get_room_detail(&self, room_id: i64) -> Result<RoomDetail, AppError> {
        let room = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, name, description, creator_id, created_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))?
        .into_room();

        let members = self.list_members(room_id).await?;

        Ok(RoomDetail { room, members })
    }

    async fn list_members(&self, room_id: i64) -> Result<Vec<Membership>, AppError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, room_id, user_id, role
            FROM room_members
            WHERE room_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MemberRow::into_membership).collect()
    }

    /// All-or-nothing insert of `member` rows.
    ///
    /// The room row is share-locked and the admin re-checked before the
    /// overlap check; the (room_id, user_id) unique constraint catches
    /// writers that race past it.
    async fn add_members(
        &self,
        room_id: i64,
        admin_id: i64,
        user_ids: &[i64],
    ) -> Result<(), MembershipError> {
        let user_ids = distinct_ids(user_ids);

        in_transaction::<_, MembershipError, _>(&self.pool, "add_members", move |conn| {
            Box::pin(async move {
                Self::lock_room_as_admin(conn, room_id, admin_id).await?;

                let present = Self::existing_members(conn, room_id, &user_ids).await?;
                if !present.is_empty() {
                    return Err(MembershipError::AlreadyMembers(present));
                }

                sqlx::query(
                    r#"
                    INSERT INTO room_members (room_id, user_id, role)
                    SELECT $1, target, $3 FROM UNNEST($2::BIGINT[]) AS target
                    "#,
                )
                .bind(room_id)
                .bind(&user_ids)
                .bind(MemberRole::Member.as_str())
                .execute(&mut *conn)
                .await
                .map_err(|e| map_membership_write_error(e, room_id, &user_ids))?;

                Ok(())
            })
        })
        .await
    }

    /// All-or-nothing delete of membership rows.
    async fn remove_members(
        &self,
        room_id: i64,
        admin_id: i64,
        user_ids: &[i64],
    ) -> Result<(), MembershipError> {
        let user_ids = distinct_ids(user_ids);

        in_transaction::<_, MembershipError, _>(&self.pool, "remove_members", move |conn| {
            Box::pin(async move {
                Self::lock_room_as_admin(conn, room_id, admin_id).await?;

                let present = Self::existing_members(conn, room_id, &user_ids).await?;
                if present.len() != user_ids.len() {
                    let missing: Vec<i64> = user_ids
                        .iter()
                        .copied()
                        .filter(|id| !present.contains(id))
                        .collect();
                    return Err(MembershipError::NotMembers(missing));
                }

                sqlx::query("DELETE FROM room_members WHERE room_id = $1 AND user_id = ANY($2)")
                    .bind(room_id)
                    .bind(&user_ids)
                    .execute(&mut *conn)
                    .await?;

                Ok(())
            })
        })
        .await
    }

    async fn remove_member(&self, room_id: i64, user_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM room_members WHERE room_id = $1 AND user_id = $2")
            .bind(room_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

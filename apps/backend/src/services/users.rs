//! User store operations: registration, lookup, win tally, leaderboard.
//!
//! The win counter is incremented with a single SQL expression so that
//! concurrent credits for the same player never race a read-modify-write.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::entities::users;
use crate::entities::User;
use crate::error::AppError;

/// Create a new user with a zero win count.
/// Fails with `USERNAME_TAKEN` if the username is already registered.
pub async fn register_user(conn: &impl ConnectionTrait, username: &str) -> Result<User, AppError> {
    let existing = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await?;
    if existing.is_some() {
        return Err(AppError::conflict(
            "USERNAME_TAKEN",
            "Username already in use".to_string(),
        ));
    }

    let now = OffsetDateTime::now_utc();
    let user = users::ActiveModel {
        id: NotSet,
        username: Set(username.to_string()),
        wins: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;

    info!(user_id = user.id, username, "Registered new player");
    Ok(user)
}

pub async fn find_user(
    conn: &impl ConnectionTrait,
    username: &str,
) -> Result<Option<User>, AppError> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await
        .map_err(AppError::from)
}

/// Atomically add one to a player's cumulative win count.
pub async fn credit_win(conn: &impl ConnectionTrait, username: &str) -> Result<(), AppError> {
    let result = users::Entity::update_many()
        .col_expr(users::Column::Wins, Expr::col(users::Column::Wins).add(1))
        .col_expr(
            users::Column::UpdatedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(users::Column::Username.eq(username))
        .exec(conn)
        .await?;

    debug!(username, rows = result.rows_affected, "Credited win");
    Ok(())
}

/// Top players by cumulative wins, descending; ties broken by username
/// so the listing is deterministic.
pub async fn leaderboard(conn: &impl ConnectionTrait, limit: u64) -> Result<Vec<User>, AppError> {
    users::Entity::find()
        .order_by_desc(users::Column::Wins)
        .order_by_asc(users::Column::Username)
        .limit(limit)
        .all(conn)
        .await
        .map_err(AppError::from)
}

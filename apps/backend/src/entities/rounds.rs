use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A finished round, persisted by the history sink at resolution.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "winning_number")]
    pub winning_number: i16,
    #[sea_orm(column_name = "opened_at")]
    pub opened_at: OffsetDateTime,
    #[sea_orm(column_name = "closed_at")]
    pub closed_at: OffsetDateTime,
    /// Full player list with picks, as stored JSON.
    pub players: Json,
    /// Winning subset of the player list, as stored JSON.
    pub winners: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;

use super::{artist, user, user_concert};

/// A single show at a venue on a given date.
///
/// A concert has at most one headlining artist (`artist_id`). Guests are
/// tracked separately in the `user_concert` association table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "concerts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Ticket price, between 0 and 500 inclusive.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub venue: String,
    pub address: String,
    pub date: NaiveDate,
    pub image: Option<String>,
    /// The artist playing, if one has been booked.
    pub artist_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "artist::Entity",
        from = "Column::ArtistId",
        to = "artist::Column::Id",
        on_delete = "SetNull"
    )]
    Artist,
    #[sea_orm(has_many = "user_concert::Entity")]
    UserConcert,
}

impl Related<artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        user_concert::Relation::User.def()
    }
    fn via() -> Option<RelationDef> {
        Some(user_concert::Relation::Concert.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The artist playing this concert, if any.
    pub async fn artist_playing<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Option<artist::Model>, DbErr> {
        match self.artist_id {
            Some(artist_id) => artist::Entity::find_by_id(artist_id).one(db).await,
            None => Ok(None),
        }
    }

    /// Users attending this concert.
    pub async fn guests_attending<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<user::Model>, DbErr> {
        self.find_related(user::Entity)
            .order_by_asc(user::Column::Username)
            .all(db)
            .await
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

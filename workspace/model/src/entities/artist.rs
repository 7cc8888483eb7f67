use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;

use super::{concert, user, user_artist};

/// A performer that can be booked to play concerts.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub hometown: String,
    /// Link to a promotional picture.
    pub image: Option<String>,
    pub genre: String,
    #[sea_orm(column_type = "Text")]
    pub biography: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Concerts this artist is booked to play.
    #[sea_orm(has_many = "concert::Entity")]
    Concert,
    #[sea_orm(has_many = "user_artist::Entity")]
    UserArtist,
}

impl Related<concert::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Concert.def()
    }
}

// Fans reach an artist through the favourites table.
impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        user_artist::Relation::User.def()
    }
    fn via() -> Option<RelationDef> {
        Some(user_artist::Relation::Artist.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Concerts where this artist is the one playing, soonest first.
    pub async fn upcoming_concerts<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<concert::Model>, DbErr> {
        self.find_related(concert::Entity)
            .order_by_asc(concert::Column::Date)
            .order_by_asc(concert::Column::Id)
            .all(db)
            .await
    }

    /// Users who marked this artist as a favourite.
    pub async fn fans<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<user::Model>, DbErr> {
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

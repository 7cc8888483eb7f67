use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;

use super::{artist, concert, user_artist, user_concert};

/// An account that can log in, attend concerts and follow artists.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2id PHC string. Never the plaintext password.
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "user_concert::Entity")]
    UserConcert,
    #[sea_orm(has_many = "user_artist::Entity")]
    UserArtist,
}

impl Related<concert::Entity> for Entity {
    fn to() -> RelationDef {
        user_concert::Relation::Concert.def()
    }
    fn via() -> Option<RelationDef> {
        Some(user_concert::Relation::User.def().rev())
    }
}

impl Related<artist::Entity> for Entity {
    fn to() -> RelationDef {
        user_artist::Relation::Artist.def()
    }
    fn via() -> Option<RelationDef> {
        Some(user_artist::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Concerts this user is attending, in date order.
    pub async fn attending<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<concert::Model>, DbErr> {
        self.find_related(concert::Entity)
            .order_by_asc(concert::Column::Date)
            .order_by_asc(concert::Column::Id)
            .all(db)
            .await
    }

    /// Artists this user marked as favourite.
    pub async fn favourite_artists<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<artist::Model>, DbErr> {
        self.find_related(artist::Entity)
            .order_by_asc(artist::Column::Name)
            .all(db)
            .await
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.username)
    }
}

use super::{artist, user};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

/// Favourites: one row per (user, artist) pair.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_artist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub artist_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "artist::Entity",
        from = "Column::ArtistId",
        to = "artist::Column::Id",
        on_delete = "Cascade"
    )]
    Artist,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn contains<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    artist_id: i32,
) -> Result<bool, DbErr> {
    Ok(Entity::find_by_id((user_id, artist_id)).one(db).await?.is_some())
}

pub async fn insert<C: ConnectionTrait>(db: &C, user_id: i32, artist_id: i32) -> Result<(), DbErr> {
    ActiveModel {
        user_id: Set(user_id),
        artist_id: Set(artist_id),
    }
    .insert(db)
    .await?;
    Ok(())
}

pub async fn remove<C: ConnectionTrait>(db: &C, user_id: i32, artist_id: i32) -> Result<u64, DbErr> {
    let result = Entity::delete_by_id((user_id, artist_id)).exec(db).await?;
    Ok(result.rows_affected)
}

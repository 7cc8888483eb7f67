use super::{concert, user};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

/// Attendance: one row per (user, concert) pair.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_concert")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub concert_id: i32,
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
        belongs_to = "concert::Entity",
        from = "Column::ConcertId",
        to = "concert::Column::Id",
        on_delete = "Cascade"
    )]
    Concert,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<concert::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Concert.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Whether `user_id` is attending `concert_id`.
pub async fn contains<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    concert_id: i32,
) -> Result<bool, DbErr> {
    Ok(Entity::find_by_id((user_id, concert_id)).one(db).await?.is_some())
}

/// Adds the pair. Fails with a constraint error if it is already present.
pub async fn insert<C: ConnectionTrait>(db: &C, user_id: i32, concert_id: i32) -> Result<(), DbErr> {
    ActiveModel {
        user_id: Set(user_id),
        concert_id: Set(concert_id),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Removes the pair, returning the number of rows deleted (0 or 1).
pub async fn remove<C: ConnectionTrait>(db: &C, user_id: i32, concert_id: i32) -> Result<u64, DbErr> {
    let result = Entity::delete_by_id((user_id, concert_id)).exec(db).await?;
    Ok(result.rows_affected)
}

/// Number of guests attending a concert.
pub async fn count_for_concert<C: ConnectionTrait>(db: &C, concert_id: i32) -> Result<u64, DbErr> {
    Entity::find()
        .filter(Column::ConcertId.eq(concert_id))
        .count(db)
        .await
}

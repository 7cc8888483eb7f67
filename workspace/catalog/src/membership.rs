//! Attend / favourite toggles.
//!
//! Adding a pair that is already present, or removing one that is absent,
//! leaves the association set untouched and reports it through
//! [`MembershipOutcome`] instead of failing. Callers pick the user-facing
//! message from the outcome.

use model::entities::{artist, concert, user_artist, user_concert};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, SqlErr, TransactionTrait};
use tracing::{debug, info, instrument};

use crate::{CatalogError, Result};

/// The two user-owned association sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Association {
    /// user ↔ concert
    Attending,
    /// user ↔ artist
    Favourite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOutcome {
    Added,
    AlreadyMember,
    Removed,
    NotMember,
}

impl MembershipOutcome {
    /// Whether the association set was modified.
    pub fn changed(self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::AlreadyMember => "already_member",
            Self::Removed => "removed",
            Self::NotMember => "not_member",
        }
    }
}

/// The result of a toggle, with the display name of the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub association: Association,
    pub outcome: MembershipOutcome,
    pub target: String,
}

impl Toggle {
    pub fn message(&self) -> String {
        use Association::*;
        use MembershipOutcome::*;

        let target = &self.target;
        match (self.association, self.outcome) {
            (Attending, Added) => format!("You are now attending {target}."),
            (Attending, AlreadyMember) => format!("You are already attending {target}."),
            (Attending, Removed) => format!("You are no longer attending {target}."),
            (Attending, NotMember) => format!("You are not attending {target}."),
            (Favourite, Added) => format!("{target} added to your favourites."),
            (Favourite, AlreadyMember) => format!("{target} is already one of your favourites."),
            (Favourite, Removed) => format!("{target} removed from your favourites."),
            (Favourite, NotMember) => format!("{target} is not one of your favourites."),
        }
    }
}

impl Association {
    /// Display name of the target, or NotFound.
    async fn target_name<C: ConnectionTrait>(self, db: &C, target_id: i32) -> Result<String> {
        let name = match self {
            Self::Attending => concert::Entity::find_by_id(target_id)
                .one(db)
                .await?
                .map(|c| c.name),
            Self::Favourite => artist::Entity::find_by_id(target_id)
                .one(db)
                .await?
                .map(|a| a.name),
        };
        name.ok_or_else(|| match self {
            Self::Attending => CatalogError::not_found("Concert", target_id),
            Self::Favourite => CatalogError::not_found("Artist", target_id),
        })
    }

    pub async fn contains<C: ConnectionTrait>(
        self,
        db: &C,
        user_id: i32,
        target_id: i32,
    ) -> Result<bool> {
        Ok(match self {
            Self::Attending => user_concert::contains(db, user_id, target_id).await?,
            Self::Favourite => user_artist::contains(db, user_id, target_id).await?,
        })
    }

    /// Inserts the pair. A unique violation means a concurrent toggle got
    /// there first, which is reported as `AlreadyMember`.
    async fn insert<C: ConnectionTrait>(
        self,
        db: &C,
        user_id: i32,
        target_id: i32,
    ) -> Result<MembershipOutcome> {
        let inserted = match self {
            Self::Attending => user_concert::insert(db, user_id, target_id).await,
            Self::Favourite => user_artist::insert(db, user_id, target_id).await,
        };
        match inserted {
            Ok(()) => Ok(MembershipOutcome::Added),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!("Pair ({}, {}) inserted concurrently", user_id, target_id);
                Ok(MembershipOutcome::AlreadyMember)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove<C: ConnectionTrait>(self, db: &C, user_id: i32, target_id: i32) -> Result<u64> {
        Ok(match self {
            Self::Attending => user_concert::remove(db, user_id, target_id).await?,
            Self::Favourite => user_artist::remove(db, user_id, target_id).await?,
        })
    }
}

/// Inserts (user, target) unless already present.
#[instrument(skip(db))]
pub async fn add_membership(
    db: &DatabaseConnection,
    association: Association,
    user_id: i32,
    target_id: i32,
) -> Result<Toggle> {
    let txn = db.begin().await?;
    let target = association.target_name(&txn, target_id).await?;

    let outcome = if association.contains(&txn, user_id, target_id).await? {
        debug!("User {} already in {:?} set for {}", user_id, association, target_id);
        MembershipOutcome::AlreadyMember
    } else {
        association.insert(&txn, user_id, target_id).await?
    };
    // A failed insert aborts the transaction on Postgres; nothing to keep.
    if outcome.changed() {
        txn.commit().await?;
    } else {
        txn.rollback().await?;
    }

    info!("{:?} toggle for user {} on {}: {}", association, user_id, target_id, outcome.as_str());
    Ok(Toggle {
        association,
        outcome,
        target,
    })
}

/// Deletes (user, target) if present.
#[instrument(skip(db))]
pub async fn remove_membership(
    db: &DatabaseConnection,
    association: Association,
    user_id: i32,
    target_id: i32,
) -> Result<Toggle> {
    let txn = db.begin().await?;
    let target = association.target_name(&txn, target_id).await?;

    let outcome = if association.remove(&txn, user_id, target_id).await? > 0 {
        MembershipOutcome::Removed
    } else {
        debug!("User {} not in {:?} set for {}", user_id, association, target_id);
        MembershipOutcome::NotMember
    };
    txn.commit().await?;

    info!("{:?} toggle for user {} on {}: {}", association, user_id, target_id, outcome.as_str());
    Ok(Toggle {
        association,
        outcome,
        target,
    })
}

pub async fn attend(db: &DatabaseConnection, user_id: i32, concert_id: i32) -> Result<Toggle> {
    add_membership(db, Association::Attending, user_id, concert_id).await
}

pub async fn unattend(db: &DatabaseConnection, user_id: i32, concert_id: i32) -> Result<Toggle> {
    remove_membership(db, Association::Attending, user_id, concert_id).await
}

pub async fn favourite(db: &DatabaseConnection, user_id: i32, artist_id: i32) -> Result<Toggle> {
    add_membership(db, Association::Favourite, user_id, artist_id).await
}

pub async fn unfavourite(db: &DatabaseConnection, user_id: i32, artist_id: i32) -> Result<Toggle> {
    remove_membership(db, Association::Favourite, user_id, artist_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::setup_db;
    use chrono::NaiveDate;
    use model::entities::user;
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, PaginatorTrait, Set};

    struct Fixture {
        db: DatabaseConnection,
        user: user::Model,
        band: artist::Model,
        funfest: concert::Model,
    }

    async fn fixture() -> Fixture {
        let db = setup_db().await;
        let band = artist::ActiveModel {
            name: Set("Band".to_string()),
            hometown: Set("Calgary".to_string()),
            image: Set(None),
            genre: Set("Punk".to_string()),
            biography: Set("Punk band from Calgary".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let funfest = concert::ActiveModel {
            name: Set("Funfest".to_string()),
            price: Set(Decimal::from(10)),
            venue: Set("The venue".to_string()),
            address: Set("123 Main Street".to_string()),
            date: Set(NaiveDate::from_ymd_opt(2023, 7, 11).unwrap()),
            image: Set(None),
            artist_id: Set(Some(band.id)),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let user = user::ActiveModel {
            username: Set("laurel1".to_string()),
            password_hash: Set("unused".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        Fixture {
            db,
            user,
            band,
            funfest,
        }
    }

    async fn attendance_rows(db: &DatabaseConnection) -> u64 {
        user_concert::Entity::find().count(db).await.unwrap()
    }

    #[tokio::test]
    async fn test_attending_twice_reports_already_member() {
        let f = fixture().await;

        let first = attend(&f.db, f.user.id, f.funfest.id).await.unwrap();
        assert_eq!(first.outcome, MembershipOutcome::Added);
        assert!(first.outcome.changed());
        assert_eq!(first.message(), "You are now attending Funfest.");
        assert_eq!(attendance_rows(&f.db).await, 1);

        let second = attend(&f.db, f.user.id, f.funfest.id).await.unwrap();
        assert_eq!(second.outcome, MembershipOutcome::AlreadyMember);
        assert!(!second.outcome.changed());
        assert_eq!(second.message(), "You are already attending Funfest.");
        assert_eq!(attendance_rows(&f.db).await, 1);

        assert_eq!(f.user.attending(&f.db).await.unwrap(), vec![f.funfest.clone()]);
    }

    #[tokio::test]
    async fn test_duplicate_insert_reports_already_member() {
        let f = fixture().await;

        for association in [Association::Attending, Association::Favourite] {
            let target = match association {
                Association::Attending => f.funfest.id,
                Association::Favourite => f.band.id,
            };
            let first = association.insert(&f.db, f.user.id, target).await.unwrap();
            assert_eq!(first, MembershipOutcome::Added);
            // Skips the `contains` check, as a concurrent toggle would.
            let second = association.insert(&f.db, f.user.id, target).await.unwrap();
            assert_eq!(second, MembershipOutcome::AlreadyMember);
        }
        assert_eq!(attendance_rows(&f.db).await, 1);
    }

    #[tokio::test]
    async fn test_unattend_when_absent_reports_not_member() {
        let f = fixture().await;

        let toggle = unattend(&f.db, f.user.id, f.funfest.id).await.unwrap();
        assert_eq!(toggle.outcome, MembershipOutcome::NotMember);
        assert_eq!(toggle.message(), "You are not attending Funfest.");
        assert_eq!(attendance_rows(&f.db).await, 0);
    }

    #[tokio::test]
    async fn test_attend_then_unattend() {
        let f = fixture().await;

        attend(&f.db, f.user.id, f.funfest.id).await.unwrap();
        let removed = unattend(&f.db, f.user.id, f.funfest.id).await.unwrap();
        assert_eq!(removed.outcome, MembershipOutcome::Removed);
        assert!(f.user.attending(&f.db).await.unwrap().is_empty());

        let again = unattend(&f.db, f.user.id, f.funfest.id).await.unwrap();
        assert_eq!(again.outcome, MembershipOutcome::NotMember);
    }

    #[tokio::test]
    async fn test_favourite_toggles() {
        let f = fixture().await;

        let added = favourite(&f.db, f.user.id, f.band.id).await.unwrap();
        assert_eq!(added.outcome, MembershipOutcome::Added);
        assert_eq!(added.message(), "Band added to your favourites.");
        assert!(Association::Favourite.contains(&f.db, f.user.id, f.band.id).await.unwrap());

        let again = favourite(&f.db, f.user.id, f.band.id).await.unwrap();
        assert_eq!(again.outcome, MembershipOutcome::AlreadyMember);
        assert_eq!(f.band.fans(&f.db).await.unwrap().len(), 1);

        let removed = unfavourite(&f.db, f.user.id, f.band.id).await.unwrap();
        assert_eq!(removed.outcome, MembershipOutcome::Removed);
        assert_eq!(removed.message(), "Band removed from your favourites.");
        let absent = unfavourite(&f.db, f.user.id, f.band.id).await.unwrap();
        assert_eq!(absent.outcome, MembershipOutcome::NotMember);
    }

    #[tokio::test]
    async fn test_unknown_target_is_not_found() {
        let f = fixture().await;

        let err = attend(&f.db, f.user.id, f.funfest.id + 100).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Concert", .. }));
        let err = unfavourite(&f.db, f.user.id, f.band.id + 100).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Artist", .. }));
        assert_eq!(attendance_rows(&f.db).await, 0);
    }
}

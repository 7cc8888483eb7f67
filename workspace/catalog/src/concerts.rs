use common::{ConcertForm, FieldError};
use model::entities::{artist, concert};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument, warn};

use crate::{CatalogError, Page, Result};

/// Runs the form rules plus the check that needs the store: the artist
/// playing, when given, has to exist.
async fn validate<C: ConnectionTrait>(db: &C, form: &ConcertForm) -> Result<()> {
    let mut errors = form.check().err().unwrap_or_default();

    if let Some(artist_id) = form.artist_id {
        if artist::Entity::find_by_id(artist_id).one(db).await?.is_none() {
            debug!("Concert form references unknown artist {}", artist_id);
            errors.push(FieldError::new(
                "artist_id",
                "Please choose an existing artist.",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::Validation(errors))
    }
}

/// `form` is expected to be normalized.
fn apply(active: &mut concert::ActiveModel, form: ConcertForm) -> Result<()> {
    // Both are guaranteed by `validate`; re-checked so a bad form can never
    // reach the store.
    let (Some(price), Some(date)) = (form.price, form.parsed_date()) else {
        return Err(CatalogError::Validation(
            form.check().err().unwrap_or_default(),
        ));
    };
    active.name = Set(form.name);
    active.price = Set(price.round_dp(2));
    active.venue = Set(form.venue);
    active.address = Set(form.address);
    active.date = Set(date);
    active.image = Set(form.image);
    active.artist_id = Set(form.artist_id);
    Ok(())
}

/// Validates the form and inserts a new concert.
#[instrument(skip(db))]
pub async fn create_concert(db: &DatabaseConnection, form: &ConcertForm) -> Result<concert::Model> {
    let txn = db.begin().await?;
    validate(&txn, form).await?;

    let mut active = concert::ActiveModel {
        ..Default::default()
    };
    apply(&mut active, form.normalized())?;
    let created = active.insert(&txn).await?;
    txn.commit().await?;

    info!("Concert created with ID: {}, name: {}", created.id, created.name);
    Ok(created)
}

/// Validates the form and overwrites the fields of an existing concert.
#[instrument(skip(db))]
pub async fn update_concert(
    db: &DatabaseConnection,
    concert_id: i32,
    form: &ConcertForm,
) -> Result<concert::Model> {
    let txn = db.begin().await?;
    let Some(existing) = concert::Entity::find_by_id(concert_id).one(&txn).await? else {
        warn!("Concert with ID {} not found for update", concert_id);
        return Err(CatalogError::not_found("Concert", concert_id));
    };
    validate(&txn, form).await?;

    let mut active: concert::ActiveModel = existing.into();
    apply(&mut active, form.normalized())?;
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    info!("Concert with ID {} updated", concert_id);
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn get_concert(db: &DatabaseConnection, concert_id: i32) -> Result<concert::Model> {
    concert::Entity::find_by_id(concert_id)
        .one(db)
        .await?
        .ok_or_else(|| CatalogError::not_found("Concert", concert_id))
}

/// Concerts ordered by date. `page` starts at 1.
#[instrument(skip(db))]
pub async fn list_concerts(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<Page<concert::Model>> {
    let paginator = concert::Entity::find()
        .order_by_asc(concert::Column::Date)
        .order_by_asc(concert::Column::Id)
        .paginate(db, limit.max(1));
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;
    debug!("Retrieved {} of {} concerts", items.len(), total);
    Ok(Page { items, total })
}

/// Every concert, for the home page.
pub async fn all_concerts(db: &DatabaseConnection) -> Result<Vec<concert::Model>> {
    Ok(concert::Entity::find()
        .order_by_asc(concert::Column::Date)
        .order_by_asc(concert::Column::Id)
        .all(db)
        .await?)
}

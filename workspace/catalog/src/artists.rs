use common::ArtistForm;
use model::entities::artist;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info, instrument, warn};

use crate::{CatalogError, Page, Result};

/// `form` is expected to be normalized.
fn apply(active: &mut artist::ActiveModel, form: ArtistForm) {
    active.name = Set(form.name);
    active.hometown = Set(form.hometown);
    active.genre = Set(form.genre);
    active.biography = Set(form.biography);
    active.image = Set(form.image);
}

/// Validates the form and inserts a new artist.
#[instrument(skip(db))]
pub async fn create_artist(db: &DatabaseConnection, form: &ArtistForm) -> Result<artist::Model> {
    form.check().map_err(CatalogError::Validation)?;

    let mut active = artist::ActiveModel {
        ..Default::default()
    };
    apply(&mut active, form.normalized());

    let txn = db.begin().await?;
    let created = active.insert(&txn).await?;
    txn.commit().await?;

    info!("Artist created with ID: {}, name: {}", created.id, created.name);
    Ok(created)
}

/// Validates the form and overwrites the fields of an existing artist.
#[instrument(skip(db))]
pub async fn update_artist(
    db: &DatabaseConnection,
    artist_id: i32,
    form: &ArtistForm,
) -> Result<artist::Model> {
    let txn = db.begin().await?;
    let Some(existing) = artist::Entity::find_by_id(artist_id).one(&txn).await? else {
        warn!("Artist with ID {} not found for update", artist_id);
        return Err(CatalogError::not_found("Artist", artist_id));
    };
    form.check().map_err(CatalogError::Validation)?;

    let mut active: artist::ActiveModel = existing.into();
    apply(&mut active, form.normalized());
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    info!("Artist with ID {} updated", artist_id);
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn get_artist(db: &DatabaseConnection, artist_id: i32) -> Result<artist::Model> {
    artist::Entity::find_by_id(artist_id)
        .one(db)
        .await?
        .ok_or_else(|| CatalogError::not_found("Artist", artist_id))
}

/// Artists ordered by id. `page` starts at 1.
#[instrument(skip(db))]
pub async fn list_artists(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<Page<artist::Model>> {
    let paginator = artist::Entity::find()
        .order_by_asc(artist::Column::Id)
        .paginate(db, limit.max(1));
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;
    debug!("Retrieved {} of {} artists", items.len(), total);
    Ok(Page { items, total })
}

/// Every artist by name, for pickers.
pub async fn all_artists(db: &DatabaseConnection) -> Result<Vec<artist::Model>> {
    Ok(artist::Entity::find()
        .order_by_asc(artist::Column::Name)
        .all(db)
        .await?)
}

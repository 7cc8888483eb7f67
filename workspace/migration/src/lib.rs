pub use sea_orm_migration::prelude::*;

mod m20230701_000001_create_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20230701_000001_create_table::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Database;

    #[tokio::test]
    async fn test_migrations_apply_and_roll_back() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.expect("Migrations failed.");

        let manager = SchemaManager::new(&db);
        for table in ["artists", "concerts", "users", "user_concert", "user_artist"] {
            assert!(manager.has_table(table).await.unwrap(), "missing table {table}");
        }

        Migrator::down(&db, None).await.expect("Rollback failed.");
        assert!(!manager.has_table("concerts").await.unwrap());
    }
}

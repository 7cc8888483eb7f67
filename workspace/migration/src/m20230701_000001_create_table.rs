use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create artists table
        manager
            .create_table(
                Table::create()
                    .table(Artists::Table)
                    .if_not_exists()
                    .col(pk_auto(Artists::Id))
                    .col(string_len(Artists::Name, 80))
                    .col(string_len(Artists::Hometown, 80))
                    .col(string_null(Artists::Image))
                    .col(string_len(Artists::Genre, 80))
                    .col(text(Artists::Biography))
                    .to_owned(),
            )
            .await?;

        // Create concerts table
        manager
            .create_table(
                Table::create()
                    .table(Concerts::Table)
                    .if_not_exists()
                    .col(pk_auto(Concerts::Id))
                    .col(string_len(Concerts::Name, 80))
                    .col(decimal(Concerts::Price).decimal_len(10, 2))
                    .col(string_len(Concerts::Venue, 80))
                    .col(string_len(Concerts::Address, 80))
                    .col(date(Concerts::Date))
                    .col(string_null(Concerts::Image))
                    .col(integer_null(Concerts::ArtistId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_concert_artist")
                            .from(Concerts::Table, Concerts::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Username, 80).unique_key())
                    .col(string(Users::PasswordHash))
                    .to_owned(),
            )
            .await?;

        // Create user_concert table (attendance)
        manager
            .create_table(
                Table::create()
                    .table(UserConcert::Table)
                    .if_not_exists()
                    .col(integer(UserConcert::UserId))
                    .col(integer(UserConcert::ConcertId))
                    .primary_key(
                        Index::create()
                            .name("pk_user_concert")
                            .col(UserConcert::UserId)
                            .col(UserConcert::ConcertId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_concert_user")
                            .from(UserConcert::Table, UserConcert::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_concert_concert")
                            .from(UserConcert::Table, UserConcert::ConcertId)
                            .to(Concerts::Table, Concerts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create user_artist table (favourites)
        manager
            .create_table(
                Table::create()
                    .table(UserArtist::Table)
                    .if_not_exists()
                    .col(integer(UserArtist::UserId))
                    .col(integer(UserArtist::ArtistId))
                    .primary_key(
                        Index::create()
                            .name("pk_user_artist")
                            .col(UserArtist::UserId)
                            .col(UserArtist::ArtistId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_artist_user")
                            .from(UserArtist::Table, UserArtist::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_artist_artist")
                            .from(UserArtist::Table, UserArtist::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Concert listings are ordered by date
        manager
            .create_index(
                Index::create()
                    .name("idx_concerts_date")
                    .table(Concerts::Table)
                    .col(Concerts::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserArtist::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserConcert::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Concerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Artists::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Artists {
    Table,
    Id,
    Name,
    Hometown,
    Image,
    Genre,
    Biography,
}

#[derive(DeriveIden)]
enum Concerts {
    Table,
    Id,
    Name,
    Price,
    Venue,
    Address,
    Date,
    Image,
    ArtistId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
}

#[derive(DeriveIden)]
enum UserConcert {
    Table,
    UserId,
    ConcertId,
}

#[derive(DeriveIden)]
enum UserArtist {
    Table,
    UserId,
    ArtistId,
}

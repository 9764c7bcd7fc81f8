use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub enum Tournament {
    Table,
    TournamentId,
    Name,
    Season,
}

#[derive(DeriveIden)]
pub enum Team {
    Table,
    TeamId,
    Name,
    Image,
}

#[derive(DeriveIden)]
pub enum Hero {
    Table,
    HeroId,
    Name,
    Image,
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    UserId,
    Username,
    PasswordHash,
}

#[derive(DeriveIden)]
pub enum Player {
    Table,
    PlayerId,
    TeamId,
    Name,
    Role,
    Image,
}

#[derive(DeriveIden)]
pub enum Coach {
    Table,
    CoachId,
    TeamId,
    Name,
    Role,
    Image,
}

#[derive(DeriveIden)]
pub enum TournamentTeam {
    Table,
    TournamentTeamId,
    TournamentId,
    TeamId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tournament::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tournament::TournamentId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Tournament::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Tournament::Season).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Team::TeamId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Team::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Team::Image).string_len(2048).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Hero::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Hero::HeroId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Hero::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Hero::Image).string_len(2048).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::UserId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(User::Username).string_len(255).not_null())
                    .col(ColumnDef::new(User::PasswordHash).string_len(60).not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-user-username")
            .table(User::Table)
            .col(User::Username)
            .unique()
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Player::PlayerId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Player::TeamId).integer().not_null())
                    .col(ColumnDef::new(Player::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Player::Role).string_len(16).not_null())
                    .col(ColumnDef::new(Player::Image).string_len(2048).not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-player-team-id")
            .table(Player::Table)
            .col(Player::TeamId)
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(Coach::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Coach::CoachId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Coach::TeamId).integer().not_null())
                    .col(ColumnDef::new(Coach::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Coach::Role).string_len(16).not_null())
                    .col(ColumnDef::new(Coach::Image).string_len(2048).not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-coach-team-id")
            .table(Coach::Table)
            .col(Coach::TeamId)
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(TournamentTeam::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TournamentTeam::TournamentTeamId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(TournamentTeam::TournamentId).integer().not_null())
                    .col(ColumnDef::new(TournamentTeam::TeamId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-tournament-team-unique")
            .table(TournamentTeam::Table)
            .col(TournamentTeam::TournamentId)
            .col(TournamentTeam::TeamId)
            .unique()
            .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-tournament-team-team-id")
            .table(TournamentTeam::Table)
            .col(TournamentTeam::TeamId)
            .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TournamentTeam::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Coach::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Player::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Hero::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Team::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Tournament::Table).to_owned()).await
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub enum GameResult {
    Table,
    GameResultId,
    GameId,
    TeamId,
    Result,
}

#[derive(DeriveIden)]
pub enum TurtleResult {
    Table,
    TurtleResultId,
    GameId,
    TeamId,
    Phase,
    Setup,
    Initiate,
    Result,
}

#[derive(DeriveIden)]
pub enum LordResult {
    Table,
    LordResultId,
    GameId,
    TeamId,
    Phase,
    Setup,
    Initiate,
    Result,
}

#[derive(DeriveIden)]
pub enum TrioMid {
    Table,
    TrioMidId,
    GameId,
    TeamId,
    Role,
    HeroId,
    EarlyResult,
}

#[derive(DeriveIden)]
pub enum TrioMidHero {
    Table,
    TrioMidHeroId,
    TrioMidId,
    HeroId,
}

#[derive(DeriveIden)]
pub enum Goldlaner {
    Table,
    GoldlanerId,
    GameId,
    TeamId,
    HeroId,
    EarlyResult,
}

#[derive(DeriveIden)]
pub enum Explaner {
    Table,
    ExplanerId,
    GameId,
    TeamId,
    HeroId,
    EarlyResult,
}

async fn create_game_team_index<T>(manager: &SchemaManager<'_>, name: &str, table: T, game_col: T, team_col: T) -> Result<(), DbErr> where T: Iden + 'static {
    manager.create_index(
        IndexCreateStatement::new()
        .name(name)
        .table(table)
        .col(game_col)
        .col(team_col)
        .to_owned()
    ).await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameResult::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameResult::GameResultId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(GameResult::GameId).integer().not_null())
                    .col(ColumnDef::new(GameResult::TeamId).integer().not_null())
                    .col(ColumnDef::new(GameResult::Result).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;
        create_game_team_index(manager, "idx-game-result-game-team", GameResult::Table, GameResult::GameId, GameResult::TeamId).await?;

        manager
            .create_table(
                Table::create()
                    .table(TurtleResult::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TurtleResult::TurtleResultId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(TurtleResult::GameId).integer().not_null())
                    .col(ColumnDef::new(TurtleResult::TeamId).integer().not_null())
                    .col(ColumnDef::new(TurtleResult::Phase).integer().not_null())
                    .col(ColumnDef::new(TurtleResult::Setup).string_len(16).not_null())
                    .col(ColumnDef::new(TurtleResult::Initiate).string_len(16).not_null())
                    .col(ColumnDef::new(TurtleResult::Result).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;
        create_game_team_index(manager, "idx-turtle-result-game-team", TurtleResult::Table, TurtleResult::GameId, TurtleResult::TeamId).await?;

        manager
            .create_table(
                Table::create()
                    .table(LordResult::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LordResult::LordResultId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(LordResult::GameId).integer().not_null())
                    .col(ColumnDef::new(LordResult::TeamId).integer().not_null())
                    .col(ColumnDef::new(LordResult::Phase).integer().not_null())
                    .col(ColumnDef::new(LordResult::Setup).string_len(16).not_null())
                    .col(ColumnDef::new(LordResult::Initiate).string_len(16).not_null())
                    .col(ColumnDef::new(LordResult::Result).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;
        create_game_team_index(manager, "idx-lord-result-game-team", LordResult::Table, LordResult::GameId, LordResult::TeamId).await?;

        manager
            .create_table(
                Table::create()
                    .table(TrioMid::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TrioMid::TrioMidId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(TrioMid::GameId).integer().not_null())
                    .col(ColumnDef::new(TrioMid::TeamId).integer().not_null())
                    .col(ColumnDef::new(TrioMid::Role).string_len(16).not_null())
                    .col(ColumnDef::new(TrioMid::HeroId).integer().not_null())
                    .col(ColumnDef::new(TrioMid::EarlyResult).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;
        create_game_team_index(manager, "idx-trio-mid-game-team", TrioMid::Table, TrioMid::GameId, TrioMid::TeamId).await?;

        manager
            .create_table(
                Table::create()
                    .table(TrioMidHero::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TrioMidHero::TrioMidHeroId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(TrioMidHero::TrioMidId).integer().not_null())
                    .col(ColumnDef::new(TrioMidHero::HeroId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-trio-mid-hero-trio-mid-id")
            .table(TrioMidHero::Table)
            .col(TrioMidHero::TrioMidId)
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(Goldlaner::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Goldlaner::GoldlanerId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Goldlaner::GameId).integer().not_null())
                    .col(ColumnDef::new(Goldlaner::TeamId).integer().not_null())
                    .col(ColumnDef::new(Goldlaner::HeroId).integer().not_null())
                    .col(ColumnDef::new(Goldlaner::EarlyResult).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;
        create_game_team_index(manager, "idx-goldlaner-game-team", Goldlaner::Table, Goldlaner::GameId, Goldlaner::TeamId).await?;

        manager
            .create_table(
                Table::create()
                    .table(Explaner::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Explaner::ExplanerId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Explaner::GameId).integer().not_null())
                    .col(ColumnDef::new(Explaner::TeamId).integer().not_null())
                    .col(ColumnDef::new(Explaner::HeroId).integer().not_null())
                    .col(ColumnDef::new(Explaner::EarlyResult).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;
        create_game_team_index(manager, "idx-explaner-game-team", Explaner::Table, Explaner::GameId, Explaner::TeamId).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Explaner::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Goldlaner::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(TrioMidHero::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(TrioMid::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(LordResult::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(TurtleResult::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(GameResult::Table).to_owned()).await
    }
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub enum Match {
    #[sea_orm(iden = "matches")]
    Table,
    MatchId,
    TournamentId,
    Week,
    Day,
    Date,
    TeamAId,
    TeamBId,
    TeamAScore,
    TeamBScore,
}

#[derive(DeriveIden)]
pub enum MatchTeamDetail {
    Table,
    MatchTeamDetailId,
    MatchId,
    TeamId,
}

#[derive(DeriveIden)]
pub enum PlayerMatch {
    Table,
    PlayerMatchId,
    MatchTeamDetailId,
    PlayerId,
}

#[derive(DeriveIden)]
pub enum CoachMatch {
    Table,
    CoachMatchId,
    MatchTeamDetailId,
    CoachId,
}

#[derive(DeriveIden)]
pub enum Game {
    Table,
    GameId,
    MatchId,
    FirstPickTeamId,
    SecondPickTeamId,
    WinnerTeamId,
    GameNumber,
    VideoLink,
    FullDraftImage,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Match::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Match::MatchId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Match::TournamentId).integer().not_null())
                    .col(ColumnDef::new(Match::Week).integer().not_null())
                    .col(ColumnDef::new(Match::Day).integer().not_null())
                    .col(ColumnDef::new(Match::Date).integer().not_null())
                    .col(ColumnDef::new(Match::TeamAId).integer().not_null())
                    .col(ColumnDef::new(Match::TeamBId).integer().not_null())
                    .col(ColumnDef::new(Match::TeamAScore).integer().not_null().default(0))
                    .col(ColumnDef::new(Match::TeamBScore).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-matches-tournament-id")
            .table(Match::Table)
            .col(Match::TournamentId)
            .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-matches-team-a-id")
            .table(Match::Table)
            .col(Match::TeamAId)
            .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-matches-team-b-id")
            .table(Match::Table)
            .col(Match::TeamBId)
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(MatchTeamDetail::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MatchTeamDetail::MatchTeamDetailId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(MatchTeamDetail::MatchId).integer().not_null())
                    .col(ColumnDef::new(MatchTeamDetail::TeamId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-match-team-detail-match-team")
            .table(MatchTeamDetail::Table)
            .col(MatchTeamDetail::MatchId)
            .col(MatchTeamDetail::TeamId)
            .unique()
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(PlayerMatch::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PlayerMatch::PlayerMatchId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(PlayerMatch::MatchTeamDetailId).integer().not_null())
                    .col(ColumnDef::new(PlayerMatch::PlayerId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-player-match-detail-player")
            .table(PlayerMatch::Table)
            .col(PlayerMatch::MatchTeamDetailId)
            .col(PlayerMatch::PlayerId)
            .unique()
            .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-player-match-player-id")
            .table(PlayerMatch::Table)
            .col(PlayerMatch::PlayerId)
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(CoachMatch::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CoachMatch::CoachMatchId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(CoachMatch::MatchTeamDetailId).integer().not_null())
                    .col(ColumnDef::new(CoachMatch::CoachId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-coach-match-detail-coach")
            .table(CoachMatch::Table)
            .col(CoachMatch::MatchTeamDetailId)
            .col(CoachMatch::CoachId)
            .unique()
            .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-coach-match-coach-id")
            .table(CoachMatch::Table)
            .col(CoachMatch::CoachId)
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Game::GameId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Game::MatchId).integer().not_null())
                    .col(ColumnDef::new(Game::FirstPickTeamId).integer().not_null())
                    .col(ColumnDef::new(Game::SecondPickTeamId).integer().not_null())
                    .col(ColumnDef::new(Game::WinnerTeamId).integer().not_null())
                    .col(ColumnDef::new(Game::GameNumber).integer().not_null())
                    .col(ColumnDef::new(Game::VideoLink).string_len(2048))
                    .col(ColumnDef::new(Game::FullDraftImage).string_len(2048))
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-game-match-game-number")
            .table(Game::Table)
            .col(Game::MatchId)
            .col(Game::GameNumber)
            .unique()
            .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Game::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(CoachMatch::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(PlayerMatch::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MatchTeamDetail::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Match::Table).to_owned()).await
    }
}

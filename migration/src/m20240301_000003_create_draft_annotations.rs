use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub enum HeroPick {
    Table,
    HeroPickId,
    MatchTeamDetailId,
    HeroId,
    FirstPhase,
    SecondPhase,
    Total,
}

#[derive(DeriveIden)]
pub enum HeroPickGame {
    Table,
    HeroPickGameId,
    HeroPickId,
    GameNumber,
    IsPicked,
}

#[derive(DeriveIden)]
pub enum HeroBan {
    Table,
    HeroBanId,
    MatchTeamDetailId,
    HeroId,
    FirstPhase,
    SecondPhase,
    Total,
}

#[derive(DeriveIden)]
pub enum HeroBanGame {
    Table,
    HeroBanGameId,
    HeroBanId,
    GameNumber,
    IsBanned,
}

#[derive(DeriveIden)]
pub enum PriorityPick {
    Table,
    PriorityPickId,
    MatchTeamDetailId,
    HeroId,
    Total,
    Role,
    PickRate,
}

#[derive(DeriveIden)]
pub enum PriorityBan {
    Table,
    PriorityBanId,
    MatchTeamDetailId,
    HeroId,
    Total,
    Role,
    BanRate,
}

#[derive(DeriveIden)]
pub enum FlexPick {
    Table,
    FlexPickId,
    MatchTeamDetailId,
    HeroId,
    Total,
    Role,
    PickRate,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HeroPick::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(HeroPick::HeroPickId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(HeroPick::MatchTeamDetailId).integer().not_null())
                    .col(ColumnDef::new(HeroPick::HeroId).integer().not_null())
                    .col(ColumnDef::new(HeroPick::FirstPhase).integer().not_null().default(0))
                    .col(ColumnDef::new(HeroPick::SecondPhase).integer().not_null().default(0))
                    .col(ColumnDef::new(HeroPick::Total).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-hero-pick-detail-id")
            .table(HeroPick::Table)
            .col(HeroPick::MatchTeamDetailId)
            .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-hero-pick-hero-id")
            .table(HeroPick::Table)
            .col(HeroPick::HeroId)
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(HeroPickGame::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(HeroPickGame::HeroPickGameId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(HeroPickGame::HeroPickId).integer().not_null())
                    .col(ColumnDef::new(HeroPickGame::GameNumber).integer().not_null())
                    .col(ColumnDef::new(HeroPickGame::IsPicked).boolean().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-hero-pick-game-parent-number")
            .table(HeroPickGame::Table)
            .col(HeroPickGame::HeroPickId)
            .col(HeroPickGame::GameNumber)
            .unique()
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(HeroBan::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(HeroBan::HeroBanId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(HeroBan::MatchTeamDetailId).integer().not_null())
                    .col(ColumnDef::new(HeroBan::HeroId).integer().not_null())
                    .col(ColumnDef::new(HeroBan::FirstPhase).integer().not_null().default(0))
                    .col(ColumnDef::new(HeroBan::SecondPhase).integer().not_null().default(0))
                    .col(ColumnDef::new(HeroBan::Total).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-hero-ban-detail-id")
            .table(HeroBan::Table)
            .col(HeroBan::MatchTeamDetailId)
            .to_owned()
        ).await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-hero-ban-hero-id")
            .table(HeroBan::Table)
            .col(HeroBan::HeroId)
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(HeroBanGame::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(HeroBanGame::HeroBanGameId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(HeroBanGame::HeroBanId).integer().not_null())
                    .col(ColumnDef::new(HeroBanGame::GameNumber).integer().not_null())
                    .col(ColumnDef::new(HeroBanGame::IsBanned).boolean().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-hero-ban-game-parent-number")
            .table(HeroBanGame::Table)
            .col(HeroBanGame::HeroBanId)
            .col(HeroBanGame::GameNumber)
            .unique()
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(PriorityPick::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PriorityPick::PriorityPickId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(PriorityPick::MatchTeamDetailId).integer().not_null())
                    .col(ColumnDef::new(PriorityPick::HeroId).integer().not_null())
                    .col(ColumnDef::new(PriorityPick::Total).integer().not_null().default(0))
                    .col(ColumnDef::new(PriorityPick::Role).string_len(16).not_null())
                    .col(ColumnDef::new(PriorityPick::PickRate).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-priority-pick-detail-id")
            .table(PriorityPick::Table)
            .col(PriorityPick::MatchTeamDetailId)
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(PriorityBan::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PriorityBan::PriorityBanId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(PriorityBan::MatchTeamDetailId).integer().not_null())
                    .col(ColumnDef::new(PriorityBan::HeroId).integer().not_null())
                    .col(ColumnDef::new(PriorityBan::Total).integer().not_null().default(0))
                    .col(ColumnDef::new(PriorityBan::Role).string_len(16).not_null())
                    .col(ColumnDef::new(PriorityBan::BanRate).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-priority-ban-detail-id")
            .table(PriorityBan::Table)
            .col(PriorityBan::MatchTeamDetailId)
            .to_owned()
        ).await?;

        manager
            .create_table(
                Table::create()
                    .table(FlexPick::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FlexPick::FlexPickId).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(FlexPick::MatchTeamDetailId).integer().not_null())
                    .col(ColumnDef::new(FlexPick::HeroId).integer().not_null())
                    .col(ColumnDef::new(FlexPick::Total).integer().not_null().default(0))
                    .col(ColumnDef::new(FlexPick::Role).string_len(16).not_null())
                    .col(ColumnDef::new(FlexPick::PickRate).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(
            IndexCreateStatement::new()
            .name("idx-flex-pick-detail-id")
            .table(FlexPick::Table)
            .col(FlexPick::MatchTeamDetailId)
            .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FlexPick::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(PriorityBan::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(PriorityPick::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(HeroBanGame::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(HeroBan::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(HeroPickGame::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(HeroPick::Table).to_owned()).await
    }
}

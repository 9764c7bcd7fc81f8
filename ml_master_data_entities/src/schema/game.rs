use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub game_id: i32,
    pub match_id: i32,
    pub first_pick_team_id: i32,
    pub second_pick_team_id: i32,
    pub winner_team_id: i32,
    pub game_number: i32,
    pub video_link: Option<String>,
    pub full_draft_image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::MatchId"
    )]
    Match,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::FirstPickTeamId",
        to = "super::team::Column::TeamId"
    )]
    FirstPickTeam,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::SecondPickTeamId",
        to = "super::team::Column::TeamId"
    )]
    SecondPickTeam,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::WinnerTeamId",
        to = "super::team::Column::TeamId"
    )]
    WinnerTeam,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

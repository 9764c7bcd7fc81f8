use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub match_id: i32,
    pub tournament_id: i32,
    pub week: i32,
    pub day: i32,
    pub date: i32,
    pub team_a_id: i32,
    pub team_b_id: i32,
    pub team_a_score: i32,
    pub team_b_score: i32,
}

impl Model {
    pub fn team_ids(&self) -> [i32; 2] {
        [self.team_a_id, self.team_b_id]
    }

    pub fn has_team(&self, team_id: i32) -> bool {
        self.team_a_id == team_id || self.team_b_id == team_id
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tournament::Entity",
        from = "Column::TournamentId",
        to = "super::tournament::Column::TournamentId"
    )]
    Tournament,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamAId",
        to = "super::team::Column::TeamId"
    )]
    TeamA,
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamBId",
        to = "super::team::Column::TeamId"
    )]
    TeamB,
    #[sea_orm(has_many = "super::match_team_detail::Entity")]
    MatchTeamDetail,
    #[sea_orm(has_many = "super::game::Entity")]
    Game,
}

impl Related<super::tournament::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tournament.def()
    }
}

impl Related<super::match_team_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchTeamDetail.def()
    }
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

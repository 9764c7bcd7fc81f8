use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_pick")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub hero_pick_id: i32,
    pub match_team_detail_id: i32,
    pub hero_id: i32,
    pub first_phase: i32,
    pub second_phase: i32,
    pub total: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::match_team_detail::Entity",
        from = "Column::MatchTeamDetailId",
        to = "super::match_team_detail::Column::MatchTeamDetailId"
    )]
    MatchTeamDetail,
    #[sea_orm(
        belongs_to = "super::hero::Entity",
        from = "Column::HeroId",
        to = "super::hero::Column::HeroId"
    )]
    Hero,
    #[sea_orm(has_many = "super::hero_pick_game::Entity")]
    HeroPickGame,
}

impl Related<super::match_team_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchTeamDetail.def()
    }
}

impl Related<super::hero::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hero.def()
    }
}

impl Related<super::hero_pick_game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HeroPickGame.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

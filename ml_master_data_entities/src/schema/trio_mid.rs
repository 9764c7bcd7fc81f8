use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EarlyResult, TrioMidRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trio_mid")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub trio_mid_id: i32,
    pub game_id: i32,
    pub team_id: i32,
    pub role: TrioMidRole,
    pub hero_id: i32,
    pub early_result: EarlyResult,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game::Entity",
        from = "Column::GameId",
        to = "super::game::Column::GameId"
    )]
    Game,
    #[sea_orm(
        belongs_to = "super::hero::Entity",
        from = "Column::HeroId",
        to = "super::hero::Column::HeroId"
    )]
    Hero,
    #[sea_orm(has_many = "super::trio_mid_hero::Entity")]
    TrioMidHero,
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::hero::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hero.def()
    }
}

impl Related<super::trio_mid_hero::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrioMidHero.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

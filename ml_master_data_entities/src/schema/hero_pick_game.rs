use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_pick_game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub hero_pick_game_id: i32,
    pub hero_pick_id: i32,
    pub game_number: i32,
    pub is_picked: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hero_pick::Entity",
        from = "Column::HeroPickId",
        to = "super::hero_pick::Column::HeroPickId"
    )]
    HeroPick,
}

impl Related<super::hero_pick::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HeroPick.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

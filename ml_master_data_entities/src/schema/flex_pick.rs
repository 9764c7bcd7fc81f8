use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::FlexRole;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "flex_pick")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub flex_pick_id: i32,
    pub match_team_detail_id: i32,
    pub hero_id: i32,
    pub total: i32,
    pub role: FlexRole,
    #[sea_orm(column_type = "Double")]
    pub pick_rate: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hero::Entity",
        from = "Column::HeroId",
        to = "super::hero::Column::HeroId"
    )]
    Hero,
}

impl Related<super::hero::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hero.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

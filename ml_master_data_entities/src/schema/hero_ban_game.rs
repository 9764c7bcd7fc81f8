use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_ban_game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub hero_ban_game_id: i32,
    pub hero_ban_id: i32,
    pub game_number: i32,
    pub is_banned: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hero_ban::Entity",
        from = "Column::HeroBanId",
        to = "super::hero_ban::Column::HeroBanId"
    )]
    HeroBan,
}

impl Related<super::hero_ban::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HeroBan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An opposing hero a trio member was matched against in the early game.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trio_mid_hero")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub trio_mid_hero_id: i32,
    pub trio_mid_id: i32,
    pub hero_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trio_mid::Entity",
        from = "Column::TrioMidId",
        to = "super::trio_mid::Column::TrioMidId"
    )]
    TrioMid,
    #[sea_orm(
        belongs_to = "super::hero::Entity",
        from = "Column::HeroId",
        to = "super::hero::Column::HeroId"
    )]
    Hero,
}

impl Related<super::trio_mid::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrioMid.def()
    }
}

impl Related<super::hero::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hero.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

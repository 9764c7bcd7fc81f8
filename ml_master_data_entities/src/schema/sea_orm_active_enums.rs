use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    #[sea_orm(string_value = "gold")]
    Gold,
    #[sea_orm(string_value = "exp")]
    Exp,
    #[sea_orm(string_value = "roam")]
    Roam,
    #[sea_orm(string_value = "mid")]
    Mid,
    #[sea_orm(string_value = "jungler")]
    Jungler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum CoachRole {
    #[sea_orm(string_value = "head")]
    Head,
    #[sea_orm(string_value = "assistant")]
    Assistant,
    #[sea_orm(string_value = "analyst")]
    Analyst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    #[sea_orm(string_value = "win")]
    Win,
    #[sea_orm(string_value = "lose")]
    Lose,
}

/// When the team started setting up for a neutral objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveSetup {
    #[sea_orm(string_value = "early")]
    Early,
    #[sea_orm(string_value = "late")]
    Late,
    #[sea_orm(string_value = "no")]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    #[sea_orm(string_value = "yes")]
    Yes,
    #[sea_orm(string_value = "no")]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TrioMidRole {
    #[sea_orm(string_value = "jungler")]
    Jungler,
    #[sea_orm(string_value = "midlaner")]
    Midlaner,
    #[sea_orm(string_value = "roamer")]
    Roamer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum EarlyResult {
    #[sea_orm(string_value = "win")]
    Win,
    #[sea_orm(string_value = "draw")]
    Draw,
    #[sea_orm(string_value = "lose")]
    Lose,
}

/// Lane labels used by priority picks and bans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PriorityRole {
    #[sea_orm(string_value = "Gold")]
    Gold,
    #[sea_orm(string_value = "Exp")]
    Exp,
    #[sea_orm(string_value = "Roam")]
    Roam,
    #[sea_orm(string_value = "Mid")]
    Mid,
    #[sea_orm(string_value = "Jung")]
    Jung,
}

/// Two-lane combinations a flex hero was drafted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum FlexRole {
    #[sea_orm(string_value = "Roam/Exp")]
    #[serde(rename = "Roam/Exp")]
    RoamExp,
    #[sea_orm(string_value = "Jung/Gold")]
    #[serde(rename = "Jung/Gold")]
    JungGold,
    #[sea_orm(string_value = "Jung/Mid")]
    #[serde(rename = "Jung/Mid")]
    JungMid,
    #[sea_orm(string_value = "Jung/Exp")]
    #[serde(rename = "Jung/Exp")]
    JungExp,
}

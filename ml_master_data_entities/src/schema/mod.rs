pub mod prelude;

pub mod coach;
pub mod coach_match;
pub mod explaner;
pub mod flex_pick;
pub mod game;
pub mod game_result;
pub mod goldlaner;
pub mod hero;
pub mod hero_ban;
pub mod hero_ban_game;
pub mod hero_pick;
pub mod hero_pick_game;
pub mod lord_result;
pub mod match_team_detail;
pub mod matches;
pub mod player;
pub mod player_match;
pub mod priority_ban;
pub mod priority_pick;
pub mod sea_orm_active_enums;
pub mod team;
pub mod tournament;
pub mod tournament_team;
pub mod trio_mid;
pub mod trio_mid_hero;
pub mod turtle_result;
pub mod user;

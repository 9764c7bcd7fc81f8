pub use super::coach::Entity as Coach;
pub use super::coach_match::Entity as CoachMatch;
pub use super::explaner::Entity as Explaner;
pub use super::flex_pick::Entity as FlexPick;
pub use super::game::Entity as Game;
pub use super::game_result::Entity as GameResult;
pub use super::goldlaner::Entity as Goldlaner;
pub use super::hero::Entity as Hero;
pub use super::hero_ban::Entity as HeroBan;
pub use super::hero_ban_game::Entity as HeroBanGame;
pub use super::hero_pick::Entity as HeroPick;
pub use super::hero_pick_game::Entity as HeroPickGame;
pub use super::lord_result::Entity as LordResult;
pub use super::match_team_detail::Entity as MatchTeamDetail;
pub use super::matches::Entity as Matches;
pub use super::player::Entity as Player;
pub use super::player_match::Entity as PlayerMatch;
pub use super::priority_ban::Entity as PriorityBan;
pub use super::priority_pick::Entity as PriorityPick;
pub use super::team::Entity as Team;
pub use super::tournament::Entity as Tournament;
pub use super::tournament_team::Entity as TournamentTeam;
pub use super::trio_mid::Entity as TrioMid;
pub use super::trio_mid_hero::Entity as TrioMidHero;
pub use super::turtle_result::Entity as TurtleResult;
pub use super::user::Entity as User;

pub mod cascade;
pub mod games;
pub mod hero_ban;
pub mod hero_pick;
pub mod matches;
pub mod trio_mid;

use itertools::Itertools;

use crate::error::DomainError;

pub(crate) fn ensure_distinct_game_numbers<I>(game_numbers: I) -> Result<(), DomainError> where I: IntoIterator<Item = i32> {
    let duplicates = game_numbers.into_iter().duplicates().collect_vec();
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Invalid(format!("Duplicate game numbers: {}", duplicates.iter().join(", "))))
    }
}

pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_catalog;
mod m20240301_000002_create_matches;
mod m20240301_000003_create_draft_annotations;
mod m20240301_000004_create_game_annotations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_catalog::Migration),
            Box::new(m20240301_000002_create_matches::Migration),
            Box::new(m20240301_000003_create_draft_annotations::Migration),
            Box::new(m20240301_000004_create_game_annotations::Migration),
        ]
    }
}

pub use sea_orm_migration::prelude::*;

mod m20251012_083015_create_prompt_analyses_table;
mod m20251012_083512_create_index_at_prompt_analyses;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251012_083015_create_prompt_analyses_table::Migration),
            Box::new(m20251012_083512_create_index_at_prompt_analyses::Migration),
        ]
    }
}

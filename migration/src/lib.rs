pub use sea_orm_migration::prelude::*;

mod m20210801_000001_create_users;
mod m20210805_000001_create_drills;
mod m20210810_000001_create_questions;
mod m20210815_000001_add_drill_tags;
mod m20210819_000001_add_trainee_drill_unique;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20210801_000001_create_users::Migration),
            Box::new(m20210805_000001_create_drills::Migration),
            Box::new(m20210810_000001_create_questions::Migration),
            Box::new(m20210815_000001_add_drill_tags::Migration),
            Box::new(m20210819_000001_add_trainee_drill_unique::Migration),
        ]
    }
}

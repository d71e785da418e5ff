use sea_orm_migration::prelude::*;
pub use sea_orm_migration::prelude::{MigrationTrait, MigratorTrait};

mod m20250601_093000_create_federation_base;
mod m20250612_101500_add_tournaments;
mod m20250619_154500_add_availability_assignment;
mod m20250705_110200_add_zone_mailbox;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_093000_create_federation_base::Migration),
            Box::new(m20250612_101500_add_tournaments::Migration),
            Box::new(m20250619_154500_add_availability_assignment::Migration),
            Box::new(m20250705_110200_add_zone_mailbox::Migration),
        ]
    }
}

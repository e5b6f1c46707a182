//! Migration CLI for the articles schema.
//!
//! Reads `DATABASE_URL`; e.g. `migration up`, `migration status`, `migration down`.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}

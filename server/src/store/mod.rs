pub(crate) mod interface;
pub(crate) mod memory;

use crate::config::{Config, StoreInterface};
use ::anyhow::Result;

pub(crate) async fn make_store(
    config: &Config,
) -> Result<Box<dyn interface::BoardStore>> {
    match config.store_interface {
        StoreInterface::Postgres => {
            ::log::info!("Connecting to Postgres");

            let pool = ::sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .acquire_timeout(::std::time::Duration::from_secs(
                    config.database_acquire_timeout_seconds,
                ))
                .connect(&config.postgres_string)
                .await?;

            let mut transaction = pool.begin().await?;
            crate::postgres::prepare_database(&mut transaction).await?;
            transaction.commit().await?;

            Ok(Box::new(crate::postgres::PostgresStore::new(pool)))
        }
        StoreInterface::Memory => {
            ::log::warn!("Using in-memory store, boards will not persist");
            Ok(Box::new(memory::MemoryStore::new()))
        }
    }
}

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use users_api::config::Config;
use users_api::http;
use users_api::store::{MemoryUserStore, PgUserStore, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // This returns an error if the `.env` file doesn't exist, but that's not what we want
    // since we're not going to use a `.env` file if we deploy this application.
    dotenv::dotenv().ok();

    // Initialize the logger.
    env_logger::init();

    // Parse our configuration from the environment.
    // This will exit with a help message if something is wrong.
    let config = Config::parse();

    let store: Arc<dyn UserStore> = match config.database_url.as_deref() {
        Some(database_url) => {
            let store = PgUserStore::connect(&config, database_url)
                .await
                .context("could not connect to database_url")?;
            store
                .ping()
                .await
                .context("unable to reach the database")?;
            log::info!("database connection established successfully");

            store
                .sync_schema()
                .await
                .context("failed to synchronize the users table")?;
            log::info!("database synchronized");

            Arc::new(store)
        }
        None => {
            log::warn!("DATABASE_URL is not set, users are kept in memory only");
            Arc::new(MemoryUserStore::new())
        }
    };

    // Finally, we spin up our API.
    http::serve(config, store).await?;

    Ok(())
}

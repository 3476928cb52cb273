use std::sync::Arc;

use tally::{Config, Error, ItemStore, Server, api, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    logging::init(&config.log_filter);

    let store = Arc::new(ItemStore::seeded());
    info!(items = store.len(), "item store seeded");

    Server::bind(config.bind_addr)
        .serve(api::routes(store))
        .await
}

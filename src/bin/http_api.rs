//! JSON API serving the daily and random picks.

use log::info;
use songday::{
    DailySongSelector, RandomSongSelector,
    api::{AppState, router},
    clients::errors::Error,
    config::ConfigBuilder,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ConfigBuilder::new().build()?;
    let client = config.search_client()?;
    let app = router(AppState {
        daily: DailySongSelector::new(client.clone()),
        random: RandomSongSelector::new(client),
        default_count: config.count,
    });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(Error::from)?;
    info!("Listening on {}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

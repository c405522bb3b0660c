mod config;
mod models;
mod services;

use anyhow::{bail, Result};
use config::Config;
use services::algolia::AlgoliaClient;
use services::importer;
use services::youtube::YoutubeClient;

#[tokio::main]
async fn main() -> Result<()> {
    config::load_environment();
    config::init_logger();

    let mut args = std::env::args().skip(1);
    let channel_id = match (args.next(), args.next()) {
        (Some(channel_id), None) => channel_id,
        _ => bail!("Usage: yt-algolia-import <channel-id>"),
    };

    let config = Config::from_env()?;
    let youtube = YoutubeClient::new(config.developer_key);
    let algolia = AlgoliaClient::new(
        config.algolia_app_id,
        config.algolia_api_key,
        config.algolia_index_name,
    );

    importer::run(&youtube, &algolia, &channel_id).await
}

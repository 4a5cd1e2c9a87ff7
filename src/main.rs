use std::env;

use coursebot::core::catalog::Catalog;
use coursebot::core::coursebot::CourseBot;
use coursebot::core::firebase::FirebaseStore;
use coursebot::core::reddit::RedditClient;
use coursebot::error::coursebot::CourseBotError;
use coursebot::model::config::{Config, DEFAULT_CONFIG_PATH};
use coursebot::utils::logger::init_logging;
use log::info;

fn startup_error(err: CourseBotError) -> anyhow::Error {
    anyhow::anyhow!("{}", err)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var("COURSEBOT_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)?;
    let settings = config.bot;

    let catalog = Catalog::new(&settings.catalog_base, &settings.user_agent).map_err(startup_error)?;
    let reddit = RedditClient::new(
        config.reddit,
        &settings.subreddits,
        settings.comment_limit,
        &settings.user_agent,
    )
    .map_err(startup_error)?;
    let store = FirebaseStore::new(&config.firebase).map_err(startup_error)?;

    info!("Watching r/{} as {}", settings.subreddits, settings.name);
    let bot = CourseBot::new(catalog, reddit, store, settings);
    bot.run().await;

    Ok(())
}

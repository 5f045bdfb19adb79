use std::{net::TcpListener, sync::Arc};

use anyhow::Context;
use env_logger::Env;
use zscraper::{
    configuration::get_configuration,
    services::{AnswerService, Fetcher, OpenRouterClient},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)
        .with_context(|| format!("Failed to bind to {}", address))?;

    let fetcher = Fetcher::new(configuration.fetcher.robots_timeout())
        .context("Failed to build the page fetcher")?;
    let openrouter_client = OpenRouterClient::new(&configuration.openrouter);
    let answer_service = AnswerService::new(
        configuration.openrouter.api_key,
        Arc::new(openrouter_client),
    );

    log::info!("Listening on {}", address);
    run(listener, fetcher, answer_service, configuration.fetcher)?.await?;

    Ok(())
}

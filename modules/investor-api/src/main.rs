use std::sync::Arc;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::OpenAi;
use investor_api::{build_router, AppState};
use investor_common::Config;
use investor_research::{
    ExaClassifier, InvestorPipeline, KeyPool, OpenAiExtractor, PgInvestorStore, ResearchService,
};
use research_client::ResearchClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    info!("Connected to database");

    let http = reqwest::Client::new();

    let keys = KeyPool::new(config.exa_api_keys.clone(), config.exa_key_selection)?;
    info!(keys = keys.len(), selection = ?config.exa_key_selection, "Classification key pool ready");
    let classifier = match &config.exa_base_url {
        Some(url) => ExaClassifier::new(keys, http.clone()).with_base_url(url.as_str()),
        None => ExaClassifier::new(keys, http.clone()),
    };

    let researcher = ResearchService::new(
        ResearchClient::new(&config.research_api_url, config.research_api_key.clone())
            .with_client(http.clone()),
    );

    let openai = OpenAi::new(&config.openai_api_key, &config.openai_model).with_http_client(http);
    let openai = match &config.openai_base_url {
        Some(url) => openai.with_base_url(url.as_str()),
        None => openai,
    };
    let extractor = OpenAiExtractor::new(openai, config.extraction_max_tokens);

    let pipeline = InvestorPipeline::new(
        Arc::new(classifier),
        Arc::new(researcher),
        Arc::new(extractor),
        Arc::new(PgInvestorStore::new(pool)),
        config.skip_existing_default,
    );

    let app = build_router(AppState { pipeline });

    let addr = format!("{}:{}", config.host, config.port);
    info!("Investor research API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

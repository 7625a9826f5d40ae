use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use loop_backend::config::Config;
use loop_backend::routes;
use loop_backend::services::concierge::OpenAiClient;
use loop_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let llm = Arc::new(OpenAiClient::new(&config.openai_api_key, &config.openai_model));
    let state = Arc::new(AppState::new(llm));

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Loop site backend running at http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

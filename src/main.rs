mod config;
mod gate;
mod routes;
mod services;
mod state;
mod token;

use crate::services::api::ApiClient;
use crate::token::TokenVerifier;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::GatewayConfig::from_env().expect("invalid gateway configuration");

    let api = ApiClient::new(&config.api_base_url).expect("http client init failed");
    let verifier = TokenVerifier::new(&config.jwt_secret);
    let state = state::AppState::new(api, verifier);

    let app = routes::app(state, &config.site_dir);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, api = %config.api_base_url, "franhub gateway listening");
    axum::serve(listener, app).await.expect("server failed");
}

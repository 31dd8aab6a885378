//! Demo provider backend.
//!
//! Serves the endpoints the hello consumer maps to, under the `/provider`
//! segment the dispatcher prefixes to every call.

use std::net::SocketAddr;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hello-provider")]
#[command(about = "Demo backend for the hello consumer", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "127.0.0.1:8089")]
    listen: SocketAddr,
}

#[derive(Deserialize)]
struct HelloParams {
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct EchoMessage {
    message: String,
}

async fn say_hello(Query(params): Query<HelloParams>) -> String {
    format!("Hello: {}!", params.name)
}

async fn greeting(Path(lang): Path<String>) -> Result<String, StatusCode> {
    match lang.as_str() {
        "en" => Ok("Hello".to_string()),
        "fr" => Ok("Bonjour".to_string()),
        "zh" => Ok("你好".to_string()),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn echo(Json(message): Json<EchoMessage>) -> Json<EchoMessage> {
    Json(message)
}

fn app() -> Router {
    let provider = Router::new()
        .route("/sayHello", get(say_hello))
        .route("/greetings/{lang}", get(greeting))
        .route("/echo", post(echo));

    Router::new()
        .nest("/provider", provider)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hello_provider=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    tracing::info!(address = %listener.local_addr()?, "Hello provider listening");

    axum::serve(listener, app()).await?;
    Ok(())
}

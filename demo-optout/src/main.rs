use std::sync::LazyLock;

use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use optout::{User, UserStore};
use optout_axum::{OPTOUT_ROUTE_PREFIX, optout_router};

mod handlers;
mod server;

use crate::{handlers::index, server::spawn_http_server};

/// Base URL used when printing unsubscribe links
pub(crate) static OPTOUT_PUBLIC_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("OPTOUT_PUBLIC_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "http://localhost:3001".to_string())
});

pub(crate) const DEMO_USER_ID: &str = "demo-user";

static PORT: LazyLock<u16> = LazyLock::new(|| {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001)
});

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "demo_optout=debug,optout=debug,optout_axum=debug,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create tables and check the token secret before accepting requests
    optout_axum::init().await?;

    // Account provisioning is external in production; the demo seeds one user
    UserStore::upsert_user(User::new(
        DEMO_USER_ID.to_string(),
        "demo@example.com".to_string(),
        "Demo User".to_string(),
    ))
    .await?;

    let link = handlers::unsubscribe_link(DEMO_USER_ID, None)?;
    tracing::info!("Sample unsubscribe link: {}", link);

    let app = Router::new()
        .route("/", get(index))
        .nest(OPTOUT_ROUTE_PREFIX.as_str(), optout_router());

    spawn_http_server(*PORT, app).await?;
    Ok(())
}

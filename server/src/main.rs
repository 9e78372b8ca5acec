use error_stack::ResultExt;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use kernel::KernelError;

use crate::config::Config;
use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::route::{BookRouter, CatalogRouter, UserRouter};

mod config;
mod controller;
mod error;
mod handler;
mod route;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,application=debug,server=debug,sqlx=warn".into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let config = Config::from_env()?;
    let app = AppModule::new(&config).await?;
    tracing::info!("{:?} repository ready", app.kind());

    let tcp = TcpListener::bind(config.bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to listen on {}", config.bind))?;
    tracing::info!("listening on {}", config.bind);

    axum::serve(tcp, router(app).into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}

fn router(app: AppModule) -> axum::Router {
    axum::Router::new()
        .route_book()
        .route_catalog()
        .route_user()
        .layer(CorsLayer::new())
        .with_state(app)
}

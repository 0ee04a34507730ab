use notify_infra::{Settings, Stores};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    notify_observability::init();

    let settings = Settings::from_env()?;
    if settings.cors_domain.is_none() {
        tracing::warn!("CORS_DOMAIN not set; cross-origin headers disabled");
    }

    let stores = Stores::from_settings(&settings).await?;
    let app = notify_api::app::build_app(&settings, stores)?;

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

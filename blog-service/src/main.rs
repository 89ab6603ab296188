use blog_service::{config::BlogConfig, Application};
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BlogConfig::load()?;

    init_tracing(
        "blog-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    )?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    shutdown_tracing();
    Ok(())
}

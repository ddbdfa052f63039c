use vaultclip::bootstrap::{self, tracing::init_tracing_subscriber, AppPaths, KeyStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = AppPaths::resolve()?;
    init_tracing_subscriber(&paths.logs_dir)?;

    let config = bootstrap::load_config(&paths.config_file)?;
    let deps = bootstrap::wire_dependencies(&config, KeyStorage::from_env())?;

    bootstrap::run_app(deps).await
}

use biztime::config::{AppConfig, Environment};
use biztime::observability::init_tracing;
use biztime::server::ServerBuilder;
use biztime::storage::PostgresStore;
use biztime::storage::postgres::{connect, ensure_schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    let environment = Environment::from_env();
    tracing::info!(?environment, "starting biztime");

    let pool = connect(config.database.url_for(environment), &config.database).await?;
    if config.database.bootstrap_schema {
        ensure_schema(&pool).await?;
    }

    let store = PostgresStore::new(pool.clone());
    let served = ServerBuilder::new()
        .with_store(store)
        .serve(&config.server.bind_address())
        .await;

    pool.close().await;
    tracing::info!("database pool closed");
    served
}

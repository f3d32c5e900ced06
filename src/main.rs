use academy_engine::api::routes::create_routes;
use academy_engine::config::{AppConfig, DatabaseConfig, DatabaseSeeder};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    info!("Starting in {} mode", config.environment);

    let db = db_config.create_pool().await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    if config.seed_demo_data {
        DatabaseSeeder::new(db.clone()).seed_all().await?;
    }

    let app = create_routes(db, &config.jwt_secret);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!("Academy engine listening on http://{}", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}

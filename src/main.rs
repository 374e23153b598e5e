use hotel_booking_service::build_rocket;
use hotel_booking_service::config::Config;
use hotel_booking_service::db::Database;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let filter = EnvFilter::try_new(&config.log.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Connect to the database
    let database = Database::new(&config.database).await?;
    if config.database.init_schema {
        database.init_schema().await?;
        tracing::info!("booking schema initialized");
    }

    tracing::info!(
        service = %config.service_name,
        address = %config.server.address,
        port = config.server.port,
        "starting"
    );
    if let Err(e) = build_rocket(&config, database).launch().await {
        // Formatting the error marks it handled, so dropping it does not panic
        let message = e.to_string();
        tracing::error!(error = %message, "server stopped");
        return Err(message.into());
    }

    Ok(())
}

//! # Adkar Reminder Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database, wires
//! the scheduling service to its collaborators, and runs the Telegram bot
//! alongside the health server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adkar_reminder_bot::bot::handlers::BotHandler;
use adkar_reminder_bot::config::Config;
use adkar_reminder_bot::database::connection::DatabaseManager;
use adkar_reminder_bot::database::settings_store::SqliteSettingsStore;
use adkar_reminder_bot::scheduler::job_store::JobStore;
use adkar_reminder_bot::scheduler::service::SchedulingService;
use adkar_reminder_bot::services::health::HealthService;
use adkar_reminder_bot::services::notifier::TelegramNotifier;
use adkar_reminder_bot::services::prayer_times::{
    AladhanClient, MuisCsvSource, PrayerTimeSource, SourceChain,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adkar_reminder_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Adkar Reminder Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}, Default location: {}, {}",
        config.database_url, config.http_port, config.default_city, config.default_country
    );

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    // Initialize bot
    let bot = Bot::new(&config.telegram_bot_token);

    // Prayer time sources: MUIS CSV first when configured, API fallback
    let aladhan = Arc::new(AladhanClient::new(
        config.prayer_api_url.clone(),
        config.prayer_method,
    ));
    let timings: Arc<dyn PrayerTimeSource> = match &config.muis_csv_path {
        Some(path) => {
            info!("Using MUIS timetable CSV at {} with API fallback", path);
            Arc::new(SourceChain::new(vec![
                Arc::new(MuisCsvSource::new(path.clone())),
                aladhan,
            ]))
        }
        None => aladhan,
    };

    // Wire the scheduling service to its collaborators
    let job_store = Arc::new(JobStore::new().await?);
    let settings_store = Arc::new(SqliteSettingsStore::new(
        db_arc.as_ref().clone(),
        config.default_city.clone(),
        config.default_country.clone(),
    ));
    let notifier = Arc::new(TelegramNotifier::new(bot.clone()));

    let service = Arc::new(SchedulingService::new(
        Arc::clone(&job_store),
        settings_store,
        Arc::clone(&timings),
        notifier,
        config.timezone(),
    ));

    // Schedule everyone against today's timetable, then start firing
    service.reschedule_all().await;
    service.start().await?;
    info!("Scheduling service started successfully");

    let handler = BotHandler::new(
        db_arc.as_ref().clone(),
        Arc::clone(&service),
        timings,
        config.default_city.clone(),
        config.default_country.clone(),
        config.timezone(),
    );

    // Health server
    let health_service = HealthService::new(Arc::clone(&db_arc), job_store);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;
    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        let storage: Arc<InMemStorage<()>> = InMemStorage::new().into();
        Dispatcher::builder(bot, handler.schema())
            .dependencies(dptree::deps![storage])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    // Stop the job runner on shutdown
    if let Err(e) = service.stop().await {
        tracing::warn!("Error stopping scheduling service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}

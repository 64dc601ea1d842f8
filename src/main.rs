use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use feed_aggregator::controllers::feed::FeedController;
use feed_aggregator::domain::feed::FeedService;
use feed_aggregator::domain::ingestion::{IngestionService, Scheduler};
use feed_aggregator::domain::post::PostService;
use feed_aggregator::infrastructure::config::{Config, LogFormat};
use feed_aggregator::infrastructure::db::{check_connection, create_pool, run_migrations};
use feed_aggregator::infrastructure::http::start_http_server;
use feed_aggregator::infrastructure::repositories::{
    HttpFeedFetcher, PgFeedRepository, PgPostRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting feed aggregator on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let max_connections = config.scraper_concurrency as u32 + 5;
    let pool = create_pool(&config.database_url, max_connections).await?;
    tracing::info!(max_connections, "Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories and the feed fetcher
    let feed_repo = Arc::new(PgFeedRepository::new(pool.clone()));
    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));
    let fetcher = Arc::new(HttpFeedFetcher::new(config.fetch_timeout())?);
    tracing::info!(timeout = ?config.fetch_timeout(), "Feed fetcher initialized");

    // 2. Instantiate services
    let feed_service = Arc::new(FeedService::new(feed_repo.clone()));
    let post_service = Arc::new(PostService::new(post_repo.clone()));
    let ingestion_service =
        Arc::new(IngestionService::new(feed_repo.clone(), post_repo.clone()).with_fetcher(fetcher));

    // 3. Start the background scraper
    let scheduler = Scheduler::new(
        feed_service.clone(),
        ingestion_service.clone(),
        config.scheduler_config(),
    )
    .spawn();

    // 4. Instantiate controllers
    let feed_controller = Arc::new(FeedController::new(
        feed_service,
        ingestion_service,
        post_service,
    ));

    // Start HTTP server with all routes
    let served = start_http_server(config, pool, feed_controller).await;

    if let Err(err) = scheduler.stop().await {
        tracing::error!(error = %err, "RSS scraper task failed");
    }

    served
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "feed_aggregator=debug,tower_http=debug"
    } else {
        "feed_aggregator=info,tower_http=info"
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

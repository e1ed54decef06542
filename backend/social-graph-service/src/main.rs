use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use social_graph_service::cache::{CacheStore, RedisCacheStore};
use social_graph_service::config::Config;
use social_graph_service::handlers::{self, AppState};
use social_graph_service::repository::{GraphRepository, PostgresGraphRepository};
use social_graph_service::services::{MutationService, RecommendationEngine, TimelineService};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct HealthState {
    graph: Arc<dyn GraphRepository>,
    redis: RedisCacheStore,
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "social-graph-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn readiness(state: web::Data<HealthState>) -> HttpResponse {
    let postgres_ok = state.graph.health_check().await.is_ok();
    let redis_ok = state.redis.ping().await.is_ok();

    let body = serde_json::json!({
        "ready": postgres_ok && redis_ok,
        "checks": {
            "postgres": if postgres_ok { "healthy" } else { "unhealthy" },
            "redis": if redis_ok { "healthy" } else { "unhealthy" },
        },
    });

    if postgres_ok && redis_ok {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_graph_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting social-graph-service");

    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    info!("Connected to PostgreSQL");

    let redis_cache = RedisCacheStore::connect(&config.redis.url)
        .await
        .context("Failed to connect to Redis")?;

    info!("Connected to Redis");

    let graph: Arc<dyn GraphRepository> = Arc::new(PostgresGraphRepository::new(pool));
    let cache: Arc<dyn CacheStore> = Arc::new(redis_cache.clone());

    let state = web::Data::new(AppState {
        graph: Arc::clone(&graph),
        mutations: MutationService::new(
            Arc::clone(&graph),
            cache.clone(),
            Duration::from_secs(config.cache.post_cooldown),
        ),
        recommendations: RecommendationEngine::new(
            Arc::clone(&graph),
            cache.clone(),
            Duration::from_secs(config.cache.recommendation_ttl),
        ),
        timeline: TimelineService::new(
            Arc::clone(&graph),
            cache.clone(),
            Duration::from_secs(config.cache.feed_ttl),
        ),
    });

    let health_state = web::Data::new(HealthState {
        graph: Arc::clone(&graph),
        redis: redis_cache,
    });

    let bind_addr = (config.app.host.clone(), config.app.http_port);
    info!("Listening on {}:{}", config.app.host, config.app.http_port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .app_data(health_state.clone())
            .route("/health", web::get().to(health))
            .route("/ready", web::get().to(readiness))
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}

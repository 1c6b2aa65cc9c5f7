mod account;
mod config;
mod session;
mod shared;

use account::repository::PostgresAccountRepository;
use account::service::AccountService;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use config::AppConfig;
use session::TokenConfig;
use shared::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load .env if present; otherwise rely on the process environment
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    info!("Starting user account service");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    info!("Successfully connected to the database");

    // Create shared application state with dependency injection
    let token_config = TokenConfig::new(config.jwt_secret.clone());
    let account_repository = Arc::new(PostgresAccountRepository::new(pool));
    let account_service = Arc::new(AccountService::new(
        account_repository,
        token_config.clone(),
    ));
    let app_state = AppState::new(account_service, token_config);

    // build our application; /me sits behind the bearer-token middleware
    let app = Router::new()
        .route("/me", get(account::me))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            session::jwt_auth,
        ))
        .route("/health", get(|| async { "OK" }))
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("User service listening on http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod services;
mod validation;

/// Process-wide state injected into handlers: the connection pool and the
/// credential service, both built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub auth: Arc<auth::AuthService>,
}

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env();
    tracing::info!("Starting contatos-api in {:?} mode", config.environment);

    let auth_service = auth::AuthService::new(&config.security)
        .unwrap_or_else(|e| panic!("auth configuration: {}", e));
    let pool = database::manager::connect(&config.database)
        .unwrap_or_else(|e| panic!("database configuration: {}", e));

    let app = app(AppState {
        pool,
        auth: Arc::new(auth_service),
    });

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3001);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("contatos-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_routes())
        // Protected behind the token gate
        .merge(contact_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/api/register", post(public::register))
        .route("/api/login", post(public::login))
}

fn contact_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::contacts;

    Router::new()
        .route("/api/contacts", post(contacts::create))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::token_auth_middleware,
        ))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "contatos-api",
        "version": version,
        "description": "Contact registration API with CPF validation",
        "endpoints": {
            "register": "POST /api/register (public)",
            "login": "POST /api/login (public)",
            "contacts": "POST /api/contacts (token required)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::manager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}

// app.rs - Router assembly and shared handler state

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::TokenValidator;
use crate::config::AppConfig;
use crate::handlers::{self, students};
use crate::middleware::require_auth;
use crate::services::StudentService;

/// Everything a handler can reach. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub validator: Arc<TokenValidator>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(students: StudentService, validator: TokenValidator, config: AppConfig) -> Self {
        Self {
            students,
            validator: Arc::new(validator),
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let api = &state.config.api;
    let security = &state.config.security;

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .merge(student_routes(&state))
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes));

    if security.enable_cors {
        router = router.layer(cors_layer(&security.cors_origins));
    }

    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn student_routes(state: &AppState) -> Router<AppState> {
    // Only creation requires a bearer token
    let create = post(students::student_create).route_layer(middleware::from_fn_with_state(
        state.validator.clone(),
        require_auth,
    ));

    Router::new()
        .route("/students", get(students::student_list).merge(create))
        .route(
            "/students/:id",
            get(students::student_show)
                .put(students::student_update)
                .delete(students::student_delete),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

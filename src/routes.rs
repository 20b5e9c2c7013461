use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::handlers::{protected, public};
use crate::middleware::{jwt_auth_middleware, validate_user_middleware};
use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let config = state.config().clone();

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected
        .merge(protected_routes(state.clone()))
        .with_state(state)
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(config.request_timeout())),
        );

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }

    router
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/category", post(protected::category::create))
        .route("/category/:cat_id/todos", get(protected::category::todos))
        .route(
            "/todo/:todo_id/category/:cat_id",
            post(protected::todo::attach_category).delete(protected::todo::detach_category),
        )
        // Layers run outermost-last: the JWT check happens before the user lookup.
        .route_layer(from_fn_with_state(state.clone(), validate_user_middleware))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

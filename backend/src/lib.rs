pub mod authz;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod types;
pub mod utils;
pub mod validation;

use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Builds the full application router.
///
/// Route groups: public auth routes behind the per-IP limiter, the
/// session-gated protected routes, and the store-backed per-session
/// limiter wrapped around the mutating blog routes only.
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route_layer(middleware::create_auth_rate_limiter(&state.config));

    let blog_mutations = Router::new()
        .route("/blog/create-blog", post(handlers::blog::create_blog))
        .route("/blog/edit-blog", post(handlers::blog::edit_blog))
        .route("/blog/delete-blog", post(handlers::blog::delete_blog))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session_rate_limit,
        ));

    let protected_routes = Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/blog/get-blogs", get(handlers::blog::get_blogs))
        .route("/blog/my-blogs", get(handlers::blog::my_blogs))
        .route("/follow/follow-user", post(handlers::follow::follow_user))
        .route("/follow/unfollow-user", post(handlers::follow::unfollow_user))
        .route("/follow/following", get(handlers::follow::following))
        .merge(blog_mutations)
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session_gate,
        ));

    Router::new()
        .route("/", get(handlers::health))
        .merge(auth_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod avatar;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod store;

pub use state::AppState;

/// Assemble the full router. Public routes (registration, login, profile
/// browsing) sit alongside token-gated groups that share the auth
/// middleware via `route_layer`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(user_routes())
        .merge(auth_routes(state.clone()))
        .merge(profile_routes(state.clone()))
        .merge(post_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new().route("/api/users", post(users::register))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    use handlers::auth;

    let protected = Router::new()
        .route("/api/auth", get(auth::me))
        .route_layer(axum_middleware::from_fn_with_state(state, middleware::token_auth));

    Router::new()
        .route("/api/auth", post(auth::login))
        .merge(protected)
}

fn profile_routes(state: AppState) -> Router<AppState> {
    use handlers::profile;

    let protected = Router::new()
        .route("/api/profile", post(profile::upsert).delete(profile::delete_account))
        .route("/api/profile/me", get(profile::me))
        .route("/api/profile/experience", put(profile::add_experience))
        .route(
            "/api/profile/experience/:exp_id",
            put(profile::edit_experience).delete(profile::delete_experience),
        )
        .route("/api/profile/education", put(profile::add_education))
        .route("/api/profile/education/:edu_id", delete(profile::delete_education))
        .route_layer(axum_middleware::from_fn_with_state(state, middleware::token_auth));

    Router::new()
        .route("/api/profile", get(profile::list))
        .route("/api/profile/user/:user_id", get(profile::by_user))
        .merge(protected)
}

fn post_routes(state: AppState) -> Router<AppState> {
    use handlers::posts;

    Router::new()
        .route("/api/posts", post(posts::create).get(posts::list))
        .route("/api/posts/:id", get(posts::get_by_id).delete(posts::delete))
        .route("/api/posts/like/:post_id", put(posts::like))
        .route("/api/posts/comment/:post_id", post(posts::comment))
        .route(
            "/api/posts/comment/:post_id/:comment_id",
            delete(posts::delete_comment),
        )
        .route_layer(axum_middleware::from_fn_with_state(state, middleware::token_auth))
}

async fn root() -> Json<Value> {
    Json(json!({ "msg": "API Running." }))
}

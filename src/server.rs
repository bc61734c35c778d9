use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::api;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::reviews::ReviewStore;
use crate::trailer::TrailerSearch;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
    pub reviews: Arc<ReviewStore>,
    pub trailers: Arc<TrailerSearch>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Catalog,
        reviews: Arc<ReviewStore>,
        trailers: Arc<TrailerSearch>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            reviews,
            trailers,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let movie_routes = Router::new()
        .route("/search", get(api::search))
        .route("/movie/:id", get(api::get_movie))
        .route("/movies/library", get(api::library))
        .route("/movies/get-list", post(api::get_list));

    let recommend_routes = Router::new()
        .route("/recommend/genre", get(api::recommend_genre))
        .route("/recommend/actors", get(api::recommend_actors))
        .route("/recommend/director", get(api::recommend_director))
        .route("/recommend/timeline", get(api::recommend_timeline));

    let mut router = Router::new()
        .merge(movie_routes)
        .merge(recommend_routes)
        .route("/reviews", get(api::list_reviews).post(api::add_review))
        .route("/youtube/search", get(api::trailer_search))
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        router = router.fallback_service(ServeDir::new(appdir));
    }

    let app = router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Path rewriting must happen before routing, so it wraps the finished app.
    Router::new()
        .fallback_service(app)
        .layer(axum::middleware::from_fn(crate::middleware::normalize_path))
}

async fn fallback_handler(req: Request) -> impl IntoResponse {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}

//! # Microblog HTTP Server Module
//!
//! Combines all endpoint routers into a unified Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/tweets*` - Tweets and likes
//! - `/api/users*` - Profiles and follows
//! - `/api/medias*` - Media upload and download

pub mod config;
pub mod errors;
pub mod extract;
pub mod health_routes;
pub mod media_routes;
pub mod response;
pub mod server;
pub mod state;
pub mod tweet_routes;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use extract::API_KEY_HEADER;
pub use server::HttpServer;
pub use state::AppState;

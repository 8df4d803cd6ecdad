//! HTTP surface for the leaderboard
//!
//! `POST /api/leaderboard` submits, `GET /api/leaderboard` lists the top
//! entries, `GET /health` reports status.

mod config;
mod handlers;
mod response;

pub use config::{DEFAULT_BIND_ADDR, DEFAULT_JSON_LIMIT_BYTES, ServerConfig};

use std::sync::Arc;

use actix_web::{error::InternalError, http::StatusCode, web};

use crate::leaderboard::{InMemoryLeaderboard, LeaderboardRepository};
use handlers::{health, list_scores, submit_score};
use response::{MISSING_FIELDS, json_error};

#[derive(Clone)]
pub struct AppState {
    pub leaderboard: Arc<dyn LeaderboardRepository>,
    pub top_n: usize,
    pub max_entries: usize,
}

impl AppState {
    /// In-memory leaderboard sized from the config
    pub fn in_memory(config: &ServerConfig) -> Self {
        Self {
            leaderboard: Arc::new(InMemoryLeaderboard::new(config.max_entries)),
            top_n: config.top_n,
            max_entries: config.max_entries,
        }
    }
}

/// JSON extractor config: unreadable bodies are a client error
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            log::debug!("rejected request body: {err}");
            InternalError::from_response(err, json_error(StatusCode::BAD_REQUEST, MISSING_FIELDS))
                .into()
        })
}

/// Register the leaderboard routes
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/leaderboard", web::post().to(submit_score))
        .route("/api/leaderboard", web::get().to(list_scores));
}

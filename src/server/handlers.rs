use actix_web::{
    HttpResponse, Responder,
    http::StatusCode,
    web::{Data, Json},
};
use chrono::Utc;
use serde::Serialize;

use super::AppState;
use super::response::{MISSING_FIELDS, SERVER_ERROR, json_error};
use crate::leaderboard::{LeaderboardEntry, LeaderboardError, Submission};

#[derive(Debug, Serialize)]
pub(crate) struct SubmitResponse {
    success: bool,
    rank: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListResponse {
    leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    service: &'static str,
    entries: usize,
    max_entries: usize,
    top_n: usize,
}

pub(crate) async fn submit_score(state: Data<AppState>, body: Json<Submission>) -> impl Responder {
    let submission = body.into_inner();
    let fid = submission.fid;
    match state.leaderboard.submit(submission, Utc::now()) {
        Ok(outcome) => {
            log::info!("score accepted for fid {:?}, rank {:?}", fid, outcome.rank);
            HttpResponse::Ok().json(SubmitResponse {
                success: true,
                rank: outcome.rank,
            })
        }
        Err(LeaderboardError::MissingField(field)) => {
            log::debug!("submission rejected: missing {}", field);
            json_error(StatusCode::BAD_REQUEST, MISSING_FIELDS)
        }
        Err(e) => {
            log::error!("submit failed: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
        }
    }
}

pub(crate) async fn list_scores(state: Data<AppState>) -> impl Responder {
    match state.leaderboard.top(state.top_n) {
        Ok(leaderboard) => HttpResponse::Ok().json(ListResponse { leaderboard }),
        Err(e) => {
            log::error!("list failed: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
        }
    }
}

pub(crate) async fn health(state: Data<AppState>) -> impl Responder {
    let entries = match state.leaderboard.count() {
        Ok(count) => count,
        Err(e) => {
            log::error!("health check failed: {e}");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR);
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        service: "benji-leaderboard",
        entries,
        max_entries: state.max_entries,
        top_n: state.top_n,
    })
}

use actix_web::{HttpResponse, http::StatusCode};

pub(crate) const MISSING_FIELDS: &str = "Missing required fields";
pub(crate) const SERVER_ERROR: &str = "Server error";

pub(crate) fn json_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": message.into(),
    }))
}

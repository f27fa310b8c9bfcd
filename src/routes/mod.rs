use actix_web::HttpResponse;
use log::error;
use serde_json::json;

use crate::services::ServiceError;

pub mod api;

/// Maps a service failure onto an HTTP response with a JSON error body.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Unavailable => HttpResponse::ServiceUnavailable().json(body),
        ServiceError::Source(source) => {
            error!("Remote catalog failure: {source}");
            HttpResponse::BadGateway().json(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;
    use crate::source::SourceError;

    #[test]
    fn service_errors_map_to_status_codes() {
        assert_eq!(
            error_response(&ServiceError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(&ServiceError::Source(SourceError::Status(500))).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_response(&ServiceError::Unavailable).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}

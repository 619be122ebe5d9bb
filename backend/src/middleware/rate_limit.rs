//! Rate limiting middleware.
//!
//! Two layers: a store-backed per-session limiter for mutating blog
//! routes (one admitted request per window), and a governor-based
//! per-IP limiter in front of the unauthenticated auth routes.

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Response, StatusCode};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response as AxumResponse,
};
use chrono::Utc;
use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor, GovernorError,
    GovernorLayer,
};

use crate::config::Config;
use crate::error::AppError;
use crate::models::session::CurrentUser;
use crate::services::rate_limiter::{self, Decision};
use crate::state::AppState;

/// Per-session admission for mutating blog routes. Runs after the
/// session gate, so the request extensions carry the session context.
pub async fn session_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<AxumResponse, AppError> {
    let current = request
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or_else(|| {
            AppError::InternalServerError(anyhow::anyhow!(
                "session rate limit reached without session context"
            ))
        })?;

    let decision = rate_limiter::admit(
        &state.pool,
        current.session_id,
        Utc::now().timestamp_millis(),
        state.config.rate_limit_window_ms,
    )
    .await
    .map_err(|err| AppError::InternalServerError(err.into()))?;

    match decision {
        Decision::Allowed => Ok(next.run(request).await),
        Decision::Rejected { retry_after_ms } => {
            tracing::warn!(session_id = %current.session_id, "Session rate limit exceeded");
            Err(AppError::TooManyRequests(rate_limiter::retry_after_seconds(
                retry_after_ms,
            )))
        }
    }
}

/// Per-IP limiter layered over login/register to slow credential
/// stuffing. Distinct from the per-session limiter above.
pub fn create_auth_rate_limiter(
    config: &Config,
) -> GovernorLayer<PeerIpKeyExtractor, StateInformationMiddleware, Body> {
    let burst_size = config.rate_limit_ip_max_requests.max(1);
    let window_seconds = config.rate_limit_ip_window_seconds.max(1);
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(Duration::from_secs(window_seconds))
            .burst_size(burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .use_headers()
            .finish()
            .expect("rate limiter config should be valid"),
    );

    GovernorLayer::new(governor_conf).error_handler(rate_limit_error_handler)
}

fn rate_limit_error_handler(error: GovernorError) -> Response<Body> {
    match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::warn!(wait_time, "IP rate limit exceeded");
            let mut response = json_error_response(
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limit_exceeded",
                "Too many requests. Please try again later.",
                Some(wait_time),
            );
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => json_error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "rate_limit_key_error",
            "Unable to determine request identity.",
            None,
        ),
        GovernorError::Other { code, msg, headers } => {
            let mut response = json_error_response(
                code,
                "rate_limit_error",
                &msg.unwrap_or_else(|| "Rate limit error".to_string()),
                None,
            );
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
    }
}

fn json_error_response(
    status: StatusCode,
    error: &str,
    message: &str,
    retry_after: Option<u64>,
) -> Response<Body> {
    let mut body = serde_json::json!({
        "error": error,
        "message": message,
    });
    if let Some(retry_after) = retry_after {
        body["retry_after"] = retry_after.into();
    }

    let mut response = Response::new(Body::from(body.to_string()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(retry_after) = retry_after {
        if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert("retry-after", value);
        }
    }
    response
}

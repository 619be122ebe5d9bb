//! Session gate for protected routes.
//!
//! A request passes iff its `sid` cookie resolves to a stored session
//! that is authenticated and unexpired. Anything else short-circuits
//! with 401 before the handler runs. Logout deletes the session row,
//! so a logged-out sid fails here exactly like a sid that was never
//! issued.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::{
    error::AppError,
    models::session::CurrentUser,
    repositories::session as session_repo,
    state::AppState,
    types::SessionId,
    utils::cookies::{extract_cookie_value, SESSION_COOKIE_NAME},
};

pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = extract_session_id(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Session required, please login".to_string()))?;

    let session = session_repo::find_session(&state.pool, session_id)
        .await
        .map_err(|err| AppError::InternalServerError(err.into()))?
        .ok_or_else(|| AppError::Unauthorized("Session required, please login".to_string()))?;

    if !session.is_authenticated || session.expires_at <= Utc::now() {
        return Err(AppError::Unauthorized(
            "Session required, please login".to_string(),
        ));
    }

    request.extensions_mut().insert(CurrentUser::from(&session));
    Ok(next.run(request).await)
}

fn extract_session_id(headers: &axum::http::HeaderMap) -> Option<SessionId> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_cookie_value(raw, SESSION_COOKIE_NAME))
        .and_then(|sid| sid.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn extract_session_id_parses_sid_cookie() {
        let sid = SessionId::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("other=1; sid={}", sid)).unwrap(),
        );
        assert_eq!(extract_session_id(&headers), Some(sid));
    }

    #[test]
    fn extract_session_id_rejects_malformed_sid() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sid=not-a-uuid"));
        assert_eq!(extract_session_id(&headers), None);
    }

    #[test]
    fn extract_session_id_requires_cookie_header() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_id(&headers), None);
    }
}

//! Rate limiting middleware

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use std::net::SocketAddr;

use crate::{constants, error::AppError, state::AppState};

/// Rate limit middleware
///
/// Per-IP counters in redis, bucketed by endpoint group. Auth endpoints get
/// the tightest budget; chat posting sits between auth and the general API.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ip = addr.ip().to_string();
    let path = request.uri().path().to_string();

    let (limit, window) = get_rate_limit(&path);
    let key = format!("rate_limit:{}:{}", ip, path_bucket(&path));
    let mut redis = state.redis();

    let count: i64 = redis.incr(&key, 1).await.unwrap_or(0);

    if count == 1 {
        // Window starts with the first request
        let _: () = redis.expire(&key, window).await.unwrap_or(());
    }

    if count > limit {
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

/// Get rate limit for a path
fn get_rate_limit(path: &str) -> (i64, i64) {
    if path.starts_with("/api/v1/auth") {
        (
            constants::rate_limits::AUTH_MAX_REQUESTS,
            constants::rate_limits::AUTH_WINDOW_SECS,
        )
    } else if path.ends_with("/chat") {
        (
            constants::rate_limits::CHAT_MAX_REQUESTS,
            constants::rate_limits::CHAT_WINDOW_SECS,
        )
    } else {
        (
            constants::rate_limits::GENERAL_MAX_REQUESTS,
            constants::rate_limits::GENERAL_WINDOW_SECS,
        )
    }
}

/// Get bucket for path (for grouping similar endpoints)
fn path_bucket(path: &str) -> &str {
    if path.starts_with("/api/v1/auth") {
        "auth"
    } else if path.ends_with("/chat") {
        "chat"
    } else if path.starts_with("/api/v1/tournaments") {
        "tournaments"
    } else if path.starts_with("/api/v1/users") {
        "users"
    } else {
        "general"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_buckets() {
        assert_eq!(path_bucket("/api/v1/auth/login"), "auth");
        assert_eq!(path_bucket("/api/v1/tournaments/abc/chat"), "chat");
        assert_eq!(path_bucket("/api/v1/tournaments"), "tournaments");
        assert_eq!(path_bucket("/api/v1/users"), "users");
        assert_eq!(path_bucket("/healthz"), "general");
    }

    #[test]
    fn test_auth_limit_is_tightest() {
        let (auth_limit, _) = get_rate_limit("/api/v1/auth/login");
        let (chat_limit, _) = get_rate_limit("/api/v1/tournaments/abc/chat");
        let (general_limit, _) = get_rate_limit("/api/v1/tournaments");
        assert!(auth_limit < chat_limit);
        assert!(chat_limit < general_limit);
    }
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

const BOT_PATTERNS: &[&str] = &[
    "bot", "crawl", "spider", "scrape", "curl", "wget", "python-requests", "httpie", "go-http",
];

/// Whether a user agent looks like a scripted client.
fn is_bot(user_agent: &str) -> bool {
    let ua_lower = user_agent.to_lowercase();
    BOT_PATTERNS.iter().any(|pattern| ua_lower.contains(pattern))
}

/// Refuses login, registration and unlock requests from obvious scripts.
pub async fn bot_guard(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    match user_agent {
        None => {
            tracing::warn!(path = %req.uri().path(), "Blocked request without User-Agent");
            Err(StatusCode::FORBIDDEN)
        }
        Some(ua) if is_bot(&ua) => {
            tracing::warn!(path = %req.uri().path(), "Blocked bot request: {ua}");
            Err(StatusCode::FORBIDDEN)
        }
        Some(_) => Ok(next.run(req).await),
    }
}

#[cfg(test)]
mod tests {
    use axum::middleware::from_fn;
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/login", post(|| async { "ok" }))
            .layer(from_fn(bot_guard))
    }

    async fn status_for(user_agent: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().method("POST").uri("/login");
        if let Some(ua) = user_agent {
            builder = builder.header("user-agent", ua);
        }
        let req = builder.body(Body::empty()).unwrap();
        app().oneshot(req).await.unwrap().status()
    }

    #[test]
    fn detects_scripted_clients() {
        assert!(is_bot("curl/8.5.0"));
        assert!(is_bot("Googlebot/2.1"));
        assert!(is_bot("python-requests/2.31"));
        assert!(!is_bot("Mozilla/5.0 (Linux; Android 14)"));
        assert!(!is_bot("palmares-client/0.1"));
    }

    #[tokio::test]
    async fn browser_passes() {
        assert_eq!(status_for(Some("Mozilla/5.0")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_or_bot_user_agent_is_forbidden() {
        assert_eq!(status_for(None).await, StatusCode::FORBIDDEN);
        assert_eq!(status_for(Some("Wget/1.21")).await, StatusCode::FORBIDDEN);
    }
}

mod access;
mod auth_handlers;
mod ballot;
mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Credential-bearing routes. `main` wraps these in the rate limiter and bot guard.
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth_handlers::login))
        .route("/users", post(users::register))
        .route("/access/unlock", post(access::unlock))
}

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(ballot::categories))
        .route("/results", get(ballot::results))
        .route("/access", get(access::status))
}

/// Routes whose handlers take an [`AuthUser`](crate::auth::middleware::AuthUser)
/// or [`AdminUser`](crate::auth::middleware::AdminUser).
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(auth_handlers::logout))
        .route("/users/me", get(users::me))
        .route("/votes", post(ballot::cast_vote))
        .route("/votes/me", get(ballot::my_votes))
        .route("/leadership/reveal", post(ballot::reveal_leadership))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use palmares_core::{AccessSettings, MemoryStore};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::password::hash_password;
    use crate::config::{AdminConfig, ServerConfig};

    const ADMIN_EMAIL: &str = "admin@palmares.ml";
    const ADMIN_PASSWORD: &str = "admin-pass";

    async fn app_with(access: AccessSettings) -> Router {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "test-secret-test-secret-test-secret".to_string();
        config.access = access;
        config.admin = Some(AdminConfig {
            name: "Admin".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
            phone: None,
        });

        let state = AppState::new(config, Arc::new(MemoryStore::new()));
        crate::bootstrap::seed(&state.config, state.store.as_ref())
            .await
            .unwrap();

        Router::new()
            .nest(
                "/api",
                auth_router().merge(public_router()).merge(protected_router()),
            )
            .with_state(state)
    }

    async fn app() -> Router {
        app_with(AccessSettings::default()).await
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("user-agent", "Mozilla/5.0");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn register_and_login(app: &Router, email: &str) -> String {
        let (status, _) = send(
            app,
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "name": "Awa", "email": email, "password": "s3cret!" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": "s3cret!" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    async fn admin_token(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "super_admin");
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn register_login_vote_and_tally() {
        let app = app().await;
        let token = register_and_login(&app, "Awa@Example.ML").await;

        let (status, me) = send(&app, Method::GET, "/api/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["email"], "awa@example.ml");
        assert_eq!(me["role"], "voter");

        let vote = json!({ "category_id": "meilleure-chanson", "candidate_id": "mc-1" });
        let (status, _) = send(&app, Method::POST, "/api/votes", Some(&token), Some(vote.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, Method::POST, "/api/votes", Some(&token), Some(vote)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);

        let (_, mine) = send(&app, Method::GET, "/api/votes/me", Some(&token), None).await;
        assert_eq!(mine.as_array().unwrap().len(), 1);

        let (status, results) = send(&app, Method::GET, "/api/results", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(results["total_votes"], 1);
        assert_eq!(results["unique_voters"], 1);
        let song = results["categories"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["category_id"] == "meilleure-chanson")
            .unwrap();
        assert_eq!(song["results"][0]["candidate_id"], "mc-1");
        assert_eq!(song["results"][0]["percentage"], 100.0);
        assert_eq!(song["results"][0]["percentage_label"], "100.0");
    }

    #[tokio::test]
    async fn login_rejections() {
        let app = app().await;
        register_and_login(&app, "awa@example.ml").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "awa@example.ml", "password": "wrong-pass" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@example.ml", "password": "s3cret!" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "password": "s3cret!" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn registration_validation() {
        let app = app().await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "name": "Awa", "phone": "+22370000000", "password": "12345" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "name": "Admin bis", "email": ADMIN_EMAIL, "password": "s3cret!" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn logout_revokes_token() {
        let app = app().await;
        let token = register_and_login(&app, "awa@example.ml").await;

        let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/api/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Token has been revoked");
    }

    #[tokio::test]
    async fn stale_token_still_reads_public_categories() {
        let app = app().await;
        let token = register_and_login(&app, "awa@example.ml").await;
        let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/api/categories", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(leadership(&body).get("winner").is_none());

        let (status, _) = send(&app, Method::GET, "/api/categories", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_need_a_token() {
        let app = app().await;
        let (status, _) = send(&app, Method::GET, "/api/votes/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, Method::GET, "/api/users/me", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    fn leadership(categories: &Value) -> &Value {
        categories["categories"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["is_leadership_prize"] == true)
            .unwrap()
    }

    #[tokio::test]
    async fn leadership_winner_hidden_until_revealed() {
        let app = app().await;
        let voter = register_and_login(&app, "awa@example.ml").await;
        let admin = admin_token(&app).await;

        let (_, public) = send(&app, Method::GET, "/api/categories", None, None).await;
        assert_eq!(public["leadership_revealed"], false);
        assert!(leadership(&public).get("winner").is_none());

        let (_, as_admin) = send(&app, Method::GET, "/api/categories", Some(&admin), None).await;
        assert!(leadership(&as_admin)["winner"]["name"].is_string());

        let (status, _) =
            send(&app, Method::POST, "/api/leadership/reveal", Some(&voter), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) =
            send(&app, Method::POST, "/api/leadership/reveal", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, public) = send(&app, Method::GET, "/api/categories", None, None).await;
        assert_eq!(public["leadership_revealed"], true);
        assert!(leadership(&public)["winner"]["name"].is_string());
    }

    #[tokio::test]
    async fn leadership_prize_is_not_votable() {
        let app = app().await;
        let token = register_and_login(&app, "awa@example.ml").await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/votes",
            Some(&token),
            Some(json!({ "category_id": "trophee-leadership", "candidate_id": "mc-1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn categories_carry_their_candidates() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/categories", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let song = body["categories"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == "meilleure-chanson")
            .unwrap();
        let candidates = song["candidates"].as_array().unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c["category_id"] == "meilleure-chanson"));
    }

    #[tokio::test]
    async fn access_gate_blocks_votes_until_unlocked() {
        let app = app_with(AccessSettings {
            blocked: true,
            activation_code_hash: Some(hash_password("open-sesame").unwrap()),
            message: "Ballot paused".to_string(),
            ..AccessSettings::default()
        })
        .await;
        let token = register_and_login(&app, "awa@example.ml").await;

        let (_, status_body) = send(&app, Method::GET, "/api/access", None, None).await;
        assert_eq!(status_body["blocked"], true);
        assert_eq!(status_body["message"], "Ballot paused");

        let vote = json!({ "category_id": "meilleure-chanson", "candidate_id": "mc-2" });
        let (status, _) = send(&app, Method::POST, "/api/votes", Some(&token), Some(vote.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/access/unlock",
            None,
            Some(json!({ "code": "guess" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/access/unlock",
            None,
            Some(json!({ "code": "open-sesame" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blocked"], false);

        let (status, _) = send(&app, Method::POST, "/api/votes", Some(&token), Some(vote)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn unlock_without_configured_code_is_forbidden() {
        let app = app_with(AccessSettings {
            blocked: true,
            ..AccessSettings::default()
        })
        .await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/access/unlock",
            None,
            Some(json!({ "code": "anything" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

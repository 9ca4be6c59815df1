//! Authentication API integration tests
//!
//! Signup, the OAuth2 password token endpoint, and bearer-token access to
//! `/users/me/`.

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chatwire::backend::routes::create_router;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::common::{create_test_user, test_state, TestDatabase};
    use crate::integration::api::{get_request, json_request, send};

    fn login_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={}&password={}", username, password)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_signup_then_login_then_me() {
        let db = TestDatabase::new().await;
        let app = create_router(test_state(Some(db.pool().clone())));

        let (status, body) = send(
            &app,
            json_request("POST", "/users/", None, json!({"username": "alice", "password": "correct-horse"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice");
        assert_eq!(body["is_active"], true);
        assert!(body.get("hashed_password").is_none());

        let (status, body) = send(&app, login_request("alice", "correct-horse")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "bearer");
        let token = body["access_token"].as_str().expect("token missing").to_string();

        let (status, body) = send(&app, get_request("/users/me/", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice");
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_rejected() {
        let db = TestDatabase::new().await;
        let app = create_router(test_state(Some(db.pool().clone())));
        let signup = json!({"username": "alice", "password": "correct-horse"});

        let (status, _) = send(&app, json_request("POST", "/users/", None, signup.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, json_request("POST", "/users/", None, signup)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username already registered");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let db = TestDatabase::new().await;
        let state = test_state(Some(db.pool().clone()));
        create_test_user(db.pool(), &state.tokens, "alice", "correct-horse").await;
        let app = create_router(state);

        let (status, body) = send(&app, login_request("alice", "wrong-horse")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Incorrect username or password");

        let (status, _) = send(&app, login_request("nobody", "correct-horse")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_me_requires_valid_token() {
        let db = TestDatabase::new().await;
        let app = create_router(test_state(Some(db.pool().clone())));

        let (status, _) = send(&app, get_request("/users/me/", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, get_request("/users/me/", Some("not-a-jwt"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Could not validate credentials");
    }

    #[tokio::test]
    async fn test_token_for_deleted_user_is_rejected() {
        let db = TestDatabase::new().await;
        let state = test_state(Some(db.pool().clone()));
        let user = create_test_user(db.pool(), &state.tokens, "alice", "correct-horse").await;
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id)
            .execute(db.pool())
            .await
            .unwrap();
        let app = create_router(state);

        let (status, _) = send(&app, get_request("/users/me/", Some(&user.token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_protected_routes_without_database() {
        let app = create_router(test_state(None));

        let (status, _) = send(
            &app,
            json_request("POST", "/users/", None, json!({"username": "alice", "password": "correct-horse"})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}

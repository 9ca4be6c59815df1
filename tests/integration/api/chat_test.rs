//! Channel and message API integration tests

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chatwire::backend::routes::create_router;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::common::{create_test_user, test_state, TestDatabase};
    use crate::integration::api::{get_request, json_request, send};

    #[tokio::test]
    async fn test_create_channel_and_reject_duplicate() {
        let db = TestDatabase::new().await;
        let state = test_state(Some(db.pool().clone()));
        let user = create_test_user(db.pool(), &state.tokens, "alice", "correct-horse").await;
        let app = create_router(state);

        let (status, body) = send(
            &app,
            json_request("POST", "/channels/", Some(&user.token), json!({"name": "general"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "general");
        assert_eq!(body["is_private"], true);
        assert!(body["id"].as_i64().is_some());

        let (status, body) = send(
            &app,
            json_request("POST", "/channels/", Some(&user.token), json!({"name": "general"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Channel already exists");
    }

    #[tokio::test]
    async fn test_channel_creation_requires_auth() {
        let db = TestDatabase::new().await;
        let app = create_router(test_state(Some(db.pool().clone())));

        let (status, _) = send(&app, json_request("POST", "/channels/", None, json!({"name": "general"}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_post_and_list_messages() {
        let db = TestDatabase::new().await;
        let state = test_state(Some(db.pool().clone()));
        let user = create_test_user(db.pool(), &state.tokens, "alice", "correct-horse").await;
        let app = create_router(state);

        let (_, channel) = send(
            &app,
            json_request("POST", "/channels/", Some(&user.token), json!({"name": "general"})),
        )
        .await;
        let channel_id = channel["id"].as_i64().unwrap();
        let uri = format!("/channels/{}/messages/", channel_id);

        for content in ["first", "second"] {
            let (status, body) = send(
                &app,
                json_request("POST", &uri, Some(&user.token), json!({"content": content})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["content"], content);
            assert_eq!(body["sender_id"], user.id);
            assert_eq!(body["channel_id"], channel_id);
        }

        let (status, body) = send(&app, get_request(&uri, Some(&user.token))).await;
        assert_eq!(status, StatusCode::OK);
        let contents: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_post_to_unknown_channel_is_not_found() {
        let db = TestDatabase::new().await;
        let state = test_state(Some(db.pool().clone()));
        let user = create_test_user(db.pool(), &state.tokens, "alice", "correct-horse").await;
        let app = create_router(state);

        let (status, body) = send(
            &app,
            json_request("POST", "/channels/999/messages/", Some(&user.token), json!({"content": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Channel not found");
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let db = TestDatabase::new().await;
        let state = test_state(Some(db.pool().clone()));
        let user = create_test_user(db.pool(), &state.tokens, "alice", "correct-horse").await;
        let app = create_router(state);

        let (_, channel) = send(
            &app,
            json_request("POST", "/channels/", Some(&user.token), json!({"name": "general"})),
        )
        .await;
        let uri = format!("/channels/{}/messages/", channel["id"]);

        let (status, _) = send(&app, json_request("POST", &uri, Some(&user.token), json!({"content": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, get_request(&uri, Some(&user.token))).await;
        assert_eq!(body.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = create_router(test_state(None));
        let (status, _) = send(&app, get_request("/nope", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

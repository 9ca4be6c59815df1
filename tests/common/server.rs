//! Test server and WebSocket client helpers

use std::net::SocketAddr;
use std::time::Duration;

use chatwire::backend::realtime::ChannelRegistry;
use chatwire::backend::routes::create_router;
use chatwire::backend::server::{AppState, ServerConfig};
use chatwire::shared::ChannelId;
use futures_util::StreamExt;
use sqlx::SqlitePool;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long a test waits for something that should happen
pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long a test waits to be sure something does not happen
pub const SILENCE: Duration = Duration::from_millis(200);

/// Configuration tuned for tests
pub fn test_config() -> ServerConfig {
    ServerConfig::builder()
        .bcrypt_cost(super::TEST_BCRYPT_COST)
        .jwt_secret("integration-test-secret")
        .delivery_timeout(Duration::from_millis(500))
        .build()
        .expect("Invalid test configuration")
}

pub fn test_state(pool: Option<SqlitePool>) -> AppState {
    AppState::new(test_config(), pool)
}

/// A running server on an ephemeral local port
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
}

impl TestServer {
    pub async fn start(state: AppState) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");
        let app = create_router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });
        Self { addr, state }
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.state.registry
    }

    pub fn ws_url(&self, channel_id: ChannelId) -> String {
        format!("ws://{}/ws/{}", self.addr, channel_id)
    }

    /// Connect to a channel and wait until the server has registered the session
    pub async fn join(&self, channel_id: ChannelId) -> WsClient {
        let before = self.registry().subscriber_count(channel_id);
        let (client, _) = connect_async(self.ws_url(channel_id))
            .await
            .expect("WebSocket handshake failed");
        self.wait_for_subscribers(channel_id, before + 1).await;
        client
    }

    pub async fn wait_for_subscribers(&self, channel_id: ChannelId, expected: usize) {
        let registry = self.registry();
        tokio::time::timeout(RECV_TIMEOUT, async {
            while registry.subscriber_count(channel_id) != expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap_or_else(|_| {
            panic!(
                "channel {} has {} subscribers, expected {}",
                channel_id,
                registry.subscriber_count(channel_id),
                expected
            )
        });
    }
}

/// Next text frame, skipping control frames; `None` on close or timeout
pub async fn next_text(client: &mut WsClient) -> Option<String> {
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    loop {
        let frame = tokio::time::timeout_at(deadline, client.next()).await.ok()??;
        match frame.ok()? {
            Message::Text(text) => return Some(text.as_str().to_owned()),
            Message::Ping(_) | Message::Pong(_) => continue,
            _ => return None,
        }
    }
}

/// Assert that no text frame arrives within `SILENCE`
pub async fn assert_silent(client: &mut WsClient) {
    if let Ok(Some(Ok(Message::Text(text)))) = tokio::time::timeout(SILENCE, client.next()).await {
        panic!("unexpected frame: {}", text.as_str());
    }
}

/// Wait until the server closes the connection
pub async fn expect_closed(client: &mut WsClient) {
    let closed = tokio::time::timeout(RECV_TIMEOUT, async {
        while let Some(frame) = client.next().await {
            match frame {
                Ok(Message::Close(_)) | Err(_) => return,
                Ok(_) => continue,
            }
        }
    })
    .await;
    assert!(closed.is_ok(), "connection was not closed");
}

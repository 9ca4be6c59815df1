//! Real-time Fan-out Module
//!
//! Pushes chat messages to every live WebSocket connection subscribed to a
//! channel.
//!
//! # Architecture
//!
//! - **`registry`** - `ChannelRegistry`: which sessions are subscribed to
//!   which channel, and the `broadcast` primitive
//! - **`session`** - `Session`: lifecycle of one connection (join, read,
//!   write, leave)
//! - **`protocol`** - text frame encoding and decoding
//! - **`handler`** - the `GET /ws/{channel_id}` upgrade endpoint
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs      - Module exports and documentation
//! ├── registry.rs - Channel subscription registry
//! ├── session.rs  - Per-connection session
//! ├── protocol.rs - Wire framing
//! └── handler.rs  - WebSocket upgrade handler
//! ```
//!
//! # Delivery
//!
//! The registry holds one bounded queue sender per session. `broadcast`
//! offers the payload to each queue concurrently, with a per-subscriber
//! timeout; a queue that is closed or stays full is dropped from the
//! channel. Each session's writer drains its own queue into its socket, so
//! a slow socket never stalls delivery to the others.
//!
//! Broadcasts are best-effort: a message posted while a client is still
//! joining may be missed, and nothing is queued for offline clients.
//! History is available over the REST API.
//!
//! Inbound frames share the REST size limit (`MAX_CONTENT_LEN` bytes); a
//! larger frame is a read failure and ends the session.
//!
//! # Access Control
//!
//! None. `is_private` is stored on channels but any client may connect to
//! any existing channel.

/// Channel subscription registry
pub mod registry;

/// Per-connection session lifecycle
pub mod session;

/// Wire framing
pub mod protocol;

/// WebSocket upgrade handler
pub mod handler;

pub use handler::handle_channel_socket;
pub use registry::{ChannelRegistry, DeliveryReport, Payload, SessionId};
pub use session::{CloseReason, Session, SessionConfig, SessionState};

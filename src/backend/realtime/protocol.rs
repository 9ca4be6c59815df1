/**
 * Real-time Wire Protocol
 *
 * Frames are plain UTF-8 text in both directions. An inbound text frame is
 * a chat message whose content is forwarded verbatim; an outbound frame
 * carries exactly the broadcast payload. There is no envelope, no
 * acknowledgement frame and no application-level heartbeat.
 *
 * Ping/pong are left to the WebSocket layer (axum answers pings itself).
 * Binary frames are not part of the protocol and end the session.
 */

use axum::extract::ws::Message;

use crate::backend::realtime::registry::Payload;

/// Classified inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Chat message text, unchanged
    Chat(String),
    /// Transport-level control frame, nothing to do
    Control,
    /// The client asked to close the connection
    Close,
    /// A frame this protocol does not accept
    Invalid(String),
}

/// Classify one frame read from the socket
pub fn decode(message: Message) -> Inbound {
    match message {
        Message::Text(text) => Inbound::Chat(text.as_str().to_owned()),
        Message::Ping(_) | Message::Pong(_) => Inbound::Control,
        Message::Close(_) => Inbound::Close,
        Message::Binary(bytes) => Inbound::Invalid(format!(
            "binary frames are not supported ({} bytes)",
            bytes.len()
        )),
    }
}

/// Frame for one outbound broadcast payload
pub fn encode(payload: &Payload) -> Message {
    Message::Text(payload.as_ref().into())
}

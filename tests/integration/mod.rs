//! Integration tests
//!
//! Tests that exercise the HTTP API and the WebSocket fan-out end to end.

pub mod api;
pub mod realtime;

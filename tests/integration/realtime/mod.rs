//! Real-time integration tests
//!
//! A real server on an ephemeral port, driven by WebSocket clients.

//! Common test utilities and helpers
//!
//! - Database fixtures
//! - Authentication helpers
//! - Test server and WebSocket client helpers

#![allow(dead_code)]

pub mod auth_helpers;
pub mod database;
pub mod server;

pub use auth_helpers::*;
pub use database::*;
pub use server::*;

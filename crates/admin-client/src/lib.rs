//! # Console Admin Client
//!
//! Typed async access to the identity server's admin REST API.
//!
//! One [`AdminClient`] is created at startup from the [`ConsoleConfig`] and
//! shared by the whole UI. Failures come back as
//! [`ConsoleError::Api`](kc_console_core::ConsoleError::Api) carrying the HTTP
//! status and the backend's own message.
//!
//! [`ConsoleConfig`]: kc_console_core::ConsoleConfig

mod auth;
mod client;
mod endpoints;

pub use client::AdminClient;

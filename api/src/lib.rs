//! HTTP gateway for phone verification.
//!
//! Exposes the verification gateway over actix-web with CORS, a per-source
//! rate limit on `/api/*` and security headers on every response.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod tls;

pub use app::{create_app, AppState};

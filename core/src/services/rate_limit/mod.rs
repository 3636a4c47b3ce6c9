//! Request-rate governor
//!
//! A fixed-window counter keyed by source address. Windows expire on their
//! own schedule and are dropped by [`InMemoryRateLimiter::purge_expired`].

mod limiter;


pub use limiter::{InMemoryRateLimiter, RateLimitDecision, RateLimiterTrait};

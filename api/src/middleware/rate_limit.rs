//! Rate limiting middleware for API endpoints
//!
//! Counts every request per source address with a shared
//! [`RateLimiterTrait`] implementation. Allowed responses carry the
//! `RateLimit-*` headers; rejected ones get 429 plus `Retry-After`.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, HeaderName, HeaderValue},
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use pv_core::errors::DomainError;
use pv_core::services::{RateLimitDecision, RateLimiterTrait};
use pv_shared::RateLimitConfig;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::ApiError;

const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

/// Rate limiter middleware factory
pub struct RateLimit<R> {
    limiter: Arc<R>,
    enabled: bool,
    trust_proxy: bool,
}

impl<R: RateLimiterTrait> RateLimit<R> {
    pub fn new(limiter: Arc<R>, config: &RateLimitConfig) -> Self {
        Self {
            limiter,
            enabled: config.enabled,
            trust_proxy: config.trust_proxy,
        }
    }
}

impl<S, B, R> Transform<S, ServiceRequest> for RateLimit<R>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    R: RateLimiterTrait + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S, R>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: Arc::clone(&self.limiter),
            enabled: self.enabled,
            trust_proxy: self.trust_proxy,
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimitMiddleware<S, R> {
    service: Rc<S>,
    limiter: Arc<R>,
    enabled: bool,
    trust_proxy: bool,
}

impl<S, B, R> Service<ServiceRequest> for RateLimitMiddleware<S, R>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    R: RateLimiterTrait + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if !self.enabled {
            return Box::pin(async move { Ok(service.call(req).await?.map_into_left_body()) });
        }

        let limiter = Arc::clone(&self.limiter);
        let key = client_key(&req, self.trust_proxy);

        Box::pin(async move {
            let decision = limiter.hit(&key).await;

            if !decision.allowed {
                log::warn!(
                    "Rate limit exceeded for {} on {} {}",
                    key,
                    req.method(),
                    req.path()
                );
                let mut response = ApiError::from(DomainError::RateLimited {
                    retry_after_secs: decision.reset_after_secs(),
                })
                .error_response();
                insert_rate_limit_headers(response.headers_mut(), &decision);
                return Ok(req.into_response(response).map_into_right_body());
            }

            let mut response = service.call(req).await?;
            insert_rate_limit_headers(response.headers_mut(), &decision);
            Ok(response.map_into_left_body())
        })
    }
}

/// Source address a request is counted against.
///
/// The first `X-Forwarded-For` hop is used only when the gateway sits
/// behind a trusted proxy; otherwise the peer IP.
pub fn client_key(req: &ServiceRequest, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn insert_rate_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));
    headers.insert(RATELIMIT_RESET, HeaderValue::from(decision.reset_after_secs()));
}

//! Per-IP fixed window rate limiting
//!
//! Counters live in process memory behind one mutex shared by every worker.
//! Each client IP gets `max_requests` per window; the window starts with the
//! first request and resets once it has fully elapsed.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    collections::HashMap,
    future::{ready, Ready},
    rc::Rc,
    sync::{Arc, Mutex},
    task::{Context, Poll},
    time::{Duration, Instant},
};

use vg_shared::{error_codes, ErrorResponse, RateLimitConfig};

/// Windows are pruned once the map grows past this many clients
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Decision for a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Seconds until the current window resets
    pub reset_after_seconds: u64,
}

/// Shared fixed window counters keyed by client IP
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count a request from `key` at `now`
    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        if windows.len() > PRUNE_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        let allowed = entry.count < self.max_requests;
        if allowed {
            entry.count += 1;
        }

        let elapsed = now.duration_since(entry.started);
        let reset = self.window.saturating_sub(elapsed);
        let reset_after_seconds = reset.as_secs() + u64::from(reset.subsec_nanos() > 0);

        RateLimitDecision {
            allowed,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(entry.count),
            reset_after_seconds,
        }
    }

    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }
}

/// Rate limiter middleware factory
///
/// Clones share counters, so one instance can be handed to every worker.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    limiter: Option<Arc<FixedWindowLimiter>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        if !config.enabled {
            log::info!("Rate limiting disabled");
            return Self::disabled();
        }
        log::info!(
            "Rate limiting {} requests per {} seconds per client",
            config.max_requests,
            config.window_seconds
        );
        Self {
            limiter: Some(Arc::new(FixedWindowLimiter::new(
                config.max_requests,
                Duration::from_secs(config.window_seconds),
            ))),
        }
    }

    pub fn disabled() -> Self {
        Self { limiter: None }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    limiter: Option<Arc<FixedWindowLimiter>>,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let Some(limiter) = self.limiter.clone() else {
            return Box::pin(async move { Ok(service.call(req).await?.map_into_left_body()) });
        };

        Box::pin(async move {
            let ip = get_client_ip(&req);
            let decision = limiter.check(&ip);

            if !decision.allowed {
                log::warn!("Rate limit exceeded for {} on {}", ip, req.path());
                let response = HttpResponse::TooManyRequests().json(ErrorResponse::new(
                    error_codes::RATE_LIMIT_EXCEEDED,
                    "Too many requests, please try again later.",
                ));
                let mut res = req.into_response(response).map_into_right_body();
                add_rate_limit_headers(&mut res, &decision);
                return Ok(res);
            }

            let mut res = service.call(req).await?.map_into_left_body();
            add_rate_limit_headers(&mut res, &decision);
            Ok(res)
        })
    }
}

fn add_rate_limit_headers<B>(res: &mut ServiceResponse<B>, decision: &RateLimitDecision) {
    let headers = res.headers_mut();
    let values = [
        ("x-rate-limit-limit", decision.limit as u64),
        ("x-rate-limit-remaining", decision.remaining as u64),
        ("x-rate-limit-reset", decision.reset_after_seconds),
    ];
    for (name, value) in values {
        headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
    }
}

/// Get client IP address from request
fn get_client_ip(req: &ServiceRequest) -> String {
    // first hop of X-Forwarded-For
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next().map(str::trim) {
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            if !ip_str.trim().is_empty() {
                return ip_str.trim().to_string();
            }
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

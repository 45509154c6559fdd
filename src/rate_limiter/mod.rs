/*!
 * # Rate Limiting Module
 *
 * In-memory fixed-window rate limiter for API requests, keyed by client IP.
 * Counters live in a process-local [`DashMap`], so limits apply per server
 * instance.
 *
 * ## Features
 *
 * - Configurable limit and window through application config
 * - Standard rate limit headers (X-RateLimit-*)
 * - Health and documentation paths are exempt
 *
 * ## Usage
 *
 * ```ignore
 * let config = RateLimitConfig {
 *     requests_per_window: 100,
 *     window_duration: Duration::from_secs(60),
 *     ..Default::default()
 * };
 *
 * let api = Router::new()
 *     .route("/", get(handler))
 *     .layer(RateLimitLayer::new(config));
 * ```
 */
use axum::{extract::Request, http::Response, response::IntoResponse};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// Helper function to convert a number to a HeaderValue.
/// Numeric strings are always valid ASCII header values.
fn num_to_header_value<T: ToString>(n: T) -> http::HeaderValue {
    http::HeaderValue::from_str(&n.to_string())
        .unwrap_or_else(|_| http::HeaderValue::from_static("0"))
}

#[derive(Debug, Clone)]
struct RateLimitEntry {
    count: u32,
    window_start: Instant,
    last_request: Instant,
}

impl RateLimitEntry {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            count: 1,
            window_start: now,
            last_request: now,
        }
    }

    fn increment(&mut self, window_duration: Duration) {
        let now = Instant::now();

        // Reset if window has expired
        if now.duration_since(self.window_start) >= window_duration {
            self.count = 1;
            self.window_start = now;
        } else {
            self.count += 1;
        }

        self.last_request = now;
    }

    fn is_allowed(&self, limit: u32, window_duration: Duration) -> bool {
        let now = Instant::now();

        // An expired window always admits the request
        if now.duration_since(self.window_start) >= window_duration {
            return true;
        }

        self.count <= limit
    }

    fn time_until_reset(&self, window_duration: Duration) -> Duration {
        let elapsed = self.last_request.duration_since(self.window_start);
        if elapsed >= window_duration {
            Duration::from_secs(0)
        } else {
            window_duration - elapsed
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_window: u32,
    pub window_duration: Duration,
    pub enable_headers: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 100,
            window_duration: Duration::from_secs(60),
            enable_headers: true,
        }
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    entries: Arc<DashMap<String, RateLimitEntry>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            config,
        }
    }

    pub fn check_rate_limit(&self, key: &str) -> RateLimitResult {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(RateLimitEntry::new);

        if !entry.is_allowed(
            self.config.requests_per_window,
            self.config.window_duration,
        ) {
            let time_until_reset = entry.time_until_reset(self.config.window_duration);
            return RateLimitResult {
                allowed: false,
                limit: self.config.requests_per_window,
                remaining: 0,
                reset_time: time_until_reset,
            };
        }

        entry.increment(self.config.window_duration);
        let remaining = self.config.requests_per_window.saturating_sub(entry.count);
        let time_until_reset = entry.time_until_reset(self.config.window_duration);

        RateLimitResult {
            allowed: true,
            limit: self.config.requests_per_window,
            remaining,
            reset_time: time_until_reset,
        }
    }

    pub fn get_remaining_quota(&self, key: &str) -> u32 {
        if let Some(entry) = self.entries.get(key) {
            let now = Instant::now();
            if now.duration_since(entry.window_start) >= self.config.window_duration {
                self.config.requests_per_window
            } else {
                self.config.requests_per_window.saturating_sub(entry.count)
            }
        } else {
            self.config.requests_per_window
        }
    }

    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| {
            now.duration_since(entry.window_start) < self.config.window_duration
        });
    }
}

#[derive(Debug)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_time: Duration,
}

/// Extracts the rate limit key for a request from proxy headers, falling
/// back to a shared bucket when no client address is visible.
pub fn extract_ip_key(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                return format!("ip:{}", ip.trim());
            }
        }
    }

    if let Some(real_ip) = request.headers().get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            return format!("ip:{}", ip_str);
        }
    }

    "ip:unknown".to_string()
}

// Background cleanup task
pub async fn start_cleanup_task(rate_limiter: RateLimiter, interval: Duration) {
    let mut interval_timer = tokio::time::interval(interval);

    loop {
        interval_timer.tick().await;
        rate_limiter.cleanup_expired();
        debug!("Rate limiter cleanup completed");
    }
}

// Layer implementation for tower
#[derive(Clone)]
pub struct RateLimitLayer {
    rate_limiter: RateLimiter,
}

impl RateLimitLayer {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            rate_limiter: RateLimiter::new(config),
        }
    }

    /// Handle on the shared limiter, for the background cleanup task.
    pub fn limiter(&self) -> RateLimiter {
        self.rate_limiter.clone()
    }
}

impl<S> tower::Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            rate_limiter: self.rate_limiter.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    rate_limiter: RateLimiter,
}

impl<S> tower::Service<Request> for RateLimitService<S>
where
    S: tower::Service<Request, Response = Response<axum::body::Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response<axum::body::Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let rate_limiter = self.rate_limiter.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Health and documentation stay reachable when a client is throttled
            let path = request.uri().path();
            if path.starts_with("/health")
                || path.starts_with("/docs")
                || path.starts_with("/api-docs")
            {
                return inner.call(request).await;
            }

            let key = extract_ip_key(&request);
            let result = rate_limiter.check_rate_limit(&key);

            if !result.allowed {
                warn!("Rate limit exceeded for key: {}", key);

                let mut response = ServiceError::RateLimitExceeded.into_response();

                if rate_limiter.config.enable_headers {
                    let headers = response.headers_mut();
                    let _ = headers.insert("X-RateLimit-Limit", num_to_header_value(result.limit));
                    let _ = headers.insert("X-RateLimit-Remaining", num_to_header_value(0));
                    let _ = headers.insert(
                        "X-RateLimit-Reset",
                        num_to_header_value(result.reset_time.as_secs()),
                    );
                }

                return Ok(response);
            }

            let mut response = inner.call(request).await?;

            if rate_limiter.config.enable_headers {
                let headers = response.headers_mut();
                let _ = headers.insert("X-RateLimit-Limit", num_to_header_value(result.limit));
                let _ = headers.insert(
                    "X-RateLimit-Remaining",
                    num_to_header_value(result.remaining),
                );
                let _ = headers.insert(
                    "X-RateLimit-Reset",
                    num_to_header_value(result.reset_time.as_secs()),
                );
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_over_the_limit_are_denied() {
        let config = RateLimitConfig {
            requests_per_window: 2,
            window_duration: Duration::from_secs(60),
            ..Default::default()
        };

        let limiter = RateLimiter::new(config);

        assert!(limiter.check_rate_limit("test_key").allowed);
        assert!(limiter.check_rate_limit("test_key").allowed);
        assert!(!limiter.check_rate_limit("test_key").allowed);
    }

    #[test]
    fn different_keys_have_separate_limits() {
        let config = RateLimitConfig {
            requests_per_window: 1,
            window_duration: Duration::from_secs(60),
            ..Default::default()
        };

        let limiter = RateLimiter::new(config);

        assert!(limiter.check_rate_limit("key1").allowed);
        assert!(limiter.check_rate_limit("key2").allowed);

        assert!(!limiter.check_rate_limit("key1").allowed);
        assert!(!limiter.check_rate_limit("key2").allowed);
    }

    #[test]
    fn quota_decreases_with_each_request() {
        let config = RateLimitConfig {
            requests_per_window: 5,
            window_duration: Duration::from_secs(60),
            ..Default::default()
        };

        let limiter = RateLimiter::new(config);

        assert_eq!(limiter.get_remaining_quota("test_key"), 5);

        assert!(limiter.check_rate_limit("test_key").allowed);
        assert_eq!(limiter.get_remaining_quota("test_key"), 4);
    }

    #[test]
    fn ip_key_prefers_forwarded_header() {
        let request = Request::builder()
            .uri("/api/medications")
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .header("x-real-ip", "10.0.0.1")
            .body(axum::body::Body::empty())
            .unwrap();

        assert_eq!(extract_ip_key(&request), "ip:203.0.113.9");
    }

    #[test]
    fn ip_key_falls_back_to_real_ip_then_unknown() {
        let with_real_ip = Request::builder()
            .uri("/api/medications")
            .header("x-real-ip", "198.51.100.4")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(extract_ip_key(&with_real_ip), "ip:198.51.100.4");

        let bare = Request::builder()
            .uri("/api/medications")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(extract_ip_key(&bare), "ip:unknown");
    }

    #[test]
    fn cleanup_retains_entries_in_open_windows() {
        let config = RateLimitConfig {
            requests_per_window: 5,
            window_duration: Duration::from_secs(60),
            ..Default::default()
        };

        let limiter = RateLimiter::new(config);
        limiter.check_rate_limit("live_key");
        limiter.cleanup_expired();

        assert_eq!(limiter.get_remaining_quota("live_key"), 4);
    }
}

//! Fixed-window request limiting per client IP.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::interfaces::http::error::ApiError;
use crate::state::AppState;

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

// Stale windows are swept once the table grows past this, at most once per window.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// At most `limit` requests per client in each window. Windows start at the
/// client's first request and do not slide.
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    sweep_threshold: usize,
    last_sweep: Mutex<Option<Instant>>,
    clients: DashMap<IpAddr, Window>,
}

impl FixedWindowLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            sweep_threshold: SWEEP_THRESHOLD,
            last_sweep: Mutex::new(None),
            clients: DashMap::new(),
        }
    }

    pub fn with_sweep_threshold(mut self, threshold: usize) -> Self {
        self.sweep_threshold = threshold;
        self
    }

    /// Count a request from `ip` at `now`. Returns false once the window is full.
    pub fn check(&self, ip: IpAddr, now: Instant) -> bool {
        if self.clients.len() > self.sweep_threshold {
            self.sweep(now);
        }

        let mut entry = self.clients.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.saturating_duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }
        if entry.count >= self.limit {
            return false;
        }
        entry.count += 1;
        true
    }

    fn sweep(&self, now: Instant) {
        // Another caller is already sweeping.
        let Ok(mut last) = self.last_sweep.try_lock() else {
            return;
        };
        if let Some(at) = *last {
            if now.saturating_duration_since(at) < self.window {
                return;
            }
        }
        *last = Some(now);
        let window = self.window;
        self.clients
            .retain(|_, w| now.saturating_duration_since(w.started) < window);
        debug!(remaining = self.clients.len(), "swept rate limit windows");
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}

/// The client a request is counted against.
///
/// Without a proxy in front, `X-Forwarded-For` is whatever the client sent, so
/// only the socket peer counts. Behind a trusted proxy the last hop is the one
/// the proxy appended.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> IpAddr {
    let forwarded = if trust_proxy {
        headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit(',').next())
            .and_then(|last| last.trim().parse::<IpAddr>().ok())
    } else {
        None
    };
    forwarded
        .or_else(|| peer.map(|p| p.ip()))
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn rate_limit(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(request.headers(), peer, state.config.server.trust_proxy);

    if !state.limiter.check(ip, Instant::now()) {
        warn!(%ip, path = %request.uri().path(), "rate limit exceeded");
        return ApiError::new(StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE, "RATE_LIMITED")
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn thirty_first_request_is_refused() {
        let limiter = FixedWindowLimiter::new(30, Duration::from_secs(60));
        let start = Instant::now();
        for i in 0..30 {
            assert!(limiter.check(ip(1), start + Duration::from_secs(i)), "request {}", i + 1);
        }
        assert!(!limiter.check(ip(1), start + Duration::from_secs(59)));
    }

    #[test]
    fn clients_are_counted_separately() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.check(ip(1), now));
        assert!(!limiter.check(ip(1), now));
        assert!(limiter.check(ip(2), now));
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn new_window_resets_the_count() {
        let limiter = FixedWindowLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check(ip(1), start));
        assert!(limiter.check(ip(1), start + Duration::from_secs(10)));
        assert!(!limiter.check(ip(1), start + Duration::from_secs(59)));
        assert!(limiter.check(ip(1), start + Duration::from_secs(60)));
    }

    #[test]
    fn sweeps_at_most_once_per_window() {
        let limiter = FixedWindowLimiter::new(5, Duration::from_secs(60)).with_sweep_threshold(2);
        let start = Instant::now();
        let at = |secs| start + Duration::from_secs(secs);

        limiter.check(ip(1), at(0));
        limiter.check(ip(2), at(30));
        limiter.check(ip(3), at(30));
        assert_eq!(limiter.tracked_clients(), 3);

        // Over the threshold: the first sweep drops the expired window of ip(1).
        limiter.check(ip(4), at(61));
        assert_eq!(limiter.tracked_clients(), 3);

        // ip(2) and ip(3) have expired, but the last sweep was inside this window.
        limiter.check(ip(5), at(95));
        assert_eq!(limiter.tracked_clients(), 4);

        limiter.check(ip(6), at(121));
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn forwarded_header_is_ignored_without_a_proxy() {
        let mut headers = HeaderMap::new();
        let peer: SocketAddr = "192.168.0.9:5000".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(peer), false), peer.ip());

        headers.insert("x-forwarded-for", "203.0.113.7".parse().unwrap());
        assert_eq!(client_ip(&headers, Some(peer), false), peer.ip());
        assert_eq!(client_ip(&headers, None, false), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn trusted_proxy_hop_is_the_last_one() {
        let mut headers = HeaderMap::new();
        let peer: SocketAddr = "192.168.0.9:5000".parse().unwrap();
        headers.insert("x-forwarded-for", "10.9.1.2, 198.51.100.1".parse().unwrap());
        assert_eq!(
            client_ip(&headers, Some(peer), true),
            "198.51.100.1".parse::<IpAddr>().unwrap()
        );

        headers.insert("x-forwarded-for", "garbage".parse().unwrap());
        assert_eq!(client_ip(&headers, Some(peer), true), peer.ip());
        assert_eq!(client_ip(&headers, None, true), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn rotating_the_first_hop_shares_one_window() {
        let limiter = FixedWindowLimiter::new(30, Duration::from_secs(60));
        let now = Instant::now();
        let mut allowed = 0;
        for i in 0..100u32 {
            let mut headers = HeaderMap::new();
            let chain = format!("10.9.{}.{}, 198.51.100.1", i / 256, i % 256);
            headers.insert("x-forwarded-for", chain.parse().unwrap());
            if limiter.check(client_ip(&headers, None, true), now) {
                allowed += 1;
            }
        }
        assert_eq!(allowed, 30);
        assert_eq!(limiter.tracked_clients(), 1);
    }
}

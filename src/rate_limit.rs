//! Rate-limit bookkeeping.
//!
//! GitHub reports the caller's quota on every response through the
//! `X-RateLimit-Limit` and `X-RateLimit-Remaining` headers. The client keeps
//! the last values it saw; nothing in the crate acts on them.

use std::sync::atomic::{AtomicU32, Ordering};

use reqwest::header::HeaderMap;
use serde::Serialize;

/// Quota assumed before the first response arrives.
pub const DEFAULT_CALLS_LIMIT: u32 = 5000;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Last-seen rate-limit counters, shared by every clone of a client.
#[derive(Debug)]
pub struct RateLimit {
    limit: AtomicU32,
    remaining: AtomicU32,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitSnapshot {
    pub limit: u32,
    pub remaining: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self::new(DEFAULT_CALLS_LIMIT, DEFAULT_CALLS_LIMIT)
    }
}

impl RateLimit {
    pub fn new(limit: u32, remaining: u32) -> Self {
        Self {
            limit: AtomicU32::new(limit),
            remaining: AtomicU32::new(remaining),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit.load(Ordering::Relaxed)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> RateLimitSnapshot {
        RateLimitSnapshot {
            limit: self.limit(),
            remaining: self.remaining(),
        }
    }

    /// Store the counters carried by `headers`.
    ///
    /// Both headers must be present and numeric; otherwise nothing changes.
    /// Returns whether the counters were updated.
    pub fn record(&self, headers: &HeaderMap) -> bool {
        let (Some(remaining), Some(limit)) = (
            header_u32(headers, REMAINING_HEADER),
            header_u32(headers, LIMIT_HEADER),
        ) else {
            return false;
        };

        self.remaining.store(remaining, Ordering::Relaxed);
        self.limit.store(limit, Ordering::Relaxed);
        tracing::debug!(limit, remaining, "rate limit updated");
        true
    }
}

fn header_u32(headers: &HeaderMap, name: &str) -> Option<u32> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

//! @ai:module:intent Rate limiting for provider API requests
//! @ai:module:layer infrastructure
//! @ai:module:public_api RateLimiter
//! @ai:module:stateless false

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// @ai:intent Token bucket limiting provider calls to a requests-per-minute budget
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
    requests_per_minute: u32,
}

struct Bucket {
    tokens: f64,
    refilled_at: Instant,
}

impl RateLimiter {
    /// @ai:intent Create a limiter with a full bucket
    /// @ai:pre requests_per_minute > 0
    /// @ai:effects pure
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            bucket: Mutex::new(Bucket {
                tokens: requests_per_minute as f64,
                refilled_at: Instant::now(),
            }),
            requests_per_minute,
        }
    }

    /// @ai:intent Wait until a request is allowed
    /// @ai:effects state:write, time
    pub async fn wait(&self) {
        let per_second = self.requests_per_minute as f64 / 60.0;

        loop {
            let sleep_for = {
                let mut bucket = self.bucket.lock().await;

                let now = Instant::now();
                let elapsed = now.duration_since(bucket.refilled_at).as_secs_f64();
                bucket.tokens =
                    (bucket.tokens + elapsed * per_second).min(self.requests_per_minute as f64);
                bucket.refilled_at = now;

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    return;
                }

                Duration::from_secs_f64((1.0 - bucket.tokens) / per_second)
            };

            tokio::time::sleep(sleep_for).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initial_requests_pass_immediately() {
        let limiter = RateLimiter::new(60);

        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_exhausted_bucket_throttles() {
        let limiter = RateLimiter::new(60);

        for _ in 0..60 {
            limiter.wait().await;
        }

        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(900));
    }
}

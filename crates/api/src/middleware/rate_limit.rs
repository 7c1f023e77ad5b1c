//! OTP verification attempt limiter.
//!
//! One governor keyed limiter holds a bucket of
//! `security.otp_verify_per_minute` cells per phone number. The limiter only
//! exists when that setting is non-zero. Buckets that have refilled carry no
//! state and are dropped by [`OtpVerifyLimiter::prune`].

use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use std::num::NonZeroU32;

pub struct OtpVerifyLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    per_minute: NonZeroU32,
    clock: DefaultClock,
}

impl OtpVerifyLimiter {
    /// `None` when `per_minute` is zero.
    pub fn new(per_minute: u32) -> Option<Self> {
        NonZeroU32::new(per_minute).map(|per_minute| Self {
            limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
            per_minute,
            clock: DefaultClock::default(),
        })
    }

    /// Take one attempt for `phone_number`. `Err` carries the seconds to wait.
    pub fn check(&self, phone_number: &str) -> Result<(), u64> {
        self.limiter
            .check_key(&phone_number.to_string())
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()).as_secs().max(1))
    }

    /// Drops buckets that are back to full capacity. Returns how many remain.
    pub fn prune(&self) -> usize {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        self.limiter.len()
    }

    /// Phone numbers currently tracked.
    pub fn tracked(&self) -> usize {
        self.limiter.len()
    }
}

impl std::fmt::Debug for OtpVerifyLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpVerifyLimiter")
            .field("per_minute", &self.per_minute)
            .field("tracked", &self.tracked())
            .finish()
    }
}

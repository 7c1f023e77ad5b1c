//! Purges expired OTP rows and idle verification buckets.
//!
//! Lookups already ignore expired codes; this only keeps the table and the
//! limiter small.

use std::sync::Arc;

use crate::middleware::OtpVerifyLimiter;
use crate::services::otp::OtpLedger;

use super::scheduler::{Job, JobFrequency};

pub struct OtpCleanupJob {
    otps: OtpLedger,
    limiter: Option<Arc<OtpVerifyLimiter>>,
    interval_secs: u64,
}

impl OtpCleanupJob {
    pub fn new(
        otps: OtpLedger,
        limiter: Option<Arc<OtpVerifyLimiter>>,
        interval_secs: u64,
    ) -> Self {
        Self {
            otps,
            limiter,
            interval_secs,
        }
    }
}

#[async_trait::async_trait]
impl Job for OtpCleanupJob {
    fn name(&self) -> &'static str {
        "otp_cleanup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(self.interval_secs)
    }

    async fn execute(&self) -> anyhow::Result<()> {
        if let Some(limiter) = &self.limiter {
            let tracked = limiter.prune();
            tracing::debug!(tracked, "Pruned OTP verification buckets");
        }

        let removed = self.otps.purge_expired().await?;
        if removed > 0 {
            tracing::info!(removed, "Purged expired OTP codes");
        }
        Ok(())
    }
}

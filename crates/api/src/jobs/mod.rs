//! Background job scheduler and job implementations.

mod otp_cleanup;
mod scheduler;

pub use otp_cleanup::OtpCleanupJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};

//! HTTP middleware components.

pub mod auth;
pub mod logging;
pub mod metrics;
pub mod rate_limit;
pub mod security_headers;
pub mod trace_id;

pub use auth::{is_logged_in, protect, require_admin, restrict_to, CurrentAccount};
pub use metrics::{init_metrics, metrics_handler, metrics_middleware};
pub use rate_limit::OtpVerifyLimiter;
pub use security_headers::security_headers_middleware;
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};

//! Application services and outbound integrations.

pub mod auth;
pub mod cookies;
pub mod email;
pub mod events;
pub mod identity;
pub mod notifications;
pub mod otp;
pub mod session;
pub mod sms;

pub use auth::{AuthError, AuthService, HostSignup, OtpOutcome};
pub use email::{EmailSender, EmailService};
pub use events::{EventError, EventService};
pub use identity::IdentityResolver;
pub use notifications::NotificationPreferencesService;
pub use otp::OtpLedger;
pub use session::SessionIssuer;
pub use sms::{SmsSender, SmsService};
